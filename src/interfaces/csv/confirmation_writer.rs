use crate::domain::reward::RewardConfirmation;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ConfirmationRow<'a> {
    confirmation: &'a str,
    account: &'a str,
    beneficiary: &'a str,
    amount: String,
    total: String,
}

/// Writes reward confirmations as CSV, one row per beneficiary distribution.
///
/// Columns: `confirmation,account,beneficiary,amount,total`, where `total` is
/// the beneficiary's savings after the reward.
pub struct ConfirmationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ConfirmationWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_confirmation(&mut self, confirmation: &RewardConfirmation) -> Result<()> {
        let contribution = &confirmation.contribution;
        for distribution in &contribution.distributions {
            self.writer.serialize(ConfirmationRow {
                confirmation: &confirmation.confirmation_number,
                account: &contribution.account_number,
                beneficiary: &distribution.beneficiary,
                amount: distribution.amount.to_string(),
                total: distribution.total_savings.to_string(),
            })?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
