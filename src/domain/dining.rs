use super::money::MonetaryAmount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed purchase at a participating restaurant, paid by credit card.
///
/// Dinings are facts: once created they are never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dining {
    pub amount: MonetaryAmount,
    pub credit_card: String,
    pub merchant: String,
    pub timestamp: DateTime<Utc>,
}

impl Dining {
    pub fn new(
        amount: MonetaryAmount,
        credit_card: impl Into<String>,
        merchant: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            amount,
            credit_card: credit_card.into(),
            merchant: merchant.into(),
            timestamp,
        }
    }
}

/// Hides all but the last four digits of a credit card number, for logs and
/// error messages. Numbers of four characters or fewer are hidden entirely.
pub fn mask_card(credit_card: &str) -> String {
    let len = credit_card.chars().count();
    let shown = if len > 4 { 4 } else { 0 };
    credit_card
        .chars()
        .enumerate()
        .map(|(i, c)| if i + shown < len { '*' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dining_deserialization() {
        let csv = "amount, credit_card, merchant, timestamp\n100.00, 1234567890123456, 1234567890, 2026-10-19T12:30:00Z";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let mut iter = reader.deserialize();

        let result: Dining = iter
            .next()
            .unwrap()
            .expect("Failed to deserialize dining");

        assert_eq!(result.amount.value(), dec!(100.00));
        assert_eq!(result.credit_card, "1234567890123456");
        assert_eq!(result.merchant, "1234567890");
        assert_eq!(result.timestamp.to_rfc3339(), "2026-10-19T12:30:00+00:00");
    }

    #[test]
    fn test_dining_rejects_negative_amount() {
        let csv = "amount, credit_card, merchant, timestamp\n-5.00, 1, 2, 2026-10-19T12:30:00Z";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let result: Option<Result<Dining, csv::Error>> = reader.deserialize().next();

        assert!(result.unwrap().is_err());
    }

    #[test]
    fn test_mask_card() {
        assert_eq!(mask_card("1234567890123456"), "************3456");
        assert_eq!(mask_card("12345"), "*2345");
        assert_eq!(mask_card("1234"), "****");
        assert_eq!(mask_card(""), "");
    }
}
