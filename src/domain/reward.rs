use super::dining::Dining;
use super::money::{MonetaryAmount, Percentage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One beneficiary's part of a contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub beneficiary: String,
    pub amount: MonetaryAmount,
    pub percentage: Percentage,
    /// The beneficiary's savings after this distribution was applied.
    pub total_savings: MonetaryAmount,
}

/// The outcome of crediting an amount to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountContribution {
    pub account_number: String,
    pub amount: MonetaryAmount,
    pub distributions: Vec<Distribution>,
}

impl AccountContribution {
    pub fn distribution(&self, beneficiary: &str) -> Option<&Distribution> {
        self.distributions
            .iter()
            .find(|d| d.beneficiary == beneficiary)
    }

    /// Sum of every distribution; equals `amount` for any contribution an
    /// account produces.
    pub fn distributed_total(&self) -> MonetaryAmount {
        self.distributions.iter().map(|d| d.amount).sum()
    }
}

/// Proof that a contribution was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardConfirmation {
    pub confirmation_number: String,
    pub contribution: AccountContribution,
}

/// The row a reward repository keeps for each confirmed reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRecord {
    pub confirmation_number: String,
    pub reward_amount: MonetaryAmount,
    pub reward_date: DateTime<Utc>,
    pub account_number: String,
    pub dining_merchant_number: String,
    pub dining_date: DateTime<Utc>,
    pub dining_amount: MonetaryAmount,
}

impl RewardRecord {
    pub fn new(
        confirmation_number: impl Into<String>,
        contribution: &AccountContribution,
        dining: &Dining,
        reward_date: DateTime<Utc>,
    ) -> Self {
        Self {
            confirmation_number: confirmation_number.into(),
            reward_amount: contribution.amount,
            reward_date,
            account_number: contribution.account_number.clone(),
            dining_merchant_number: dining.merchant.clone(),
            dining_date: dining.timestamp,
            dining_amount: dining.amount,
        }
    }
}
