use super::account::Account;
use super::dining::Dining;
use super::money::{MonetaryAmount, Percentage};
use serde::{Deserialize, Serialize};

/// Whether a restaurant currently pays out benefits.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum BenefitAvailability {
    #[default]
    Always,
    Never,
}

/// A participating restaurant, identified by its merchant number.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Restaurant {
    pub merchant_number: String,
    pub name: String,
    /// The share of each dining amount paid back as a benefit.
    pub benefit_percentage: Percentage,
    #[serde(default)]
    pub benefit_availability: BenefitAvailability,
}

impl Restaurant {
    pub fn new(
        merchant_number: impl Into<String>,
        name: impl Into<String>,
        benefit_percentage: Percentage,
    ) -> Self {
        Self {
            merchant_number: merchant_number.into(),
            name: name.into(),
            benefit_percentage,
            benefit_availability: BenefitAvailability::Always,
        }
    }

    pub fn with_availability(mut self, availability: BenefitAvailability) -> Self {
        self.benefit_availability = availability;
        self
    }

    /// Calculates the benefit `account` earns for `dining`.
    ///
    /// The account is accepted so availability rules can depend on it; the
    /// current policies only look at the restaurant itself.
    pub fn calculate_benefit_for(&self, _account: &Account, dining: &Dining) -> MonetaryAmount {
        match self.benefit_availability {
            BenefitAvailability::Always => dining.amount.multiply_by(self.benefit_percentage),
            BenefitAvailability::Never => MonetaryAmount::ZERO,
        }
    }
}
