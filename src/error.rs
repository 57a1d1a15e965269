use crate::domain::dining::mask_card;
use std::fmt;
use thiserror::Error;

/// The entity a failed lookup was looking for, with the key it used.
///
/// The card number is kept whole for callers but masked when displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Account { credit_card: String },
    Restaurant { merchant_number: String },
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Account { credit_card } => {
                write!(f, "account for credit card {}", mask_card(credit_card))
            }
            Lookup::Restaurant { merchant_number } => {
                write!(f, "restaurant with merchant number {}", merchant_number)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum RewardError {
    #[error("Not found: {0}")]
    NotFound(Lookup),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Persistence error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RewardError {
    pub fn account_not_found(credit_card: impl Into<String>) -> Self {
        Self::NotFound(Lookup::Account {
            credit_card: credit_card.into(),
        })
    }

    pub fn restaurant_not_found(merchant_number: impl Into<String>) -> Self {
        Self::NotFound(Lookup::Restaurant {
            merchant_number: merchant_number.into(),
        })
    }

    /// Wraps any storage failure as a `Persistence` error.
    pub fn persistence<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Persistence(error.into())
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for RewardError {
    fn from(error: rocksdb::Error) -> Self {
        Self::Persistence(Box::new(error))
    }
}

pub type Result<T> = std::result::Result<T, RewardError>;
