use crate::domain::account::Account;
use crate::domain::restaurant::Restaurant;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// The accounts and restaurants a reward run starts from.
///
/// Read from JSON of the form `{ "accounts": [...], "restaurants": [...] }`.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
}

impl Catalog {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    /// Account numbers whose beneficiaries cannot take a contribution.
    ///
    /// Such accounts still load; rewarding them fails with `InvalidState`.
    pub fn invalid_accounts(&self) -> impl Iterator<Item = &str> {
        self.accounts
            .iter()
            .filter(|a| !a.is_valid())
            .map(|a| a.number.as_str())
    }
}
