//! Collaborator interfaces the reward network depends on.
//!
//! Implementations must serialize concurrent updates to the same account;
//! the network itself loads, mutates and writes back an account without
//! holding any lock.

use super::account::Account;
use super::dining::Dining;
use super::restaurant::Restaurant;
use super::reward::{AccountContribution, RewardConfirmation};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Loads the account paying with `credit_card`, or fails with `NotFound`.
    async fn find_by_credit_card(&self, credit_card: &str) -> Result<Account>;
    /// Writes back the balance and beneficiary savings of `account`.
    async fn update_beneficiaries(&self, account: &Account) -> Result<()>;
}

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Loads the restaurant with `merchant_number`, or fails with `NotFound`.
    async fn find_by_merchant_number(&self, merchant_number: &str) -> Result<Restaurant>;
}

#[async_trait]
pub trait RewardRepository: Send + Sync {
    /// Records `contribution` for `dining` and returns its confirmation.
    async fn confirm_reward(
        &self,
        contribution: &AccountContribution,
        dining: &Dining,
    ) -> Result<RewardConfirmation>;
}

pub type AccountRepositoryBox = Box<dyn AccountRepository>;
pub type RestaurantRepositoryBox = Box<dyn RestaurantRepository>;
pub type RewardRepositoryBox = Box<dyn RewardRepository>;
