use crate::domain::account::Account;
use crate::domain::dining::{Dining, mask_card};
use crate::domain::ports::{AccountRepository, RestaurantRepository, RewardRepository};
use crate::domain::restaurant::Restaurant;
use crate::domain::reward::{AccountContribution, RewardConfirmation, RewardRecord};
use crate::error::{RewardError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct AccountTable {
    /// Accounts by account number.
    accounts: HashMap<String, Account>,
    /// Credit card number to account number.
    credit_cards: HashMap<String, String>,
}

impl AccountTable {
    /// Adds or replaces an account. A credit card maps to one account only.
    fn insert(&mut self, account: Account) -> Result<()> {
        if let Some(owner) = self.credit_cards.get(&account.credit_card) {
            if *owner != account.number {
                return Err(RewardError::ValidationError(format!(
                    "Credit card {} already belongs to account {}",
                    mask_card(&account.credit_card),
                    owner
                )));
            }
        }
        let card = account.credit_card.clone();
        let number = account.number.clone();
        if let Some(replaced) = self.accounts.insert(number.clone(), account) {
            if replaced.credit_card != card {
                self.credit_cards.remove(&replaced.credit_card);
            }
        }
        self.credit_cards.insert(card, number);
        Ok(())
    }
}

/// A thread-safe in-memory account repository.
///
/// Accounts are keyed by account number with a credit card index on the side.
/// Clones share the same underlying table. Updates take the write lock, so two
/// writes never interleave, but nothing orders a load-modify-store sequence
/// against another one for the same account.
#[derive(Default, Clone)]
pub struct InMemoryAccountRepository {
    table: Arc<RwLock<AccountTable>>,
}

impl InMemoryAccountRepository {
    /// Creates a new, empty in-memory account repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `accounts`.
    ///
    /// Fails if two accounts share a credit card.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Result<Self> {
        let mut table = AccountTable::default();
        for account in accounts {
            table.insert(account)?;
        }
        Ok(Self {
            table: Arc::new(RwLock::new(table)),
        })
    }

    /// Adds or replaces an account, keeping the credit card index in step.
    pub async fn insert(&self, account: Account) -> Result<()> {
        self.table.write().await.insert(account)
    }

    /// Looks up an account by its account number.
    pub async fn get(&self, number: &str) -> Option<Account> {
        self.table.read().await.accounts.get(number).cloned()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_credit_card(&self, credit_card: &str) -> Result<Account> {
        let table = self.table.read().await;
        table
            .credit_cards
            .get(credit_card)
            .and_then(|number| table.accounts.get(number))
            .cloned()
            .ok_or_else(|| RewardError::account_not_found(credit_card))
    }

    async fn update_beneficiaries(&self, account: &Account) -> Result<()> {
        let mut table = self.table.write().await;
        match table.accounts.get_mut(&account.number) {
            Some(stored) => {
                stored.balance = account.balance;
                stored.beneficiaries = account.beneficiaries.clone();
                Ok(())
            }
            None => Err(RewardError::persistence(format!(
                "Account {} does not exist",
                account.number
            ))),
        }
    }
}

/// A thread-safe in-memory restaurant repository keyed by merchant number.
#[derive(Default, Clone)]
pub struct InMemoryRestaurantRepository {
    restaurants: Arc<RwLock<HashMap<String, Restaurant>>>,
}

impl InMemoryRestaurantRepository {
    /// Creates a new, empty in-memory restaurant repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `restaurants`.
    pub fn from_restaurants(restaurants: impl IntoIterator<Item = Restaurant>) -> Self {
        let restaurants = restaurants
            .into_iter()
            .map(|r| (r.merchant_number.clone(), r))
            .collect();
        Self {
            restaurants: Arc::new(RwLock::new(restaurants)),
        }
    }

    /// Adds or replaces a restaurant.
    pub async fn insert(&self, restaurant: Restaurant) {
        let mut restaurants = self.restaurants.write().await;
        restaurants.insert(restaurant.merchant_number.clone(), restaurant);
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn find_by_merchant_number(&self, merchant_number: &str) -> Result<Restaurant> {
        let restaurants = self.restaurants.read().await;
        restaurants
            .get(merchant_number)
            .cloned()
            .ok_or_else(|| RewardError::restaurant_not_found(merchant_number))
    }
}

/// A thread-safe in-memory reward repository.
///
/// Confirmation numbers are issued sequentially starting at 1. The recorded
/// rows stay available through [`InMemoryRewardRepository::records`].
#[derive(Default, Clone)]
pub struct InMemoryRewardRepository {
    records: Arc<RwLock<Vec<RewardRecord>>>,
}

impl InMemoryRewardRepository {
    /// Creates a new, empty in-memory reward repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every reward recorded so far, in confirmation order.
    pub async fn records(&self) -> Vec<RewardRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl RewardRepository for InMemoryRewardRepository {
    async fn confirm_reward(
        &self,
        contribution: &AccountContribution,
        dining: &Dining,
    ) -> Result<RewardConfirmation> {
        let mut records = self.records.write().await;
        let confirmation_number = (records.len() + 1).to_string();
        records.push(RewardRecord::new(
            confirmation_number.clone(),
            contribution,
            dining,
            Utc::now(),
        ));
        Ok(RewardConfirmation {
            confirmation_number,
            contribution: contribution.clone(),
        })
    }
}
