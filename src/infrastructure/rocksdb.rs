use crate::domain::account::Account;
use crate::domain::dining::{Dining, mask_card};
use crate::domain::ports::{AccountRepository, RestaurantRepository, RewardRepository};
use crate::domain::restaurant::Restaurant;
use crate::domain::reward::{AccountContribution, RewardConfirmation, RewardRecord};
use crate::error::{RewardError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options, WriteBatch};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Column Family for account states, keyed by account number.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family mapping credit card numbers to account numbers.
pub const CF_CREDIT_CARDS: &str = "credit_cards";
/// Column Family for restaurants, keyed by merchant number.
pub const CF_RESTAURANTS: &str = "restaurants";
/// Column Family for reward records, keyed by confirmation number.
pub const CF_REWARDS: &str = "rewards";
/// Column Family for counters.
pub const CF_SEQUENCES: &str = "sequences";

const CONFIRMATION_SEQUENCE: &[u8] = b"confirmation";

/// A persistent store implementation using RocksDB.
///
/// Implements all three reward network ports on top of separate Column
/// Families. Values are stored as JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
/// Confirmation numbers come from a persisted sequence that is advanced in the
/// same write batch as the reward record it numbers.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    sequence_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that every required column family exists.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let families = [
            CF_ACCOUNTS,
            CF_CREDIT_CARDS,
            CF_RESTAURANTS,
            CF_REWARDS,
            CF_SEQUENCES,
        ]
        .into_iter()
        .map(|name| ColumnFamilyDescriptor::new(name, Options::default()));

        let db = DB::open_cf_descriptors(&opts, path, families)?;

        Ok(Self {
            db: Arc::new(db),
            sequence_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            RewardError::persistence(format!("{} column family not found", name))
        })
    }

    fn read<T: DeserializeOwned>(&self, name: &str, key: &[u8]) -> Result<Option<T>> {
        let cf = self.cf(name)?;
        match self.db.get_cf(cf, key)? {
            Some(bytes) => Ok(Some(
                serde_json::from_slice(&bytes).map_err(RewardError::persistence)?,
            )),
            None => Ok(None),
        }
    }

    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(RewardError::persistence)
    }

    /// Adds `account` unless an account with the same number is already
    /// stored. Returns whether it was added.
    ///
    /// Fails if the credit card already belongs to another account.
    pub fn insert_account(&self, account: &Account) -> Result<bool> {
        if self.get_account(&account.number)?.is_some() {
            return Ok(false);
        }
        if let Some(owner) = self
            .db
            .get_cf(self.cf(CF_CREDIT_CARDS)?, account.credit_card.as_bytes())?
        {
            return Err(RewardError::ValidationError(format!(
                "Credit card {} already belongs to account {}",
                mask_card(&account.credit_card),
                String::from_utf8_lossy(&owner)
            )));
        }
        let mut batch = WriteBatch::default();
        batch.put_cf(
            self.cf(CF_ACCOUNTS)?,
            account.number.as_bytes(),
            Self::encode(account)?,
        );
        batch.put_cf(
            self.cf(CF_CREDIT_CARDS)?,
            account.credit_card.as_bytes(),
            account.number.as_bytes(),
        );
        self.db.write(batch)?;
        Ok(true)
    }

    /// Stores `restaurant`, replacing any previous version.
    pub fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        self.db.put_cf(
            self.cf(CF_RESTAURANTS)?,
            restaurant.merchant_number.as_bytes(),
            Self::encode(restaurant)?,
        )?;
        Ok(())
    }

    pub fn get_account(&self, number: &str) -> Result<Option<Account>> {
        self.read(CF_ACCOUNTS, number.as_bytes())
    }

    pub fn get_reward(&self, confirmation_number: &str) -> Result<Option<RewardRecord>> {
        self.read(CF_REWARDS, confirmation_number.as_bytes())
    }

    fn next_confirmation(&self) -> Result<u64> {
        let cf = self.cf(CF_SEQUENCES)?;
        let current = match self.db.get_pinned_cf(cf, CONFIRMATION_SEQUENCE)? {
            Some(bytes) => {
                let raw = <[u8; 8]>::try_from(&bytes[..]).map_err(|_| {
                    RewardError::persistence("Corrupt confirmation sequence")
                })?;
                u64::from_be_bytes(raw)
            }
            None => 0,
        };
        Ok(current + 1)
    }
}

#[async_trait]
impl AccountRepository for RocksDBStore {
    async fn find_by_credit_card(&self, credit_card: &str) -> Result<Account> {
        let cf = self.cf(CF_CREDIT_CARDS)?;
        let number = self
            .db
            .get_cf(cf, credit_card.as_bytes())?
            .ok_or_else(|| RewardError::account_not_found(credit_card))?;
        let number = String::from_utf8(number).map_err(RewardError::persistence)?;

        self.get_account(&number)?
            .ok_or_else(|| RewardError::account_not_found(credit_card))
    }

    async fn update_beneficiaries(&self, account: &Account) -> Result<()> {
        if self.get_account(&account.number)?.is_none() {
            return Err(RewardError::persistence(format!(
                "Account {} does not exist",
                account.number
            )));
        }
        self.db.put_cf(
            self.cf(CF_ACCOUNTS)?,
            account.number.as_bytes(),
            Self::encode(account)?,
        )?;
        Ok(())
    }
}

#[async_trait]
impl RestaurantRepository for RocksDBStore {
    async fn find_by_merchant_number(&self, merchant_number: &str) -> Result<Restaurant> {
        self.read(CF_RESTAURANTS, merchant_number.as_bytes())?
            .ok_or_else(|| RewardError::restaurant_not_found(merchant_number))
    }
}

#[async_trait]
impl RewardRepository for RocksDBStore {
    async fn confirm_reward(
        &self,
        contribution: &AccountContribution,
        dining: &Dining,
    ) -> Result<RewardConfirmation> {
        let _guard = self.sequence_lock.lock().await;

        let sequence = self.next_confirmation()?;
        let confirmation_number = sequence.to_string();
        let record = RewardRecord::new(confirmation_number.clone(), contribution, dining, Utc::now());

        let mut batch = WriteBatch::default();
        batch.put_cf(
            self.cf(CF_REWARDS)?,
            confirmation_number.as_bytes(),
            Self::encode(&record)?,
        );
        batch.put_cf(
            self.cf(CF_SEQUENCES)?,
            CONFIRMATION_SEQUENCE,
            sequence.to_be_bytes(),
        );
        self.db.write(batch)?;
        debug!(confirmation = %confirmation_number, "Stored reward record");

        Ok(RewardConfirmation {
            confirmation_number,
            contribution: contribution.clone(),
        })
    }
}
