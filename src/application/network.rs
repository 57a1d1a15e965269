use crate::domain::dining::{Dining, mask_card};
use crate::domain::ports::{AccountRepositoryBox, RestaurantRepositoryBox, RewardRepositoryBox};
use crate::domain::reward::RewardConfirmation;
use crate::error::Result;
use tracing::{debug, info, warn};

/// Rewards accounts for dining at participating restaurants.
///
/// `RewardNetwork` owns the three collaborators it coordinates. Each call to
/// [`RewardNetwork::reward_account_for`] awaits every step before starting the
/// next and keeps no state between calls.
pub struct RewardNetwork {
    accounts: AccountRepositoryBox,
    restaurants: RestaurantRepositoryBox,
    rewards: RewardRepositoryBox,
}

impl RewardNetwork {
    /// Creates a new `RewardNetwork`.
    ///
    /// # Arguments
    ///
    /// * `accounts` - Finds accounts by credit card and stores their updates.
    /// * `restaurants` - Finds restaurants by merchant number.
    /// * `rewards` - Records confirmed rewards.
    pub fn new(
        accounts: AccountRepositoryBox,
        restaurants: RestaurantRepositoryBox,
        rewards: RewardRepositoryBox,
    ) -> Self {
        Self {
            accounts,
            restaurants,
            rewards,
        }
    }

    /// Rewards the account that paid for `dining`.
    ///
    /// Any failure aborts the call and is returned unchanged. In particular a
    /// failed account update means no reward is recorded.
    pub async fn reward_account_for(&self, dining: &Dining) -> Result<RewardConfirmation> {
        let result = self.reward(dining).await;
        if let Err(e) = &result {
            warn!(
                credit_card = %mask_card(&dining.credit_card),
                merchant = %dining.merchant,
                error = %e,
                "Dining not rewarded"
            );
        }
        result
    }

    async fn reward(&self, dining: &Dining) -> Result<RewardConfirmation> {
        let mut account = self
            .accounts
            .find_by_credit_card(&dining.credit_card)
            .await?;
        let restaurant = self
            .restaurants
            .find_by_merchant_number(&dining.merchant)
            .await?;

        let amount = restaurant.calculate_benefit_for(&account, dining);
        debug!(
            account = %account.number,
            restaurant = %restaurant.merchant_number,
            %amount,
            "Calculated benefit"
        );

        let contribution = account.make_contribution(amount)?;
        self.accounts.update_beneficiaries(&account).await?;
        debug!(account = %account.number, balance = %account.balance, "Updated account");

        let confirmation = self.rewards.confirm_reward(&contribution, dining).await?;
        info!(
            confirmation = %confirmation.confirmation_number,
            account = %contribution.account_number,
            amount = %contribution.amount,
            "Reward confirmed"
        );
        Ok(confirmation)
    }
}
