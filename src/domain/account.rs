use super::money::{MonetaryAmount, Percentage};
use super::reward::{AccountContribution, Distribution};
use crate::error::RewardError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named share-holder of an account's rewards.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Beneficiary {
    pub name: String,
    /// The share of every contribution this beneficiary receives.
    pub allocation_percentage: Percentage,
    /// Everything this beneficiary has received so far.
    #[serde(default)]
    pub savings: MonetaryAmount,
}

impl Beneficiary {
    pub fn new(name: impl Into<String>, allocation_percentage: Percentage) -> Self {
        Self {
            name: name.into(),
            allocation_percentage,
            savings: MonetaryAmount::ZERO,
        }
    }
}

/// A member account in the reward network.
///
/// Rewards are credited to the account balance and split between its
/// beneficiaries according to their allocation percentages.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Account {
    /// The unique account number.
    pub number: String,
    /// The name on the account.
    pub name: String,
    /// The credit card used to find this account for a dining.
    pub credit_card: String,
    /// Total of every contribution made to this account.
    #[serde(default)]
    pub balance: MonetaryAmount,
    /// Beneficiaries in allocation order.
    #[serde(default)]
    pub beneficiaries: Vec<Beneficiary>,
}

impl Account {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        credit_card: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            credit_card: credit_card.into(),
            balance: MonetaryAmount::ZERO,
            beneficiaries: Vec::new(),
        }
    }

    /// Adds a beneficiary at the end of the allocation order.
    pub fn add_beneficiary(&mut self, name: impl Into<String>, allocation_percentage: Percentage) {
        self.beneficiaries
            .push(Beneficiary::new(name, allocation_percentage));
    }

    pub fn beneficiary(&self, name: &str) -> Option<&Beneficiary> {
        self.beneficiaries.iter().find(|b| b.name == name)
    }

    /// Sum of the savings held by all beneficiaries.
    pub fn total_savings(&self) -> MonetaryAmount {
        self.beneficiaries.iter().map(|b| b.savings).sum()
    }

    fn total_allocation(&self) -> Decimal {
        self.beneficiaries
            .iter()
            .map(|b| b.allocation_percentage.value())
            .sum()
    }

    /// An account can take contributions when it has beneficiaries whose
    /// allocations add up to exactly 100%.
    pub fn is_valid(&self) -> bool {
        !self.beneficiaries.is_empty() && self.total_allocation() == Decimal::ONE
    }

    /// Credits `amount` to this account and splits it between beneficiaries.
    ///
    /// Each beneficiary gets its percentage of the amount with fractions of a
    /// cent dropped; whatever is left over goes to the first beneficiary, so
    /// the distributed total always equals `amount`. The account is left
    /// untouched on error.
    pub fn make_contribution(
        &mut self,
        amount: MonetaryAmount,
    ) -> Result<AccountContribution, RewardError> {
        if self.beneficiaries.is_empty() {
            return Err(RewardError::InvalidState(format!(
                "Account {} has no beneficiaries",
                self.number
            )));
        }
        let total_allocation = self.total_allocation();
        if total_allocation != Decimal::ONE {
            return Err(RewardError::InvalidState(format!(
                "Beneficiary allocations of account {} total {}%, not 100%",
                self.number,
                (total_allocation * Decimal::ONE_HUNDRED).normalize()
            )));
        }

        let mut shares: Vec<MonetaryAmount> = self
            .beneficiaries
            .iter()
            .map(|b| amount.floor_share(b.allocation_percentage))
            .collect();
        let distributed: MonetaryAmount = shares.iter().sum();
        let leftover = amount.checked_sub(distributed).ok_or_else(|| {
            RewardError::InvalidState(format!(
                "Distributed {} exceeds contribution {}",
                distributed, amount
            ))
        })?;
        shares[0] += leftover;

        let overflow = || {
            RewardError::InvalidState(format!(
                "Contribution {} overflows the savings of account {}",
                amount, self.number
            ))
        };
        let balance = self.balance.checked_add(amount).ok_or_else(overflow)?;
        let savings = self
            .beneficiaries
            .iter()
            .zip(&shares)
            .map(|(beneficiary, share)| {
                beneficiary.savings.checked_add(*share).ok_or_else(overflow)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let distributions = self
            .beneficiaries
            .iter_mut()
            .zip(shares.into_iter().zip(savings))
            .map(|(beneficiary, (share, total))| {
                beneficiary.savings = total;
                Distribution {
                    beneficiary: beneficiary.name.clone(),
                    amount: share,
                    percentage: beneficiary.allocation_percentage,
                    total_savings: total,
                }
            })
            .collect();
        self.balance = balance;

        Ok(AccountContribution {
            account_number: self.number.clone(),
            amount,
            distributions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(value: Decimal) -> MonetaryAmount {
        MonetaryAmount::new(value).unwrap()
    }

    fn percent(value: Decimal) -> Percentage {
        Percentage::new(value).unwrap()
    }

    fn account_with(shares: &[(&str, Decimal)]) -> Account {
        let mut account = Account::new("123456789", "Keith and Keri Donald", "1234567890123456");
        for (name, share) in shares {
            account.add_beneficiary(*name, percent(*share));
        }
        account
    }

    #[test]
    fn test_even_split() {
        let mut account = account_with(&[("Annabelle", dec!(0.5)), ("Corgan", dec!(0.5))]);

        let contribution = account.make_contribution(money(dec!(8.00))).unwrap();

        assert_eq!(contribution.account_number, "123456789");
        assert_eq!(contribution.amount, money(dec!(8.00)));
        assert_eq!(contribution.distributions.len(), 2);
        assert_eq!(contribution.distributions[0].beneficiary, "Annabelle");
        assert_eq!(contribution.distributions[0].amount, money(dec!(4.00)));
        assert_eq!(contribution.distributions[1].beneficiary, "Corgan");
        assert_eq!(contribution.distributions[1].amount, money(dec!(4.00)));

        assert_eq!(account.balance, money(dec!(8.00)));
        assert_eq!(account.beneficiary("Annabelle").unwrap().savings, money(dec!(4.00)));
        assert_eq!(account.total_savings(), money(dec!(8.00)));
    }

    #[test]
    fn test_leftover_cent_goes_to_first_beneficiary() {
        let mut account = account_with(&[("Annabelle", dec!(1) / dec!(3)), ("Corgan", dec!(2) / dec!(3))]);
        assert!(account.is_valid());

        let contribution = account.make_contribution(money(dec!(10.01))).unwrap();

        assert_eq!(contribution.distributions[0].amount, money(dec!(3.34)));
        assert_eq!(contribution.distributions[1].amount, money(dec!(6.67)));
        assert_eq!(contribution.distributed_total(), money(dec!(10.01)));
    }

    #[test]
    fn test_savings_accumulate() {
        let mut account = account_with(&[("Annabelle", dec!(0.5)), ("Corgan", dec!(0.5))]);

        account.make_contribution(money(dec!(8.00))).unwrap();
        let contribution = account.make_contribution(money(dec!(2.00))).unwrap();

        assert_eq!(contribution.distributions[0].total_savings, money(dec!(5.00)));
        assert_eq!(account.balance, money(dec!(10.00)));
    }

    #[test]
    fn test_zero_contribution() {
        let mut account = account_with(&[("Annabelle", dec!(0.5)), ("Corgan", dec!(0.5))]);

        let contribution = account.make_contribution(MonetaryAmount::ZERO).unwrap();

        assert!(contribution.distributions.iter().all(|d| d.amount.is_zero()));
        assert_eq!(account.balance, MonetaryAmount::ZERO);
    }

    #[test]
    fn test_no_beneficiaries() {
        let mut account = account_with(&[]);
        assert!(!account.is_valid());

        let result = account.make_contribution(money(dec!(8.00)));

        assert!(matches!(result, Err(RewardError::InvalidState(_))));
        assert_eq!(account.balance, MonetaryAmount::ZERO);
    }

    #[test]
    fn test_allocations_not_totalling_one_hundred() {
        let mut account = account_with(&[("Annabelle", dec!(0.5)), ("Corgan", dec!(0.25))]);
        assert!(!account.is_valid());

        let before = account.clone();
        let result = account.make_contribution(money(dec!(8.00)));

        assert!(matches!(result, Err(RewardError::InvalidState(_))));
        assert_eq!(account, before);
    }

    #[test]
    fn test_overflowing_contribution_leaves_account_untouched() {
        let mut account = account_with(&[("Annabelle", dec!(1))]);
        let huge: Decimal = "50000000000000000000000000000".parse().unwrap();

        account.make_contribution(money(huge)).unwrap();
        let before = account.clone();
        let result = account.make_contribution(money(huge));

        assert!(matches!(result, Err(RewardError::InvalidState(_))));
        assert_eq!(account, before);
    }

    #[test]
    fn test_account_json_defaults() {
        let json = r#"{
            "number": "123456789",
            "name": "Keith and Keri Donald",
            "credit_card": "1234567890123456",
            "beneficiaries": [{ "name": "Annabelle", "allocation_percentage": "100%" }]
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();

        assert_eq!(account.balance, MonetaryAmount::ZERO);
        assert_eq!(account.beneficiaries[0].savings, MonetaryAmount::ZERO);
        assert!(account.is_valid());
    }
}
