//! Application layer coordinating the reward use case.
//!
//! This module defines the `RewardNetwork`, which looks up the account and
//! restaurant for a dining, applies the benefit to the account, and records
//! a confirmation through the domain ports.

pub mod network;
