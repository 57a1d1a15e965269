//! Adapters between the outside world and the reward network: CSV dinings in,
//! CSV confirmations out, and the JSON catalog of accounts and restaurants.

pub mod catalog;
pub mod csv;
