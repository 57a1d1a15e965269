//! Domain layer: money, entities, and the ports the reward network uses.

pub mod account;
pub mod dining;
pub mod money;
pub mod ports;
pub mod restaurant;
pub mod reward;
