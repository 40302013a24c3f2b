//! The 냥 balance spent in the shop and drained by spending penalties.
use bevy::prelude::*;

/// Balance granted on a fresh save.
pub const STARTING_MONEY: i64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    InsufficientFunds { price: i64, balance: i64 },
}

impl std::fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseError::InsufficientFunds { price, balance } => {
                write!(f, "price {price}냥 exceeds balance {balance}냥")
            }
        }
    }
}

impl std::error::Error for PurchaseError {}

#[derive(Resource, Debug, Clone)]
pub struct Wallet {
    money: i64,
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            money: STARTING_MONEY,
        }
    }
}

impl Wallet {
    pub fn new(money: i64) -> Self {
        Self {
            money: money.max(0),
        }
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    /// Deducts `price` only when the balance covers it.
    pub fn try_spend(&mut self, price: i64) -> Result<(), PurchaseError> {
        if price > self.money {
            return Err(PurchaseError::InsufficientFunds {
                price,
                balance: self.money,
            });
        }
        self.money -= price;
        Ok(())
    }

    /// Penalties never push the balance below zero.
    pub fn apply_penalty(&mut self, penalty: i64) {
        self.money = (self.money - penalty.max(0)).max(0);
    }
}
