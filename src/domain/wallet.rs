// Copyright (c) 2025 - Cowboy AI, Inc.
//! Player Wallet
//!
//! Non-negative balance with strictly positive credits and debits. A failed
//! operation leaves the balance untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: u64, available: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    balance: u64,
}

impl Wallet {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        amount <= self.balance
    }

    pub fn credit(&mut self, amount: u64) -> Result<u64, WalletError> {
        if amount == 0 {
            return Err(WalletError::NonPositiveAmount);
        }
        self.balance = self.balance.saturating_add(amount);
        Ok(self.balance)
    }

    pub fn debit(&mut self, amount: u64) -> Result<u64, WalletError> {
        if amount == 0 {
            return Err(WalletError::NonPositiveAmount);
        }
        if !self.can_afford(amount) {
            return Err(WalletError::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(self.balance)
    }
}
