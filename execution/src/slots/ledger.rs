//! Credit balance seam.

use pokerslots_types::slots::INITIAL_BALANCE;

/// Source and sink of credits for a machine.
pub trait Ledger {
    fn balance(&self) -> u64;

    /// Withdraw `amount`. Returns false, leaving the balance untouched, if the
    /// balance cannot cover it.
    fn debit(&mut self, amount: u64) -> bool;

    /// Deposit `amount`, saturating at `u64::MAX`.
    fn credit(&mut self, amount: u64);
}

/// In-memory ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Balance(u64);

impl Balance {
    pub fn new(amount: u64) -> Self {
        Self(amount)
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self(INITIAL_BALANCE)
    }
}

impl Ledger for Balance {
    fn balance(&self) -> u64 {
        self.0
    }

    fn debit(&mut self, amount: u64) -> bool {
        match self.0.checked_sub(amount) {
            Some(rest) => {
                self.0 = rest;
                true
            }
            None => false,
        }
    }

    fn credit(&mut self, amount: u64) {
        self.0 = self.0.saturating_add(amount);
    }
}
