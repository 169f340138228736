//! Session bankroll
//!
//! Balance and best score live for the whole session and are never persisted.

use serde::{Deserialize, Serialize};

/// Balance and session-wide stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bankroll {
    /// Current balance
    pub balance: u64,
    /// Balance restored by `reset`
    pub starting_balance: u64,
    /// Best round score this session (never decreases)
    pub best_score: u32,
    /// Combo bonuses fired this session
    pub total_combos: u32,
}

impl Bankroll {
    pub fn new(starting_balance: u64) -> Self {
        Self {
            balance: starting_balance,
            starting_balance,
            best_score: 0,
            total_combos: 0,
        }
    }

    /// Whether the balance covers a stake
    pub fn can_cover(&self, amount: u64) -> bool {
        amount <= self.balance
    }

    /// Take a stake out of the balance. Returns false (untouched) if it isn't covered.
    pub fn debit(&mut self, amount: u64) -> bool {
        match self.balance.checked_sub(amount) {
            Some(rest) => {
                self.balance = rest;
                true
            }
            None => false,
        }
    }

    /// Credit a payout
    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Record a finished round's score. Returns true on a new best.
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.best_score {
            self.best_score = score;
            true
        } else {
            false
        }
    }

    /// Restore the starting balance; best score and stats are kept
    pub fn reset(&mut self) {
        self.balance = self.starting_balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_and_credit() {
        let mut bank = Bankroll::new(1000);
        assert!(bank.debit(100));
        assert_eq!(bank.balance, 900);
        bank.credit(200);
        assert_eq!(bank.balance, 1100);
    }

    #[test]
    fn test_debit_refuses_overdraft() {
        let mut bank = Bankroll::new(50);
        assert!(!bank.can_cover(51));
        assert!(!bank.debit(51));
        assert_eq!(bank.balance, 50);
    }

    #[test]
    fn test_best_score_is_monotonic() {
        let mut bank = Bankroll::new(1000);
        assert!(bank.record_score(4));
        assert!(!bank.record_score(2));
        assert!(!bank.record_score(4));
        assert_eq!(bank.best_score, 4);
    }

    #[test]
    fn test_reset_keeps_best_score() {
        let mut bank = Bankroll::new(1000);
        bank.debit(250);
        bank.record_score(7);
        bank.reset();
        assert_eq!(bank.balance, 1000);
        assert_eq!(bank.best_score, 7);
    }
}
