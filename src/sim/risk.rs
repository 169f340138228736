//! Risk and payout math
//!
//! Per tick while a round runs:
//!   growth  = base_growth * (1 + food_eaten * food_bonus_factor)
//!   mult    = min(cap, mult + growth)
//!   p_crash = base_risk * mult ^ risk_exponent   (using the grown multiplier)
//!
//! Each tick's crash roll is an independent Bernoulli trial, so the hazard
//! depends only on the multiplier trajectory.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::config::{BonusPolicy, GameConfig};

/// Multiplier growth for one tick
#[inline]
pub fn growth_rate(config: &GameConfig, food_eaten: u32) -> f64 {
    config.base_growth * (1.0 + food_eaten as f64 * config.food_bonus_factor)
}

/// Apply one tick of growth, capped
#[inline]
pub fn grow(config: &GameConfig, multiplier: f64, food_eaten: u32) -> f64 {
    (multiplier + growth_rate(config, food_eaten)).min(config.multiplier_cap)
}

/// Per-tick crash probability at `multiplier`
#[inline]
pub fn crash_probability(config: &GameConfig, multiplier: f64) -> f64 {
    config.base_risk * multiplier.powf(config.risk_exponent)
}

/// Roll this tick's crash
pub fn roll_crash(config: &GameConfig, multiplier: f64, rng: &mut dyn RandomSource) -> bool {
    rng.next_unit() < crash_probability(config, multiplier)
}

/// Bonus fired by eating food
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BonusKind {
    Combo { amount: f64 },
    Spike { amount: f64 },
}

/// Result of feeding one food-eaten event through the bonus policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusOutcome {
    pub multiplier: f64,
    pub streak: u32,
    pub fired: Option<BonusKind>,
}

/// Apply the configured bonus policy for one food eaten
pub fn apply_bonus(config: &GameConfig, multiplier: f64, streak: u32) -> BonusOutcome {
    let cap = config.multiplier_cap;
    match config.bonus {
        BonusPolicy::Combo { threshold, amount } => {
            let streak = streak + 1;
            if streak >= threshold {
                BonusOutcome {
                    multiplier: (multiplier + amount).min(cap),
                    streak: 0,
                    fired: Some(BonusKind::Combo { amount }),
                }
            } else {
                BonusOutcome {
                    multiplier,
                    streak,
                    fired: None,
                }
            }
        }
        BonusPolicy::Spike { amount } => BonusOutcome {
            multiplier: (multiplier + amount).min(cap),
            streak,
            fired: Some(BonusKind::Spike { amount }),
        },
    }
}

/// Step interval after one more food, floored at the minimum
#[inline]
pub fn faster_step(config: &GameConfig, step_interval_ms: f64) -> f64 {
    (step_interval_ms - config.step_decrement_ms).max(config.min_step_ms)
}

/// Cash-out settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub payout: u64,
    /// payout - bet
    pub profit: i64,
}

impl Settlement {
    pub fn new(bet: u64, multiplier: f64) -> Self {
        let payout = crate::payout_for(bet, multiplier);
        Self {
            payout,
            profit: payout as i64 - bet as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::sim::rng::ScriptedRandom;
    use proptest::prelude::*;

    #[test]
    fn test_growth_rate_compounds_with_food() {
        let config = GameConfig::default();
        assert!((growth_rate(&config, 0) - 0.004).abs() < 1e-12);
        assert!((growth_rate(&config, 5) - 0.004 * 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_grow_caps() {
        let config = GameConfig::default();
        assert_eq!(grow(&config, 9.999, 0), 10.0);
        assert_eq!(grow(&config, 10.0, 3), 10.0);
    }

    #[test]
    fn test_crash_probability_formula() {
        let config = GameConfig::default();
        assert!((crash_probability(&config, 1.0) - 0.0028).abs() < 1e-12);
        let p4 = crash_probability(&config, 4.0);
        assert!((p4 - 0.0028 * 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_roll_crash_uses_strict_less_than() {
        let config = GameConfig::default();
        let p = crash_probability(&config, 1.0);
        let mut rng = ScriptedRandom::new(vec![p, p - 1e-9]);
        assert!(!roll_crash(&config, 1.0, &mut rng));
        assert!(roll_crash(&config, 1.0, &mut rng));
    }

    #[test]
    fn test_combo_fires_on_third_food() {
        let config = GameConfig::default();
        let first = apply_bonus(&config, 1.5, 0);
        assert_eq!((first.streak, first.fired), (1, None));
        let second = apply_bonus(&config, 1.5, first.streak);
        assert_eq!((second.streak, second.fired), (2, None));
        let third = apply_bonus(&config, 1.5, second.streak);
        assert_eq!(third.streak, 0);
        assert_eq!(third.fired, Some(BonusKind::Combo { amount: 0.15 }));
        assert!((third.multiplier - 1.65).abs() < 1e-12);
        let fourth = apply_bonus(&config, third.multiplier, third.streak);
        assert_eq!(fourth.streak, 1);
    }

    #[test]
    fn test_spike_fires_every_food_and_caps() {
        let config = GameConfig::from_variant(Variant::Spike);
        let out = apply_bonus(&config, 2.0, 0);
        assert!((out.multiplier - 2.1).abs() < 1e-12);
        assert_eq!(out.fired, Some(BonusKind::Spike { amount: 0.10 }));
        assert_eq!(apply_bonus(&config, 9.95, 0).multiplier, 10.0);
    }

    #[test]
    fn test_faster_step_floors() {
        let config = GameConfig::default();
        assert_eq!(faster_step(&config, 138.0), 135.0);
        assert_eq!(faster_step(&config, 53.0), 52.0);
        assert_eq!(faster_step(&config, 52.0), 52.0);
    }

    #[test]
    fn test_settlement_floors() {
        assert_eq!(
            Settlement::new(100, 2.0),
            Settlement {
                payout: 200,
                profit: 100
            }
        );
        assert_eq!(Settlement::new(33, 1.519).payout, 50);
        assert_eq!(Settlement::new(10, 1.0).profit, 0);
    }

    proptest! {
        #[test]
        fn prop_growth_is_monotonic_and_capped(
            start in 1.0f64..10.0,
            food in 0u32..200,
            ticks in 1usize..500,
        ) {
            let config = GameConfig::default();
            let mut mult = start;
            for _ in 0..ticks {
                let next = grow(&config, mult, food);
                prop_assert!(next >= mult);
                prop_assert!(next <= config.multiplier_cap);
                mult = next;
            }
        }

        #[test]
        fn prop_payout_is_floor_and_profit_non_negative(
            bet in 10u64..=250,
            mult in 1.0f64..=10.0,
        ) {
            let s = Settlement::new(bet, mult);
            prop_assert_eq!(s.payout, (bet as f64 * mult).floor() as u64);
            prop_assert!(s.profit >= 0);
        }
    }
}
