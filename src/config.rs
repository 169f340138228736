//! Game configuration and variant presets
//!
//! All tuning is fixed at load time. Partial JSON overrides are layered on top
//! of the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::grid::Grid;
use crate::sim::snake::START_LENGTH;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Bonus mechanic applied when food is eaten
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BonusPolicy {
    /// Instant jump once every `threshold` foods; the streak resets when it fires
    Combo { threshold: u32, amount: f64 },
    /// Instant jump on every food
    Spike { amount: f64 },
}

impl Default for BonusPolicy {
    fn default() -> Self {
        BonusPolicy::Combo {
            threshold: COMBO_THRESHOLD,
            amount: COMBO_BONUS,
        }
    }
}

/// Shipped game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    #[default]
    Combo,
    Spike,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Combo => "Combo",
            Variant::Spike => "Spike",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "combo" | "streak" => Some(Variant::Combo),
            "spike" => Some(Variant::Spike),
            _ => None,
        }
    }
}

/// Load-time game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Bankroll ===
    pub starting_balance: u64,
    pub min_bet: u64,
    pub max_bet: u64,

    // === Board ===
    pub grid_columns: i32,
    pub grid_rows: i32,
    pub food_count: usize,
    /// Rejection-sampling attempts per food item before accepting a collision
    pub food_placement_attempts: u32,

    // === Speed (ms per snake step) ===
    pub base_step_ms: f64,
    pub step_decrement_ms: f64,
    pub min_step_ms: f64,

    // === Multiplier ===
    pub base_growth: f64,
    pub food_bonus_factor: f64,
    pub multiplier_cap: f64,

    // === Crash hazard ===
    pub base_risk: f64,
    pub risk_exponent: f64,

    pub bonus: BonusPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            min_bet: MIN_BET,
            max_bet: MAX_BET,

            grid_columns: GRID_COLS,
            grid_rows: GRID_ROWS,
            food_count: FOOD_COUNT,
            food_placement_attempts: FOOD_PLACEMENT_ATTEMPTS,

            base_step_ms: BASE_SPEED_MS,
            step_decrement_ms: SPEED_INCREASE,
            min_step_ms: MIN_SPEED_MS,

            base_growth: MULT_GROWTH_BASE,
            food_bonus_factor: MULT_FOOD_BONUS,
            multiplier_cap: MULT_CAP,

            base_risk: BASE_RISK,
            risk_exponent: RISK_EXP,

            bonus: BonusPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Create a config from a variant preset
    pub fn from_variant(variant: Variant) -> Self {
        let mut config = Self::default();
        config.apply_variant(variant);
        config
    }

    /// Apply a variant preset (bonus policy and the risk constant tuned for it)
    pub fn apply_variant(&mut self, variant: Variant) {
        match variant {
            Variant::Combo => {
                self.bonus = BonusPolicy::default();
                self.base_risk = BASE_RISK;
            }
            Variant::Spike => {
                self.bonus = BonusPolicy::Spike {
                    amount: SPIKE_AMOUNT,
                };
                self.base_risk = SPIKE_BASE_RISK;
            }
        }
    }

    /// Parse a (possibly partial) JSON config; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.min_bet == 0 || self.min_bet > self.max_bet {
            return invalid("bet limits must satisfy 0 < min_bet <= max_bet");
        }
        // The starting snake needs its head at columns/2 with two cells behind it
        if self.grid_columns < 4 || self.grid_rows < 1 {
            return invalid("grid must be at least 4 columns by 1 row");
        }
        let cells = Grid::new(self.grid_columns, self.grid_rows).cell_count();
        if self.food_count + START_LENGTH > cells {
            return invalid("grid too small for the starting snake and food");
        }
        if self.food_placement_attempts == 0 {
            return invalid("food_placement_attempts must be positive");
        }
        if !(self.min_step_ms > 0.0) || self.base_step_ms < self.min_step_ms {
            return invalid("step interval must satisfy 0 < min_step_ms <= base_step_ms");
        }
        if !(self.step_decrement_ms >= 0.0) {
            return invalid("step_decrement_ms must be non-negative");
        }
        if !(self.base_growth >= 0.0) || !(self.food_bonus_factor >= 0.0) {
            return invalid("growth parameters must be non-negative");
        }
        if !(self.multiplier_cap >= 1.0) {
            return invalid("multiplier_cap must be at least 1.0");
        }
        if !(self.base_risk >= 0.0) || !self.risk_exponent.is_finite() {
            return invalid("risk parameters must be finite and non-negative");
        }
        match self.bonus {
            BonusPolicy::Combo { threshold, amount } => {
                if threshold == 0 || !(amount >= 0.0) {
                    return invalid("combo needs a positive threshold and non-negative amount");
                }
            }
            BonusPolicy::Spike { amount } => {
                if !(amount >= 0.0) {
                    return invalid("spike amount must be non-negative");
                }
            }
        }
        Ok(())
    }

    /// The variant this config's bonus policy corresponds to
    pub fn variant(&self) -> Variant {
        match self.bonus {
            BonusPolicy::Combo { .. } => Variant::Combo,
            BonusPolicy::Spike { .. } => Variant::Spike,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid_combo() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.variant(), Variant::Combo);
        assert_eq!(config.min_bet, 10);
        assert_eq!(config.max_bet, 250);
    }

    #[test]
    fn test_spike_preset() {
        let config = GameConfig::from_variant(Variant::Spike);
        assert_eq!(config.bonus, BonusPolicy::Spike { amount: 0.10 });
        assert!((config.base_risk - 0.0026).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("SPIKE"), Some(Variant::Spike));
        assert_eq!(Variant::from_str("combo"), Some(Variant::Combo));
        assert_eq!(Variant::from_str("wild"), None);
        assert_eq!(Variant::Spike.as_str(), "Spike");
    }

    #[test]
    fn test_partial_json_override() {
        let config = GameConfig::from_json_str(
            r#"{ "starting_balance": 500, "bonus": { "kind": "spike", "amount": 0.2 } }"#,
        )
        .unwrap();
        assert_eq!(config.starting_balance, 500);
        assert_eq!(config.bonus, BonusPolicy::Spike { amount: 0.2 });
        assert_eq!(config.grid_columns, 20);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            GameConfig::from_json_str(r#"{ "min_bet": 300 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json_str(r#"{ "grid_columns": 3 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json_str(r#"{ "grid_columns": 4, "grid_rows": 1 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json_str(r#"{ "multiplier_cap": 0.5 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
