//! Snake Cashout - a snake arcade crash game
//!
//! Core modules:
//! - `sim`: Round simulation (grid, snake, food, risk engine, state machine)
//! - `config`: Load-time tuning and variant presets
//! - `bankroll`: Session balance and best score
//! - `platform`: Tick source and browser adapter
//! - `simulate`: Headless batch rounds for RTP estimation

pub mod bankroll;
pub mod config;
pub mod platform;
pub mod sim;
pub mod simulate;

pub use bankroll::Bankroll;
pub use config::{BonusPolicy, ConfigError, GameConfig, Variant};
pub use sim::{CommandError, GameEvent, RoundPhase, Session, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Nominal tick interval of the frame loop (60 Hz)
    pub const TICK_MS: f64 = 1000.0 / 60.0;

    /// Bankroll
    pub const STARTING_BALANCE: u64 = 1000;
    pub const MIN_BET: u64 = 10;
    pub const MAX_BET: u64 = 250;

    /// Grid dimensions
    pub const GRID_COLS: i32 = 20;
    pub const GRID_ROWS: i32 = 16;

    /// Snake step interval (ms) and its speed-up per food
    pub const BASE_SPEED_MS: f64 = 138.0;
    pub const SPEED_INCREASE: f64 = 3.0;
    pub const MIN_SPEED_MS: f64 = 52.0;

    /// Multiplier growth per tick
    pub const MULT_GROWTH_BASE: f64 = 0.004;
    pub const MULT_FOOD_BONUS: f64 = 0.08;
    pub const MULT_CAP: f64 = 10.0;

    /// Combo bonus: instant jump every COMBO_THRESHOLD foods
    pub const COMBO_THRESHOLD: u32 = 3;
    pub const COMBO_BONUS: f64 = 0.15;
    /// Spike bonus: instant jump on every food
    pub const SPIKE_AMOUNT: f64 = 0.10;

    /// Per-tick crash hazard p = BASE_RISK * multiplier^RISK_EXP
    pub const BASE_RISK: f64 = 0.0028;
    pub const SPIKE_BASE_RISK: f64 = 0.0026;
    pub const RISK_EXP: f64 = 1.5;

    /// Food items kept on the board
    pub const FOOD_COUNT: usize = 2;
    /// Rejection-sampling budget per food placement
    pub const FOOD_PLACEMENT_ATTEMPTS: u32 = 120;
}

/// Floor of `bet * multiplier`, the amount credited on cash-out
#[inline]
pub fn payout_for(bet: u64, multiplier: f64) -> u64 {
    (bet as f64 * multiplier).floor() as u64
}
