//! Round state and the types handed to presentation
//!
//! A `Round` is rebuilt on every Start; everything that outlives a round lives
//! in the session's `Bankroll`.

use serde::{Deserialize, Serialize};

use super::food::{Food, FoodColor, FoodField};
use super::grid::{Cell, Direction, Grid};
use super::risk::BonusKind;
use super::snake::{DeathCause, Snake};
use crate::config::GameConfig;

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundPhase {
    /// No round played yet
    #[default]
    Idle,
    /// Ticking; the multiplier is live
    Running,
    /// Lost the bet (crash roll or collision)
    Crashed,
    /// Bet settled at the cash-out multiplier
    CashedOut,
}

impl RoundPhase {
    pub fn is_running(self) -> bool {
        self == RoundPhase::Running
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoundPhase::Idle => "IDLE",
            RoundPhase::Running => "RUNNING",
            RoundPhase::Crashed => "CRASHED",
            RoundPhase::CashedOut => "CASHED_OUT",
        }
    }
}

/// Why a round crashed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Per-tick hazard roll
    Risk,
    Wall,
    SelfCollision,
}

impl From<DeathCause> for CrashCause {
    fn from(cause: DeathCause) -> Self {
        match cause {
            DeathCause::Wall => CrashCause::Wall,
            DeathCause::SelfCollision => CrashCause::SelfCollision,
        }
    }
}

/// Observational events for audio/visual cues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted { bet: u64, balance: u64 },
    FoodEaten { cell: Cell, color: FoodColor, score: u32 },
    BonusTriggered { bonus: BonusKind, multiplier: f64 },
    Crashed { multiplier: f64, cause: CrashCause, bet: u64 },
    CashedOut { payout: u64, profit: i64, multiplier: f64 },
    BalanceReset { balance: u64 },
}

/// Mutable state of the current (or last) round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub phase: RoundPhase,
    pub bet: u64,
    pub multiplier: f64,
    pub food_eaten: u32,
    pub score: u32,
    /// Current snake step interval (ms)
    pub step_interval_ms: f64,
    /// Elapsed time not yet spent on a step (ms)
    pub step_accumulator_ms: f64,
    /// Foods toward the next combo
    pub streak: u32,
    /// Sum of spike jumps this round
    pub spike_total: f64,
    /// Ticks processed this round
    pub ticks: u64,
    pub grid: Grid,
    pub snake: Snake,
    pub food: FoodField,
}

impl Round {
    /// Fresh round state (no food placed yet)
    pub fn new(config: &GameConfig, bet: u64) -> Self {
        let grid = Grid::new(config.grid_columns, config.grid_rows);
        Self {
            phase: RoundPhase::Idle,
            bet,
            multiplier: 1.0,
            food_eaten: 0,
            score: 0,
            step_interval_ms: config.base_step_ms,
            step_accumulator_ms: 0.0,
            streak: 0,
            spike_total: 0.0,
            ticks: 0,
            snake: Snake::new(&grid),
            grid,
            food: FoodField::new(),
        }
    }
}

/// Read-only view for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: RoundPhase,
    pub multiplier: f64,
    pub balance: u64,
    pub bet: u64,
    pub score: u32,
    pub best_score: u32,
    pub food_eaten: u32,
    pub streak: u32,
    pub spike_total: f64,
    pub total_combos: u32,
    pub step_interval_ms: f64,
    pub direction: Direction,
    /// Head first
    pub snake: Vec<Cell>,
    pub food: Vec<Food>,
}
