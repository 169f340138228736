//! Round simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders, plays audio
//! or touches the platform:
//! - Time arrives only as elapsed milliseconds per tick
//! - Randomness arrives only through `RandomSource`
//! - Output is a `Snapshot` plus a queue of `GameEvent`s

pub mod autopilot;
pub mod food;
pub mod grid;
pub mod risk;
pub mod rng;
pub mod session;
pub mod snake;
pub mod state;
pub mod tick;

pub use autopilot::choose_direction;
pub use food::{Food, FoodColor, FoodField};
pub use grid::{Cell, Direction, Grid};
pub use risk::{BonusKind, Settlement};
pub use rng::{RandomSource, RngState, ScriptedRandom};
pub use session::{CommandError, Session, parse_bet};
pub use snake::{DeathCause, Snake, StepResult};
pub use state::{CrashCause, GameEvent, Round, RoundPhase, Snapshot};
pub use tick::{TickOutcome, tick};
