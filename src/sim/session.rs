//! Round state machine
//!
//! Idle -> Running -> {Crashed | CashedOut} -> Running -> ...
//!
//! The session owns the bankroll, the current round and both random streams.
//! Presentation reads `snapshot()` and drains `GameEvent`s after each call.

use thiserror::Error;

use super::grid::Direction;
use super::rng::{RandomSource, RngState};
use super::risk::{BonusKind, Settlement};
use super::state::{CrashCause, GameEvent, Round, RoundPhase, Snapshot};
use super::tick::{TickOutcome, tick};
use crate::bankroll::Bankroll;
use crate::config::{ConfigError, GameConfig};

/// Rejected commands. State is untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("bet must be a whole number, got {0:?}")]
    InvalidBet(String),
    #[error("bet {bet} is outside the allowed range {min}..={max}")]
    BetOutOfRange { bet: i64, min: u64, max: u64 },
    #[error("bet {bet} exceeds balance {balance}")]
    InsufficientBalance { bet: u64, balance: u64 },
    #[error("a round is already running")]
    RoundInProgress,
}

/// Parse raw bet input into a whole amount
pub fn parse_bet(input: &str) -> Result<i64, CommandError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidBet(input.to_string()))
}

/// One player's game session
pub struct Session {
    config: GameConfig,
    bankroll: Bankroll,
    round: Round,
    crash_rng: Box<dyn RandomSource>,
    food_rng: Box<dyn RandomSource>,
    events: Vec<GameEvent>,
}

impl Session {
    /// New session with both random streams derived from `seed`.
    /// Fails if `config` does not validate.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let rng_state = RngState::new(seed);
        log::info!(
            "Session created (variant {}, seed {})",
            config.variant().as_str(),
            seed
        );
        Self::with_sources(
            config,
            Box::new(rng_state.crash_rng()),
            Box::new(rng_state.food_rng()),
        )
    }

    /// New session with explicit random sources
    pub fn with_sources(
        config: GameConfig,
        crash_rng: Box<dyn RandomSource>,
        food_rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            bankroll: Bankroll::new(config.starting_balance),
            round: Round::new(&config, 0),
            config,
            crash_rng,
            food_rng,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bankroll(&self) -> &Bankroll {
        &self.bankroll
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    /// Whether the tick source should be running
    pub fn is_ticking(&self) -> bool {
        self.round.phase.is_running()
    }

    /// Start a round with a raw bet input
    pub fn request_start_str(&mut self, input: &str) -> Result<(), CommandError> {
        let bet = parse_bet(input)?;
        self.request_start(bet)
    }

    /// Start a round. Allowed from Idle, Crashed and CashedOut.
    pub fn request_start(&mut self, bet: i64) -> Result<(), CommandError> {
        if self.round.phase.is_running() {
            return Err(CommandError::RoundInProgress);
        }
        let (min, max) = (self.config.min_bet, self.config.max_bet);
        if bet < min as i64 || bet > max as i64 {
            return Err(CommandError::BetOutOfRange { bet, min, max });
        }
        let bet = bet as u64;
        if !self.bankroll.debit(bet) {
            return Err(CommandError::InsufficientBalance {
                bet,
                balance: self.bankroll.balance,
            });
        }

        let mut round = Round::new(&self.config, bet);
        round.food.replenish(
            &round.grid,
            &round.snake,
            self.config.food_count,
            self.config.food_placement_attempts,
            self.food_rng.as_mut(),
        );
        round.phase = RoundPhase::Running;
        self.round = round;

        log::info!(
            "Round started: bet {}, balance {}",
            bet,
            self.bankroll.balance
        );
        self.events.push(GameEvent::RoundStarted {
            bet,
            balance: self.bankroll.balance,
        });
        Ok(())
    }

    /// Feed one tick from the tick source. No-op unless Running.
    pub fn on_tick(&mut self, elapsed_ms: f64) -> RoundPhase {
        let first_new_event = self.events.len();
        let outcome = tick(
            &mut self.round,
            &self.config,
            elapsed_ms,
            self.crash_rng.as_mut(),
            self.food_rng.as_mut(),
            &mut self.events,
        );

        let combos = self.events[first_new_event..]
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::BonusTriggered {
                        bonus: BonusKind::Combo { .. },
                        ..
                    }
                )
            })
            .count() as u32;
        self.bankroll.total_combos += combos;

        if let TickOutcome::Crashed(cause) = outcome {
            self.crash(cause);
        }
        self.round.phase
    }

    fn crash(&mut self, cause: CrashCause) {
        self.round.phase = RoundPhase::Crashed;
        self.bankroll.record_score(self.round.score);
        log::info!(
            "Crashed at {:.2}x ({:?}), lost {}",
            self.round.multiplier,
            cause,
            self.round.bet
        );
        self.events.push(GameEvent::Crashed {
            multiplier: self.round.multiplier,
            cause,
            bet: self.round.bet,
        });
    }

    /// Steer with a raw (dx, dy) vector. Ignored unless Running, for non-unit
    /// vectors and for reversals. Returns whether the turn was queued.
    pub fn set_direction(&mut self, dx: i32, dy: i32) -> bool {
        match Direction::from_delta(dx, dy) {
            Some(dir) => self.steer(dir),
            None => false,
        }
    }

    pub fn steer(&mut self, dir: Direction) -> bool {
        if !self.round.phase.is_running() {
            return false;
        }
        self.round.snake.set_pending_direction(dir)
    }

    /// Cash out at the current multiplier. Returns `None` (and changes
    /// nothing) unless a round is Running.
    pub fn request_cash_out(&mut self) -> Option<Settlement> {
        if !self.round.phase.is_running() {
            return None;
        }
        let settlement = Settlement::new(self.round.bet, self.round.multiplier);
        self.round.phase = RoundPhase::CashedOut;
        self.bankroll.credit(settlement.payout);
        self.bankroll.record_score(self.round.score);

        log::info!(
            "Cashed out at {:.2}x: payout {}, profit {}, balance {}",
            self.round.multiplier,
            settlement.payout,
            settlement.profit,
            self.bankroll.balance
        );
        self.events.push(GameEvent::CashedOut {
            payout: settlement.payout,
            profit: settlement.profit,
            multiplier: self.round.multiplier,
        });
        Some(settlement)
    }

    /// Restore the starting balance. Refused while a round is Running.
    pub fn request_reset(&mut self) -> Result<(), CommandError> {
        if self.round.phase.is_running() {
            return Err(CommandError::RoundInProgress);
        }
        self.bankroll.reset();
        log::info!("Balance reset to {}", self.bankroll.balance);
        self.events.push(GameEvent::BalanceReset {
            balance: self.bankroll.balance,
        });
        Ok(())
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let round = &self.round;
        Snapshot {
            state: round.phase,
            multiplier: round.multiplier,
            balance: self.bankroll.balance,
            bet: round.bet,
            score: round.score,
            best_score: self.bankroll.best_score,
            food_eaten: round.food_eaten,
            streak: round.streak,
            spike_total: round.spike_total,
            total_combos: self.bankroll.total_combos,
            step_interval_ms: round.step_interval_ms,
            direction: round.snake.direction(),
            snake: round.snake.segments().collect(),
            food: round.food.items.clone(),
        }
    }
}
