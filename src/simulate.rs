//! Headless batch play for estimating return-to-player
//!
//! Runs whole rounds through `Session` with the demo autopilot steering and a
//! fixed cash-out target, and tallies what came back.

use serde::Serialize;

use crate::config::{ConfigError, GameConfig};
use crate::consts::TICK_MS;
use crate::sim::{CrashCause, GameEvent, RoundPhase, Session, choose_direction};

/// Histogram bucket width (in multiplier units)
pub const BUCKET_WIDTH: f64 = 0.5;

/// How the simulated player behaves
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub rounds: u32,
    pub bet: u64,
    /// Cash out once the multiplier reaches this; `None` rides until the crash
    pub target: Option<f64>,
    /// Steer with the autopilot; otherwise the snake only goes straight
    pub steer: bool,
    /// Elapsed time fed per tick (0 freezes the snake)
    pub tick_ms: f64,
    /// Forced cash-out after this many ticks in one round
    pub max_ticks_per_round: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            rounds: 1000,
            bet: 100,
            target: Some(2.0),
            steer: true,
            tick_ms: TICK_MS,
            max_ticks_per_round: 100_000,
        }
    }
}

/// Aggregate results
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationReport {
    pub rounds: u32,
    pub crashed: u32,
    /// Crashes caused by hitting a wall or the body
    pub collisions: u32,
    pub cashed_out: u32,
    pub wagered: u64,
    pub returned: u64,
    pub total_score: u64,
    pub best_score: u32,
    /// Crash multipliers bucketed by `BUCKET_WIDTH` from 1.0x
    pub crash_histogram: Vec<u32>,
    /// Balance resets needed to keep betting
    pub resets: u32,
}

impl SimulationReport {
    /// Returned / wagered
    pub fn rtp(&self) -> f64 {
        if self.wagered == 0 {
            0.0
        } else {
            self.returned as f64 / self.wagered as f64
        }
    }

    pub fn mean_score(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.total_score as f64 / self.rounds as f64
        }
    }

    /// Crashes at or above `multiplier`
    pub fn crashes_at_or_above(&self, multiplier: f64) -> u32 {
        let first = bucket_index(multiplier, self.crash_histogram.len());
        self.crash_histogram[first..].iter().sum()
    }

    /// Crashes below `multiplier`
    pub fn crashes_below(&self, multiplier: f64) -> u32 {
        let first = bucket_index(multiplier, self.crash_histogram.len());
        self.crash_histogram[..first].iter().sum()
    }
}

fn bucket_index(multiplier: f64, buckets: usize) -> usize {
    let idx = ((multiplier - 1.0) / BUCKET_WIDTH).floor().max(0.0) as usize;
    idx.min(buckets.saturating_sub(1))
}

/// Play `params.rounds` rounds on a fresh session
pub fn run(
    config: &GameConfig,
    seed: u64,
    params: &SimulationParams,
) -> Result<SimulationReport, ConfigError> {
    let buckets = ((config.multiplier_cap - 1.0) / BUCKET_WIDTH).ceil() as usize + 1;
    let mut report = SimulationReport {
        crash_histogram: vec![0; buckets],
        ..Default::default()
    };
    let mut session = Session::new(config.clone(), seed)?;

    for _ in 0..params.rounds {
        if !session.bankroll().can_cover(params.bet) {
            // Never fails: no round is running between iterations
            let _ = session.request_reset();
            report.resets += 1;
        }
        if let Err(err) = session.request_start(params.bet as i64) {
            log::warn!("Simulation stopped: {}", err);
            break;
        }
        report.rounds += 1;
        report.wagered += params.bet;

        while session.phase() == RoundPhase::Running {
            if params.steer {
                if let Some(dir) = choose_direction(session.round()) {
                    session.steer(dir);
                }
            }
            session.on_tick(params.tick_ms);

            let reached_target = params
                .target
                .is_some_and(|t| session.round().multiplier >= t);
            if reached_target || session.round().ticks >= params.max_ticks_per_round {
                session.request_cash_out();
            }
        }

        for event in session.drain_events() {
            match event {
                GameEvent::Crashed {
                    multiplier, cause, ..
                } => {
                    report.crashed += 1;
                    if cause != CrashCause::Risk {
                        report.collisions += 1;
                    }
                    report.crash_histogram[bucket_index(multiplier, buckets)] += 1;
                }
                GameEvent::CashedOut { payout, .. } => {
                    report.cashed_out += 1;
                    report.returned += payout;
                }
                _ => {}
            }
        }
        report.total_score += session.round().score as u64;
    }

    report.best_score = session.bankroll().best_score;
    log::info!(
        "Simulated {} rounds: RTP {:.4}, {} crashed ({} collisions), {} cashed out",
        report.rounds,
        report.rtp(),
        report.crashed,
        report.collisions,
        report.cashed_out
    );
    Ok(report)
}
