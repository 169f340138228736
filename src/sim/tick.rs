//! One simulation tick
//!
//! Order matters: grow the multiplier, roll the crash against the grown
//! multiplier, then spend accumulated time on at most one snake step. Elapsed
//! time is never capped here; whatever a step does not use carries over.

use super::food::FoodField;
use super::grid::Cell;
use super::rng::RandomSource;
use super::risk;
use super::snake::StepResult;
use super::state::{CrashCause, GameEvent, Round};
use crate::config::GameConfig;

/// How a tick left the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Round not running; nothing happened
    Skipped,
    Continue,
    Crashed(CrashCause),
}

/// Negative and NaN elapsed times count as zero
#[inline]
pub fn sanitize_elapsed(elapsed_ms: f64) -> f64 {
    if elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
        0.0
    } else {
        elapsed_ms
    }
}

/// Advance a running round by one tick.
///
/// Food and bonus events are pushed to `events`; the terminal transition is
/// left to the caller.
pub fn tick(
    round: &mut Round,
    config: &GameConfig,
    elapsed_ms: f64,
    crash_rng: &mut dyn RandomSource,
    food_rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) -> TickOutcome {
    if !round.phase.is_running() {
        return TickOutcome::Skipped;
    }

    round.ticks += 1;

    round.multiplier = risk::grow(config, round.multiplier, round.food_eaten);

    if risk::roll_crash(config, round.multiplier, crash_rng) {
        return TickOutcome::Crashed(CrashCause::Risk);
    }

    // Surplus carries over to the next step
    round.step_accumulator_ms += sanitize_elapsed(elapsed_ms);
    if round.step_accumulator_ms < round.step_interval_ms {
        return TickOutcome::Continue;
    }
    round.step_accumulator_ms -= round.step_interval_ms;

    round.snake.apply_pending_direction();
    let food: &FoodField = &round.food;
    let result = round.snake.step(&round.grid, |c| food.contains(c));

    match result {
        StepResult::Moved => TickOutcome::Continue,
        StepResult::Died(cause) => TickOutcome::Crashed(cause.into()),
        StepResult::AteFoodAt(cell) => {
            eat_food(round, config, cell, food_rng, events);
            TickOutcome::Continue
        }
    }
}

fn eat_food(
    round: &mut Round,
    config: &GameConfig,
    cell: Cell,
    food_rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let eaten = round.food.take_at(cell);
    round.food.replenish(
        &round.grid,
        &round.snake,
        config.food_count,
        config.food_placement_attempts,
        food_rng,
    );

    round.score += 1;
    round.food_eaten += 1;
    round.step_interval_ms = risk::faster_step(config, round.step_interval_ms);

    if let Some(eaten) = eaten {
        events.push(GameEvent::FoodEaten {
            cell,
            color: eaten.color,
            score: round.score,
        });
    }
    log::debug!(
        "Food eaten at ({}, {}), score {}, step {}ms",
        cell.x,
        cell.y,
        round.score,
        round.step_interval_ms
    );

    let bonus = risk::apply_bonus(config, round.multiplier, round.streak);
    round.multiplier = bonus.multiplier;
    round.streak = bonus.streak;
    if let Some(kind) = bonus.fired {
        if let risk::BonusKind::Spike { amount } = kind {
            round.spike_total += amount;
        }
        log::debug!("Bonus {:?} -> {:.2}x", kind, round.multiplier);
        events.push(GameEvent::BonusTriggered {
            bonus: kind,
            multiplier: round.multiplier,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::food::{Food, FoodColor};
    use crate::sim::rng::{RngState, ScriptedRandom};
    use crate::sim::state::RoundPhase;

    fn running_round(config: &GameConfig) -> Round {
        let mut round = Round::new(config, 100);
        round.phase = RoundPhase::Running;
        round
    }

    #[test]
    fn test_skipped_when_not_running() {
        let config = GameConfig::default();
        let mut round = Round::new(&config, 100);
        let mut crash = ScriptedRandom::new(vec![0.0]);
        let mut food = RngState::new(1).food_rng();
        let mut events = Vec::new();
        let out = tick(&mut round, &config, 16.0, &mut crash, &mut food, &mut events);
        assert_eq!(out, TickOutcome::Skipped);
        assert_eq!(round.multiplier, 1.0);
        assert_eq!(crash.drawn(), 0);
    }

    #[test]
    fn test_crash_uses_grown_multiplier() {
        let config = GameConfig::default();
        let mut round = running_round(&config);
        // Exactly p(1.0): would crash on the pre-growth multiplier, not on the grown one
        let p_before = risk::crash_probability(&config, 1.0);
        let p_after = risk::crash_probability(&config, 1.004);
        let mut crash = ScriptedRandom::new(vec![p_before]);
        assert!(p_before < p_after);
        let mut food = RngState::new(1).food_rng();
        let mut events = Vec::new();
        let first = tick(&mut round, &config, 0.0, &mut crash, &mut food, &mut events);
        assert_eq!(first, TickOutcome::Crashed(CrashCause::Risk));
        assert!((round.multiplier - 1.004).abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_keeps_surplus() {
        let config = GameConfig::default();
        let mut round = running_round(&config);
        let mut crash = ScriptedRandom::new(vec![0.999]);
        let mut food = RngState::new(1).food_rng();
        let mut events = Vec::new();

        tick(&mut round, &config, 100.0, &mut crash, &mut food, &mut events);
        assert_eq!(round.snake.head(), Cell::new(10, 8));
        tick(&mut round, &config, 50.0, &mut crash, &mut food, &mut events);
        assert_eq!(round.snake.head(), Cell::new(11, 8));
        assert!((round.step_accumulator_ms - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_elapsed_counts_as_zero() {
        assert_eq!(sanitize_elapsed(-5.0), 0.0);
        assert_eq!(sanitize_elapsed(f64::NAN), 0.0);
        assert_eq!(sanitize_elapsed(5000.0), 5000.0);
        assert_eq!(sanitize_elapsed(16.5), 16.5);
    }

    #[test]
    fn test_long_tick_is_not_truncated() {
        let config = GameConfig::default();
        let mut round = running_round(&config);
        let mut crash = ScriptedRandom::new(vec![0.999]);
        let mut food = RngState::new(1).food_rng();
        let mut events = Vec::new();

        // Two steps worth of time in one tick: one step now, the rest next tick
        tick(&mut round, &config, 276.0, &mut crash, &mut food, &mut events);
        assert_eq!(round.snake.head(), Cell::new(11, 8));
        assert_eq!(round.step_accumulator_ms, 138.0);
        tick(&mut round, &config, 0.0, &mut crash, &mut food, &mut events);
        assert_eq!(round.snake.head(), Cell::new(12, 8));
        assert_eq!(round.step_accumulator_ms, 0.0);
    }

    #[test]
    fn test_eating_updates_round() {
        let config = GameConfig::default();
        let mut round = running_round(&config);
        round.food.items = vec![
            Food {
                cell: Cell::new(11, 8),
                color: FoodColor::Cyan,
            },
            Food {
                cell: Cell::new(0, 0),
                color: FoodColor::Red,
            },
        ];
        let mut crash = ScriptedRandom::new(vec![0.999]);
        let mut food = RngState::new(9).food_rng();
        let mut events = Vec::new();

        let out = tick(&mut round, &config, 138.0, &mut crash, &mut food, &mut events);
        assert_eq!(out, TickOutcome::Continue);
        assert_eq!(round.snake.len(), 4);
        assert_eq!((round.food_eaten, round.score, round.streak), (1, 1, 1));
        assert_eq!(round.step_interval_ms, 135.0);
        assert_eq!(round.food.len(), 2);
        assert!(!round.food.contains(Cell::new(11, 8)));
        assert_eq!(
            events,
            vec![GameEvent::FoodEaten {
                cell: Cell::new(11, 8),
                color: FoodColor::Cyan,
                score: 1
            }]
        );
    }
}
