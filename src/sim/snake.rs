//! Snake body, steering and movement rules

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, Grid};

/// Starting body length
pub const START_LENGTH: usize = 3;

/// Outcome of one movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepResult {
    Moved,
    /// Head landed on food; the snake grew by one segment
    AteFoodAt(Cell),
    Died(DeathCause),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Wall,
    SelfCollision,
}

/// The player's snake (head first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Direction,
    death: Option<DeathCause>,
}

impl Snake {
    /// Three segments with the head at the grid center, moving right
    pub fn new(grid: &Grid) -> Self {
        let head = grid.center();
        let body = (0..START_LENGTH as i32)
            .map(|i| Cell::new(head.x - i, head.y))
            .collect();
        Self {
            body,
            direction: Direction::Right,
            pending: Direction::Right,
            death: None,
        }
    }

    /// Build a snake from explicit segments (head first); `None` if empty
    pub fn from_segments(
        segments: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Option<Self> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            direction,
            pending: direction,
            death: None,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Queue a turn. Reversing onto the neck is dropped silently.
    /// Returns whether the input was accepted.
    pub fn set_pending_direction(&mut self, dir: Direction) -> bool {
        if dir == self.direction.opposite() {
            return false;
        }
        self.pending = dir;
        true
    }

    pub fn apply_pending_direction(&mut self) {
        self.direction = self.pending;
    }

    /// Advance one cell in the current direction.
    ///
    /// Collision is checked against the whole pre-move body, so moving onto
    /// the cell the tail is about to vacate is fatal.
    pub fn step(&mut self, grid: &Grid, is_food: impl Fn(Cell) -> bool) -> StepResult {
        if let Some(cause) = self.death {
            return StepResult::Died(cause);
        }

        let new_head = self.head().offset(self.direction);

        if !grid.is_inside(new_head) {
            self.death = Some(DeathCause::Wall);
            return StepResult::Died(DeathCause::Wall);
        }
        if self.occupies(new_head) {
            self.death = Some(DeathCause::SelfCollision);
            return StepResult::Died(DeathCause::SelfCollision);
        }

        self.body.push_front(new_head);
        if is_food(new_head) {
            StepResult::AteFoodAt(new_head)
        } else {
            self.body.pop_back();
            StepResult::Moved
        }
    }
}
