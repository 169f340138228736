//! Food placement

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use super::rng::RandomSource;
use super::snake::Snake;

/// Cosmetic food tint (renderer maps these to its palette)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodColor {
    Red,
    Orange,
    Purple,
    Cyan,
    Pink,
}

impl FoodColor {
    pub const PALETTE: [FoodColor; 5] = [
        FoodColor::Red,
        FoodColor::Orange,
        FoodColor::Purple,
        FoodColor::Cyan,
        FoodColor::Pink,
    ];
}

/// A food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub cell: Cell,
    pub color: FoodColor,
}

/// Food items currently on the board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodField {
    pub items: Vec<Food>,
}

impl FoodField {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.items.iter().any(|f| f.cell == cell)
    }

    /// Remove and return the item at `cell`
    pub fn take_at(&mut self, cell: Cell) -> Option<Food> {
        let idx = self.items.iter().position(|f| f.cell == cell)?;
        Some(self.items.remove(idx))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.items.iter().map(|f| f.cell)
    }

    /// Top the board back up to `target` items.
    ///
    /// Each item is placed by rejection sampling against the snake and existing
    /// food, giving up after `max_attempts` draws and keeping the last sample.
    /// Returns the number of placements that hit the attempt cap.
    pub fn replenish(
        &mut self,
        grid: &Grid,
        snake: &Snake,
        target: usize,
        max_attempts: u32,
        rng: &mut dyn RandomSource,
    ) -> usize {
        let mut exhausted = 0;
        while self.items.len() < target {
            let mut cell;
            let mut tries = 0;
            loop {
                cell = Cell::new(
                    rng.next_below(grid.columns as u32) as i32,
                    rng.next_below(grid.rows as u32) as i32,
                );
                tries += 1;
                let blocked = snake.occupies(cell) || self.contains(cell);
                if !blocked {
                    break;
                }
                if tries >= max_attempts {
                    exhausted += 1;
                    log::warn!(
                        "Food placement gave up after {} attempts, accepting {:?}",
                        tries,
                        cell
                    );
                    break;
                }
            }
            let color = FoodColor::PALETTE[rng.next_below(FoodColor::PALETTE.len() as u32) as usize];
            self.items.push(Food { cell, color });
        }
        exhausted
    }
}
