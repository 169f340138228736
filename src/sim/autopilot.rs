//! Demo steering: head for the nearest food, never into a wall or the body

use super::grid::{Cell, Direction};
use super::state::Round;

/// Free cells around `cell`, ignoring the snake's tail movement
fn free_neighbours(round: &Round, cell: Cell) -> usize {
    Direction::ALL
        .iter()
        .map(|d| cell.offset(*d))
        .filter(|c| round.grid.is_inside(*c) && !round.snake.occupies(*c))
        .count()
}

/// Pick a direction for the next step, or `None` if every move is fatal
pub fn choose_direction(round: &Round) -> Option<Direction> {
    let snake = &round.snake;
    let head = snake.head();
    let current = snake.direction();

    let nearest_food = |cell: Cell| {
        round
            .food
            .cells()
            .map(|f| cell.manhattan(f))
            .min()
            .unwrap_or(0)
    };

    Direction::ALL
        .iter()
        .copied()
        .filter(|d| *d != current.opposite())
        .filter_map(|d| {
            let next = head.offset(d);
            if !round.grid.is_inside(next) || snake.occupies(next) {
                return None;
            }
            // Lower is better: avoid dead ends, then chase food, then keep going straight
            let dead_end = free_neighbours(round, next) == 0;
            Some(((dead_end, nearest_food(next), d != current), d))
        })
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, d)| d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::food::{Food, FoodColor};
    use crate::sim::snake::Snake;

    fn round_with(snake: Snake, food: &[Cell]) -> Round {
        let mut round = Round::new(&GameConfig::default(), 10);
        round.snake = snake;
        round.food.items = food
            .iter()
            .map(|c| Food {
                cell: *c,
                color: FoodColor::Red,
            })
            .collect();
        round
    }

    #[test]
    fn test_turns_away_from_wall() {
        let snake = Snake::from_segments(
            [Cell::new(19, 8), Cell::new(18, 8), Cell::new(17, 8)],
            Direction::Right,
        )
        .unwrap();
        let round = round_with(snake, &[Cell::new(19, 2)]);
        assert_eq!(choose_direction(&round), Some(Direction::Up));
    }

    #[test]
    fn test_heads_for_food() {
        let grid_snake = Snake::new(&crate::sim::grid::Grid::new(20, 16));
        let round = round_with(grid_snake, &[Cell::new(10, 12)]);
        assert_eq!(choose_direction(&round), Some(Direction::Down));
    }

    #[test]
    fn test_keeps_straight_on_tie() {
        let snake = Snake::new(&crate::sim::grid::Grid::new(20, 16));
        let round = round_with(snake, &[]);
        assert_eq!(choose_direction(&round), Some(Direction::Right));
    }

    #[test]
    fn test_trapped_returns_none() {
        // Corner (0,0) heading up with the body below and to the right
        let snake = Snake::from_segments(
            [
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(1, 0),
                Cell::new(2, 0),
            ],
            Direction::Up,
        )
        .unwrap();
        let round = round_with(snake, &[Cell::new(5, 5)]);
        assert_eq!(choose_direction(&round), None);
    }
}
