use super::collision::space_contact;
use super::constants::{FOOD_SPAWN_RANGE, MAX_SPAWN_ATTEMPTS};
use super::grid::Board;
use super::snake::{GridSnake, SpaceSnake};
use super::types::{GridPos, Point};
use rand::seq::IteratorRandom;
use rand::Rng;

/// Uniform over free cells. A full board falls back to any cell.
pub fn spawn_grid_food<R: Rng>(rng: &mut R, board: &Board, snake: &GridSnake) -> GridPos {
    let free = board.cells().filter(|cell| !snake.occupies(*cell));
    if let Some(cell) = free.choose(rng) {
        return cell;
    }
    GridPos::new(rng.gen_range(0..board.width), rng.gen_range(0..board.height))
}

/// Best effort: after `MAX_SPAWN_ATTEMPTS` overlapping samples the last one is kept.
pub fn spawn_space_food<R: Rng>(rng: &mut R, snake: &SpaceSnake) -> Point {
    let mut candidate = Point::ORIGIN;
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        candidate = Point {
            x: rng.gen_range(-FOOD_SPAWN_RANGE..=FOOD_SPAWN_RANGE),
            y: 0.0,
            z: rng.gen_range(-FOOD_SPAWN_RANGE..=FOOD_SPAWN_RANGE),
        };
        if !snake.positions().any(|segment| space_contact(candidate, segment)) {
            return candidate;
        }
    }
    candidate
}
