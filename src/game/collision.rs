use super::constants::SPACE_COLLISION_DISTANCE;
use super::grid::Board;
use super::math::transformed_distance;
use super::snake::{GridSnake, SpaceSnake};
use super::types::{Collision, GridPos, Point};

// Walls, then the body, then food: a move that would eat and die at once is a death.

pub fn classify_grid(board: &Board, snake: &GridSnake, food: GridPos, candidate: GridPos) -> Collision {
    if !board.contains(candidate) {
        return Collision::Wall;
    }
    if snake.occupies(candidate) {
        return Collision::SelfHit;
    }
    if candidate == food {
        return Collision::Food;
    }
    Collision::None
}

pub fn space_contact(a: Point, b: Point) -> bool {
    transformed_distance(a, b) < SPACE_COLLISION_DISTANCE
}

/// Unbounded space: no walls. The head itself is never tested against the candidate.
pub fn classify_space(snake: &SpaceSnake, food: Point, candidate: Point) -> Collision {
    if snake
        .positions()
        .skip(1)
        .any(|segment| space_contact(candidate, segment))
    {
        return Collision::SelfHit;
    }
    if space_contact(candidate, food) {
        return Collision::Food;
    }
    Collision::None
}
