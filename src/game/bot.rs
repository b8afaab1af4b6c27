use super::collision::classify_grid;
use super::constants::{BOT_BLOCK_DOT, BOT_MOVE_SCORE};
use super::grid::Board;
use super::math::{cross, dot, normalize, sub};
use super::snake::{GridSnake, SpaceSnake};
use super::types::{GridDir, GridPos, Point};

/// Greedy one-step lookahead. `None` means every move is fatal and the caller should
/// hold its current direction.
pub fn choose_grid_move(board: &Board, snake: &GridSnake, food: GridPos) -> Option<GridDir> {
    let head = snake.head()?;
    let reverse = snake.moved_direction().opposite();
    let dx = food.x - head.x;
    let dy = food.y - head.y;

    let mut best: Option<(GridDir, i32)> = None;
    for direction in GridDir::ALL {
        if direction == reverse {
            continue;
        }
        let outcome = classify_grid(board, snake, food, head.step(direction));
        if outcome.is_fatal() {
            continue;
        }
        let mut score = 0;
        let (step_x, step_y) = direction.delta();
        if step_x != 0 && step_x.signum() == dx.signum() {
            score += BOT_MOVE_SCORE;
        }
        if step_y != 0 && step_y.signum() == dy.signum() {
            score += BOT_MOVE_SCORE;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((direction, score)),
        }
    }

    best.map(|(direction, _)| direction)
}

/// Straight line to the food, bent sideways (about the vertical axis) once per body
/// segment sitting close to that line. Not a planner: it can still steer into the body
/// and can flip back and forth between ticks.
pub fn steer_space(snake: &SpaceSnake, food: Point) -> Option<Point> {
    let head = snake.head()?;
    let to_food = normalize(sub(food, head));
    if to_food == Point::ORIGIN {
        return None;
    }

    let mut target = to_food;
    for segment in snake.positions().skip(1) {
        let to_segment = normalize(sub(segment, head));
        if dot(to_segment, to_food) > BOT_BLOCK_DOT {
            target = normalize(cross(target, Point::UP));
        }
    }
    Some(target)
}
