pub const CANVAS_WIDTH: u32 = 600;
pub const CANVAS_HEIGHT: u32 = 600;
pub const CELL_SIZE: u32 = 20;
pub const GRID_START_X: i32 = 10;
pub const GRID_START_Y: i32 = 10;

pub const POINTS_PER_FOOD: u32 = 10;
pub const GEMS_PER_FOOD: u32 = 1;
pub const FOODS_PER_LEVEL: u32 = 5;
pub const DEATHS_BEFORE_AUTOPLAY: u32 = 5;
pub const RESET_DELAY_MS: i64 = 3000;

pub const BASE_MOVE_INTERVAL_MS: u64 = 100;
pub const SPEED_BOOST_STEP_MS: u64 = 30;
pub const MIN_MOVE_INTERVAL_MS: u64 = 50;
pub const SPEED_BOOST_COST: u32 = 10;
pub const DOUBLE_POINTS_COST: u32 = 25;
pub const DOUBLE_POINTS_MULTIPLIER: u32 = 2;

pub const SPACE_SPEED: f64 = 0.1;
pub const SEGMENT_QUEUE_SIZE: usize = 10;
pub const SPACE_COLLISION_DISTANCE: f64 = 0.5;
pub const HYPERBOLIC_SCALE: f64 = 20.0;
pub const FOOD_SPAWN_RANGE: f64 = 8.0;
pub const MAX_SPAWN_ATTEMPTS: usize = 32;
pub const BOT_BLOCK_DOT: f64 = 0.9;
pub const BOT_MOVE_SCORE: i32 = 10;

pub const IDLE_RESET_MS: i64 = 120_000;
