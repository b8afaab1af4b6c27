use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

impl Point {
  pub const ORIGIN: Point = Point { x: 0.0, y: 0.0, z: 0.0 };
  pub const UP: Point = Point { x: 0.0, y: 1.0, z: 0.0 };

  pub const fn new(x: f64, y: f64, z: f64) -> Self {
    Self { x, y, z }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
  pub x: i32,
  pub y: i32,
}

impl GridPos {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }

  pub fn step(self, direction: GridDir) -> Self {
    let (dx, dy) = direction.delta();
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridDir {
  Up,
  Down,
  Left,
  Right,
}

impl GridDir {
  pub const ALL: [GridDir; 4] = [GridDir::Up, GridDir::Down, GridDir::Left, GridDir::Right];

  /// Screen coordinates: y grows downward.
  pub fn delta(self) -> (i32, i32) {
    match self {
      GridDir::Up => (0, -1),
      GridDir::Down => (0, 1),
      GridDir::Left => (-1, 0),
      GridDir::Right => (1, 0),
    }
  }

  pub fn opposite(self) -> Self {
    match self {
      GridDir::Up => GridDir::Down,
      GridDir::Down => GridDir::Up,
      GridDir::Left => GridDir::Right,
      GridDir::Right => GridDir::Left,
    }
  }
}

/// Outcome of moving the head onto a candidate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Collision {
  None,
  Wall,
  SelfHit,
  Food,
}

impl Collision {
  pub fn is_fatal(self) -> bool {
    matches!(self, Collision::Wall | Collision::SelfHit)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Phase {
  Running,
  Dying {
    #[serde(rename = "resetAt")]
    reset_at: i64,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
  Grid,
  Space,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum SnakeSnapshot {
  Grid {
    segments: Vec<GridPos>,
    food: GridPos,
    direction: GridDir,
    width: i32,
    height: i32,
  },
  Space {
    segments: Vec<Point>,
    food: Point,
    direction: Point,
  },
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
  pub now: i64,
  pub score: u32,
  pub gems: u32,
  pub level: u32,
  pub multiplier: u32,
  #[serde(rename = "speedBoost")]
  pub speed_boost: bool,
  #[serde(rename = "deathCount")]
  pub death_count: u32,
  pub autoplay: bool,
  pub phase: Phase,
  pub snake: SnakeSnapshot,
}
