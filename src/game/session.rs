use super::bot::{choose_grid_move, steer_space};
use super::collision::{classify_grid, classify_space};
use super::constants::{
  BASE_MOVE_INTERVAL_MS, DEATHS_BEFORE_AUTOPLAY, DOUBLE_POINTS_MULTIPLIER, FOODS_PER_LEVEL,
  GEMS_PER_FOOD, GRID_START_X, GRID_START_Y, MIN_MOVE_INTERVAL_MS, POINTS_PER_FOOD,
  RESET_DELAY_MS, SPEED_BOOST_STEP_MS,
};
use super::food::{spawn_grid_food, spawn_space_food};
use super::grid::Board;
use super::input::Command;
use super::snake::{GridSnake, SpaceSnake};
use super::store::StoreItem;
use super::types::{Collision, GridPos, Phase, Point, SessionSnapshot, SnakeSnapshot, Variant};
use crate::config::GameConfig;
use crate::error::{GameError, StoreError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
  pub score: u32,
  pub gems: u32,
  pub level: u32,
  pub multiplier: u32,
  pub speed_boost: bool,
  pub foods_eaten: u32,
}

impl Default for Stats {
  fn default() -> Self {
    Self {
      score: 0,
      gems: 0,
      level: 1,
      multiplier: 1,
      speed_boost: false,
      foods_eaten: 0,
    }
  }
}

#[derive(Debug, Clone)]
pub struct Lifecycle {
  pub death_count: u32,
  /// One-way latch: set after `DEATHS_BEFORE_AUTOPLAY` deaths, never cleared.
  pub autoplay: bool,
  pub phase: Phase,
  pending_resets: VecDeque<i64>,
}

impl Lifecycle {
  fn new() -> Self {
    Self {
      death_count: 0,
      autoplay: false,
      phase: Phase::Running,
      pending_resets: VecDeque::new(),
    }
  }
}

#[derive(Debug, Clone)]
enum World {
  Grid {
    snake: GridSnake,
    food: GridPos,
  },
  Space {
    snake: SpaceSnake,
    food: Point,
  },
}

#[derive(Debug)]
pub struct GameSession {
  board: Board,
  world: World,
  stats: Stats,
  life: Lifecycle,
  rng: StdRng,
}

impl GameSession {
  pub fn new(config: GameConfig) -> Result<Self, GameError> {
    let board = Board::from_canvas(config.canvas_width, config.canvas_height, config.cell_size)?;
    let mut rng = match config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    let world = Self::fresh_world(config.variant, &board, &mut rng);
    Ok(Self {
      board,
      world,
      stats: Stats::default(),
      life: Lifecycle::new(),
      rng,
    })
  }

  fn grid_start(board: &Board) -> GridPos {
    let preferred = GridPos::new(GRID_START_X, GRID_START_Y);
    if board.contains(preferred) {
      preferred
    } else {
      GridPos::new(board.width / 2, board.height / 2)
    }
  }

  fn fresh_world(variant: Variant, board: &Board, rng: &mut StdRng) -> World {
    match variant {
      Variant::Grid => {
        let snake = GridSnake::new(Self::grid_start(board));
        let food = spawn_grid_food(rng, board, &snake);
        World::Grid { snake, food }
      }
      Variant::Space => {
        let snake = SpaceSnake::new(Point::ORIGIN);
        let food = spawn_space_food(rng, &snake);
        World::Space { snake, food }
      }
    }
  }

  pub fn variant(&self) -> Variant {
    match self.world {
      World::Grid { .. } => Variant::Grid,
      World::Space { .. } => Variant::Space,
    }
  }

  pub fn lifecycle(&self) -> &Lifecycle {
    &self.life
  }

  pub fn score(&self) -> u32 {
    self.stats.score
  }

  pub fn gems(&self) -> u32 {
    self.stats.gems
  }

  pub fn level(&self) -> u32 {
    self.stats.level
  }

  pub fn multiplier(&self) -> u32 {
    self.stats.multiplier
  }

  pub fn autoplay_enabled(&self) -> bool {
    self.life.autoplay
  }

  pub fn snake_len(&self) -> usize {
    match &self.world {
      World::Grid { snake, .. } => snake.len(),
      World::Space { snake, .. } => snake.len(),
    }
  }

  pub fn move_interval_ms(&self) -> u64 {
    if self.stats.speed_boost {
      BASE_MOVE_INTERVAL_MS
        .saturating_sub(SPEED_BOOST_STEP_MS)
        .max(MIN_MOVE_INTERVAL_MS)
    } else {
      BASE_MOVE_INTERVAL_MS
    }
  }

  /// One update step. Fires due resets first; a dying session does not move.
  pub fn tick(&mut self, now: i64) -> Collision {
    if self.fire_due_resets(now) {
      return Collision::None;
    }
    if matches!(self.life.phase, Phase::Dying { .. }) {
      return Collision::None;
    }
    if self.life.autoplay {
      self.steer_bot();
    }

    let outcome = self.step();
    match outcome {
      Collision::Food => self.award_food(),
      Collision::Wall | Collision::SelfHit => self.record_death(now),
      Collision::None => {}
    }
    outcome
  }

  fn fire_due_resets(&mut self, now: i64) -> bool {
    let mut fired = false;
    while let Some(&reset_at) = self.life.pending_resets.front() {
      if now < reset_at {
        break;
      }
      self.life.pending_resets.pop_front();
      fired = true;
    }
    if fired {
      self.reset();
      tracing::debug!(deaths = self.life.death_count, "session reset after death");
    }
    fired
  }

  fn steer_bot(&mut self) {
    match &mut self.world {
      World::Grid { snake, food } => {
        if let Some(direction) = choose_grid_move(&self.board, snake, *food) {
          snake.set_direction(direction);
        }
      }
      World::Space { snake, food } => {
        if let Some(target) = steer_space(snake, *food) {
          snake.steer_toward(target);
        }
      }
    }
  }

  fn step(&mut self) -> Collision {
    match &mut self.world {
      World::Grid { snake, food } => {
        let board = &self.board;
        let Some(candidate) = snake.candidate_head() else { return Collision::None };
        let outcome = classify_grid(board, snake, *food, candidate);
        if !outcome.is_fatal() {
          let ate = outcome == Collision::Food;
          snake.advance(ate);
          if ate {
            *food = spawn_grid_food(&mut self.rng, board, snake);
          }
        }
        outcome
      }
      World::Space { snake, food } => {
        let Some(candidate) = snake.candidate_head() else { return Collision::None };
        let outcome = classify_space(snake, *food, candidate);
        if !outcome.is_fatal() {
          let ate = outcome == Collision::Food;
          snake.advance(ate);
          if ate {
            *food = spawn_space_food(&mut self.rng, snake);
          }
        }
        outcome
      }
    }
  }

  fn award_food(&mut self) {
    let stats = &mut self.stats;
    stats.score = stats
      .score
      .saturating_add(POINTS_PER_FOOD.saturating_mul(stats.multiplier));
    stats.gems = stats.gems.saturating_add(GEMS_PER_FOOD);
    stats.foods_eaten = stats.foods_eaten.saturating_add(1);
    stats.level = 1 + stats.foods_eaten / FOODS_PER_LEVEL;
  }

  fn record_death(&mut self, now: i64) {
    self.life.death_count = self.life.death_count.saturating_add(1);
    if self.life.death_count >= DEATHS_BEFORE_AUTOPLAY && !self.life.autoplay {
      self.life.autoplay = true;
      tracing::info!(deaths = self.life.death_count, "autoplay enabled");
    }
    let reset_at = now + RESET_DELAY_MS;
    self.life.phase = Phase::Dying { reset_at };
    self.life.pending_resets.push_back(reset_at);
    tracing::debug!(deaths = self.life.death_count, reset_at, "snake died");
  }

  /// Debug hook: kills the snake as if it had hit a wall.
  pub fn force_death(&mut self, now: i64) -> bool {
    if matches!(self.life.phase, Phase::Dying { .. }) {
      return false;
    }
    self.record_death(now);
    true
  }

  /// Returns whether the command changed anything. Player steering is locked out once
  /// autoplay has latched; restart always works.
  pub fn handle_command(&mut self, command: Command) -> bool {
    if command == Command::Restart {
      self.reset();
      return true;
    }
    if self.life.autoplay {
      return false;
    }
    match &mut self.world {
      World::Grid { snake, .. } => command
        .grid_direction()
        .map(|direction| snake.set_direction(direction))
        .unwrap_or(false),
      World::Space { snake, .. } => {
        if let Some(turns) = command.roll_quarter_turns() {
          snake.apply_roll(turns)
        } else if let Some(direction) = command.space_direction() {
          snake.set_input_direction(direction)
        } else {
          false
        }
      }
    }
  }

  /// Back to a fresh life. Death count, the autoplay latch and any scheduled resets
  /// survive.
  pub fn reset(&mut self) {
    self.world = Self::fresh_world(self.variant(), &self.board, &mut self.rng);
    self.stats = Stats::default();
    self.life.phase = Phase::Running;
  }

  pub fn purchase(&mut self, item: StoreItem) -> Result<(), StoreError> {
    let active = match item {
      StoreItem::SpeedBoost => self.stats.speed_boost,
      StoreItem::DoublePoints => self.stats.multiplier > 1,
    };
    if active {
      return Err(StoreError::AlreadyActive);
    }
    let cost = item.cost();
    if self.stats.gems < cost {
      return Err(StoreError::InsufficientGems {
        needed: cost,
        available: self.stats.gems,
      });
    }
    self.stats.gems -= cost;
    match item {
      StoreItem::SpeedBoost => self.stats.speed_boost = true,
      StoreItem::DoublePoints => self.stats.multiplier = DOUBLE_POINTS_MULTIPLIER,
    }
    tracing::debug!(?item, gems = self.stats.gems, "store purchase");
    Ok(())
  }

  pub fn grant_gems(&mut self, amount: i64) -> Result<u32, StoreError> {
    if amount <= 0 {
      return Err(StoreError::InvalidAmount);
    }
    let amount = u32::try_from(amount).unwrap_or(u32::MAX);
    self.stats.gems = self.stats.gems.saturating_add(amount);
    Ok(self.stats.gems)
  }

  pub fn snapshot(&self, now: i64) -> SessionSnapshot {
    let snake = match &self.world {
      World::Grid { snake, food } => SnakeSnapshot::Grid {
        segments: snake.segments().copied().collect(),
        food: *food,
        direction: snake.direction(),
        width: self.board.width,
        height: self.board.height,
      },
      World::Space { snake, food } => SnakeSnapshot::Space {
        segments: snake.positions().collect(),
        food: *food,
        direction: snake.direction(),
      },
    };
    SessionSnapshot {
      now,
      score: self.stats.score,
      gems: self.stats.gems,
      level: self.stats.level,
      multiplier: self.stats.multiplier,
      speed_boost: self.stats.speed_boost,
      death_count: self.life.death_count,
      autoplay: self.life.autoplay,
      phase: self.life.phase,
      snake,
    }
  }
}
