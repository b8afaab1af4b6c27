use crate::game::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, CELL_SIZE, IDLE_RESET_MS};
use crate::game::types::Variant;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
  pub variant: Variant,
  pub canvas_width: u32,
  pub canvas_height: u32,
  pub cell_size: u32,
  /// Fixed seed for food placement; `None` draws from OS entropy.
  pub seed: Option<u64>,
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      variant: Variant::Grid,
      canvas_width: CANVAS_WIDTH,
      canvas_height: CANVAS_HEIGHT,
      cell_size: CELL_SIZE,
      seed: None,
    }
  }
}

impl GameConfig {
  pub fn with_variant(variant: Variant) -> Self {
    Self {
      variant,
      ..Self::default()
    }
  }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub port: u16,
  pub assets_dir: PathBuf,
  pub idle_reset_ms: i64,
  pub debug_commands: bool,
}

impl ServerConfig {
  pub fn from_env() -> Self {
    let port: u16 = env::var("PORT")
      .ok()
      .and_then(|value| value.parse().ok())
      .unwrap_or(8787);

    let assets_dir = env::var("ASSETS_DIR")
      .map(|value| value.trim().to_string())
      .ok()
      .filter(|value| !value.is_empty())
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from("assets"));

    let idle_reset_ms = env::var("IDLE_RESET_MS")
      .ok()
      .and_then(|value| value.parse::<i64>().ok())
      .filter(|value| *value > 0)
      .unwrap_or(IDLE_RESET_MS);

    let debug_commands = env::var("ENABLE_DEBUG_COMMANDS")
      .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE"))
      .unwrap_or(false);

    Self {
      port,
      assets_dir,
      idle_reset_ms,
      debug_commands,
    }
  }
}
