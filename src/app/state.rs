use crate::assets::{DirTextureProvider, TextureCache};
use crate::config::{GameConfig, ServerConfig};
use crate::error::GameError;
use crate::game::types::Variant;
use crate::runtime::SessionRoom;
use dashmap::DashMap;
use std::sync::Arc;

pub struct AppState {
  pub config: ServerConfig,
  pub sessions: DashMap<String, Arc<SessionRoom>>,
  pub textures: Arc<TextureCache<DirTextureProvider>>,
}

impl AppState {
  pub fn new(config: ServerConfig) -> Self {
    let textures = Arc::new(TextureCache::new(DirTextureProvider::new(config.assets_dir.clone())));
    Self {
      config,
      sessions: DashMap::new(),
      textures,
    }
  }

  pub fn open_session(&self, variant: Variant, now: i64) -> Result<Arc<SessionRoom>, GameError> {
    let room = Arc::new(SessionRoom::new(
      GameConfig::with_variant(variant),
      self.config.idle_reset_ms,
      now,
    )?);
    self.sessions.insert(room.id().to_string(), Arc::clone(&room));
    tracing::debug!(session = %room.id(), ?variant, "session opened");
    Ok(room)
  }

  pub fn session(&self, id: &str) -> Option<Arc<SessionRoom>> {
    self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
  }

  pub fn close_session(&self, id: &str) {
    if self.sessions.remove(id).is_some() {
      tracing::debug!(session = %id, "session closed");
    }
  }
}
