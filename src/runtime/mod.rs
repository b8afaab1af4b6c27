use crate::app::time::now_millis;
use crate::assets::{sanitize_asset_id, TextureCache, TextureProvider};
use crate::config::GameConfig;
use crate::error::{GameError, StoreError};
use crate::frame::{run_frame, FrameSink};
use crate::game::session::GameSession;
use crate::game::store::StoreItem;
use crate::game::types::{SessionSnapshot, Variant};
use crate::protocol::{self, ClientMessage, ServerMessage};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// One player's game plus the socket it streams to.
#[derive(Debug)]
pub struct SessionRoom {
  id: String,
  config: GameConfig,
  idle_reset_ms: i64,
  state: Mutex<RoomState>,
  running: AtomicBool,
}

#[derive(Debug)]
struct RoomState {
  game: GameSession,
  sender: Option<UnboundedSender<String>>,
  skin: Option<String>,
  last_input_at: i64,
}

struct ChannelSink<'a> {
  sender: &'a UnboundedSender<String>,
  skin: Option<&'a str>,
}

impl FrameSink for ChannelSink<'_> {
  fn present(&mut self, snapshot: &SessionSnapshot) -> Result<(), GameError> {
    let payload = protocol::encode(&ServerMessage::State {
      state: snapshot,
      skin: self.skin,
    })?;
    self
      .sender
      .send(payload)
      .map_err(|_| GameError::TransientRenderFailure("client channel closed".to_string()))
  }
}

impl SessionRoom {
  pub fn new(config: GameConfig, idle_reset_ms: i64, now: i64) -> Result<Self, GameError> {
    let game = GameSession::new(config)?;
    Ok(Self {
      id: Uuid::new_v4().to_string(),
      config,
      idle_reset_ms,
      state: Mutex::new(RoomState {
        game,
        sender: None,
        skin: None,
        last_input_at: now,
      }),
      running: AtomicBool::new(false),
    })
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn variant(&self) -> Variant {
    self.config.variant
  }

  pub async fn attach(&self, sender: UnboundedSender<String>) {
    if let Ok(payload) = protocol::encode(&ServerMessage::Welcome {
      session_id: &self.id,
      variant: self.config.variant,
    }) {
      let _ = sender.send(payload);
    }
    let mut state = self.state.lock().await;
    state.sender = Some(sender);
  }

  pub async fn detach(&self) {
    let mut state = self.state.lock().await;
    state.sender = None;
  }

  pub async fn handle_text_message<P: TextureProvider + 'static>(
    &self,
    text: &str,
    textures: &TextureCache<P>,
    now: i64,
  ) {
    let Some(message) = protocol::decode_client_message(text) else { return };
    let mut state = self.state.lock().await;
    state.last_input_at = now;
    match message {
      ClientMessage::Command(command) => {
        state.game.handle_command(command);
      }
      ClientMessage::Purchase(item) => {
        let result = state.game.purchase(item);
        let reply = ServerMessage::Store {
          ok: result.is_ok(),
          error: result.err().map(|error| error.to_string()),
        };
        if let (Some(sender), Ok(payload)) = (&state.sender, protocol::encode(&reply)) {
          let _ = sender.send(payload);
        }
      }
      ClientMessage::Skin(id) => {
        let Some(id) = sanitize_asset_id(&id).filter(|id| textures.knows(id)) else { return };
        textures.request(&id);
        state.skin = Some(id);
      }
    }
  }

  pub async fn purchase(&self, item: StoreItem, now: i64) -> Result<SessionSnapshot, StoreError> {
    let mut state = self.state.lock().await;
    state.game.purchase(item)?;
    Ok(state.game.snapshot(now))
  }

  pub async fn grant_gems(&self, amount: i64) -> Result<u32, StoreError> {
    let mut state = self.state.lock().await;
    state.game.grant_gems(amount)
  }

  pub async fn snapshot(&self, now: i64) -> SessionSnapshot {
    let state = self.state.lock().await;
    state.game.snapshot(now)
  }

  pub async fn debug_kill(&self, now: i64) -> bool {
    let mut state = self.state.lock().await;
    state.game.force_death(now)
  }

  /// Runs one frame and returns the delay before the next, or `None` once detached.
  pub async fn frame<P: TextureProvider + 'static>(
    &self,
    textures: &TextureCache<P>,
    now: i64,
  ) -> Option<Duration> {
    let mut state = self.state.lock().await;
    let state = &mut *state;
    let sender = state.sender.clone()?;

    if now - state.last_input_at >= self.idle_reset_ms {
      match GameSession::new(self.config) {
        Ok(game) => {
          state.game = game;
          tracing::info!(session = %self.id, "idle session recreated");
        }
        Err(error) => tracing::error!(%error, session = %self.id, "failed to recreate session"),
      }
      state.last_input_at = now;
    }

    let skin_url = state
      .skin
      .as_deref()
      .and_then(|id| textures.get(id))
      .map(|handle| handle.url);
    let mut sink = ChannelSink {
      sender: &sender,
      skin: skin_url.as_deref(),
    };
    let report = run_frame(&mut state.game, &mut sink, now);
    if report.reload_prompt {
      if sender.is_closed() {
        return None;
      }
      if let Ok(payload) = protocol::encode(&ServerMessage::Reload) {
        let _ = sender.send(payload);
      }
    }
    Some(Duration::from_millis(state.game.move_interval_ms()))
  }

  pub fn ensure_loop<P: TextureProvider + 'static>(self: &Arc<Self>, textures: Arc<TextureCache<P>>) {
    if self
      .running
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      return;
    }

    let room = Arc::clone(self);
    tokio::spawn(async move {
      loop {
        let Some(delay) = room.frame(&textures, now_millis()).await else {
          room.running.store(false, Ordering::SeqCst);
          break;
        };
        tokio::time::sleep(delay).await;
      }
      tracing::debug!(session = %room.id, "session loop stopped");
    });
  }
}
