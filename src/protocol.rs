use crate::error::GameError;
use crate::game::input::Command;
use crate::game::store::StoreItem;
use crate::game::types::{SessionSnapshot, Variant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
enum JsonClientMessage {
  #[serde(rename = "key")]
  Key { key: String },
  #[serde(rename = "restart")]
  Restart,
  #[serde(rename = "purchase")]
  Purchase { item: StoreItem },
  #[serde(rename = "skin")]
  Skin { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
  Command(Command),
  Purchase(StoreItem),
  Skin(String),
}

/// Unknown keys and malformed payloads decode to `None` and are ignored.
pub fn decode_client_message(text: &str) -> Option<ClientMessage> {
  let message = serde_json::from_str::<JsonClientMessage>(text).ok()?;
  match message {
    JsonClientMessage::Key { key } => Command::from_key(&key).map(ClientMessage::Command),
    JsonClientMessage::Restart => Some(ClientMessage::Command(Command::Restart)),
    JsonClientMessage::Purchase { item } => Some(ClientMessage::Purchase(item)),
    JsonClientMessage::Skin { id } => Some(ClientMessage::Skin(id)),
  }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage<'a> {
  #[serde(rename = "welcome")]
  Welcome {
    #[serde(rename = "sessionId")]
    session_id: &'a str,
    variant: Variant,
  },
  #[serde(rename = "state")]
  State {
    state: &'a SessionSnapshot,
    skin: Option<&'a str>,
  },
  #[serde(rename = "store")]
  Store { ok: bool, error: Option<String> },
  #[serde(rename = "reload")]
  Reload,
}

pub fn encode(message: &ServerMessage<'_>) -> Result<String, GameError> {
  serde_json::to_string(message).map_err(|error| GameError::TransientRenderFailure(error.to_string()))
}
