use crate::error::GameError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MAX_ASSET_ID_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureHandle {
    pub id: String,
    pub url: String,
}

/// Resolves a named cosmetic texture. Implementations never see game state.
pub trait TextureProvider: Send + Sync {
    /// Whether `id` names a texture this provider ships. Only known ids are ever cached.
    fn knows(&self, id: &str) -> bool;

    fn load(&self, id: &str) -> impl Future<Output = Result<TextureHandle, GameError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStatus {
    Unrequested,
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
enum Slot {
    Pending,
    Ready(TextureHandle),
    Failed,
}

/// One load per known id, ever. Failures stay cached so a missing texture is not refetched
/// every frame; callers draw the default look instead. Ids the provider does not know never
/// get a slot, which bounds the cache by the provider's catalog.
pub struct TextureCache<P> {
    provider: Arc<P>,
    slots: Arc<DashMap<String, Slot>>,
}

impl<P: TextureProvider + 'static> TextureCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            slots: Arc::new(DashMap::new()),
        }
    }

    pub fn knows(&self, id: &str) -> bool {
        self.provider.knows(id)
    }

    /// Fire-and-forget. Returns whether a new load was started.
    pub fn request(&self, id: &str) -> bool {
        if !self.provider.knows(id) {
            return false;
        }
        match self.slots.entry(id.to_string()) {
            Entry::Occupied(_) => return false,
            Entry::Vacant(entry) => {
                entry.insert(Slot::Pending);
            }
        }

        let provider = Arc::clone(&self.provider);
        let slots = Arc::clone(&self.slots);
        let id = id.to_string();
        tokio::spawn(async move {
            let slot = match provider.load(&id).await {
                Ok(handle) => Slot::Ready(handle),
                Err(error) => {
                    tracing::warn!(%error, texture = %id, "texture unavailable, using default");
                    Slot::Failed
                }
            };
            slots.insert(id, slot);
        });
        true
    }

    pub fn get(&self, id: &str) -> Option<TextureHandle> {
        match self.slots.get(id).as_deref() {
            Some(Slot::Ready(handle)) => Some(handle.clone()),
            _ => None,
        }
    }

    pub fn status(&self, id: &str) -> TextureStatus {
        match self.slots.get(id).as_deref() {
            None => TextureStatus::Unrequested,
            Some(Slot::Pending) => TextureStatus::Pending,
            Some(Slot::Ready(_)) => TextureStatus::Ready,
            Some(Slot::Failed) => TextureStatus::Failed,
        }
    }
}

pub fn sanitize_asset_id(value: &str) -> Option<String> {
    let mut cleaned = String::with_capacity(value.len().min(MAX_ASSET_ID_LENGTH));
    for ch in value.chars() {
        if cleaned.len() >= MAX_ASSET_ID_LENGTH {
            break;
        }
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            cleaned.push(ch.to_ascii_lowercase());
        }
    }
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Cheese skins shipped as `<root>/images/cheese/<id>.svg` and served under `/assets`.
/// The catalog is read once at construction.
#[derive(Debug, Clone)]
pub struct DirTextureProvider {
    root: PathBuf,
    catalog: HashSet<String>,
}

impl DirTextureProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let catalog = scan_catalog(&root.join("images").join("cheese"));
        tracing::debug!(root = %root.display(), skins = catalog.len(), "texture catalog loaded");
        Self { root, catalog }
    }
}

fn scan_catalog(dir: &Path) -> HashSet<String> {
    let Ok(entries) = std::fs::read_dir(dir) else { return HashSet::new() };
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "svg"))
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?;
            sanitize_asset_id(stem).filter(|id| id == stem)
        })
        .collect()
}

impl TextureProvider for DirTextureProvider {
    fn knows(&self, id: &str) -> bool {
        self.catalog.contains(id)
    }

    fn load(&self, id: &str) -> impl Future<Output = Result<TextureHandle, GameError>> + Send {
        let sanitized = sanitize_asset_id(id);
        let root = self.root.clone();
        let raw_id = id.to_string();
        async move {
            let Some(id) = sanitized.filter(|clean| *clean == raw_id) else {
                return Err(GameError::AssetLoadFailure {
                    id: raw_id,
                    reason: "invalid texture id".to_string(),
                });
            };
            let relative = format!("images/cheese/{id}.svg");
            let path = root.join(&relative);
            match tokio::fs::metadata(&path).await {
                Ok(metadata) if metadata.is_file() => Ok(TextureHandle {
                    url: format!("/assets/{relative}"),
                    id,
                }),
                Ok(_) => Err(GameError::AssetLoadFailure {
                    id,
                    reason: "not a file".to_string(),
                }),
                Err(error) => Err(GameError::AssetLoadFailure {
                    id,
                    reason: error.to_string(),
                }),
            }
        }
    }
}
