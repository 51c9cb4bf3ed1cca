// Central asset management system

use super::{AssetError, AssetHandle, AssetId, AssetLoader, TextureHandle};
use glam::Vec2;
use log::warn;
use std::collections::HashMap;
use std::path::Path;

/// Metadata kept for every registered texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureInfo {
    /// Size in scene units
    pub size: Vec2,
    /// True when the file was missing or unreadable and a stand-in size is used
    pub placeholder: bool,
}

/// Central asset manager for the game
///
/// Caches image metadata by path so every sprite that shows the same image
/// shares one handle.
pub struct AssetManager {
    loader: AssetLoader,

    /// Loaded textures
    textures: HashMap<AssetId, TextureInfo>,

    /// Path to ID mapping for textures
    texture_paths: HashMap<String, AssetId>,
}

impl AssetManager {
    /// Create a new asset manager
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            textures: HashMap::new(),
            texture_paths: HashMap::new(),
        }
    }

    /// Load a texture's metadata from disk
    pub fn load_texture(&mut self, name: &str) -> Result<TextureHandle, AssetError> {
        // Check if already loaded
        if let Some(&id) = self.texture_paths.get(name) {
            return Ok(AssetHandle::new(id));
        }

        let size = self.loader.image_size(name)?;
        Ok(self.register(
            name,
            TextureInfo {
                size,
                placeholder: false,
            },
        ))
    }

    /// Load a texture, falling back to a placeholder of `fallback_size` when
    /// the file cannot be read. Never fails.
    pub fn load_texture_or_placeholder(&mut self, name: &str, fallback_size: Vec2) -> TextureHandle {
        match self.load_texture(name) {
            Ok(handle) => handle,
            Err(err) => {
                warn!("{}; using a {}x{} placeholder", err, fallback_size.x, fallback_size.y);
                self.register(
                    name,
                    TextureInfo {
                        size: fallback_size,
                        placeholder: true,
                    },
                )
            }
        }
    }

    fn register(&mut self, name: &str, info: TextureInfo) -> TextureHandle {
        let id = AssetId::from_path(name);
        self.textures.insert(id, info);
        self.texture_paths.insert(name.to_string(), id);
        AssetHandle::new(id)
    }

    /// Get a texture's metadata by handle
    pub fn get_texture(&self, handle: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(&handle.id())
    }

    /// Get statistics about loaded assets
    pub fn stats(&self) -> AssetStats {
        AssetStats {
            texture_count: self.textures.len(),
            placeholder_count: self.textures.values().filter(|info| info.placeholder).count(),
        }
    }
}

/// Statistics about loaded assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStats {
    pub texture_count: usize,
    pub placeholder_count: usize,
}
