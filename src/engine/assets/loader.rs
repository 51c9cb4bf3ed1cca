// Asset loading functionality

use super::AssetError;
use glam::Vec2;
use std::path::{Path, PathBuf};

/// Image file extensions the loader accepts
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Asset loader responsible for finding asset files and reading their metadata
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Read the pixel dimensions of an image without decoding the whole file
    pub fn image_size(&self, name: &str) -> Result<Vec2, AssetError> {
        let path = self.resolve_path(name);

        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        let supported = path
            .extension()
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_string_lossy().to_lowercase().as_str()))
            .unwrap_or(false);
        if !supported {
            return Err(AssetError::Unsupported(name.to_string()));
        }

        let (width, height) =
            image::image_dimensions(&path).map_err(|source| AssetError::Decode {
                path: name.to_string(),
                source,
            })?;

        Ok(Vec2::new(width as f32, height as f32))
    }
}
