// Asset management system
//
// Resolves image files under the asset directory, reads their dimensions and
// caches them behind typed handles. Missing files never abort the game; they
// are replaced by placeholders of a known size.

mod handle;
mod loader;
mod manager;

pub use handle::{AssetHandle, AssetId, TextureHandle};
pub use loader::AssetLoader;
pub use manager::AssetManager;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Unsupported asset format: {0}")]
    Unsupported(String),

    #[error("Failed to decode asset {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}
