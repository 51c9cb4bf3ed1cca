// Sprite records held by the scene

use crate::core::math::Rect;
use crate::engine::assets::TextureHandle;
use glam::Vec2;

/// Classification of an obstacle sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Collectible package
    Good,
    /// Hazard that costs a life
    Bad,
}

/// HUD elements drawn on top of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiElement {
    StageInfo,
    PackageCounter,
    NextButton,
    Hearts,
}

/// Typed tag resolved when a sprite is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Background,
    Fence,
    Obstacle(ObstacleKind),
    Avatar,
    Ui(UiElement),
    Dialogue,
}

impl SpriteKind {
    #[cfg(test)]
    pub fn is_obstacle(&self) -> bool {
        matches!(self, Self::Obstacle(_))
    }
}

/// A positioned 2D sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// What this sprite represents
    pub kind: SpriteKind,
    /// Top-left position in scene units
    pub position: Vec2,
    /// Size in scene units (width, height)
    pub size: Vec2,
    /// Image drawn for this sprite (None = plain box)
    pub texture: Option<TextureHandle>,
    /// Text lines for labels and dialogue boxes
    pub text: Vec<String>,
}

impl Sprite {
    /// Create an untextured sprite
    pub fn new(kind: SpriteKind, position: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            position,
            size,
            texture: None,
            text: Vec::new(),
        }
    }

    /// Create a sprite with a texture
    pub fn with_texture(kind: SpriteKind, position: Vec2, size: Vec2, texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
            ..Self::new(kind, position, size)
        }
    }

    /// Attach text lines
    pub fn with_text<I, T>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.text = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Bounding box in scene units
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_bounds() {
        let sprite = Sprite::new(SpriteKind::Fence, Vec2::new(12.0, 985.0), Vec2::new(138.0, 95.0));
        let bounds = sprite.bounds();
        assert_eq!(bounds.min, Vec2::new(12.0, 985.0));
        assert_eq!(bounds.max(), Vec2::new(150.0, 1080.0));
    }

    #[test]
    fn test_sprite_with_text() {
        let sprite = Sprite::new(SpriteKind::Dialogue, Vec2::ZERO, Vec2::ONE)
            .with_text(["first", "second"]);
        assert_eq!(sprite.text, vec!["first".to_string(), "second".to_string()]);
        assert!(sprite.texture.is_none());
    }

    #[test]
    fn test_obstacle_kind_tag() {
        assert!(SpriteKind::Obstacle(ObstacleKind::Good).is_obstacle());
        assert!(!SpriteKind::Fence.is_obstacle());
        assert_ne!(
            SpriteKind::Obstacle(ObstacleKind::Good),
            SpriteKind::Obstacle(ObstacleKind::Bad)
        );
    }
}
