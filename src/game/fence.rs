// Scrolling fence band along the bottom of the screen

use super::config::{FenceParams, GameConfig};
use super::images::{ImageKey, Images};
use crate::engine::scene::{Scene, Sprite, SpriteId, SpriteKind};
use glam::Vec2;

/// Row of fence segments that scrolls left and wraps segment by segment
#[derive(Debug)]
pub struct FenceBand {
    segments: Vec<SpriteId>,
    params: FenceParams,
    screen: Vec2,
}

impl FenceBand {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            segments: Vec::new(),
            params: config.fence,
            screen: config.screen_size(),
        }
    }

    /// Lay a centred row of segments edge to edge at the bottom of the screen
    pub fn spawn_row<S: Scene>(&mut self, scene: &mut S, images: &Images) {
        let p = &self.params;
        let size = Vec2::new(p.segment_width, p.height);
        let start_x = (self.screen.x - p.segments as f32 * p.segment_width) / 2.0;
        let y = self.screen.y - p.height;

        for i in 0..p.segments {
            let position = Vec2::new(start_x + i as f32 * p.segment_width, y);
            let sprite = scene.add(Sprite::with_texture(
                SpriteKind::Fence,
                position,
                size,
                images.texture(ImageKey::Fence),
            ));
            self.segments.push(sprite);
        }
    }

    /// Move every segment left by `speed`; a segment whose right edge passed
    /// zero re-enters at the right edge of the screen
    pub fn tick<S: Scene>(&mut self, scene: &mut S, speed: f32) {
        for &sprite in &self.segments {
            let Some(mut bounds) = scene.bounds(sprite) else {
                continue;
            };
            bounds.min.x -= speed;
            if bounds.max().x < 0.0 {
                bounds.min.x = self.screen.x;
            }
            scene.relocate(sprite, bounds.min);
        }
    }

    /// Remove every segment from the scene
    pub fn clear<S: Scene>(&mut self, scene: &mut S) {
        for sprite in self.segments.drain(..) {
            scene.remove(sprite);
        }
    }

    /// Configured scroll speed
    pub fn speed(&self) -> f32 {
        self.params.speed
    }

    #[cfg(test)]
    pub fn segments(&self) -> &[SpriteId] {
        &self.segments
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
