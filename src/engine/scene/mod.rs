// Scene collaborator
//
// The game never draws anything itself. It places, moves, retextures and
// removes sprites on a `Scene`, and whatever hosts the game decides how to
// present them. `SceneGraph` is the in-memory implementation used by the
// host shell and by the tests.

mod sprite;

pub use sprite::{ObstacleKind, Sprite, SpriteKind, UiElement};

use crate::core::math::Rect;
use crate::engine::assets::TextureHandle;
use glam::Vec2;
use std::collections::BTreeMap;

/// Stable identifier of a sprite inside a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(u64);

/// Surface that owns the visual sprites
pub trait Scene {
    /// Add a sprite, returning its id
    fn add(&mut self, sprite: Sprite) -> SpriteId;

    /// Remove a sprite, returning it if it was present
    fn remove(&mut self, id: SpriteId) -> Option<Sprite>;

    fn get(&self, id: SpriteId) -> Option<&Sprite>;

    fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite>;

    /// Move a sprite's top-left corner. Returns false for unknown ids.
    fn relocate(&mut self, id: SpriteId, position: Vec2) -> bool {
        match self.get_mut(id) {
            Some(sprite) => {
                sprite.position = position;
                true
            }
            None => false,
        }
    }

    /// Swap the image a sprite shows
    fn set_texture(&mut self, id: SpriteId, texture: TextureHandle, size: Vec2) -> bool {
        match self.get_mut(id) {
            Some(sprite) => {
                sprite.texture = Some(texture);
                sprite.size = size;
                true
            }
            None => false,
        }
    }

    /// Replace a sprite's text lines
    fn set_text(&mut self, id: SpriteId, lines: Vec<String>) -> bool {
        match self.get_mut(id) {
            Some(sprite) => {
                sprite.text = lines;
                true
            }
            None => false,
        }
    }

    fn bounds(&self, id: SpriteId) -> Option<Rect> {
        self.get(id).map(Sprite::bounds)
    }

    /// Image identity of a sprite
    fn texture(&self, id: SpriteId) -> Option<TextureHandle> {
        self.get(id).and_then(|sprite| sprite.texture)
    }

    fn kind(&self, id: SpriteId) -> Option<SpriteKind> {
        self.get(id).map(|sprite| sprite.kind)
    }
}

/// In-memory scene; sprites are kept in insertion (draw) order
#[derive(Debug, Default)]
pub struct SceneGraph {
    sprites: BTreeMap<SpriteId, Sprite>,
    next_id: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sprites in the scene
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Iterate sprites in draw order
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> {
        self.sprites.iter().map(|(id, sprite)| (*id, sprite))
    }

    /// Ids of every sprite with the given tag
    #[cfg(test)]
    pub fn ids_of(&self, kind: SpriteKind) -> Vec<SpriteId> {
        self.iter()
            .filter(|(_, sprite)| sprite.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// Count sprites with the given tag
    #[cfg(test)]
    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.values().filter(|sprite| sprite.kind == kind).count()
    }

    /// Count sprites matching a predicate on their tag
    #[cfg(test)]
    pub fn count_where(&self, predicate: impl Fn(SpriteKind) -> bool) -> usize {
        self.sprites
            .values()
            .filter(|sprite| predicate(sprite.kind))
            .count()
    }
}

impl Scene for SceneGraph {
    fn add(&mut self, sprite: Sprite) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        self.sprites.insert(id, sprite);
        id
    }

    fn remove(&mut self, id: SpriteId) -> Option<Sprite> {
        self.sprites.remove(&id)
    }

    fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::{AssetHandle, AssetId};

    fn fence_at(x: f32) -> Sprite {
        Sprite::new(SpriteKind::Fence, Vec2::new(x, 985.0), Vec2::new(138.0, 95.0))
    }

    #[test]
    fn test_add_and_get() {
        let mut scene = SceneGraph::new();
        let id = scene.add(fence_at(0.0));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.kind(id), Some(SpriteKind::Fence));
        assert_eq!(scene.bounds(id).unwrap().size.x, 138.0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut scene = SceneGraph::new();
        let first = scene.add(fence_at(0.0));
        scene.remove(first);
        let second = scene.add(fence_at(0.0));
        assert_ne!(first, second);
        assert!(scene.get(first).is_none());
    }

    #[test]
    fn test_relocate() {
        let mut scene = SceneGraph::new();
        let id = scene.add(fence_at(0.0));
        assert!(scene.relocate(id, Vec2::new(1920.0, 985.0)));
        assert_eq!(scene.get(id).unwrap().position.x, 1920.0);

        scene.remove(id);
        assert!(!scene.relocate(id, Vec2::ZERO));
    }

    #[test]
    fn test_set_texture_updates_size() {
        let mut scene = SceneGraph::new();
        let id = scene.add(fence_at(0.0));
        let handle = AssetHandle::new(AssetId::from_path("Fences/FenceSide.png"));
        assert!(scene.set_texture(id, handle, Vec2::new(10.0, 20.0)));
        assert_eq!(scene.texture(id), Some(handle));
        assert_eq!(scene.get(id).unwrap().size, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_draw_order_follows_insertion() {
        let mut scene = SceneGraph::new();
        let background = scene.add(Sprite::new(SpriteKind::Background, Vec2::ZERO, Vec2::ONE));
        let avatar = scene.add(Sprite::new(SpriteKind::Avatar, Vec2::ZERO, Vec2::ONE));
        let order: Vec<SpriteId> = scene.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![background, avatar]);
    }

    #[test]
    fn test_count_by_kind() {
        let mut scene = SceneGraph::new();
        scene.add(fence_at(0.0));
        scene.add(fence_at(138.0));
        scene.add(Sprite::new(
            SpriteKind::Obstacle(ObstacleKind::Bad),
            Vec2::ZERO,
            Vec2::ONE,
        ));
        assert_eq!(scene.count(SpriteKind::Fence), 2);
        assert_eq!(scene.count_where(|kind| kind.is_obstacle()), 1);
        assert_eq!(scene.ids_of(SpriteKind::Fence).len(), 2);
    }
}
