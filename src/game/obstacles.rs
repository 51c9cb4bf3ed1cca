// Scrolling obstacle grid
//
// Each round lays out a grid of obstacles to the right of the screen and
// scrolls it leftward. Obstacles are kept in an arena with stable slots; one
// `tick` call moves every live obstacle, so there are no per-obstacle timers.

use super::config::{GameConfig, ObstacleParams};
use super::images::{ImageKey, Images, BAD_OBSTACLES, GOOD_OBSTACLES};
use super::round::RoundManager;
use crate::core::math::{hitboxes_overlap, Rect};
use crate::engine::scene::{ObstacleKind, Scene, Sprite, SpriteId, SpriteKind};
use glam::Vec2;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Stable index of an obstacle in the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstacleId(usize);

/// One obstacle record
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub sprite: SpriteId,
    pub kind: ObstacleKind,
    /// Obstacle image number
    pub image: u8,
    /// Row the obstacle returns to when recycled
    pub row_y: f32,
    pub counted_good: bool,
    pub counted_bad: bool,
}

/// All obstacles of the current round
#[derive(Debug)]
pub struct ObstacleField {
    slots: Vec<Option<Obstacle>>,
    params: ObstacleParams,
    screen: Vec2,
}

impl ObstacleField {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.obstacles.cell_count()),
            params: config.obstacles,
            screen: config.screen_size(),
        }
    }

    /// Top-left corner of a grid cell
    pub fn cell_position(&self, column: u32, row: u32) -> Vec2 {
        let p = &self.params;
        Vec2::new(
            self.screen.x + column as f32 * (p.width + p.column_gap),
            self.screen.y - p.height - p.bottom_margin - row as f32 * (p.height + p.row_gap),
        )
    }

    /// Fill every grid cell with an obstacle.
    ///
    /// The cells are shuffled with `rng`; the first `good_count` become
    /// packages and the rest hazards. `good_count` is added to the round's
    /// quota.
    pub fn spawn_round<S: Scene, R: Rng + ?Sized>(
        &mut self,
        scene: &mut S,
        images: &Images,
        good_count: u32,
        rng: &mut R,
        rounds: &mut RoundManager,
    ) {
        let columns = self.params.columns.max(1);
        let mut cells: Vec<u32> = (0..self.params.columns * self.params.rows).collect();
        cells.shuffle(rng);

        let mut spawned_good = 0;
        for (rank, cell) in cells.into_iter().enumerate() {
            let position = self.cell_position(cell % columns, cell / columns);
            let (kind, image) = if (rank as u32) < good_count {
                spawned_good += 1;
                (ObstacleKind::Good, *GOOD_OBSTACLES.choose(rng).unwrap_or(&GOOD_OBSTACLES[0]))
            } else {
                (ObstacleKind::Bad, *BAD_OBSTACLES.choose(rng).unwrap_or(&BAD_OBSTACLES[0]))
            };
            self.insert(scene, images, kind, image, position);
        }

        rounds.add_packages_needed(spawned_good);
        debug!(
            "Spawned {} obstacles ({} packages)",
            self.live_count(),
            spawned_good
        );
    }

    /// Place one obstacle. Packages keep their native image size, hazards are
    /// scaled to the configured obstacle size.
    pub fn insert<S: Scene>(
        &mut self,
        scene: &mut S,
        images: &Images,
        kind: ObstacleKind,
        image: u8,
        position: Vec2,
    ) -> ObstacleId {
        let key = ImageKey::Obstacle(image);
        let size = match kind {
            ObstacleKind::Good => images.size(key),
            ObstacleKind::Bad => self.params.size(),
        };
        let sprite = scene.add(Sprite::with_texture(
            SpriteKind::Obstacle(kind),
            position,
            size,
            images.texture(key),
        ));

        let obstacle = Obstacle {
            sprite,
            kind,
            image,
            row_y: position.y,
            counted_good: false,
            counted_bad: false,
        };

        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                self.slots[index] = Some(obstacle);
                ObstacleId(index)
            }
            None => {
                self.slots.push(Some(obstacle));
                ObstacleId(self.slots.len() - 1)
            }
        }
    }

    /// Advance every obstacle by one step and collide it with `avatar`.
    ///
    /// Returns the kinds of the obstacles that were hit for the first time,
    /// in slot order. Touched obstacles are removed from the field and the
    /// scene; obstacles that scrolled off the left edge re-enter on the right
    /// at their original row with both counted flags cleared.
    pub fn tick<S: Scene>(&mut self, scene: &mut S, avatar: Option<Rect>) -> Vec<ObstacleKind> {
        let mut hits = Vec::new();
        let speed = self.params.speed;
        let reset_x = self.screen.x + self.params.wrap_offset;

        for slot in self.slots.iter_mut() {
            let Some(obstacle) = slot.as_mut() else {
                continue;
            };
            let Some(mut bounds) = scene.bounds(obstacle.sprite) else {
                *slot = None;
                continue;
            };

            bounds.min.x -= speed;
            scene.relocate(obstacle.sprite, bounds.min);

            if avatar.is_some_and(|avatar| hitboxes_overlap(&avatar, &bounds)) {
                match obstacle.kind {
                    ObstacleKind::Good if !obstacle.counted_good => {
                        obstacle.counted_good = true;
                        hits.push(ObstacleKind::Good);
                    }
                    ObstacleKind::Bad if !obstacle.counted_bad => {
                        obstacle.counted_bad = true;
                        hits.push(ObstacleKind::Bad);
                    }
                    _ => {}
                }
                scene.remove(obstacle.sprite);
                *slot = None;
                continue;
            }

            if bounds.max().x < 0.0 {
                scene.relocate(obstacle.sprite, Vec2::new(reset_x, obstacle.row_y));
                obstacle.counted_good = false;
                obstacle.counted_bad = false;
            }
        }

        hits
    }

    /// Remove every obstacle from the field and the scene
    pub fn clear<S: Scene>(&mut self, scene: &mut S) {
        for obstacle in self.slots.drain(..).flatten() {
            scene.remove(obstacle.sprite);
        }
    }

    #[cfg(test)]
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|obstacle| (ObstacleId(index), obstacle)))
    }

    /// Obstacles still on the field
    pub fn live_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[cfg(test)]
    pub fn count(&self, kind: ObstacleKind) -> usize {
        self.slots.iter().flatten().filter(|o| o.kind == kind).count()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }
}
