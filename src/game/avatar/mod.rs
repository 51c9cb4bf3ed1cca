// Player avatar
//
// This module contains everything related to the walking character:
// - Facing direction and held movement keys
// - Stepped walk cycle, idle monitor and phone animation
// - Screen-bounded movement on the scene

pub mod animation;
pub mod state;

pub use animation::{IdleMonitor, LoopingAnimation, WalkCycle};
pub use state::{Direction, MovementKeys};

use super::config::GameConfig;
use super::images::{ImageKey, Images};
use crate::core::math::{scale_to_speed, Rect};
use crate::engine::scene::{Scene, Sprite, SpriteId, SpriteKind};
use glam::Vec2;
use log::debug;

/// The character the player walks around
#[derive(Debug)]
pub struct Avatar {
    /// Sprite showing the avatar
    sprite: SpriteId,
    /// Screen the avatar must stay inside
    screen: Vec2,
    /// Distance per tick
    speed: f32,
    facing: Direction,
    /// Image currently shown
    image: ImageKey,
    walk: WalkCycle,
    phone: LoopingAnimation,
    idle: IdleMonitor,
}

impl Avatar {
    /// Add the avatar to the scene, standing front-facing and centred on `center`
    pub fn spawn<S: Scene>(
        scene: &mut S,
        images: &Images,
        config: &GameConfig,
        center: Vec2,
    ) -> Self {
        let image = ImageKey::Stance(Direction::Idle);
        let size = images.size(image);
        let sprite = scene.add(Sprite::with_texture(
            SpriteKind::Avatar,
            center - size * 0.5,
            size,
            images.texture(image),
        ));

        Self {
            sprite,
            screen: config.screen_size(),
            speed: config.avatar.speed,
            facing: Direction::Idle,
            image,
            walk: WalkCycle::new(config.avatar.walk_frames, config.avatar.frame_delay),
            phone: LoopingAnimation::new(config.idle.frames, config.idle.frame_duration),
            idle: IdleMonitor::new(config.idle.threshold),
        }
    }

    /// Walk one tick in the direction of `delta`.
    ///
    /// The step is normalised to the avatar's speed. A new walk frame is only
    /// picked when the walk cycle is not frame-locked. Returns true if the
    /// avatar moved.
    pub fn move_by<S: Scene>(&mut self, scene: &mut S, images: &Images, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        let Some(center) = self.bounds(scene).map(|bounds| bounds.center()) else {
            return false;
        };

        let step = scale_to_speed(delta, self.speed);
        if let Some(direction) = Direction::from_delta(step) {
            if let Some(frame) = self.walk.step(direction) {
                self.facing = direction;
                self.show(scene, images, ImageKey::Walk(direction, frame));
            }
        }

        self.move_to(scene, center + step)
    }

    /// Centre the avatar on `center`.
    ///
    /// The move is rejected as a whole if any edge of the avatar would leave
    /// the screen.
    pub fn move_to<S: Scene>(&mut self, scene: &mut S, center: Vec2) -> bool {
        let Some(size) = scene.get(self.sprite).map(|sprite| sprite.size) else {
            return false;
        };

        let target = Rect::new(center - size * 0.5, size);
        if !target.is_within(self.screen) {
            return false;
        }
        scene.relocate(self.sprite, target.min)
    }

    /// Show the standing image after a movement key is released.
    ///
    /// Up and down always switch stance; left and right only once the current
    /// walk frame has run its course.
    pub fn release<S: Scene>(&mut self, scene: &mut S, images: &Images, direction: Direction) {
        let show = match direction {
            Direction::North | Direction::South => true,
            Direction::East | Direction::West => !self.walk.is_locked(),
            Direction::Idle => false,
        };
        if show {
            self.facing = direction;
            self.show(scene, images, ImageKey::Stance(direction));
        }
    }

    /// Advance timers by one tick: frame lock, idle monitor, phone animation
    pub fn update<S: Scene>(&mut self, scene: &mut S, images: &Images, dt: f32) {
        self.walk.update(dt);

        if self.idle.update(dt) {
            debug!("Avatar idle for {:.1}s, starting phone animation", self.idle.idle_time());
            self.phone.play();
            self.show(scene, images, ImageKey::IdlePhone(self.phone.current_frame()));
        } else if self.phone.update(dt) {
            self.show(scene, images, ImageKey::IdlePhone(self.phone.current_frame()));
        }
    }

    /// Player touched the keyboard: reset the idle timer and put the phone away
    pub fn note_interaction<S: Scene>(&mut self, scene: &mut S, images: &Images) {
        self.idle.note_interaction();
        if self.phone.is_playing() {
            self.phone.stop();
            self.show(scene, images, ImageKey::Stance(self.facing));
        }
    }

    fn show<S: Scene>(&mut self, scene: &mut S, images: &Images, image: ImageKey) {
        if scene.set_texture(self.sprite, images.texture(image), images.size(image)) {
            self.image = image;
        }
    }

    #[cfg(test)]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    #[cfg(test)]
    pub fn image(&self) -> ImageKey {
        self.image
    }

    #[cfg(test)]
    pub fn is_frame_locked(&self) -> bool {
        self.walk.is_locked()
    }

    #[cfg(test)]
    pub fn is_on_phone(&self) -> bool {
        self.phone.is_playing()
    }

    /// Current bounding box on the scene
    pub fn bounds<S: Scene>(&self, scene: &S) -> Option<Rect> {
        scene.bounds(self.sprite)
    }

    /// Current top-left corner on the scene
    pub fn top_left<S: Scene>(&self, scene: &S) -> Option<Vec2> {
        self.bounds(scene).map(|bounds| bounds.min)
    }
}
