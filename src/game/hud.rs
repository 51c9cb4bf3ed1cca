// Heads-up display: stage banner, package counter, next button, hearts

use super::images::{ImageKey, Images};
use crate::engine::scene::{Scene, Sprite, SpriteId, SpriteKind, UiElement};
use glam::Vec2;

const STAGE_POSITION: Vec2 = Vec2::new(30.0, 30.0);
const COUNTER_POSITION: Vec2 = Vec2::new(175.0, 58.0);
const COUNTER_SIZE: Vec2 = Vec2::new(80.0, 40.0);
const NEXT_POSITION: Vec2 = Vec2::new(479.0, 30.0);
/// Hearts sit this far from the right edge of the screen
const HEARTS_INSET: f32 = 234.0;
const HEARTS_Y: f32 = 50.0;

/// HUD sprites on the scene
#[derive(Debug, Default)]
pub struct Hud {
    stage: Option<SpriteId>,
    counter: Option<SpriteId>,
    next: Option<SpriteId>,
    hearts: Option<SpriteId>,
}

fn hearts_image(lives: i32) -> ImageKey {
    ImageKey::Hearts(lives.clamp(0, u8::MAX as i32) as u8)
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put every HUD element on the scene, replacing any already shown
    pub fn show<S: Scene>(
        &mut self,
        scene: &mut S,
        images: &Images,
        screen: Vec2,
        round: u32,
        found_total: u32,
        lives: i32,
    ) {
        self.clear(scene);

        let stage = ImageKey::StageInfo(round.min(u8::MAX as u32) as u8);
        self.stage = Some(scene.add(Sprite::with_texture(
            SpriteKind::Ui(UiElement::StageInfo),
            STAGE_POSITION,
            images.size(stage),
            images.texture(stage),
        )));

        self.counter = Some(scene.add(
            Sprite::new(
                SpriteKind::Ui(UiElement::PackageCounter),
                COUNTER_POSITION,
                COUNTER_SIZE,
            )
            .with_text([found_total.to_string()]),
        ));

        self.next = Some(scene.add(Sprite::with_texture(
            SpriteKind::Ui(UiElement::NextButton),
            NEXT_POSITION,
            images.size(ImageKey::NextButton),
            images.texture(ImageKey::NextButton),
        )));

        let hearts = hearts_image(lives);
        self.hearts = Some(scene.add(Sprite::with_texture(
            SpriteKind::Ui(UiElement::Hearts),
            Vec2::new(screen.x - HEARTS_INSET, HEARTS_Y),
            images.size(hearts),
            images.texture(hearts),
        )));
    }

    /// Refresh the package counter label
    pub fn set_packages<S: Scene>(&mut self, scene: &mut S, found_total: u32) {
        if let Some(counter) = self.counter {
            scene.set_text(counter, vec![found_total.to_string()]);
        }
    }

    /// Show the hearts image for `lives` (no hearts below zero)
    pub fn set_lives<S: Scene>(&mut self, scene: &mut S, images: &Images, lives: i32) {
        if let Some(hearts) = self.hearts {
            let key = hearts_image(lives);
            scene.set_texture(hearts, images.texture(key), images.size(key));
        }
    }

    /// Remove stage banner, counter and next button; hearts stay up
    pub fn remove_progress<S: Scene>(&mut self, scene: &mut S) {
        for sprite in [self.stage.take(), self.counter.take(), self.next.take()]
            .into_iter()
            .flatten()
        {
            scene.remove(sprite);
        }
    }

    /// Remove every HUD element
    pub fn clear<S: Scene>(&mut self, scene: &mut S) {
        self.remove_progress(scene);
        if let Some(hearts) = self.hearts.take() {
            scene.remove(hearts);
        }
    }

    #[cfg(test)]
    pub fn is_shown(&self, element: UiElement) -> bool {
        match element {
            UiElement::StageInfo => self.stage.is_some(),
            UiElement::PackageCounter => self.counter.is_some(),
            UiElement::NextButton => self.next.is_some(),
            UiElement::Hearts => self.hearts.is_some(),
        }
    }
}
