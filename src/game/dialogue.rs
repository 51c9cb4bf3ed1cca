// Cody's dialogue box
//
// A single box of text lines placed on the scene. Presenting new lines
// replaces whatever Cody was saying before.

use crate::engine::scene::{Scene, Sprite, SpriteId, SpriteKind};
use glam::Vec2;

pub const INTRO: &[&str] = &[
    "Welcome to CatchAleksa, where the virtual world is filled with lies and packet losses! \
     Meet Aleksa, a mysterious being who's stolen packages in transit. \
     Your mission: collect them all.",
];

pub const TUTORIAL: &[&str] = &["Press NEXT once all packages have been collected."];

pub const NOT_READY: &[&str] = &["You must collect all elusive packages before continuing"];

pub const GAME_OVER: &[&str] = &[
    "Oh no! The stolen packages remain elusive. Fear not, brave adventurer, \
     for even in defeat, lessons are learned. Return to the digital realm \
     with newfound wisdom and sharpened skills.",
    "Press ESCAPE to exit",
];

pub const VICTORY: &[&str] = &[
    "Every stolen package is back where it belongs. Aleksa has nowhere left to hide!",
    "Press ESCAPE to exit",
];

/// Width of the dialogue box
const BOX_WIDTH: f32 = 900.0;
/// Height of one line of text
const LINE_HEIGHT: f32 = 40.0;

/// Presents scripted lines in a dialogue box
#[derive(Debug, Default)]
pub struct DialogueSequencer {
    sprite: Option<SpriteId>,
    lines: Vec<String>,
    position: Vec2,
}

impl DialogueSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show all `lines` together at `position`, replacing any open dialogue
    pub fn present<S, I, T>(&mut self, scene: &mut S, lines: I, position: Vec2)
    where
        S: Scene,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.dismiss(scene);

        self.lines = lines.into_iter().map(Into::into).collect();
        self.position = position;
        let size = Vec2::new(BOX_WIDTH, LINE_HEIGHT * self.lines.len().max(1) as f32);
        let sprite = Sprite::new(SpriteKind::Dialogue, position, size).with_text(self.lines.clone());
        self.sprite = Some(scene.add(sprite));
    }

    /// Remove the dialogue box, if any
    pub fn dismiss<S: Scene>(&mut self, scene: &mut S) {
        if let Some(sprite) = self.sprite.take() {
            scene.remove(sprite);
        }
        self.lines.clear();
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.sprite.is_some()
    }

    #[cfg(test)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[cfg(test)]
    pub fn position(&self) -> Vec2 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::SceneGraph;

    #[test]
    fn test_present_shows_all_lines() {
        let mut scene = SceneGraph::new();
        let mut cody = DialogueSequencer::new();
        cody.present(&mut scene, GAME_OVER.iter().copied(), Vec2::new(480.0, 540.0));

        assert!(cody.is_visible());
        assert_eq!(cody.lines().len(), 2);
        assert_eq!(cody.lines()[1], "Press ESCAPE to exit");

        let id = scene.ids_of(SpriteKind::Dialogue)[0];
        assert_eq!(scene.get(id).unwrap().text.len(), 2);
        assert_eq!(scene.get(id).unwrap().position, Vec2::new(480.0, 540.0));
    }

    #[test]
    fn test_present_replaces_previous() {
        let mut scene = SceneGraph::new();
        let mut cody = DialogueSequencer::new();
        cody.present(&mut scene, INTRO.iter().copied(), Vec2::new(420.0, 50.0));
        cody.present(&mut scene, TUTORIAL.iter().copied(), Vec2::new(30.0, 200.0));

        assert_eq!(scene.count(SpriteKind::Dialogue), 1);
        assert_eq!(cody.lines(), TUTORIAL);
        assert_eq!(cody.position(), Vec2::new(30.0, 200.0));
    }

    #[test]
    fn test_dismiss() {
        let mut scene = SceneGraph::new();
        let mut cody = DialogueSequencer::new();
        cody.dismiss(&mut scene);
        assert!(!cody.is_visible());

        cody.present(&mut scene, NOT_READY.iter().copied(), Vec2::new(50.0, 150.0));
        cody.dismiss(&mut scene);
        assert!(!cody.is_visible());
        assert!(cody.lines().is_empty());
        assert!(scene.is_empty());
    }
}
