// Input manager - translates raw keyboard events into game input

use super::action::{letter_for, Action, InputSource};
use super::config::InputConfig;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A key as the game sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key bound to a game action
    Action(Action),
    /// An unbound letter key (feeds the cheat buffer)
    Letter(char),
    /// Anything else
    Other,
}

/// Discrete key transition delivered to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
}

/// Keyboard front end: owns the bindings and the set of held actions
pub struct InputManager {
    config: InputConfig,

    /// Actions whose keys are currently held
    held: HashSet<Action>,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            config: InputConfig::default(),
            held: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> Option<InputEvent> {
        match event.physical_key {
            PhysicalKey::Code(code) => self.process_key(code, event.state, event.repeat),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    /// Translate a physical key transition. Auto-repeated presses are dropped.
    pub fn process_key(
        &mut self,
        code: KeyCode,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputEvent> {
        let key = self.classify(code);

        match state {
            ElementState::Pressed => {
                if repeat {
                    return None;
                }
                if let Key::Action(action) = key {
                    self.held.insert(action);
                }
                Some(InputEvent::Pressed(key))
            }
            ElementState::Released => {
                if let Key::Action(action) = key {
                    self.held.remove(&action);
                }
                Some(InputEvent::Released(key))
            }
        }
    }

    /// Resolve a key code against the bindings
    pub fn classify(&self, code: KeyCode) -> Key {
        if let Some(action) = self.config.get_action(InputSource::key(code)) {
            return Key::Action(action);
        }
        match letter_for(code) {
            Some(letter) => Key::Letter(letter),
            None => Key::Other,
        }
    }

    /// Release every held action (e.g. when the window loses focus),
    /// returning the matching release events
    pub fn release_all(&mut self) -> Vec<InputEvent> {
        self.held
            .drain()
            .map(|action| InputEvent::Released(Key::Action(action)))
            .collect()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
