// Input handling system
//
// Turns winit keyboard events into the game's own key vocabulary.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Binding table
// - `manager`: Translates raw key events into `InputEvent`s
// - `buffer`: Phrase matching over typed letters (cheat codes)
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::new();
//
// // In your event loop, translate keyboard events
// if let Some(event) = input.process_keyboard_event(&key_event) {
//     session.handle_input(event);
// }
// ```

pub mod action;
pub mod buffer;
pub mod config;
pub mod manager;

pub use action::Action;
pub use buffer::PhraseBuffer;
pub use manager::{InputEvent, InputManager, Key};
