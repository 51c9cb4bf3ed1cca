// Catch Aleksa game logic
//
// This module contains everything that makes up a play session:
// - Configuration and errors
// - The avatar, the scrolling obstacle grid and the fence band
// - Round/lives bookkeeping, HUD and Cody's dialogue
// - `GameSession`, which ties it all together tick by tick

pub mod avatar;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod fence;
pub mod hud;
pub mod images;
pub mod obstacles;
pub mod round;
pub mod session;

// Re-export commonly used types
pub use config::GameConfig;
pub use images::Images;
pub use session::{GameEvent, GameSession};
