// Engine modules: assets, fixed-step clock, input, scene

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod scene;
