use anyhow::Result;
use log::{debug, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetManager;
use engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use engine::input::InputManager;
use engine::scene::SceneGraph;
use game::{GameConfig, GameEvent, GameSession, Images};

/// Environment variable naming an optional TOML configuration file
const CONFIG_ENV: &str = "CATCH_ALEKSA_CONFIG";
/// Directory holding the game's images
const ASSET_DIR: &str = "assets";

fn load_config() -> Result<GameConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Ok(GameConfig::load(&path)?)
        }
        None => Ok(GameConfig::default()),
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Catch Aleksa...");

    let config = load_config()?;
    let mut assets = AssetManager::new(ASSET_DIR);
    let images = Images::load(&mut assets, &config);
    let mut session = GameSession::new(SceneGraph::new(), config, images)?;
    let mut input = InputManager::new();
    let mut clock = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Catch Aleksa")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut title = String::new();

    // Main event loop
    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if let Some(input_event) = input.process_keyboard_event(&event) {
                    session.handle_input(input_event);
                }
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                for input_event in input.release_all() {
                    session.handle_input(input_event);
                }
            }
            Event::AboutToWait => {
                for _ in 0..clock.begin_frame() {
                    session.tick(FIXED_TIMESTEP);
                }

                for game_event in session.drain_events() {
                    match game_event {
                        GameEvent::Close => {
                            info!("Session closed after {} ticks", clock.tick_count());
                            elwt.exit();
                        }
                        other => debug!("{:?}", other),
                    }
                }

                let status = session.status();
                if status != title {
                    window.set_title(&status);
                    title = status;
                }
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
