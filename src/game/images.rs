// Typed image catalogue
//
// Maps every picture the game shows to its file under the asset directory
// and remembers its size. Sprites pick images by `ImageKey`, never by path.

use super::avatar::Direction;
use super::config::GameConfig;
use crate::engine::assets::{AssetHandle, AssetId, AssetManager, TextureHandle};
use glam::Vec2;
use log::info;
use std::collections::HashMap;

/// Every image the game can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKey {
    StartScreen,
    GameBackground,
    /// Static standing image for a direction
    Stance(Direction),
    /// Walk frame `n` for a direction
    Walk(Direction, u8),
    /// Idle phone animation frame (0-based)
    IdlePhone(u8),
    Fence,
    /// Obstacle image 1..=9 (7, 8 and 9 are packages)
    Obstacle(u8),
    /// Hearts image for a number of lives
    Hearts(u8),
    /// Stage banner for a round (1-based)
    StageInfo(u8),
    NextButton,
}

/// Obstacle images that show packages
pub const GOOD_OBSTACLES: [u8; 3] = [7, 8, 9];
/// Obstacle images that show hazards
pub const BAD_OBSTACLES: [u8; 6] = [1, 2, 3, 4, 5, 6];

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "Back",
        Direction::South | Direction::Idle => "Front",
        Direction::West => "Left",
        Direction::East => "Right",
    }
}

impl ImageKey {
    /// The idle stance shares the south-facing picture
    pub fn canonical(self) -> Self {
        match self {
            Self::Stance(Direction::Idle) => Self::Stance(Direction::South),
            other => other,
        }
    }

    /// Path relative to the asset directory
    pub fn path(&self) -> String {
        match *self {
            Self::StartScreen => "BackGrounds/Startscreen.png".to_string(),
            Self::GameBackground => "BackGrounds/GreenBackground.png".to_string(),
            Self::Stance(direction) => {
                format!("WalkingAnimation/{}.png", direction_name(direction))
            }
            Self::Walk(direction, frame) => {
                let foot = if frame % 2 == 0 { "Left" } else { "Right" };
                format!("WalkingAnimation/{}{}.png", direction_name(direction), foot)
            }
            Self::IdlePhone(frame) => format!("IdlePhoneAnimation/IdlePhone{}.png", frame + 1),
            Self::Fence => "Fences/FenceSide.png".to_string(),
            Self::Obstacle(n) => format!("Obstacles/Obstacle{}.png", n),
            Self::Hearts(n) => format!("Hearts/Hearts{}.png", n),
            Self::StageInfo(n) => format!("Informative/Stage{}Info.png", n),
            Self::NextButton => "Informative/NextImage.png".to_string(),
        }
    }

    /// Size used when the file is missing
    pub fn fallback_size(&self) -> Vec2 {
        match self {
            Self::StartScreen | Self::GameBackground => Vec2::new(1920.0, 1080.0),
            Self::Stance(_) | Self::Walk(..) | Self::IdlePhone(_) => Vec2::new(100.0, 150.0),
            Self::Fence => Vec2::new(138.0, 95.0),
            Self::Obstacle(_) => Vec2::new(190.0, 100.0),
            Self::Hearts(_) => Vec2::new(204.0, 60.0),
            Self::StageInfo(_) => Vec2::new(420.0, 90.0),
            Self::NextButton => Vec2::new(160.0, 90.0),
        }
    }

    /// Every key the game may ask for under `config`
    pub fn all(config: &GameConfig) -> Vec<ImageKey> {
        let mut keys = vec![
            Self::StartScreen,
            Self::GameBackground,
            Self::Fence,
            Self::NextButton,
        ];
        for direction in Direction::WALKING {
            keys.push(Self::Stance(direction));
            for frame in 0..config.avatar.walk_frames {
                keys.push(Self::Walk(direction, frame));
            }
        }
        keys.extend((0..config.idle.frames).map(Self::IdlePhone));
        keys.extend(BAD_OBSTACLES.iter().chain(GOOD_OBSTACLES.iter()).map(|&n| Self::Obstacle(n)));

        let max_lives = config.rounds.starting_lives.max(config.cheat.lives).clamp(0, u8::MAX as i32);
        keys.extend((0..=max_lives as u8).map(Self::Hearts));
        keys.extend((1..=config.max_round().min(u8::MAX as u32) as u8).map(Self::StageInfo));
        keys
    }
}

/// Resolved textures and sizes for every `ImageKey`
#[derive(Debug, Clone, Default)]
pub struct Images {
    sizes: HashMap<ImageKey, Vec2>,
}

impl Images {
    /// Load every image the game uses. Missing files become placeholders.
    pub fn load(assets: &mut AssetManager, config: &GameConfig) -> Self {
        let mut sizes = HashMap::new();
        for key in ImageKey::all(config) {
            let handle = assets.load_texture_or_placeholder(&key.path(), key.fallback_size());
            let size = assets
                .get_texture(handle)
                .map(|info| info.size)
                .unwrap_or_else(|| key.fallback_size());
            sizes.insert(key, size);
        }

        let stats = assets.stats();
        info!(
            "Loaded {} images ({} placeholders)",
            stats.texture_count, stats.placeholder_count
        );
        Self { sizes }
    }

    /// Catalogue with fallback sizes only, no file access
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Texture handle for a key
    pub fn texture(&self, key: ImageKey) -> TextureHandle {
        AssetHandle::new(AssetId::from_path(&key.path()))
    }

    /// Native size of a key's image
    pub fn size(&self, key: ImageKey) -> Vec2 {
        self.sizes
            .get(&key.canonical())
            .copied()
            .unwrap_or_else(|| key.fallback_size())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
