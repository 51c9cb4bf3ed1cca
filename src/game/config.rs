// Game configuration
//
// Every tunable constant of the game lives here. The defaults reproduce the
// original game; a TOML file can override any subset of them.

use super::error::GameError;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters that define the game. These don't change at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenParams,
    pub avatar: AvatarParams,
    pub obstacles: ObstacleParams,
    pub fence: FenceParams,
    pub rounds: RoundParams,
    pub idle: IdleParams,
    pub cheat: CheatParams,
    pub start_zone: StartZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenParams {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenParams {
    fn default() -> Self {
        ScreenParams {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarParams {
    /// Distance travelled per tick
    pub speed: f32,
    /// Seconds a walk frame stays up before the next one may be shown
    pub frame_delay: f32,
    /// Walk frames per direction
    pub walk_frames: u8,
}

impl Default for AvatarParams {
    fn default() -> Self {
        AvatarParams {
            speed: 2.0,
            frame_delay: 0.2,
            walk_frames: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleParams {
    pub columns: u32,
    pub rows: u32,
    /// Size bad obstacles are scaled to
    pub width: f32,
    pub height: f32,
    pub column_gap: f32,
    pub row_gap: f32,
    /// Space between the lowest row and the bottom of the screen
    pub bottom_margin: f32,
    pub speed: f32,
    /// How far past the right edge a recycled obstacle re-enters
    pub wrap_offset: f32,
}

impl Default for ObstacleParams {
    fn default() -> Self {
        ObstacleParams {
            columns: 7,
            rows: 6,
            width: 190.0,
            height: 100.0,
            column_gap: 100.0,
            row_gap: 60.0,
            bottom_margin: 100.0,
            speed: 2.0,
            wrap_offset: 50.0,
        }
    }
}

impl ObstacleParams {
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceParams {
    pub segments: u32,
    pub segment_width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Default for FenceParams {
    fn default() -> Self {
        FenceParams {
            segments: 16,
            segment_width: 138.0,
            height: 95.0,
            speed: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundParams {
    /// Good obstacles spawned per round; its length is the number of rounds
    pub good_quotas: Vec<u32>,
    pub starting_lives: i32,
}

impl Default for RoundParams {
    fn default() -> Self {
        RoundParams {
            good_quotas: vec![7, 5, 3],
            starting_lives: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleParams {
    /// Seconds without input before the phone animation starts
    pub threshold: f32,
    pub frame_duration: f32,
    pub frames: u8,
}

impl Default for IdleParams {
    fn default() -> Self {
        IdleParams {
            threshold: 10.0,
            frame_duration: 0.2,
            frames: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheatParams {
    pub phrase: String,
    /// Lives granted when the phrase is typed
    pub lives: i32,
}

impl Default for CheatParams {
    fn default() -> Self {
        CheatParams {
            phrase: "HESOYAM".to_string(),
            lives: 4,
        }
    }
}

/// Region the avatar's top-left corner must be in for Space to start the game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartZone {
    pub min_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for StartZone {
    fn default() -> Self {
        StartZone {
            min_x: 1550.0,
            min_y: 350.0,
            max_y: 500.0,
        }
    }
}

impl StartZone {
    pub fn contains(&self, top_left: Vec2) -> bool {
        top_left.x > self.min_x && top_left.y > self.min_y && top_left.y < self.max_y
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen: ScreenParams::default(),
            avatar: AvatarParams::default(),
            obstacles: ObstacleParams::default(),
            fence: FenceParams::default(),
            rounds: RoundParams::default(),
            idle: IdleParams::default(),
            cheat: CheatParams::default(),
            start_zone: StartZone::default(),
        }
    }
}

impl std::str::FromStr for GameConfig {
    type Err = GameError;
    fn from_str(serialized: &str) -> Result<Self, Self::Err> {
        let config = toml::from_str(serialized)?;
        Ok(config)
    }
}

impl GameConfig {
    /// Read and parse a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        contents.parse()
    }

    /// Reject configurations the game cannot be played with
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidRoundConfig(msg));

        if self.screen.width <= 0.0 || self.screen.height <= 0.0 {
            return invalid(format!(
                "screen must be positive, got {}x{}",
                self.screen.width, self.screen.height
            ));
        }
        if self.rounds.good_quotas.is_empty() {
            return invalid("round table is empty".to_string());
        }
        let cells = self.obstacles.cell_count();
        if cells == 0 {
            return invalid("obstacle grid has no cells".to_string());
        }
        for (index, &quota) in self.rounds.good_quotas.iter().enumerate() {
            if quota as usize > cells {
                return invalid(format!(
                    "round {} wants {} packages but the grid only has {} cells",
                    index + 1,
                    quota,
                    cells
                ));
            }
        }
        if self.avatar.walk_frames == 0 || self.idle.frames == 0 {
            return invalid("animations need at least one frame".to_string());
        }
        if self.rounds.starting_lives < 0 {
            return invalid(format!(
                "starting lives must not be negative, got {}",
                self.rounds.starting_lives
            ));
        }
        Ok(())
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen.width, self.screen.height)
    }

    /// Number of playable rounds
    pub fn max_round(&self) -> u32 {
        self.rounds.good_quotas.len() as u32
    }

    /// Good obstacles to spawn in `round` (1-based), clamped to the last round
    pub fn good_quota(&self, round: u32) -> u32 {
        let index = (round.max(1) as usize - 1).min(self.rounds.good_quotas.len().saturating_sub(1));
        self.rounds.good_quotas.get(index).copied().unwrap_or(0)
    }
}
