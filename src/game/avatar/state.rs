// Avatar facing and held-key state

use crate::engine::input::Action;
use glam::Vec2;

/// Direction the avatar is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    North,
    South,
    East,
    West,
    #[default]
    Idle,
}

impl Direction {
    /// The four walking directions
    pub const WALKING: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Pick the walk direction for a movement delta.
    ///
    /// Vertical movement wins over horizontal: North, South, West, East.
    pub fn from_delta(delta: Vec2) -> Option<Self> {
        if delta.y < 0.0 {
            Some(Self::North)
        } else if delta.y > 0.0 {
            Some(Self::South)
        } else if delta.x < 0.0 {
            Some(Self::West)
        } else if delta.x > 0.0 {
            Some(Self::East)
        } else {
            None
        }
    }

    /// Direction a movement action walks in
    pub fn from_action(action: Action) -> Option<Self> {
        match action {
            Action::MoveUp => Some(Self::North),
            Action::MoveDown => Some(Self::South),
            Action::MoveLeft => Some(Self::West),
            Action::MoveRight => Some(Self::East),
            _ => None,
        }
    }

    /// Slot in per-direction tables
    pub fn index(&self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
            Self::Idle => 4,
        }
    }
}

/// Which movement keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementKeys {
    /// Update from a movement action. Non-movement actions are ignored.
    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::MoveUp => self.up = held,
            Action::MoveDown => self.down = held,
            Action::MoveLeft => self.left = held,
            Action::MoveRight => self.right = held,
            _ => {}
        }
    }

    /// Raw per-tick delta (unit steps, not yet scaled to speed)
    pub fn delta(&self) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if self.up {
            delta.y -= 1.0;
        }
        if self.down {
            delta.y += 1.0;
        }
        if self.left {
            delta.x -= 1.0;
        }
        if self.right {
            delta.x += 1.0;
        }
        delta
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
