// Round and lives bookkeeping

use super::config::GameConfig;
use log::{debug, info};

/// Where the game is in its progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    /// Start screen, before the first round
    #[default]
    Intro,
    /// Round `n` is being played
    Active(u32),
    /// Round `n`'s quota is met; waiting for the player to press next
    Complete(u32),
    /// Lives ran out
    GameOver,
    /// Final round completed
    Victory,
}

impl RoundPhase {
    /// True while obstacles move and collide
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Active(_) | Self::Complete(_))
    }

    /// True once the game can no longer continue
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Result of touching an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    PackageFound { total: u32, quota_met: bool },
    LifeLost { lives: i32 },
    GameOver,
    /// Hit arrived outside of play and was not counted
    Ignored,
}

/// Result of asking for the next round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Round `n` may start
    Next(u32),
    /// The final round was completed
    Victory,
    /// Quota not met yet
    NotReady { found: u32, needed: u32 },
    /// Nothing to advance from (intro or finished game)
    Unavailable,
}

/// Round number, lives and package counters
#[derive(Debug, Clone)]
pub struct RoundManager {
    phase: RoundPhase,
    round: u32,
    max_round: u32,
    lives: i32,
    /// Good obstacles spawned this round
    packages_needed: u32,
    found_this_round: u32,
    /// Packages found over the whole session (shown on the HUD)
    found_total: u32,
}

impl RoundManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: RoundPhase::Intro,
            round: 0,
            max_round: config.max_round().max(1),
            lives: config.rounds.starting_lives,
            packages_needed: 0,
            found_this_round: 0,
            found_total: 0,
        }
    }

    /// Enter round `round` (clamped to the last round) with fresh counters
    pub fn begin_round(&mut self, round: u32) {
        self.round = round.clamp(1, self.max_round);
        self.packages_needed = 0;
        self.found_this_round = 0;
        self.phase = RoundPhase::Active(self.round);
        info!("Round {} of {} started", self.round, self.max_round);
    }

    /// Count freshly spawned packages towards this round's quota.
    ///
    /// Accumulates: calling it twice in a round counts the packages twice.
    pub fn add_packages_needed(&mut self, count: u32) {
        self.packages_needed += count;
    }

    pub fn register_good_hit(&mut self) -> HitOutcome {
        if !self.phase.is_playing() {
            return HitOutcome::Ignored;
        }

        self.found_total += 1;
        self.found_this_round += 1;
        debug!(
            "Package found ({}/{} this round, {} total)",
            self.found_this_round, self.packages_needed, self.found_total
        );

        let quota_met = self.is_ready();
        if quota_met {
            self.phase = RoundPhase::Complete(self.round);
            info!("Round {} quota met", self.round);
        }
        HitOutcome::PackageFound {
            total: self.found_total,
            quota_met,
        }
    }

    /// Lose a life; dropping below zero ends the game
    pub fn register_bad_hit(&mut self) -> HitOutcome {
        if !self.phase.is_playing() {
            return HitOutcome::Ignored;
        }

        self.lives -= 1;
        debug!("Hit a hazard, {} lives left", self.lives);
        if self.lives < 0 {
            self.phase = RoundPhase::GameOver;
            info!("Game over in round {}", self.round);
            return HitOutcome::GameOver;
        }
        HitOutcome::LifeLost { lives: self.lives }
    }

    /// Every package of this round has been found
    pub fn is_ready(&self) -> bool {
        self.found_this_round == self.packages_needed
    }

    /// Ask to leave the current round.
    ///
    /// Refused without any state change while the quota is not met. Leaving
    /// the last round enters `Victory`; otherwise the caller starts the
    /// returned round with `begin_round`.
    pub fn try_advance(&mut self) -> Advance {
        if !self.phase.is_playing() {
            return Advance::Unavailable;
        }
        if !self.is_ready() {
            return Advance::NotReady {
                found: self.found_this_round,
                needed: self.packages_needed,
            };
        }
        if self.round >= self.max_round {
            self.phase = RoundPhase::Victory;
            info!("All {} rounds complete", self.max_round);
            return Advance::Victory;
        }
        Advance::Next(self.round + 1)
    }

    pub fn set_lives(&mut self, lives: i32) {
        self.lives = lives;
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Current round (0 before the first round starts)
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_round(&self) -> u32 {
        self.max_round
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn packages_needed(&self) -> u32 {
        self.packages_needed
    }

    pub fn found_this_round(&self) -> u32 {
        self.found_this_round
    }

    pub fn found_total(&self) -> u32 {
        self.found_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_round() -> RoundManager {
        let mut rounds = RoundManager::new(&GameConfig::default());
        rounds.begin_round(1);
        rounds.add_packages_needed(7);
        rounds
    }

    #[test]
    fn test_starts_in_intro() {
        let rounds = RoundManager::new(&GameConfig::default());
        assert_eq!(rounds.phase(), RoundPhase::Intro);
        assert_eq!(rounds.lives(), 3);
        assert_eq!(rounds.round(), 0);
    }

    #[test]
    fn test_hits_ignored_outside_play() {
        let mut rounds = RoundManager::new(&GameConfig::default());
        assert_eq!(rounds.register_good_hit(), HitOutcome::Ignored);
        assert_eq!(rounds.register_bad_hit(), HitOutcome::Ignored);
        assert_eq!(rounds.lives(), 3);
        assert_eq!(rounds.try_advance(), Advance::Unavailable);
    }

    #[test]
    fn test_packages_needed_accumulates() {
        let mut rounds = active_round();
        rounds.add_packages_needed(7);
        assert_eq!(rounds.packages_needed(), 14);

        rounds.begin_round(2);
        assert_eq!(rounds.packages_needed(), 0);
    }

    #[test]
    fn test_quota_met_completes_round() {
        let mut rounds = active_round();
        for _ in 0..6 {
            let outcome = rounds.register_good_hit();
            assert!(matches!(outcome, HitOutcome::PackageFound { quota_met: false, .. }));
        }
        assert_eq!(rounds.phase(), RoundPhase::Active(1));

        assert_eq!(
            rounds.register_good_hit(),
            HitOutcome::PackageFound {
                total: 7,
                quota_met: true
            }
        );
        assert_eq!(rounds.phase(), RoundPhase::Complete(1));
        assert_eq!(rounds.round(), 1);
    }

    #[test]
    fn test_advance_refused_below_quota() {
        let mut rounds = active_round();
        for _ in 0..6 {
            rounds.register_good_hit();
        }

        assert_eq!(
            rounds.try_advance(),
            Advance::NotReady {
                found: 6,
                needed: 7
            }
        );
        assert_eq!(rounds.round(), 1);
        assert_eq!(rounds.phase(), RoundPhase::Active(1));
    }

    #[test]
    fn test_advance_through_all_rounds() {
        let mut rounds = active_round();
        for _ in 0..7 {
            rounds.register_good_hit();
        }
        assert_eq!(rounds.try_advance(), Advance::Next(2));

        rounds.begin_round(2);
        rounds.add_packages_needed(5);
        for _ in 0..5 {
            rounds.register_good_hit();
        }
        assert_eq!(rounds.try_advance(), Advance::Next(3));

        rounds.begin_round(3);
        rounds.add_packages_needed(3);
        for _ in 0..3 {
            rounds.register_good_hit();
        }
        assert_eq!(rounds.try_advance(), Advance::Victory);
        assert_eq!(rounds.phase(), RoundPhase::Victory);
        assert_eq!(rounds.found_total(), 15);
    }

    #[test]
    fn test_round_is_clamped() {
        let mut rounds = active_round();
        rounds.begin_round(7);
        assert_eq!(rounds.round(), 3);
    }

    #[test]
    fn test_lives_run_out_after_fourth_hit() {
        let mut rounds = active_round();
        assert_eq!(rounds.register_bad_hit(), HitOutcome::LifeLost { lives: 2 });
        assert_eq!(rounds.register_bad_hit(), HitOutcome::LifeLost { lives: 1 });
        assert_eq!(rounds.register_bad_hit(), HitOutcome::LifeLost { lives: 0 });
        assert_eq!(rounds.phase(), RoundPhase::Active(1));

        assert_eq!(rounds.register_bad_hit(), HitOutcome::GameOver);
        assert_eq!(rounds.lives(), -1);
        assert_eq!(rounds.phase(), RoundPhase::GameOver);

        assert_eq!(rounds.register_bad_hit(), HitOutcome::Ignored);
        assert_eq!(rounds.lives(), -1);
    }

    #[test]
    fn test_set_lives() {
        let mut rounds = active_round();
        rounds.register_bad_hit();
        rounds.set_lives(4);
        assert_eq!(rounds.lives(), 4);
    }
}
