// Game session
//
// Owns every piece of game state and advances it one fixed tick at a time.
// Input arrives as discrete key events; everything visible is pushed to the
// scene; anything the host shell should react to comes out as a `GameEvent`.

use super::avatar::{Avatar, Direction, MovementKeys};
use super::config::GameConfig;
use super::dialogue::{self, DialogueSequencer};
use super::error::GameError;
use super::fence::FenceBand;
use super::hud::Hud;
use super::images::{ImageKey, Images};
use super::obstacles::ObstacleField;
use super::round::{Advance, HitOutcome, RoundManager, RoundPhase};
use crate::engine::input::{Action, InputEvent, Key, PhraseBuffer};
use crate::engine::scene::{ObstacleKind, Scene, Sprite, SpriteId, SpriteKind};
use glam::Vec2;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

const INTRO_POSITION: Vec2 = Vec2::new(420.0, 50.0);
const TUTORIAL_POSITION: Vec2 = Vec2::new(30.0, 200.0);
const NOT_READY_POSITION: Vec2 = Vec2::new(50.0, 150.0);

/// Things that happened during a tick or key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted(u32),
    /// Total packages found so far
    PackagesFound(u32),
    /// Round `n`'s quota is met
    QuotaMet(u32),
    LivesChanged(i32),
    NotReady { found: u32, needed: u32 },
    GameOver,
    Victory,
    /// The player asked to leave
    Close,
}

/// One play-through of the game
pub struct GameSession<S: Scene> {
    scene: S,
    config: GameConfig,
    images: Images,
    rng: StdRng,

    avatar: Avatar,
    obstacles: ObstacleField,
    fence: FenceBand,
    rounds: RoundManager,
    dialogue: DialogueSequencer,
    hud: Hud,

    background: SpriteId,
    keys: MovementKeys,
    cheat: PhraseBuffer,
    tutorial_shown: bool,
    events: Vec<GameEvent>,
}

impl<S: Scene> GameSession<S> {
    /// Create a session with a randomly seeded obstacle layout
    pub fn new(scene: S, config: GameConfig, images: Images) -> Result<Self, GameError> {
        Self::with_rng(scene, config, images, StdRng::from_entropy())
    }

    /// Create a session whose obstacle layouts come from `rng`
    pub fn with_rng(
        mut scene: S,
        config: GameConfig,
        images: Images,
        rng: StdRng,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let screen = config.screen_size();
        let background = scene.add(Sprite::with_texture(
            SpriteKind::Background,
            Vec2::ZERO,
            screen,
            images.texture(ImageKey::StartScreen),
        ));
        let avatar = Avatar::spawn(&mut scene, &images, &config, screen * 0.5);

        let mut dialogue = DialogueSequencer::new();
        dialogue.present(&mut scene, dialogue::INTRO.iter().copied(), INTRO_POSITION);

        info!(
            "Session started: {} rounds, {} lives",
            config.max_round(),
            config.rounds.starting_lives
        );

        Ok(Self {
            obstacles: ObstacleField::new(&config),
            fence: FenceBand::new(&config),
            rounds: RoundManager::new(&config),
            cheat: PhraseBuffer::new(&config.cheat.phrase),
            hud: Hud::new(),
            keys: MovementKeys::default(),
            tutorial_shown: false,
            events: Vec::new(),
            scene,
            config,
            images,
            rng,
            avatar,
            dialogue,
            background,
        })
    }

    /// Feed one input event into the session
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(key) => self.key_down(key),
            InputEvent::Released(key) => self.key_up(key),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.avatar.note_interaction(&mut self.scene, &self.images);

        match key {
            Key::Action(action) if action.is_movement() => self.keys.set(action, true),
            Key::Action(Action::Start) => {
                self.start_game();
            }
            Key::Action(Action::Next) => {
                self.request_next_round();
            }
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Action(action) if action.is_movement() => {
                self.keys.set(action, false);
                if let Some(direction) = Direction::from_action(action) {
                    self.avatar.release(&mut self.scene, &self.images, direction);
                }
            }
            Key::Action(Action::Quit) => {
                self.dialogue.dismiss(&mut self.scene);
                info!("Close requested");
                self.events.push(GameEvent::Close);
            }
            Key::Letter(letter) => {
                if self.cheat.push(letter) {
                    self.apply_cheat();
                }
            }
            Key::Action(_) | Key::Other => self.cheat.reset(),
        }
    }

    /// Advance the game by one fixed step of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if self.keys.any() {
            self.avatar.note_interaction(&mut self.scene, &self.images);
        }
        self.avatar
            .move_by(&mut self.scene, &self.images, self.keys.delta());
        self.avatar.update(&mut self.scene, &self.images, dt);

        if !self.rounds.phase().is_playing() {
            return;
        }

        let speed = self.fence.speed();
        self.fence.tick(&mut self.scene, speed);
        let avatar = self.avatar.bounds(&self.scene);
        let hits = self.obstacles.tick(&mut self.scene, avatar);
        for kind in hits {
            self.apply_hit(kind);
            if !self.rounds.phase().is_playing() {
                break;
            }
        }
    }

    /// Leave the start screen and begin round 1.
    ///
    /// Only works from the intro while the avatar stands in the start zone.
    pub fn start_game(&mut self) -> bool {
        if self.rounds.phase() != RoundPhase::Intro {
            return false;
        }
        let Some(top_left) = self.avatar.top_left(&self.scene) else {
            return false;
        };
        if !self.config.start_zone.contains(top_left) {
            debug!("Start ignored, avatar at ({}, {})", top_left.x, top_left.y);
            return false;
        }

        self.dialogue.dismiss(&mut self.scene);
        let screen = self.config.screen_size();
        self.scene.set_texture(
            self.background,
            self.images.texture(ImageKey::GameBackground),
            screen,
        );
        let start = round_start_point(&self.config);
        self.avatar.move_to(&mut self.scene, start);

        if !self.tutorial_shown {
            self.dialogue.present(
                &mut self.scene,
                dialogue::TUTORIAL.iter().copied(),
                TUTORIAL_POSITION,
            );
            self.tutorial_shown = true;
        }

        self.begin_round(1);
        true
    }

    /// Try to move on to the next round; refused until the quota is met
    pub fn request_next_round(&mut self) -> Advance {
        let outcome = self.rounds.try_advance();
        match outcome {
            Advance::Next(round) => {
                self.dialogue.dismiss(&mut self.scene);
                self.begin_round(round);
            }
            Advance::Victory => self.enter_victory(),
            Advance::NotReady { found, needed } => {
                warn!("Next round refused: {}/{} packages found", found, needed);
                self.dialogue.present(
                    &mut self.scene,
                    dialogue::NOT_READY.iter().copied(),
                    NOT_READY_POSITION,
                );
                self.events.push(GameEvent::NotReady { found, needed });
            }
            Advance::Unavailable => {}
        }
        outcome
    }

    /// Events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// One-line summary for the window title
    pub fn status(&self) -> String {
        match self.rounds.phase() {
            RoundPhase::Intro => "Catch Aleksa - walk to the start and press Space".to_string(),
            RoundPhase::Active(round) | RoundPhase::Complete(round) => format!(
                "Catch Aleksa - Round {}/{} - Packages {}/{} - Lives {}",
                round,
                self.rounds.max_round(),
                self.rounds.found_this_round(),
                self.rounds.packages_needed(),
                self.rounds.lives()
            ),
            RoundPhase::GameOver => "Catch Aleksa - Game over".to_string(),
            RoundPhase::Victory => "Catch Aleksa - All packages recovered".to_string(),
        }
    }

    fn begin_round(&mut self, round: u32) {
        self.obstacles.clear(&mut self.scene);
        self.fence.clear(&mut self.scene);

        self.rounds.begin_round(round);
        let start = round_start_point(&self.config);
        self.avatar.move_to(&mut self.scene, start);

        self.hud.show(
            &mut self.scene,
            &self.images,
            self.config.screen_size(),
            self.rounds.round(),
            self.rounds.found_total(),
            self.rounds.lives(),
        );
        self.fence.spawn_row(&mut self.scene, &self.images);

        let quota = self.config.good_quota(self.rounds.round());
        self.obstacles.spawn_round(
            &mut self.scene,
            &self.images,
            quota,
            &mut self.rng,
            &mut self.rounds,
        );

        self.events.push(GameEvent::RoundStarted(self.rounds.round()));
    }

    fn apply_hit(&mut self, kind: ObstacleKind) {
        let outcome = match kind {
            ObstacleKind::Good => self.rounds.register_good_hit(),
            ObstacleKind::Bad => self.rounds.register_bad_hit(),
        };

        match outcome {
            HitOutcome::PackageFound { total, quota_met } => {
                self.hud.set_packages(&mut self.scene, total);
                self.events.push(GameEvent::PackagesFound(total));
                if quota_met {
                    self.events.push(GameEvent::QuotaMet(self.rounds.round()));
                }
            }
            HitOutcome::LifeLost { lives } => {
                self.hud.set_lives(&mut self.scene, &self.images, lives);
                self.events.push(GameEvent::LivesChanged(lives));
            }
            HitOutcome::GameOver => {
                self.events.push(GameEvent::LivesChanged(self.rounds.lives()));
                self.enter_game_over();
            }
            HitOutcome::Ignored => {}
        }
    }

    fn apply_cheat(&mut self) {
        if self.rounds.phase().is_finished() {
            return;
        }
        let lives = self.config.cheat.lives;
        info!("Cheat phrase entered, lives set to {}", lives);
        self.rounds.set_lives(lives);
        self.hud.set_lives(&mut self.scene, &self.images, lives);
        self.events.push(GameEvent::LivesChanged(lives));
    }

    /// Tear down the playfield and show `lines` in the middle of the screen
    fn end_game(&mut self, lines: &[&str]) {
        self.obstacles.clear(&mut self.scene);
        self.fence.clear(&mut self.scene);
        self.hud.remove_progress(&mut self.scene);
        self.hud
            .set_lives(&mut self.scene, &self.images, self.rounds.lives());

        let screen = self.config.screen_size();
        self.dialogue.present(
            &mut self.scene,
            lines.iter().copied(),
            Vec2::new(screen.x / 4.0, screen.y / 2.0),
        );
    }

    fn enter_game_over(&mut self) {
        self.end_game(dialogue::GAME_OVER);
        self.events.push(GameEvent::GameOver);
    }

    fn enter_victory(&mut self) {
        self.end_game(dialogue::VICTORY);
        self.events.push(GameEvent::Victory);
    }

    #[cfg(test)]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    #[cfg(test)]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn phase(&self) -> RoundPhase {
        self.rounds.phase()
    }

    #[cfg(test)]
    pub fn rounds(&self) -> &RoundManager {
        &self.rounds
    }

    #[cfg(test)]
    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    #[cfg(test)]
    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    #[cfg(test)]
    pub fn fence(&self) -> &FenceBand {
        &self.fence
    }

    #[cfg(test)]
    pub fn dialogue(&self) -> &DialogueSequencer {
        &self.dialogue
    }

    #[cfg(test)]
    pub fn hud(&self) -> &Hud {
        &self.hud
    }
}

/// Where the avatar stands when a round begins
fn round_start_point(config: &GameConfig) -> Vec2 {
    let screen = config.screen_size();
    Vec2::new(screen.x / 4.0, screen.y / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::{SceneGraph, UiElement};
    use approx::assert_relative_eq;

    const TICK: f32 = 1.0 / 60.0;

    fn session() -> GameSession<SceneGraph> {
        GameSession::with_rng(
            SceneGraph::new(),
            GameConfig::default(),
            Images::placeholder(),
            StdRng::seed_from_u64(2024),
        )
        .unwrap()
    }

    /// Walk into the start zone and press Space
    fn started() -> GameSession<SceneGraph> {
        let mut game = session();
        game.avatar.move_to(&mut game.scene, Vec2::new(1650.0, 475.0));
        game.key_down(Key::Action(Action::Start));
        assert_eq!(game.phase(), RoundPhase::Active(1));
        game.drain_events();
        game
    }

    fn collect_packages(game: &mut GameSession<SceneGraph>, count: u32) {
        for _ in 0..count {
            game.apply_hit(ObstacleKind::Good);
        }
    }

    fn type_letters(game: &mut GameSession<SceneGraph>, letters: &str) {
        for letter in letters.chars() {
            game.key_up(Key::Letter(letter));
        }
    }

    fn ui_count(game: &GameSession<SceneGraph>, element: UiElement) -> usize {
        game.scene().count(SpriteKind::Ui(element))
    }

    #[test]
    fn test_new_session_shows_intro() {
        let game = session();
        assert_eq!(game.phase(), RoundPhase::Intro);
        assert_eq!(game.scene().count(SpriteKind::Background), 1);
        assert_eq!(game.scene().count(SpriteKind::Avatar), 1);
        assert_eq!(game.dialogue().lines(), dialogue::INTRO);
        assert_eq!(game.dialogue().position(), INTRO_POSITION);
        assert_eq!(
            game.scene().texture(game.background),
            Some(game.images.texture(ImageKey::StartScreen))
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.rounds.good_quotas.clear();
        let result = GameSession::new(SceneGraph::new(), config, Images::placeholder());
        assert!(matches!(result, Err(GameError::InvalidRoundConfig(_))));
    }

    #[test]
    fn test_start_outside_zone_is_ignored() {
        let mut game = session();
        game.key_down(Key::Action(Action::Start));
        assert_eq!(game.phase(), RoundPhase::Intro);
        assert!(game.obstacles().is_empty());
        assert!(game.dialogue().is_visible());
    }

    #[test]
    fn test_start_game_sets_up_round_one() {
        let mut game = session();
        game.avatar.move_to(&mut game.scene, Vec2::new(1650.0, 475.0));
        assert!(game.start_game());

        assert_eq!(game.phase(), RoundPhase::Active(1));
        assert_eq!(game.obstacles().live_count(), 42);
        assert_eq!(game.scene().count(SpriteKind::Fence), 16);
        assert_eq!(game.rounds().packages_needed(), 7);
        assert_eq!(game.dialogue().lines(), dialogue::TUTORIAL);
        assert_eq!(
            game.scene().texture(game.background),
            Some(game.images.texture(ImageKey::GameBackground))
        );
        for element in [
            UiElement::StageInfo,
            UiElement::PackageCounter,
            UiElement::NextButton,
            UiElement::Hearts,
        ] {
            assert_eq!(ui_count(&game, element), 1);
        }

        let center = game.avatar().bounds(game.scene()).unwrap().center();
        assert_relative_eq!(center.x, 480.0);
        assert_relative_eq!(center.y, 540.0);
        assert_eq!(game.drain_events(), vec![GameEvent::RoundStarted(1)]);

        // Space does nothing once playing
        assert!(!game.start_game());
    }

    #[test]
    fn test_advance_refused_below_quota() {
        let mut game = started();
        collect_packages(&mut game, 6);
        game.drain_events();
        let fences_before = game.fence().segments().to_vec();

        let outcome = game.request_next_round();

        assert_eq!(outcome, Advance::NotReady { found: 6, needed: 7 });
        assert_eq!(game.rounds().round(), 1);
        assert_eq!(game.obstacles().live_count(), 42);
        assert_eq!(game.fence().segments(), fences_before.as_slice());
        assert_eq!(game.dialogue().lines(), dialogue::NOT_READY);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::NotReady { found: 6, needed: 7 }]
        );
    }

    #[test]
    fn test_quota_met_then_next_round() {
        let mut game = started();
        collect_packages(&mut game, 7);
        assert_eq!(game.phase(), RoundPhase::Complete(1));

        let events = game.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::QuotaMet(1)));
        assert!(events.contains(&GameEvent::PackagesFound(7)));

        game.key_down(Key::Action(Action::Next));
        assert_eq!(game.phase(), RoundPhase::Active(2));
        assert_eq!(game.rounds().packages_needed(), 5);
        assert_eq!(game.rounds().found_this_round(), 0);
        assert_eq!(game.rounds().found_total(), 7);
        assert_eq!(game.obstacles().live_count(), 42);
        assert_eq!(game.scene().count(SpriteKind::Fence), 16);
        assert_eq!(ui_count(&game, UiElement::StageInfo), 1);
        assert!(!game.dialogue().is_visible());
    }

    #[test]
    fn test_final_round_leads_to_victory() {
        let mut game = started();
        for quota in [7, 5, 3] {
            collect_packages(&mut game, quota);
            game.request_next_round();
        }

        assert_eq!(game.phase(), RoundPhase::Victory);
        assert!(game.drain_events().contains(&GameEvent::Victory));
        assert!(game.obstacles().is_empty());
        assert_eq!(game.scene().count(SpriteKind::Fence), 0);
        assert_eq!(game.dialogue().lines(), dialogue::VICTORY);
    }

    #[test]
    fn test_lives_exhaustion_ends_game() {
        let mut game = started();
        for expected in [2, 1, 0] {
            game.apply_hit(ObstacleKind::Bad);
            assert_eq!(game.rounds().lives(), expected);
        }
        assert_eq!(game.phase(), RoundPhase::Active(1));

        game.apply_hit(ObstacleKind::Bad);

        assert_eq!(game.rounds().lives(), -1);
        assert_eq!(game.phase(), RoundPhase::GameOver);
        assert_eq!(game.scene().count_where(|kind| kind.is_obstacle()), 0);
        assert_eq!(game.scene().count(SpriteKind::Fence), 0);
        assert_eq!(ui_count(&game, UiElement::StageInfo), 0);
        assert_eq!(ui_count(&game, UiElement::PackageCounter), 0);
        assert_eq!(ui_count(&game, UiElement::NextButton), 0);
        assert_eq!(ui_count(&game, UiElement::Hearts), 1);
        assert_eq!(game.dialogue().lines(), dialogue::GAME_OVER);
        assert_eq!(game.dialogue().position(), Vec2::new(480.0, 540.0));
        assert_eq!(game.drain_events().last(), Some(&GameEvent::GameOver));

        // Nothing moves or collides after the game is over
        game.tick(TICK);
        assert_eq!(game.rounds().lives(), -1);
    }

    #[test]
    fn test_collision_through_tick() {
        let mut game = started();
        game.obstacles.clear(&mut game.scene);
        let avatar = game.avatar().bounds(game.scene()).unwrap();
        game.obstacles.insert(
            &mut game.scene,
            &game.images,
            ObstacleKind::Bad,
            3,
            avatar.min + Vec2::new(2.0, 0.0),
        );

        game.tick(TICK);

        assert_eq!(game.rounds().lives(), 2);
        assert!(game.obstacles().is_empty());
        assert_eq!(game.drain_events(), vec![GameEvent::LivesChanged(2)]);
        let hearts = game.scene().ids_of(SpriteKind::Ui(UiElement::Hearts))[0];
        assert_eq!(
            game.scene().texture(hearts),
            Some(game.images.texture(ImageKey::Hearts(2)))
        );
    }

    #[test]
    fn test_tick_scrolls_fence_and_obstacles() {
        let mut game = started();
        let fence = game.fence().segments()[1];
        let before = game.scene().bounds(fence).unwrap().min.x;

        game.tick(TICK);

        let after = game.scene().bounds(fence).unwrap().min.x;
        assert_relative_eq!(before - after, 2.0);
    }

    #[test]
    fn test_found_never_exceeds_needed_while_sweeping() {
        let mut game = started();
        let mut max_found = 0;
        let mut heading = Action::MoveUp;
        game.key_down(Key::Action(heading));

        for tick in 1..=20_000 {
            if tick % 500 == 0 {
                game.key_up(Key::Action(heading));
                heading = if heading == Action::MoveUp {
                    Action::MoveDown
                } else {
                    Action::MoveUp
                };
                game.key_down(Key::Action(heading));
            }
            if game.rounds.lives() <= 2 {
                type_letters(&mut game, "HESOYAM");
            }

            game.tick(TICK);

            let found = game.rounds.found_this_round();
            assert!(
                found <= game.rounds.packages_needed(),
                "tick {}: {} found, {} needed",
                tick,
                found,
                game.rounds.packages_needed()
            );
            max_found = max_found.max(found);
        }

        assert!(max_found > 0);
        assert!(game.rounds.phase().is_playing());
    }

    #[test]
    fn test_intro_tick_has_no_playfield() {
        let mut game = session();
        game.tick(TICK);
        assert!(game.obstacles().is_empty());
        assert!(game.fence().is_empty());
    }

    #[test]
    fn test_held_key_moves_avatar() {
        let mut game = session();
        let before = game.avatar().bounds(game.scene()).unwrap().center();

        game.key_down(Key::Action(Action::MoveRight));
        game.tick(TICK);
        game.tick(TICK);
        let after = game.avatar().bounds(game.scene()).unwrap().center();
        assert_relative_eq!(after.x - before.x, 4.0);
        assert_eq!(game.avatar().facing(), Direction::East);

        game.key_up(Key::Action(Action::MoveRight));
        game.tick(TICK);
        let stopped = game.avatar().bounds(game.scene()).unwrap().center();
        assert_relative_eq!(stopped.x, after.x);
    }

    #[test]
    fn test_cheat_phrase_restores_lives() {
        let mut game = started();
        game.apply_hit(ObstacleKind::Bad);
        game.drain_events();

        type_letters(&mut game, "HESOYAM");

        assert_eq!(game.rounds().lives(), 4);
        assert!(game.cheat.is_empty());
        assert_eq!(game.drain_events(), vec![GameEvent::LivesChanged(4)]);
    }

    #[test]
    fn test_cheat_interrupted() {
        let mut game = started();
        type_letters(&mut game, "HEX");
        assert!(game.cheat.is_empty());
        assert_eq!(game.rounds().lives(), 3);

        type_letters(&mut game, "HES");
        game.key_up(Key::Other);
        assert!(game.cheat.is_empty());
    }

    #[test]
    fn test_movement_keys_do_not_reset_cheat() {
        let mut game = started();
        type_letters(&mut game, "HES");
        game.key_up(Key::Action(Action::MoveLeft));
        type_letters(&mut game, "OYAM");
        assert_eq!(game.rounds().lives(), 4);
    }

    #[test]
    fn test_escape_closes() {
        let mut game = session();
        game.handle_input(InputEvent::Released(Key::Action(Action::Quit)));
        assert!(!game.dialogue().is_visible());
        assert_eq!(game.drain_events(), vec![GameEvent::Close]);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_idle_then_key_press() {
        let mut game = session();
        for _ in 0..601 {
            game.tick(TICK);
        }
        assert!(game.avatar().is_on_phone());

        game.handle_input(InputEvent::Pressed(Key::Other));
        assert!(!game.avatar().is_on_phone());
    }

    #[test]
    fn test_status_line() {
        let mut game = started();
        collect_packages(&mut game, 2);
        assert_eq!(
            game.status(),
            "Catch Aleksa - Round 1/3 - Packages 2/7 - Lives 3"
        );
    }
}
