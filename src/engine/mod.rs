//! Game engine - owns all game state and provides a clean API to the application shell.
//!
//! The engine handles:
//! - Game state (scene, dungeon)
//! - Input processing
//! - Simulation advancement
//! - Event processing
//!
//! The application shell (main.rs) only forwards keys, ticks the engine and
//! prints what it returns.

mod game_state;
mod simulation;

pub use game_state::GameState;
pub use simulation::*;

use crate::config::GameConfig;
use crate::dungeon::{Dungeon, GenerationTick};
use crate::errors::ConfigError;
use crate::events::{EventQueue, GameEvent};
use crate::input::{InputCommand, InputState, Key};
use crate::rng::GameRng;
use crate::scene::Scene;
use crate::systems::{self, MoveResult};

/// Result of a game tick
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// What generation did this tick; `None` once the dungeon is carved or while paused
    pub generation: Option<GenerationTick>,
    /// Events raised during the tick, already logged
    pub events: Vec<GameEvent>,
}

/// The game engine - owns all game state and simulation logic.
pub struct GameEngine {
    config: GameConfig,

    /// Source of every random decision in the run
    rng: GameRng,

    /// Core game state (scene, dungeon, player)
    pub state: GameState,

    /// Event queue for game events
    pub events: EventQueue,

    /// Input state tracking
    pub input: InputState,

    paused: bool,

    /// Ticks simulated so far, paused ticks excluded
    ticks: u64,
}

impl GameEngine {
    /// Validate the configuration and start a run. The seed comes from the
    /// config when set, from entropy otherwise.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        log::info!("starting run with seed {}", rng.seed());

        let state = GameState::new(&config);
        Ok(Self {
            config,
            rng,
            state,
            events: EventQueue::new(),
            input: InputState::new(),
            paused: false,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn scene(&self) -> &Scene {
        &self.state.scene
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.state.dungeon
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Handle a key press. Movement is ignored while paused.
    pub fn handle_key(&mut self, key: Key) -> Option<MoveResult> {
        match self.input.press(key)? {
            InputCommand::TogglePause => {
                self.paused = !self.paused;
                self.events.push(if self.paused { GameEvent::Paused } else { GameEvent::Resumed });
                None
            }
            InputCommand::Reset => {
                self.reset();
                None
            }
            InputCommand::Move(direction) => {
                if self.paused {
                    return None;
                }
                let player = self.state.player_entity?;
                Some(systems::player_move(
                    &mut self.state.scene,
                    player,
                    direction,
                    self.config.grid_size,
                    &mut self.events,
                ))
            }
        }
    }

    pub fn release_key(&mut self, key: Key) {
        self.input.release(key);
    }

    /// Start generation over. The RNG keeps going, so the next layout differs.
    pub fn reset(&mut self) {
        self.state.reset(&self.config);
        self.input.clear();
        self.events.push(GameEvent::SceneReset);
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> TickResult {
        puffin::profile_function!();

        if self.paused {
            return TickResult {
                generation: None,
                events: process_events(&mut self.events),
            };
        }
        self.ticks += 1;

        let generation = if self.state.dungeon.is_complete() {
            systems::update_chase_ai(&mut self.state.scene, self.config.grid_size, &mut self.events);
            systems::update_lockdown(
                &mut self.state.scene,
                &mut self.state.dungeon,
                self.config.grid_size,
                &self.config.enemy,
                &mut self.events,
            );
            None
        } else {
            Some(advance_generation(
                &mut self.state,
                &self.config,
                &mut self.rng,
                &mut self.events,
            ))
        };

        TickResult {
            generation,
            events: process_events(&mut self.events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Tag;
    use crate::geometry::Rect;

    fn engine(seed: u64, rooms: usize) -> GameEngine {
        let mut config = GameConfig::default();
        config.seed = Some(seed);
        config.generator.target_rooms = rooms;
        GameEngine::new(config).unwrap()
    }

    fn generate(e: &mut GameEngine, max_ticks: u64) {
        for _ in 0..max_ticks {
            if e.dungeon().is_complete() {
                break;
            }
            e.tick();
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.generator.target_rooms = 0;
        assert!(GameEngine::new(config).is_err());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let layout = |seed| {
            let mut e = engine(seed, 6);
            generate(&mut e, 20_000);
            e.dungeon().rooms().map(|r| r.rect).collect::<Vec<Rect>>()
        };
        assert_eq!(layout(42), layout(42));
    }

    #[test]
    fn test_generation_then_systems() {
        let mut e = engine(1, 3);
        generate(&mut e, 20_000);
        assert!(e.dungeon().is_complete());
        let result = e.tick();
        assert_eq!(result.generation, None);
    }

    #[test]
    fn test_pause_freezes_ticks_and_movement() {
        let mut e = engine(2, 3);
        e.handle_key(Key::P);
        assert!(e.is_paused());
        let before = e.dungeon().len();
        for _ in 0..50 {
            assert_eq!(e.tick().generation, None);
        }
        assert_eq!(e.ticks(), 0);
        assert_eq!(e.dungeon().len(), before);
        assert_eq!(e.handle_key(Key::D), None);

        e.handle_key(Key::P);
        assert!(!e.is_paused());
    }

    #[test]
    fn test_player_walks_inside_root() {
        let mut e = engine(3, 3);
        let start = e.state.player_position().unwrap();
        let grid = e.config().grid_size;

        assert_eq!(e.handle_key(Key::D), Some(MoveResult::Moved((start.0 + grid, start.1))));
        // Held key does nothing until released
        assert_eq!(e.handle_key(Key::D), None);
        e.release_key(Key::D);
        assert!(e.handle_key(Key::D).is_some());
    }

    #[test]
    fn test_walls_stop_the_player() {
        // A lone root room has no exits at all
        let mut e = engine(4, 1);
        generate(&mut e, 10);
        assert!(e.dungeon().is_complete());

        let mut last = None;
        for _ in 0..20 {
            last = e.handle_key(Key::W);
            e.release_key(Key::W);
        }
        assert_eq!(last, Some(MoveResult::Blocked));
        let (_, y) = e.state.player_position().unwrap();
        assert_eq!(y, e.config().grid_size);
    }

    #[test]
    fn test_reset_key_restarts_generation() {
        let mut e = engine(5, 3);
        generate(&mut e, 20_000);
        assert!(e.dungeon().is_complete());

        e.handle_key(Key::R);
        assert_eq!(e.dungeon().len(), 1);
        assert!(!e.dungeon().is_complete());
        assert!(e.scene().objects_with_tag(Tag::Brick).is_empty());
        assert_eq!(e.scene().objects_with_tag(Tag::Player).len(), 1);
    }
}
