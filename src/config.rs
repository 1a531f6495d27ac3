//! Game and generator configuration.
//!
//! Every field has a documented default; a JSON file only needs to name the
//! fields it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::ConfigError;
use crate::geometry::Rect;

/// How the placement engine picks the growth direction for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionChoice {
    /// Draw from all four directions; a direction the parent no longer has wastes the step
    Any,
    /// Draw only from the parent's remaining directions
    Remaining,
}

/// What happens to the parent's direction when a candidate is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionPolicy {
    /// Keep the direction so a later step may retry it
    RetainDirection,
    /// Remove the direction whether or not the candidate was committed
    ConsumeDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Rooms to grow before carving. Default: 12
    pub target_rooms: usize,
    /// Smallest room edge in cells. Default: 10
    pub min_room_cells: i32,
    /// Largest room edge in cells. Default: 20
    pub max_room_cells: i32,
    /// Edge of the square root room in cells. Default: 15
    pub root_room_cells: i32,
    /// Default: `Any`
    pub direction_choice: DirectionChoice,
    /// Default: `RetainDirection`
    pub rejection_policy: RejectionPolicy,
    /// Consecutive non-committing steps after which growth ends early. Default: none
    pub stall_budget: Option<u32>,
    /// Area in cells that every room must stay within. Default: unbounded
    pub world_bounds: Option<Rect>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_rooms: DUNGEON_TARGET_ROOMS,
            min_room_cells: DUNGEON_MIN_ROOM_CELLS,
            max_room_cells: DUNGEON_MAX_ROOM_CELLS,
            root_room_cells: DUNGEON_ROOT_ROOM_CELLS,
            direction_choice: DirectionChoice::Any,
            rejection_policy: RejectionPolicy::RetainDirection,
            stall_budget: None,
            world_bounds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Ticks between a skeleton choosing a step and taking it. Default: 60
    pub movement_delay_ticks: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            movement_delay_ticks: SKELETON_MOVEMENT_DELAY_TICKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// World units per grid cell. Default: 32
    pub grid_size: i32,
    /// Nominal ticks per second, used to report elapsed time. Default: 60
    pub fps: u32,
    /// Seed for the run; drawn from entropy when absent. Default: none
    pub seed: Option<u64>,
    pub generator: GeneratorConfig,
    pub enemy: EnemyConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            fps: DEFAULT_FPS,
            seed: None,
            generator: GeneratorConfig::default(),
            enemy: EnemyConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&json_str).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".to_string()));
        }

        let gen = &self.generator;
        if gen.target_rooms == 0 {
            return Err(ConfigError::Invalid("target_rooms must be at least 1".to_string()));
        }
        if gen.min_room_cells < MIN_CARVABLE_CELLS {
            return Err(ConfigError::Invalid(format!(
                "min_room_cells must be at least {}, got {}",
                MIN_CARVABLE_CELLS, gen.min_room_cells
            )));
        }
        if gen.max_room_cells < gen.min_room_cells {
            return Err(ConfigError::Invalid(format!(
                "max_room_cells ({}) is below min_room_cells ({})",
                gen.max_room_cells, gen.min_room_cells
            )));
        }
        if gen.root_room_cells < MIN_CARVABLE_CELLS {
            return Err(ConfigError::Invalid(format!(
                "root_room_cells must be at least {}, got {}",
                MIN_CARVABLE_CELLS, gen.root_room_cells
            )));
        }
        if let Some(bounds) = gen.world_bounds {
            let root = Rect::new(0, 0, gen.root_room_cells, gen.root_room_cells);
            if !bounds.contains_rect(&root) {
                return Err(ConfigError::Invalid(
                    "world_bounds must contain the root room".to_string(),
                ));
            }
        }
        Ok(())
    }
}
