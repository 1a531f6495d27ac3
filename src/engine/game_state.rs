//! Core game state - owns the scene and the dungeon being generated.

use hecs::Entity;

use crate::components::Tag;
use crate::config::GameConfig;
use crate::constants::PLAYER_START_CELL;
use crate::dungeon::Dungeon;
use crate::room::RoomId;
use crate::scene::{Scene, SceneDescription};
use crate::spawning;

/// Core game state - owns all simulation data.
pub struct GameState {
    /// Placed objects
    pub scene: Scene,

    /// Rooms grown so far and the generation phase
    pub dungeon: Dungeon,

    /// Player entity handle, refreshed after every reset
    pub player_entity: Option<Entity>,
}

impl GameState {
    /// Fresh run: the root room's structure object and the player, nothing else.
    pub fn new(config: &GameConfig) -> Self {
        let dungeon = Dungeon::new(&config.generator, config.grid_size);
        let scene = Scene::new(initial_description(config, &dungeon));
        let player_entity = find_player(&scene);
        Self {
            scene,
            dungeon,
            player_entity,
        }
    }

    /// Throw away every placed object and room and start generating again
    pub fn reset(&mut self, config: &GameConfig) {
        self.dungeon = Dungeon::new(&config.generator, config.grid_size);
        self.scene.reset();
        self.player_entity = find_player(&self.scene);
    }

    pub fn player_position(&self) -> Option<(i32, i32)> {
        self.player_entity.and_then(|p| self.scene.position_of(p))
    }
}

fn initial_description(config: &GameConfig, dungeon: &Dungeon) -> SceneDescription {
    let mut objects = Vec::new();
    if let Some(root) = dungeon.root() {
        objects.push(spawning::structure(RoomId::ROOT, &root.rect));

        // Keep the player inside small roots
        let cell = PLAYER_START_CELL.min(config.generator.root_room_cells / 2);
        objects.push(spawning::player(
            root.rect.x + cell * config.grid_size,
            root.rect.y + cell * config.grid_size,
            config.grid_size,
        ));
    }
    SceneDescription { objects }
}

fn find_player(scene: &Scene) -> Option<Entity> {
    scene.objects_with_tag(Tag::Player).into_iter().next()
}
