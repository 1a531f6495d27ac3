//! Generation advancement, carving and event processing.

use hecs::Entity;
use rand::Rng;

use crate::carving::carve_all;
use crate::components::StructureOf;
use crate::config::GameConfig;
use crate::constants::SKELETON_START_CELL;
use crate::dungeon::{Dungeon, GenerationTick};
use crate::errors::CarveError;
use crate::events::{EventQueue, GameEvent};
use crate::placement::StepOutcome;
use crate::room::RoomId;
use crate::scene::{Scene, TileMap, TileTemplates};
use crate::spawning;

use super::GameState;

/// Run one generation tick: grow by at most one room, or carve once growth is over.
///
/// A carving failure resets the whole state; the caller sees the tick that
/// triggered it.
pub fn advance_generation(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> GenerationTick {
    puffin::profile_function!();

    let tick = state.dungeon.tick(&config.generator, config.grid_size, rng);
    match tick {
        GenerationTick::Grew(StepOutcome::Committed(id)) => {
            if let Some(room) = state.dungeon.room(id) {
                state.scene.instantiate(spawning::structure(id, &room.rect));
                if let (Some(parent), Some(exit)) = (room.parent, room.exits.first()) {
                    events.push(GameEvent::RoomCommitted {
                        room: id,
                        parent,
                        direction: exit.side.opposite(),
                    });
                }
            }
        }
        GenerationTick::Grew(StepOutcome::Rejected { parent, direction }) => {
            events.push(GameEvent::CandidateRejected { parent, direction });
        }
        GenerationTick::Grew(StepOutcome::Exhausted { .. }) | GenerationTick::Idle => {}
        GenerationTick::ReadyToCarve | GenerationTick::Stalled => {
            if tick == GenerationTick::Stalled {
                events.push(GameEvent::GenerationStalled {
                    rooms: state.dungeon.len(),
                    target: state.dungeon.target(),
                });
            }
            match carve_and_materialize(&mut state.scene, &state.dungeon, config.grid_size) {
                Ok(rooms) => {
                    state.dungeon.finish();
                    spawn_root_skeleton(state, config);
                    events.push(GameEvent::GenerationComplete { rooms });
                }
                Err(err) => {
                    events.push(GameEvent::CarveFailed(err));
                    state.reset(config);
                    events.push(GameEvent::SceneReset);
                }
            }
        }
    }
    tick
}

/// Wake the first skeleton inside the root room. Small roots pull the cell
/// toward the corner; an occupied cell means no skeleton.
fn spawn_root_skeleton(state: &mut GameState, config: &GameConfig) -> Option<Entity> {
    let root = state.dungeon.root()?.rect;
    let grid = config.grid_size;
    let cell = SKELETON_START_CELL.min(config.generator.root_room_cells / 2 - 1).max(1);
    let (x, y) = (root.x + cell * grid, root.y + cell * grid);
    if state.scene.is_blocked(x, y, None) {
        log::debug!("root cell ({x}, {y}) is taken, no starting skeleton");
        return None;
    }
    log::debug!("starting skeleton at ({x}, {y})");
    Some(
        state
            .scene
            .instantiate(spawning::skeleton(x, y, grid, config.enemy.movement_delay_ticks)),
    )
}

/// Carve every room, then place the tiles. Nothing is placed unless every room carves.
pub fn carve_and_materialize(scene: &mut Scene, dungeon: &Dungeon, grid_size: i32) -> Result<usize, CarveError> {
    puffin::profile_function!();

    let grids = carve_all(dungeon, grid_size)?;
    let templates = TileTemplates::standard();
    for (id, grid) in &grids {
        let Some(room) = dungeon.room(*id) else {
            continue;
        };
        scene.instantiate_tile_map(&TileMap {
            x: room.rect.x,
            y: room.rect.y,
            size: grid_size,
            grid,
            templates: &templates,
            room: *id,
        });
    }
    Ok(grids.len())
}

/// Log every pending event and hand them back
pub fn process_events(events: &mut EventQueue) -> Vec<GameEvent> {
    let mut processed = Vec::new();
    for event in events.drain() {
        match &event {
            // Placement already logged these
            GameEvent::RoomCommitted { .. } | GameEvent::CandidateRejected { .. } => {}
            GameEvent::GenerationComplete { rooms } => {
                log::info!("dungeon complete with {rooms} rooms");
            }
            GameEvent::GenerationStalled { rooms, target } => {
                log::warn!("growth stalled at {rooms}/{target} rooms; carving what exists");
            }
            GameEvent::CarveFailed(err) => {
                log::warn!("carving failed, resetting scene: {err}");
            }
            GameEvent::SceneReset => log::info!("scene reset"),
            GameEvent::RoomClosed { room, .. } => log::debug!("room {room} closed"),
            GameEvent::PlayerMoved { to, .. } => log::trace!("player moved to {to:?}"),
            GameEvent::EnemyMoved { to, .. } => log::trace!("enemy moved to {to:?}"),
            GameEvent::Paused => log::info!("paused"),
            GameEvent::Resumed => log::info!("resumed"),
        }
        processed.push(event);
    }
    processed
}

/// Rooms that ended up with a structure object in the scene
pub fn structure_rooms(scene: &Scene) -> Vec<RoomId> {
    let mut rooms: Vec<RoomId> = scene
        .world()
        .query::<&StructureOf>()
        .iter()
        .map(|(_, s)| s.0)
        .collect();
    rooms.sort();
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carving::TileCode;
    use crate::components::{ChaseAI, Tag, TileOf};
    use crate::dungeon::GenerationPhase;
    use crate::geometry::Rect;
    use crate::rng::GameRng;
    use crate::room::{Direction, Exit, Room};

    fn small_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.generator.target_rooms = 4;
        config
    }

    #[test]
    fn test_generation_runs_to_completion() {
        let config = small_config();
        let mut state = GameState::new(&config);
        let mut rng = GameRng::new(5);
        let mut events = EventQueue::new();

        for _ in 0..10_000 {
            advance_generation(&mut state, &config, &mut rng, &mut events);
            if state.dungeon.is_complete() {
                break;
            }
        }
        assert!(state.dungeon.is_complete());
        assert_eq!(state.dungeon.len(), 4);
        assert_eq!(structure_rooms(&state.scene), vec![RoomId(0), RoomId(1), RoomId(2), RoomId(3)]);

        // One skeleton wakes in the root as soon as the tiles are placed
        let skeletons = state.scene.objects_with_tag(Tag::Skeleton);
        assert_eq!(skeletons.len(), 1);
        let root = state.dungeon.root().unwrap().rect;
        let cell = SKELETON_START_CELL * config.grid_size;
        assert_eq!(state.scene.position_of(skeletons[0]), Some((root.x + cell, root.y + cell)));
        assert!(state.scene.world().get::<&ChaseAI>(skeletons[0]).is_ok());

        let processed = process_events(&mut events);
        assert!(processed.contains(&GameEvent::GenerationComplete { rooms: 4 }));
        assert_eq!(
            processed
                .iter()
                .filter(|e| matches!(e, GameEvent::RoomCommitted { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_every_room_gets_tiles_with_matching_exits() {
        let config = small_config();
        let mut state = GameState::new(&config);
        let mut rng = GameRng::new(8);
        let mut events = EventQueue::new();
        while !state.dungeon.is_complete() {
            advance_generation(&mut state, &config, &mut rng, &mut events);
        }

        let exits_per_room = |room: RoomId| {
            state
                .scene
                .world()
                .query::<&TileOf>()
                .iter()
                .filter(|(_, t)| t.room == room && t.code == TileCode::Exit)
                .count()
        };
        for room in state.dungeon.rooms() {
            assert_eq!(exits_per_room(room.id), room.exits.len() * 2);
        }
        // Three parent/child links, two exits each side
        assert_eq!(state.scene.objects_with_tag(Tag::Trap).len(), 3 * 2 * 2);
    }

    #[test]
    fn test_carve_failure_resets_everything() {
        let config = small_config();
        let mut state = GameState::new(&config);
        let mut broken = Room::child(
            RoomId(1),
            Rect::new(15 * 32, 0, 10 * 32, 10 * 32),
            RoomId::ROOT,
            Direction::Right,
        );
        broken.exits.push(Exit { side: Direction::Left, offset: 9 });
        state.dungeon.insert(broken);
        let mut events = EventQueue::new();

        // Force the carving tick
        let mut rng = GameRng::new(0);
        let carve_config = GameConfig {
            generator: crate::config::GeneratorConfig {
                target_rooms: 2,
                ..config.generator.clone()
            },
            ..config.clone()
        };
        let tick = advance_generation(&mut state, &carve_config, &mut rng, &mut events);
        assert_eq!(tick, GenerationTick::ReadyToCarve);

        let processed = process_events(&mut events);
        assert!(matches!(processed[0], GameEvent::CarveFailed(_)));
        assert_eq!(processed[1], GameEvent::SceneReset);
        assert_eq!(state.dungeon.len(), 1);
        assert_eq!(state.dungeon.phase(), GenerationPhase::Growing);
        assert!(state.scene.objects_with_tag(Tag::Brick).is_empty());
        assert!(state.player_entity.is_some());
    }

    #[test]
    fn test_stall_carves_what_exists() {
        let mut config = GameConfig::default();
        config.generator.target_rooms = 30;
        config.generator.stall_budget = Some(5);
        config.generator.world_bounds = Some(Rect::new(0, 0, 15, 15));
        let mut state = GameState::new(&config);
        let mut rng = GameRng::new(3);
        let mut events = EventQueue::new();

        for _ in 0..100 {
            if advance_generation(&mut state, &config, &mut rng, &mut events) == GenerationTick::Stalled {
                break;
            }
        }
        assert!(state.dungeon.is_complete());
        assert_eq!(state.dungeon.len(), 1);
        // Wall ring plus the starting skeleton, which also blocks
        assert_eq!(state.scene.objects_with_tag(Tag::Brick).len(), 15 * 4 - 4 + 1);
        assert_eq!(state.scene.objects_with_tag(Tag::Skeleton).len(), 1);
    }
}
