//! Room lockdown: entering a room seals its exits and wakes a skeleton.
//!
//! Closing is one-way for a run. The root room never closes.

use hecs::Entity;

use crate::carving::TileCode;
use crate::components::{BlocksMovement, Player, Position, Tag, Tags, TileOf, ZIndex};
use crate::config::EnemyConfig;
use crate::constants::WALL_Z;
use crate::dungeon::Dungeon;
use crate::events::{EventQueue, GameEvent};
use crate::geometry::Rect;
use crate::room::RoomId;
use crate::scene::Scene;
use crate::spawning;

/// Close every open room a player stands on an interior cell of. Returns the rooms closed this tick.
pub fn update_lockdown(
    scene: &mut Scene,
    dungeon: &mut Dungeon,
    grid_size: i32,
    enemy: &EnemyConfig,
    events: &mut EventQueue,
) -> Vec<RoomId> {
    puffin::profile_function!();

    let players: Vec<(i32, i32)> = scene
        .world()
        .query::<(&Position, &Player)>()
        .iter()
        .map(|(_, (pos, _))| pos.as_tuple())
        .collect();

    let entered: Vec<(RoomId, Rect)> = dungeon
        .rooms()
        .filter(|room| !room.is_root() && !room.closed)
        .filter(|room| players.iter().any(|p| on_interior_cell(*p, &room.rect, grid_size)))
        .map(|room| (room.id, room.rect))
        .collect();

    for (id, rect) in &entered {
        if let Some(room) = dungeon.room_mut(*id) {
            room.closed = true;
        }
        let sealed = seal_traps(scene, *id);

        let (x, y) = spawn_cell(scene, rect, grid_size);
        let skeleton = scene.instantiate(spawning::skeleton(x, y, grid_size, enemy.movement_delay_ticks));
        log::info!("room {id} locked: {sealed} exit tiles sealed, skeleton at ({x}, {y})");
        events.push(GameEvent::RoomClosed { room: *id, enemy: skeleton });
    }

    entered.into_iter().map(|(id, _)| id).collect()
}

/// Whether a cell position lies inside the room's wall ring. Doorway tiles are border cells.
fn on_interior_cell(point: (i32, i32), rect: &Rect, grid_size: i32) -> bool {
    let (x, y) = point;
    x >= rect.x + grid_size
        && x <= rect.right() - 2 * grid_size
        && y >= rect.y + grid_size
        && y <= rect.bottom() - 2 * grid_size
}

/// Turn a room's trap tiles into walls. Returns how many were converted.
fn seal_traps(scene: &mut Scene, room: RoomId) -> usize {
    let traps: Vec<Entity> = scene
        .world()
        .query::<&TileOf>()
        .iter()
        .filter(|(_, tile)| tile.room == room && tile.code == TileCode::Exit)
        .map(|(id, _)| id)
        .collect();

    let world = scene.world_mut();
    for &trap in &traps {
        if let Ok(mut tile) = world.get::<&mut TileOf>(trap) {
            tile.code = TileCode::Wall;
        }
        if let Ok(mut tags) = world.get::<&mut Tags>(trap) {
            tags.remove(Tag::Trap);
            tags.add(Tag::Brick);
        }
        if let Ok(mut z) = world.get::<&mut ZIndex>(trap) {
            z.0 = WALL_Z;
        }
        if let Err(err) = world.insert_one(trap, BlocksMovement) {
            log::warn!("trap {trap:?} vanished before it could be sealed: {err}");
        }
    }
    traps.len()
}

/// The room's centre cell, or the first free interior cell if something blocks the centre
fn spawn_cell(scene: &Scene, rect: &Rect, grid_size: i32) -> (i32, i32) {
    let cols = rect.width / grid_size;
    let rows = rect.height / grid_size;
    let centre = (rect.x + (cols / 2) * grid_size, rect.y + (rows / 2) * grid_size);
    if !scene.is_blocked(centre.0, centre.1, None) {
        return centre;
    }

    (1..rows - 1)
        .flat_map(|row| (1..cols - 1).map(move |col| (rect.x + col * grid_size, rect.y + row * grid_size)))
        .find(|&(x, y)| !scene.is_blocked(x, y, None))
        .unwrap_or(centre)
}
