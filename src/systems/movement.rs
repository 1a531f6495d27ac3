//! Player movement system.

use hecs::Entity;

use crate::components::{Player, Position};
use crate::events::{EventQueue, GameEvent};
use crate::room::Direction;
use crate::scene::Scene;

/// Result of a player move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved((i32, i32)),
    Blocked,
    /// The entity has no position or is not a player
    Invalid,
}

/// Step the player one grid cell. Facing follows horizontal input even when
/// the step is blocked.
pub fn player_move(
    scene: &mut Scene,
    player: Entity,
    direction: Direction,
    grid_size: i32,
    events: &mut EventQueue,
) -> MoveResult {
    let Some((x, y)) = scene.position_of(player) else {
        return MoveResult::Invalid;
    };

    match scene.world_mut().get::<&mut Player>(player) {
        Ok(mut p) => match direction {
            Direction::Left => p.facing_left = true,
            Direction::Right => p.facing_left = false,
            Direction::Up | Direction::Down => {}
        },
        Err(_) => return MoveResult::Invalid,
    }

    let (dx, dy) = direction.delta();
    let target = (x + dx * grid_size, y + dy * grid_size);
    if scene.is_blocked(target.0, target.1, Some(player)) {
        return MoveResult::Blocked;
    }

    if let Ok(mut pos) = scene.world_mut().get::<&mut Position>(player) {
        pos.x = target.0;
        pos.y = target.1;
    }
    events.push(GameEvent::PlayerMoved { player, to: target });
    MoveResult::Moved(target)
}
