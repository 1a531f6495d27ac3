//! Chase AI: enemies step greedily toward the nearest player.
//!
//! A step is chosen first and taken `movement_delay_ticks` later. Whether the
//! target cell is free is checked again at that point, so a step into a cell
//! that filled up in the meantime is dropped.

use hecs::Entity;

use crate::components::{ChaseAI, PendingStep, Player, Position};
use crate::events::{EventQueue, GameEvent};
use crate::geometry::distance;
use crate::room::Direction;
use crate::scene::Scene;

/// The closest player to `from`, with its distance
pub fn nearest_player(scene: &Scene, from: (i32, i32)) -> Option<((i32, i32), f32)> {
    scene
        .world()
        .query::<(&Position, &Player)>()
        .iter()
        .map(|(_, (pos, _))| {
            let at = pos.as_tuple();
            (at, distance(from, at))
        })
        .fold(None, |best: Option<((i32, i32), f32)>, candidate| match best {
            Some(b) if b.1 <= candidate.1 => Some(b),
            _ => Some(candidate),
        })
}

/// The free neighbouring cell that gets closest to `goal`, if any gets closer at all.
/// Ties go to the first direction in `Direction::ALL`.
pub fn best_step(
    scene: &Scene,
    entity: Entity,
    from: (i32, i32),
    goal: (i32, i32),
    grid_size: i32,
) -> Option<(Direction, (i32, i32))> {
    let mut best = None;
    let mut best_distance = distance(from, goal);

    for direction in Direction::ALL {
        let (dx, dy) = direction.delta();
        let cell = (from.0 + dx * grid_size, from.1 + dy * grid_size);
        if scene.is_blocked(cell.0, cell.1, Some(entity)) {
            continue;
        }
        let d = distance(cell, goal);
        if d < best_distance {
            best = Some((direction, cell));
            best_distance = d;
        }
    }
    best
}

/// Advance every chasing enemy by one tick.
pub fn update_chase_ai(scene: &mut Scene, grid_size: i32, events: &mut EventQueue) {
    puffin::profile_function!();

    let chasers: Vec<(Entity, (i32, i32), ChaseAI)> = scene
        .world()
        .query::<(&Position, &ChaseAI)>()
        .iter()
        .map(|(id, (pos, ai))| (id, pos.as_tuple(), *ai))
        .collect();

    for (entity, from, mut ai) in chasers {
        if ai.pending.is_none() {
            ai.pending = decide_step(scene, entity, from, &ai, grid_size);
        }

        if let Some(mut step) = ai.pending {
            if step.ticks_left == 0 {
                match step.direction {
                    Direction::Left => ai.facing_left = true,
                    Direction::Right => ai.facing_left = false,
                    Direction::Up | Direction::Down => {}
                }
                if !scene.is_blocked(step.target.0, step.target.1, Some(entity)) {
                    if let Ok(mut pos) = scene.world_mut().get::<&mut Position>(entity) {
                        pos.x = step.target.0;
                        pos.y = step.target.1;
                    }
                    events.push(GameEvent::EnemyMoved {
                        enemy: entity,
                        to: step.target,
                    });
                }
                ai.pending = None;
            } else {
                step.ticks_left -= 1;
                ai.pending = Some(step);
            }
        }

        if let Ok(mut stored) = scene.world_mut().get::<&mut ChaseAI>(entity) {
            *stored = ai;
        }
    }
}

fn decide_step(scene: &Scene, entity: Entity, from: (i32, i32), ai: &ChaseAI, grid_size: i32) -> Option<PendingStep> {
    let (goal, d) = nearest_player(scene, from)?;
    if d <= 0.0 {
        return None;
    }
    let (direction, target) = best_step(scene, entity, from, goal, grid_size)?;
    Some(PendingStep {
        direction,
        target,
        ticks_left: ai.movement_delay_ticks,
    })
}
