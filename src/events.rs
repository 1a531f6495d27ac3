//! Game event system for decoupled communication between systems.
//!
//! Generation and behaviour systems emit events; the engine drains them once
//! per tick and logs them.

use hecs::Entity;

use crate::errors::CarveError;
use crate::room::{Direction, RoomId};

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A candidate room passed validation and was committed
    RoomCommitted {
        room: RoomId,
        parent: RoomId,
        direction: Direction,
    },
    /// A candidate room collided or left the world bounds
    CandidateRejected {
        parent: RoomId,
        direction: Direction,
    },
    /// Every room was carved and materialized
    GenerationComplete {
        rooms: usize,
    },
    /// Growth gave up before reaching the target
    GenerationStalled {
        rooms: usize,
        target: usize,
    },
    /// Carving failed; the scene is about to be reset
    CarveFailed(CarveError),
    SceneReset,
    /// The player entered a room and it sealed shut
    RoomClosed {
        room: RoomId,
        enemy: Entity,
    },
    PlayerMoved {
        player: Entity,
        to: (i32, i32),
    },
    EnemyMoved {
        enemy: Entity,
        to: (i32, i32),
    },
    Paused,
    Resumed,
}

/// Simple event queue - events are pushed during a tick, processed at the end of it
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
