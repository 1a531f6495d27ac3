use serde::{Deserialize, Serialize};

use crate::carving::TileCode;
use crate::room::{Direction, RoomId};

/// Position component - world coordinates of the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_tuple(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Size component - extent in world units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Draw order; higher is drawn on top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

/// Labels used to query placed objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Structure,
    Room,
    /// Walkable floor tile
    Slab,
    /// Anything that stops movement
    Brick,
    /// Exit tile that seals when its room locks
    Trap,
    Player,
    Enemy,
    Skeleton,
}

/// Tag set component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(pub Vec<Tag>);

impl Tags {
    pub fn has(&self, tag: Tag) -> bool {
        self.0.contains(&tag)
    }

    pub fn add(&mut self, tag: Tag) {
        if !self.has(tag) {
            self.0.push(tag);
        }
    }

    pub fn remove(&mut self, tag: Tag) {
        self.0.retain(|t| *t != tag);
    }
}

/// Marker: other objects cannot move onto this one's cell
#[derive(Debug, Clone, Copy)]
pub struct BlocksMovement;

/// Player marker component
#[derive(Debug, Clone, Copy, Default)]
pub struct Player {
    /// Sprite faces left after moving left, right after moving right
    pub facing_left: bool,
}

/// A step an enemy has committed to but not yet taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStep {
    pub direction: Direction,
    pub target: (i32, i32),
    pub ticks_left: u32,
}

/// Chase AI - step toward the nearest player after a fixed delay
#[derive(Debug, Clone, Copy)]
pub struct ChaseAI {
    pub movement_delay_ticks: u32,
    pub pending: Option<PendingStep>,
    pub facing_left: bool,
}

impl ChaseAI {
    pub fn new(movement_delay_ticks: u32) -> Self {
        Self {
            movement_delay_ticks,
            pending: None,
            facing_left: false,
        }
    }
}

/// Links a structure object to its room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureOf(pub RoomId);

/// Links a tile object to the room it was carved from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileOf {
    pub room: RoomId,
    pub code: TileCode,
}
