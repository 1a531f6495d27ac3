//! Room/structure data: position, size, parent link, growth directions and exits.
//!
//! Rooms are passive. Geometry and validity checks belong to the placement
//! engine; this module only keeps the direction bookkeeping honest.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Sequential room identifier. The root room is always `RoomId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl RoomId {
    pub const ROOT: RoomId = RoomId(0);
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A side of a room, and the direction a child grows toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit step on the grid (y grows downward)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// True for left/right, whose shared edges run vertically
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// A 2-cell opening in a room's border.
///
/// `offset` is the first of the two cells, counted along the side from the
/// room's top (left/right sides) or left (up/down sides) corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    pub side: Direction,
    pub offset: i32,
}

/// One rectangular region of the dungeon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Position and size in world units
    pub rect: Rect,
    /// Room this one grew from; `None` only for the root
    pub parent: Option<RoomId>,
    /// Growth directions not yet consumed
    pub directions: Vec<Direction>,
    /// Set once the player has been locked in; never cleared within a run
    pub closed: bool,
    pub exits: Vec<Exit>,
}

impl Room {
    /// The root room: no parent, every direction available
    pub fn root(rect: Rect) -> Self {
        Self {
            id: RoomId::ROOT,
            rect,
            parent: None,
            directions: Direction::ALL.to_vec(),
            closed: false,
            exits: Vec::new(),
        }
    }

    /// A child room. It starts without the direction pointing back at its parent.
    pub fn child(id: RoomId, rect: Rect, parent: RoomId, grown_toward: Direction) -> Self {
        let back = grown_toward.opposite();
        Self {
            id,
            rect,
            parent: Some(parent),
            directions: Direction::ALL.into_iter().filter(|d| *d != back).collect(),
            closed: false,
            exits: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn has_direction(&self, direction: Direction) -> bool {
        self.directions.contains(&direction)
    }

    pub fn remaining_directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Remove a direction from the remaining set. Returns whether it was present.
    pub fn consume_direction(&mut self, direction: Direction) -> bool {
        let before = self.directions.len();
        self.directions.retain(|d| *d != direction);
        self.directions.len() != before
    }

    pub fn exit_on(&self, side: Direction) -> Option<&Exit> {
        self.exits.iter().find(|e| e.side == side)
    }

    /// Room size in whole cells as (columns, rows)
    pub fn cells(&self, cell_size: i32) -> (i32, i32) {
        (self.rect.width / cell_size, self.rect.height / cell_size)
    }
}
