//! Incremental room placement by rejection sampling.
//!
//! Each step picks a committed room, proposes a child flush against one of
//! its sides and commits it only if it collides with no committed room other
//! than its parent. Touching counts as colliding (see `geometry::collides`),
//! so siblings never share an edge; parent and child always do, and the exit
//! pair recorded on commit is what connects them.

use rand::Rng;

use crate::config::{DirectionChoice, GeneratorConfig, RejectionPolicy};
use crate::constants::{EXIT_WIDTH, MIN_SHARED_SPAN};
use crate::dungeon::Dungeon;
use crate::geometry::{collides, random_int_in_range, random_item, Rect};
use crate::room::{Direction, Exit, Room, RoomId};

/// Result of one placement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new room was committed
    Committed(RoomId),
    /// A candidate was proposed and discarded
    Rejected { parent: RoomId, direction: Direction },
    /// The chosen parent could not grow in the chosen (or any) direction
    Exhausted {
        parent: RoomId,
        direction: Option<Direction>,
    },
}

impl StepOutcome {
    pub fn committed(&self) -> bool {
        matches!(self, StepOutcome::Committed(_))
    }
}

/// A proposed room that has not been validated yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub parent: RoomId,
    pub direction: Direction,
    pub rect: Rect,
    /// Lateral shift from the parent's top/left edge, in cells
    pub offset_cells: i32,
}

pub struct PlacementEngine<'a> {
    config: &'a GeneratorConfig,
    cell_size: i32,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(config: &'a GeneratorConfig, cell_size: i32) -> Self {
        Self { config, cell_size }
    }

    /// Run one randomized placement step: random parent, random direction, one candidate.
    pub fn step(&self, dungeon: &mut Dungeon, rng: &mut impl Rng) -> StepOutcome {
        puffin::profile_function!();

        let ids: Vec<RoomId> = dungeon.rooms().map(|r| r.id).collect();
        let Some(&parent_id) = random_item(rng, &ids) else {
            return StepOutcome::Exhausted {
                parent: RoomId::ROOT,
                direction: None,
            };
        };

        let direction = match self.config.direction_choice {
            DirectionChoice::Any => random_item(rng, &Direction::ALL).copied(),
            DirectionChoice::Remaining => dungeon
                .room(parent_id)
                .and_then(|parent| random_item(rng, parent.remaining_directions()).copied()),
        };

        match direction {
            Some(direction) => self.grow(dungeon, parent_id, direction, rng),
            None => StepOutcome::Exhausted {
                parent: parent_id,
                direction: None,
            },
        }
    }

    /// Try to grow one room off `parent_id` toward `direction`.
    pub fn grow(
        &self,
        dungeon: &mut Dungeon,
        parent_id: RoomId,
        direction: Direction,
        rng: &mut impl Rng,
    ) -> StepOutcome {
        let exhausted = StepOutcome::Exhausted {
            parent: parent_id,
            direction: Some(direction),
        };
        let Some(parent) = dungeon.room(parent_id) else {
            return exhausted;
        };
        if !parent.has_direction(direction) {
            return exhausted;
        }

        let candidate = self.propose(parent, direction, rng);

        if !self.is_valid(dungeon, &candidate) {
            log::trace!(
                "rejected candidate {:?} growing {:?} from room {}",
                candidate.rect,
                direction,
                parent_id
            );
            if self.config.rejection_policy == RejectionPolicy::ConsumeDirection {
                if let Some(parent) = dungeon.room_mut(parent_id) {
                    parent.consume_direction(direction);
                }
            }
            return StepOutcome::Rejected {
                parent: parent_id,
                direction,
            };
        }

        let id = self.commit(dungeon, candidate, rng);
        log::debug!("committed room {} growing {:?} from room {}", id, direction, parent_id);
        StepOutcome::Committed(id)
    }

    /// Sample a candidate's size and lateral offset and place it against `parent`.
    pub fn propose(&self, parent: &Room, direction: Direction, rng: &mut impl Rng) -> Candidate {
        let cell = self.cell_size;
        let width = cell * random_int_in_range(rng, self.config.min_room_cells, self.config.max_room_cells);
        let height = cell * random_int_in_range(rng, self.config.min_room_cells, self.config.max_room_cells);

        // Keep at least MIN_SHARED_SPAN cells of the shared edge in common
        let (parent_span, child_span) = if direction.is_horizontal() {
            (parent.rect.height / cell, height / cell)
        } else {
            (parent.rect.width / cell, width / cell)
        };
        let offset_cells = random_int_in_range(
            rng,
            -(child_span - MIN_SHARED_SPAN),
            parent_span - MIN_SHARED_SPAN,
        );

        Candidate {
            parent: parent.id,
            direction,
            rect: place_against(&parent.rect, direction, width, height, offset_cells * cell),
            offset_cells,
        }
    }

    /// A candidate is valid when it collides with no committed room except its parent
    /// and, if bounds are configured, lies within them.
    pub fn is_valid(&self, dungeon: &Dungeon, candidate: &Candidate) -> bool {
        if let Some(bounds) = self.config.world_bounds {
            let cell = self.cell_size;
            let bounds = Rect::new(bounds.x * cell, bounds.y * cell, bounds.width * cell, bounds.height * cell);
            if !bounds.contains_rect(&candidate.rect) {
                return false;
            }
        }

        dungeon
            .rooms()
            .filter(|room| room.id != candidate.parent)
            .all(|room| !collides(&candidate.rect, &room.rect))
    }

    fn commit(&self, dungeon: &mut Dungeon, candidate: Candidate, rng: &mut impl Rng) -> RoomId {
        let id = dungeon.allocate_id();
        let mut child = Room::child(id, candidate.rect, candidate.parent, candidate.direction);

        if let Some(parent) = dungeon.room_mut(candidate.parent) {
            let (parent_exit, child_exit) = self.exit_pair(parent, &candidate, rng);
            parent.consume_direction(candidate.direction);
            parent.exits.push(parent_exit);
            child.exits.push(child_exit);
        }

        dungeon.insert(child);
        id
    }

    /// Pick matching 2-cell exits on the shared edge, clear of both rooms' corners.
    fn exit_pair(&self, parent: &Room, candidate: &Candidate, rng: &mut impl Rng) -> (Exit, Exit) {
        let cell = self.cell_size;
        let (parent_span, child_span) = if candidate.direction.is_horizontal() {
            (parent.rect.height / cell, candidate.rect.height / cell)
        } else {
            (parent.rect.width / cell, candidate.rect.width / cell)
        };
        let offset = candidate.offset_cells;

        // Parent-relative cells strictly between the corners of both rooms
        let first = 1.max(offset + 1);
        let end = (parent_span - 1).min(offset + child_span - 1);
        let start = random_int_in_range(rng, first, end - EXIT_WIDTH);

        (
            Exit {
                side: candidate.direction,
                offset: start,
            },
            Exit {
                side: candidate.direction.opposite(),
                offset: start - offset,
            },
        )
    }
}

/// Position a `width`x`height` room flush against `direction`'s side of `parent`,
/// shifted by `lateral` world units along that side.
pub fn place_against(parent: &Rect, direction: Direction, width: i32, height: i32, lateral: i32) -> Rect {
    match direction {
        Direction::Left => Rect::new(parent.x - width, parent.y + lateral, width, height),
        Direction::Right => Rect::new(parent.right(), parent.y + lateral, width, height),
        Direction::Up => Rect::new(parent.x + lateral, parent.y - height, width, height),
        Direction::Down => Rect::new(parent.x + lateral, parent.bottom(), width, height),
    }
}
