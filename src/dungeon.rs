//! Generation state for one run: the committed rooms and the growth phase.

use std::collections::BTreeMap;

use rand::Rng;

use crate::config::GeneratorConfig;
use crate::geometry::Rect;
use crate::placement::{PlacementEngine, StepOutcome};
use crate::room::{Room, RoomId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    /// One placement step per tick until the target is reached
    Growing,
    /// Growth is over; the rooms are waiting to be carved
    Carving,
    /// Rooms are carved and materialized
    Complete,
}

/// What one generation tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationTick {
    Grew(StepOutcome),
    /// The target was reached at the top of this tick
    ReadyToCarve,
    /// The stall budget ran out before the target was reached
    Stalled,
    Idle,
}

#[derive(Debug, Clone)]
pub struct Dungeon {
    target: usize,
    rooms: BTreeMap<RoomId, Room>,
    phase: GenerationPhase,
    next_id: u32,
    /// Consecutive placement steps that committed nothing
    failed_steps: u32,
}

impl Dungeon {
    /// Start a run with a square root room at the origin
    pub fn new(config: &GeneratorConfig, cell_size: i32) -> Self {
        let edge = config.root_room_cells * cell_size;
        let root = Room::root(Rect::new(0, 0, edge, edge));
        let mut rooms = BTreeMap::new();
        rooms.insert(root.id, root);

        Self {
            target: config.target_rooms,
            rooms,
            phase: GenerationPhase::Growing,
            next_id: 1,
            failed_steps: 0,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GenerationPhase::Complete
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Committed rooms in id order
    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.values()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    pub fn root(&self) -> Option<&Room> {
        self.rooms.get(&RoomId::ROOT)
    }

    pub fn failed_steps(&self) -> u32 {
        self.failed_steps
    }

    /// Reserve the next room id. Only called once a candidate is accepted.
    pub fn allocate_id(&mut self) -> RoomId {
        let id = RoomId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, room: Room) {
        self.next_id = self.next_id.max(room.id.0 + 1);
        self.rooms.insert(room.id, room);
    }

    /// Advance generation by one tick.
    ///
    /// The target is checked before stepping, so the tick that commits the
    /// last room does not also start carving.
    pub fn tick(&mut self, config: &GeneratorConfig, cell_size: i32, rng: &mut impl Rng) -> GenerationTick {
        match self.phase {
            GenerationPhase::Complete => GenerationTick::Idle,
            GenerationPhase::Carving => GenerationTick::ReadyToCarve,
            GenerationPhase::Growing => {
                if self.rooms.len() >= self.target {
                    self.phase = GenerationPhase::Carving;
                    return GenerationTick::ReadyToCarve;
                }

                let outcome = PlacementEngine::new(config, cell_size).step(self, rng);
                if outcome.committed() {
                    self.failed_steps = 0;
                } else {
                    self.failed_steps += 1;
                }

                if let Some(budget) = config.stall_budget {
                    if !outcome.committed() && self.failed_steps >= budget {
                        log::warn!(
                            "generation stalled at {}/{} rooms after {} fruitless steps",
                            self.rooms.len(),
                            self.target,
                            self.failed_steps
                        );
                        self.phase = GenerationPhase::Carving;
                        return GenerationTick::Stalled;
                    }
                }

                GenerationTick::Grew(outcome)
            }
        }
    }

    /// Mark the rooms as carved. Irreversible for this run.
    pub fn finish(&mut self) {
        self.phase = GenerationPhase::Complete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRID_SIZE;
    use crate::geometry::collides;
    use crate::rng::GameRng;

    fn run_until_carving(dungeon: &mut Dungeon, config: &GeneratorConfig, rng: &mut GameRng, max_ticks: usize) -> Option<usize> {
        for tick in 0..max_ticks {
            match dungeon.tick(config, GRID_SIZE, rng) {
                GenerationTick::ReadyToCarve | GenerationTick::Stalled => return Some(tick),
                _ => {}
            }
        }
        None
    }

    #[test]
    fn test_new_dungeon_has_only_root() {
        let dungeon = Dungeon::new(&GeneratorConfig::default(), GRID_SIZE);
        assert_eq!(dungeon.len(), 1);
        assert!(dungeon.root().unwrap().is_root());
        assert_eq!(dungeon.phase(), GenerationPhase::Growing);
    }

    #[test]
    fn test_converges_in_bounded_world() {
        let config = GeneratorConfig {
            target_rooms: 6,
            min_room_cells: 10,
            max_room_cells: 20,
            root_room_cells: 10,
            world_bounds: Some(Rect::new(-100, -100, 200, 200)),
            ..GeneratorConfig::default()
        };
        for seed in 0..10 {
            let mut dungeon = Dungeon::new(&config, GRID_SIZE);
            let mut rng = GameRng::new(seed);
            let ticks = run_until_carving(&mut dungeon, &config, &mut rng, 5_000);
            assert!(ticks.is_some(), "seed {seed} stalled with {} rooms", dungeon.len());
            assert_eq!(dungeon.len(), 6);
        }
    }

    #[test]
    fn test_one_room_per_tick_and_target_checked_first() {
        let config = GeneratorConfig {
            target_rooms: 2,
            ..GeneratorConfig::default()
        };
        let mut dungeon = Dungeon::new(&config, GRID_SIZE);
        let mut rng = GameRng::new(17);

        let mut committed_tick = None;
        for tick in 0..1_000 {
            let before = dungeon.len();
            let result = dungeon.tick(&config, GRID_SIZE, &mut rng);
            assert!(dungeon.len() <= before + 1);
            if matches!(result, GenerationTick::Grew(StepOutcome::Committed(_))) {
                committed_tick = Some(tick);
                break;
            }
        }
        assert!(committed_tick.is_some());
        assert_eq!(dungeon.phase(), GenerationPhase::Growing);
        assert_eq!(dungeon.tick(&config, GRID_SIZE, &mut rng), GenerationTick::ReadyToCarve);
        assert_eq!(dungeon.phase(), GenerationPhase::Carving);
        assert_eq!(dungeon.len(), 2);
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let config = GeneratorConfig::default();
        let build = |seed| {
            let mut dungeon = Dungeon::new(&config, GRID_SIZE);
            let mut rng = GameRng::new(seed);
            for _ in 0..300 {
                dungeon.tick(&config, GRID_SIZE, &mut rng);
            }
            dungeon.rooms().cloned().collect::<Vec<_>>()
        };
        assert_eq!(build(99), build(99));
    }

    #[test]
    fn test_no_foreign_collisions_after_full_run() {
        let config = GeneratorConfig::default();
        let mut dungeon = Dungeon::new(&config, GRID_SIZE);
        let mut rng = GameRng::new(2024);
        run_until_carving(&mut dungeon, &config, &mut rng, 20_000);

        let rooms: Vec<&Room> = dungeon.rooms().collect();
        for a in &rooms {
            for b in &rooms {
                let related = a.id == b.id || a.parent == Some(b.id) || b.parent == Some(a.id);
                assert!(related || !collides(&a.rect, &b.rect), "{} and {} collide", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_stall_budget_ends_growth_early() {
        let config = GeneratorConfig {
            target_rooms: 50,
            world_bounds: Some(Rect::new(0, 0, 15, 15)),
            stall_budget: Some(20),
            ..GeneratorConfig::default()
        };
        let mut dungeon = Dungeon::new(&config, GRID_SIZE);
        let mut rng = GameRng::new(1);

        let mut stalled = false;
        for _ in 0..100 {
            if dungeon.tick(&config, GRID_SIZE, &mut rng) == GenerationTick::Stalled {
                stalled = true;
                break;
            }
        }
        assert!(stalled);
        assert_eq!(dungeon.len(), 1);
        assert_eq!(dungeon.phase(), GenerationPhase::Carving);
    }

    #[test]
    fn test_without_budget_a_boxed_in_run_keeps_ticking() {
        let config = GeneratorConfig {
            target_rooms: 5,
            world_bounds: Some(Rect::new(0, 0, 15, 15)),
            ..GeneratorConfig::default()
        };
        let mut dungeon = Dungeon::new(&config, GRID_SIZE);
        let mut rng = GameRng::new(1);
        for _ in 0..500 {
            assert!(matches!(dungeon.tick(&config, GRID_SIZE, &mut rng), GenerationTick::Grew(_)));
        }
        assert_eq!(dungeon.phase(), GenerationPhase::Growing);
    }

    #[test]
    fn test_finish_is_terminal() {
        let config = GeneratorConfig::default();
        let mut dungeon = Dungeon::new(&config, GRID_SIZE);
        dungeon.finish();
        let mut rng = GameRng::new(0);
        assert_eq!(dungeon.tick(&config, GRID_SIZE, &mut rng), GenerationTick::Idle);
        assert_eq!(dungeon.len(), 1);
    }
}
