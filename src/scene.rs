//! The scene: placed objects in an ECS world, built from declarative descriptors.
//!
//! Objects carry capabilities as components (`Player`, `ChaseAI`,
//! `BlocksMovement`, ...) and systems dispatch on those components instead of
//! probing objects for callbacks.

use std::collections::HashMap;

use hecs::{Entity, EntityBuilder, World};

use crate::carving::{TileCode, TileGrid};
use crate::components::{
    BlocksMovement, ChaseAI, Player, Position, Size, StructureOf, Tag, Tags, TileOf, ZIndex,
};
use crate::constants::{FLOOR_Z, WALL_Z};
use crate::geometry::positions_match;
use crate::room::RoomId;

/// Behaviour capability attached when an object is instantiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Player,
    Chase { movement_delay_ticks: u32 },
}

/// Everything needed to place one object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescriptor {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub width: i32,
    pub height: i32,
    pub tags: Vec<Tag>,
    pub blocks_movement: bool,
    pub behavior: Option<Behavior>,
    /// Room this object belongs to
    pub room: Option<RoomId>,
    /// Set for carved tiles; a structure object has `room` but no `tile`
    pub tile: Option<TileCode>,
}

impl ObjectDescriptor {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            z: 0,
            width,
            height,
            tags: Vec::new(),
            blocks_movement: false,
            behavior: None,
            room: None,
            tile: None,
        }
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_tags(mut self, tags: &[Tag]) -> Self {
        self.tags = tags.to_vec();
        self
    }

    pub fn blocking(mut self) -> Self {
        self.blocks_movement = true;
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn in_room(mut self, room: RoomId) -> Self {
        self.room = Some(room);
        self
    }
}

/// How a tile code is materialized
#[derive(Debug, Clone, PartialEq)]
pub struct TileTemplate {
    pub tags: Vec<Tag>,
    pub blocks_movement: bool,
    pub z: i32,
}

/// Per-code template table used by `instantiate_tile_map`
#[derive(Debug, Clone)]
pub struct TileTemplates(HashMap<TileCode, TileTemplate>);

impl TileTemplates {
    pub fn new(table: HashMap<TileCode, TileTemplate>) -> Self {
        Self(table)
    }

    /// Slab floors, brick walls, and open trap tiles at exits
    pub fn standard() -> Self {
        let mut table = HashMap::new();
        table.insert(
            TileCode::Floor,
            TileTemplate {
                tags: vec![Tag::Slab],
                blocks_movement: false,
                z: FLOOR_Z,
            },
        );
        table.insert(
            TileCode::Wall,
            TileTemplate {
                tags: vec![Tag::Brick],
                blocks_movement: true,
                z: WALL_Z,
            },
        );
        table.insert(
            TileCode::Exit,
            TileTemplate {
                tags: vec![Tag::Trap],
                blocks_movement: false,
                z: FLOOR_Z,
            },
        );
        Self(table)
    }

    pub fn get(&self, code: TileCode) -> Option<&TileTemplate> {
        self.0.get(&code)
    }
}

/// A grid of codes to place at an origin, one `size`-unit square per cell
pub struct TileMap<'a> {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub grid: &'a TileGrid,
    pub templates: &'a TileTemplates,
    pub room: RoomId,
}

/// Declarative initial contents, replayed on every reset
#[derive(Debug, Clone, Default)]
pub struct SceneDescription {
    pub objects: Vec<ObjectDescriptor>,
}

pub struct Scene {
    world: World,
    description: SceneDescription,
}

impl Scene {
    pub fn new(description: SceneDescription) -> Self {
        let mut scene = Self {
            world: World::new(),
            description,
        };
        scene.populate();
        scene
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Discard every object and rebuild from the description
    pub fn reset(&mut self) {
        self.world.clear();
        self.populate();
    }

    fn populate(&mut self) {
        let objects = self.description.objects.clone();
        for descriptor in objects {
            self.instantiate(descriptor);
        }
    }

    /// Place a new object and return its handle
    pub fn instantiate(&mut self, descriptor: ObjectDescriptor) -> Entity {
        let mut builder = EntityBuilder::new();
        builder
            .add(Position::new(descriptor.x, descriptor.y))
            .add(Size {
                width: descriptor.width,
                height: descriptor.height,
            })
            .add(ZIndex(descriptor.z))
            .add(Tags(descriptor.tags));

        if descriptor.blocks_movement {
            builder.add(BlocksMovement);
        }
        match descriptor.behavior {
            Some(Behavior::Player) => {
                builder.add(Player::default());
            }
            Some(Behavior::Chase { movement_delay_ticks }) => {
                builder.add(ChaseAI::new(movement_delay_ticks));
            }
            None => {}
        }
        match (descriptor.room, descriptor.tile) {
            (Some(room), Some(code)) => {
                builder.add(TileOf { room, code });
            }
            (Some(room), None) => {
                builder.add(StructureOf(room));
            }
            _ => {}
        }

        self.world.spawn(builder.build())
    }

    /// Place one tile object per grid cell. Codes without a template are skipped.
    pub fn instantiate_tile_map(&mut self, map: &TileMap) -> Vec<Entity> {
        puffin::profile_function!();

        let mut spawned = Vec::with_capacity(map.grid.rows() * map.grid.cols());
        for (row, col, code) in map.grid.iter() {
            let Some(template) = map.templates.get(code) else {
                continue;
            };
            let mut descriptor = ObjectDescriptor::new(
                map.x + col as i32 * map.size,
                map.y + row as i32 * map.size,
                map.size,
                map.size,
            )
            .with_z(template.z)
            .with_tags(&template.tags)
            .in_room(map.room);
            descriptor.blocks_movement = template.blocks_movement;
            descriptor.tile = Some(code);
            spawned.push(self.instantiate(descriptor));
        }
        spawned
    }

    /// All objects carrying `tag`, in no particular order
    pub fn objects_with_tag(&self, tag: Tag) -> Vec<Entity> {
        self.world
            .query::<&Tags>()
            .iter()
            .filter(|(_, tags)| tags.has(tag))
            .map(|(id, _)| id)
            .collect()
    }

    /// All objects whose position is exactly (x, y)
    pub fn objects_at(&self, x: i32, y: i32) -> Vec<Entity> {
        self.world
            .query::<&Position>()
            .iter()
            .filter(|(_, pos)| positions_match(pos.as_tuple(), (x, y)))
            .map(|(id, _)| id)
            .collect()
    }

    /// Check if anything blocking sits at (x, y), optionally ignoring one object
    pub fn is_blocked(&self, x: i32, y: i32, exclude: Option<Entity>) -> bool {
        self.objects_at(x, y).into_iter().any(|id| {
            exclude.map_or(true, |ex| id != ex) && self.world.get::<&BlocksMovement>(id).is_ok()
        })
    }

    pub fn position_of(&self, entity: Entity) -> Option<(i32, i32)> {
        self.world.get::<&Position>(entity).ok().map(|p| p.as_tuple())
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }
}
