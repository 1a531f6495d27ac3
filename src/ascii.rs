//! Text dump of the scene, one character per grid cell.
//!
//! The topmost object in each cell wins. Structures are not drawn.

use std::collections::HashMap;

use crate::components::{ChaseAI, Player, Position, TileOf, ZIndex};
use crate::scene::Scene;

pub const PLAYER_GLYPH: char = '@';
pub const ENEMY_GLYPH: char = 's';
pub const EMPTY_GLYPH: char = ' ';

/// Render every drawable object, cropped to their bounding box
pub fn render(scene: &Scene, grid_size: i32) -> String {
    puffin::profile_function!();

    let mut cells: HashMap<(i32, i32), (i32, char)> = HashMap::new();
    let world = scene.world();
    for (_, (pos, z, tile, player, enemy)) in world
        .query::<(&Position, &ZIndex, Option<&TileOf>, Option<&Player>, Option<&ChaseAI>)>()
        .iter()
    {
        let glyph = if player.is_some() {
            PLAYER_GLYPH
        } else if enemy.is_some() {
            ENEMY_GLYPH
        } else if let Some(tile) = tile {
            tile.code.glyph()
        } else {
            continue;
        };

        let cell = (pos.x.div_euclid(grid_size), pos.y.div_euclid(grid_size));
        match cells.get(&cell) {
            Some((top, _)) if *top > z.0 => {}
            _ => {
                cells.insert(cell, (z.0, glyph));
            }
        }
    }

    if cells.is_empty() {
        return String::new();
    }
    let min_x = cells.keys().map(|c| c.0).min().unwrap_or(0);
    let max_x = cells.keys().map(|c| c.0).max().unwrap_or(0);
    let min_y = cells.keys().map(|c| c.1).min().unwrap_or(0);
    let max_y = cells.keys().map(|c| c.1).max().unwrap_or(0);

    let mut out = String::with_capacity(((max_x - min_x + 2) * (max_y - min_y + 1)) as usize);
    for y in min_y..=max_y {
        let row: String = (min_x..=max_x)
            .map(|x| cells.get(&(x, y)).map_or(EMPTY_GLYPH, |(_, g)| *g))
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carving::TileGrid;
    use crate::room::RoomId;
    use crate::scene::{SceneDescription, TileMap, TileTemplates};
    use crate::spawning;

    #[test]
    fn test_empty_scene_renders_nothing() {
        let scene = Scene::new(SceneDescription::default());
        assert_eq!(render(&scene, 10), "");
    }

    #[test]
    fn test_room_with_player() {
        let mut scene = Scene::new(SceneDescription::default());
        let grid = TileGrid::bordered(3, 4);
        scene.instantiate_tile_map(&TileMap {
            x: 0,
            y: 0,
            size: 10,
            grid: &grid,
            templates: &TileTemplates::standard(),
            room: RoomId::ROOT,
        });
        scene.instantiate(spawning::player(10, 10, 10));
        scene.instantiate(spawning::structure(RoomId::ROOT, &crate::geometry::Rect::new(0, 0, 40, 30)));

        assert_eq!(render(&scene, 10), "####\n#@.#\n####\n");
    }

    #[test]
    fn test_negative_coordinates_are_shifted() {
        let mut scene = Scene::new(SceneDescription::default());
        scene.instantiate(spawning::skeleton(-20, -10, 10, 1));
        scene.instantiate(spawning::player(0, -10, 10));
        assert_eq!(render(&scene, 10), "s @\n");
    }
}
