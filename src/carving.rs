//! Tile-map carving: turns committed rooms into wall/floor/exit grids.

use serde::{Deserialize, Serialize};

use crate::constants::EXIT_WIDTH;
use crate::dungeon::Dungeon;
use crate::errors::CarveError;
use crate::room::{Direction, Room, RoomId};

/// Cell code in a carved grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCode {
    Floor,
    Wall,
    /// Walkable opening toward a neighbour; becomes a wall when the room locks
    Exit,
}

impl TileCode {
    pub fn glyph(self) -> char {
        match self {
            TileCode::Floor => '.',
            TileCode::Wall => '#',
            TileCode::Exit => '+',
        }
    }
}

/// Row-major grid of tile codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cells: Vec<TileCode>,
}

impl TileGrid {
    /// Walls around the border, floor inside
    pub fn bordered(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let border = row == 0 || row + 1 == rows || col == 0 || col + 1 == cols;
                cells.push(if border { TileCode::Wall } else { TileCode::Floor });
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<TileCode> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    pub fn set(&mut self, row: usize, col: usize, code: TileCode) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[row * self.cols + col] = code;
        true
    }

    /// Iterate cells as (row, col, code)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileCode)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, code)| (i / self.cols, i % self.cols, *code))
    }

    pub fn count(&self, code: TileCode) -> usize {
        self.cells.iter().filter(|c| **c == code).count()
    }
}

/// Carve one room into a grid with its exits punched through the border.
pub fn carve_room(room: &Room, cell_size: i32) -> Result<TileGrid, CarveError> {
    if room.rect.width % cell_size != 0 || room.rect.height % cell_size != 0 {
        return Err(CarveError::MisalignedRoom {
            room: room.id,
            width: room.rect.width,
            height: room.rect.height,
            cell_size,
        });
    }
    let (cols, rows) = room.cells(cell_size);
    let mut grid = TileGrid::bordered(rows.max(0) as usize, cols.max(0) as usize);

    for exit in &room.exits {
        // Length of the side the exit runs along
        let len = if exit.side.is_horizontal() { rows } else { cols };
        if exit.offset < 0 || exit.offset + EXIT_WIDTH > len {
            return Err(CarveError::ExitOutOfBounds {
                room: room.id,
                side: exit.side,
                offset: exit.offset,
                len,
            });
        }

        for along in exit.offset..exit.offset + EXIT_WIDTH {
            let (row, col) = match exit.side {
                Direction::Up => (0, along),
                Direction::Down => (rows - 1, along),
                Direction::Left => (along, 0),
                Direction::Right => (along, cols - 1),
            };
            grid.set(row as usize, col as usize, TileCode::Exit);
        }
    }

    Ok(grid)
}

/// Carve every committed room. Fails as a whole if any room fails.
pub fn carve_all(dungeon: &Dungeon, cell_size: i32) -> Result<Vec<(RoomId, TileGrid)>, CarveError> {
    puffin::profile_function!();
    dungeon
        .rooms()
        .map(|room| carve_room(room, cell_size).map(|grid| (room.id, grid)))
        .collect()
}
