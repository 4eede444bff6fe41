use crate::Coords;
use crate::config::{REWARD_DESSERT, REWARD_SNACK};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// (row, column) offset of one step in this direction
    pub fn delta(self) -> (isize, isize) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CellType {
    #[default]
    Empty,
    SnakeBody,
    Wall,
    Snack,
    Dessert,
}

impl CellType {
    /// Score granted for eating this cell, if it is food
    pub fn reward(self) -> Option<u32> {
        match self {
            CellType::Snack => Some(REWARD_SNACK),
            CellType::Dessert => Some(REWARD_DESSERT),
            _ => None,
        }
    }

    pub fn is_blocking(self) -> bool {
        matches!(self, CellType::Wall | CellType::SnakeBody)
    }
}

/// One board square. `related` is only meaningful on body cells: the
/// direction the snake left this cell in, which the tail follows later.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellType,
    pub related: Option<Direction>,
}

impl Cell {
    pub fn new(kind: CellType) -> Self {
        Cell { kind, related: None }
    }

    pub fn body(related: Direction) -> Self {
        Cell { kind: CellType::SnakeBody, related: Some(related) }
    }
}

/// Rectangular grid of cells. Coordinates wrap on both axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBoard {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl GameBoard {
    pub fn new(height: usize, width: usize) -> Self {
        GameBoard { rows: vec![vec![Cell::default(); width]; height], width }
    }

    /// Builds a board from rows of possibly different lengths. Short rows are
    /// padded with empty cells up to the widest one.
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize(width, Cell::default());
        }

        GameBoard { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, pos: Coords) -> &Cell {
        &self.rows[pos.0][pos.1]
    }

    pub fn cell_mut(&mut self, pos: Coords) -> &mut Cell {
        &mut self.rows[pos.0][pos.1]
    }

    /// Coordinate one step from `pos`. Leaving the board on one side re-enters
    /// it on the opposite side; walls are whatever the board holds, not the
    /// array bounds.
    pub fn next_coord(&self, pos: Coords, dir: Direction) -> Coords {
        let (dr, dc) = dir.delta();
        (wrap(pos.0, dr, self.height()), wrap(pos.1, dc, self.width()))
    }

    pub fn any_empty(&self) -> bool {
        self.rows.iter().flatten().any(|cell| cell.kind == CellType::Empty)
    }

    pub fn count(&self, kind: CellType) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.kind == kind).count()
    }

    /// Sets the outermost rows and columns to walls.
    pub fn fill_border(&mut self) {
        let (h, w) = (self.height(), self.width());
        if h == 0 || w == 0 {
            return;
        }

        for col in 0..w {
            self.rows[0][col] = Cell::new(CellType::Wall);
            self.rows[h - 1][col] = Cell::new(CellType::Wall);
        }
        for row in 0..h {
            self.rows[row][0] = Cell::new(CellType::Wall);
            self.rows[row][w - 1] = Cell::new(CellType::Wall);
        }
    }
}

fn wrap(index: usize, delta: isize, len: usize) -> usize {
    (index as isize + delta).rem_euclid(len as isize) as usize
}
