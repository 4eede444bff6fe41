//! Text map format.
//!
//! One line per board row, one character per column:
//!
//! | symbol        | cell                                 |
//! |---------------|--------------------------------------|
//! | space         | empty                                |
//! | `#`           | wall                                 |
//! | `E`           | snake head, no stored direction      |
//! | `W` `A` `S` `D` | snake body moving up/left/down/right |
//! | `K` `H` `J` `L` | snake tail moving up/left/down/right |
//!
//! Letters are case-insensitive. Rows shorter than the widest one are padded
//! with empty cells.

use crate::Coords;
use crate::board::{Cell, CellType, Direction::*, GameBoard};
use crate::error::MapError;

/// A fully parsed map, ready to replace the engine's state.
#[derive(Debug, Clone)]
pub struct ParsedMap {
    pub board: GameBoard,
    pub head: Coords,
    pub tail: Coords,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Marker {
    Head,
    Tail,
}

fn symbol_to_cell(symbol: char) -> Option<(Cell, Option<Marker>)> {
    let parsed = match symbol.to_ascii_uppercase() {
        ' ' => (Cell::new(CellType::Empty), None),
        '#' => (Cell::new(CellType::Wall), None),
        'E' => (Cell::new(CellType::SnakeBody), Some(Marker::Head)),
        'W' => (Cell::body(Up), None),
        'A' => (Cell::body(Left), None),
        'S' => (Cell::body(Down), None),
        'D' => (Cell::body(Right), None),
        'K' => (Cell::body(Up), Some(Marker::Tail)),
        'H' => (Cell::body(Left), Some(Marker::Tail)),
        'J' => (Cell::body(Down), Some(Marker::Tail)),
        'L' => (Cell::body(Right), Some(Marker::Tail)),
        _ => return None,
    };

    Some(parsed)
}

/// Checks that raw map bytes are text. The first byte that isn't valid UTF-8
/// is reported as an invalid symbol at its line and column.
pub fn decode_map(bytes: &[u8]) -> Result<&str, MapError> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = String::from_utf8_lossy(&bytes[..e.valid_up_to()]);
        let line = valid.matches('\n').count() + 1;
        let column = valid.rsplit('\n').next().map_or(0, |last| last.chars().count()) + 1;
        MapError::InvalidSymbol { symbol: char::REPLACEMENT_CHARACTER, line, column }
    })
}

/// Parses map text. Nothing is placed on the board besides what the text
/// describes; food placement is up to the caller.
pub fn parse_map(text: &str) -> Result<ParsedMap, MapError> {
    let mut rows = Vec::new();
    let mut head = None;
    let mut tail = None;

    for (row, line) in text.lines().enumerate() {
        let mut cells = Vec::with_capacity(line.len());

        for (col, symbol) in line.chars().enumerate() {
            let (cell, marker) = symbol_to_cell(symbol)
                .ok_or(MapError::InvalidSymbol { symbol, line: row + 1, column: col + 1 })?;

            match marker {
                Some(Marker::Head) => head = Some((row, col)),
                Some(Marker::Tail) => tail = Some((row, col)),
                None => {}
            }
            cells.push(cell);
        }

        rows.push(cells);
    }

    let head = head.ok_or(MapError::MissingHead)?;
    let tail = tail.ok_or(MapError::MissingTail)?;

    Ok(ParsedMap { board: GameBoard::from_rows(rows), head, tail })
}
