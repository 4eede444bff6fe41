//! Food placement

use rand::Rng;
use tracing::debug;

use crate::Coords;
use crate::board::{CellType, GameBoard};
use crate::config::DESSERT_INTERVAL;

/// Kind of item to place after `snack_counter` items have been eaten.
pub fn next_item(snack_counter: u32) -> CellType {
    if snack_counter > 0 && snack_counter % DESSERT_INTERVAL == 0 {
        CellType::Dessert
    } else {
        CellType::Snack
    }
}

/// Puts a snack (or dessert) on a uniformly random empty cell and returns
/// where. Returns `None` and leaves the board alone when it has no empty cell.
pub fn place_snack<R: Rng + ?Sized>(
    board: &mut GameBoard,
    snack_counter: u32,
    rng: &mut R,
) -> Option<Coords> {
    if !board.any_empty() {
        debug!("board is full, no snack placed");
        return None;
    }

    let item = next_item(snack_counter);

    // Terminates because at least one empty cell exists.
    loop {
        let pos = (rng.gen_range(0..board.height()), rng.gen_range(0..board.width()));
        let cell = board.cell_mut(pos);
        if cell.kind == CellType::Empty {
            cell.kind = item;
            debug!(?item, row = pos.0, col = pos.1, "placed food");
            return Some(pos);
        }
    }
}
