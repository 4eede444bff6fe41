use std::{fs, path::Path};

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace, warn};

use crate::Coords;
use crate::board::{Cell, CellType, Direction::{*, self}, GameBoard};
use crate::config::{DEFAULT_BOARD_SIZE, INITIAL_SNAKE_LENGTH, INITIAL_SNAKE_ROW, INITIAL_TAIL_COL};
use crate::error::MapError;
use crate::map::{decode_map, parse_map};
use crate::snack;

/// What a single tick did
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The heading is blocked; nothing changed
    Blocked,
    /// The snake slid forward one cell
    Moved,
    /// The snake ate the given item and grew by one cell
    Ate(CellType),
}

/// A single game: board, snake pointers, heading and score.
///
/// There is no game-over state. A tick whose move would collide leaves
/// everything as it was, and the snake idles until the player turns.
pub struct Engine {
    board: GameBoard,
    head: Coords,
    tail: Coords,
    direction: Direction,
    score: u32,
    snack_counter: u32,
    rng: StdRng,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Engine whose food placement is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut engine = Engine {
            board: GameBoard::new(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE),
            head: (0, 0),
            tail: (0, 0),
            direction: Right,
            score: 0,
            snack_counter: 0,
            rng,
        };
        engine.reset();
        engine
    }

    /// Back to the default walled board with a fresh snake and no score.
    pub fn reset(&mut self) {
        let mut board = GameBoard::new(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE);
        for col in 0..INITIAL_SNAKE_LENGTH {
            *board.cell_mut((INITIAL_SNAKE_ROW, col)) = Cell::body(Right);
        }
        // The border overwrites the first body cell, which is why the tail
        // starts one column in.
        board.fill_border();

        self.board = board;
        self.head = (INITIAL_SNAKE_ROW, INITIAL_SNAKE_LENGTH - 1);
        self.tail = (INITIAL_SNAKE_ROW, INITIAL_TAIL_COL);
        self.direction = Right;
        self.score = 0;
        self.snack_counter = 0;
        self.place_snack();

        info!("game reset");
    }

    /// Advances the game by one tick.
    pub fn step(&mut self) -> StepOutcome {
        if self.is_collision(self.direction) {
            trace!(direction = ?self.direction, "move blocked");
            return StepOutcome::Blocked;
        }

        let next = self.board.next_coord(self.head, self.direction);
        let item = self.board.cell(next).kind;

        let outcome = match item.reward() {
            Some(reward) => {
                self.score = self.score.saturating_add(reward);
                self.snack_counter = self.snack_counter.saturating_add(1);
                debug!(?item, score = self.score, eaten = self.snack_counter, "ate food");
                self.place_snack();
                StepOutcome::Ate(item)
            }
            None => {
                let trail = self.board.cell(self.tail).related.unwrap_or(self.direction);
                *self.board.cell_mut(self.tail) = Cell::default();
                self.tail = self.board.next_coord(self.tail, trail);
                StepOutcome::Moved
            }
        };

        self.board.cell_mut(self.head).related = Some(self.direction);
        self.head = next;
        *self.board.cell_mut(self.head) = Cell::new(CellType::SnakeBody);

        outcome
    }

    /// Changes the heading unless moving that way right now would collide.
    /// Returns whether the new heading was taken.
    pub fn set_direction(&mut self, dir: Direction) -> bool {
        if self.is_collision(dir) {
            trace!(direction = ?dir, "direction rejected");
            return false;
        }

        self.direction = dir;
        true
    }

    /// True if the cell next to the head in `dir` is a wall or body cell.
    /// The tail cell is exempt since it is vacated on the same tick.
    pub fn is_collision(&self, dir: Direction) -> bool {
        let next = self.board.next_coord(self.head, dir);
        next != self.tail && self.board.cell(next).kind.is_blocking()
    }

    /// Replaces the board with the map in `path`. A file that can't be read
    /// is skipped and the current game continues: `Ok(false)` in that case,
    /// `Ok(true)` when the map was loaded. Content that isn't valid UTF-8 is
    /// an invalid symbol like any other.
    pub fn load_map<P: AsRef<Path>>(&mut self, path: P) -> Result<bool, MapError> {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read map, keeping current board");
                return Ok(false);
            }
        };

        self.load_map_str(decode_map(&bytes)?)?;
        info!(path = %path.display(), "map loaded");
        Ok(true)
    }

    /// Replaces the board with the given map text. On error nothing changes.
    /// Score and eaten count carry over.
    pub fn load_map_str(&mut self, text: &str) -> Result<(), MapError> {
        let map = parse_map(text)?;

        self.board = map.board;
        self.head = map.head;
        self.tail = map.tail;
        self.direction = Right;
        self.place_snack();

        debug!(
            rows = self.board.height(),
            cols = self.board.width(),
            head = ?self.head,
            tail = ?self.tail,
            "board replaced"
        );
        Ok(())
    }

    pub fn place_snack(&mut self) -> Option<Coords> {
        snack::place_snack(&mut self.board, self.snack_counter, &mut self.rng)
    }

    pub fn get_board(&self) -> &GameBoard {
        &self.board
    }

    pub fn get_score(&self) -> u32 {
        self.score
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn get_head(&self) -> Coords {
        self.head
    }

    pub fn get_tail(&self) -> Coords {
        self.tail
    }

    pub fn get_snack_counter(&self) -> u32 {
        self.snack_counter
    }

    /// Number of cells from tail to head, following each cell's direction.
    pub fn snake_len(&self) -> usize {
        let limit = self.board.height() * self.board.width();
        let mut pos = self.tail;
        let mut len = 1;

        while pos != self.head && len < limit {
            match self.board.cell(pos).related {
                Some(dir) => pos = self.board.next_coord(pos, dir),
                None => break,
            }
            len += 1;
        }

        len
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::with_seed(42)
    }

    /// Removes all food so tests control what the snake runs into.
    fn clear_food(engine: &mut Engine) {
        for row in 0..engine.board.height() {
            for col in 0..engine.board.width() {
                if engine.board.cell((row, col)).kind.reward().is_some() {
                    *engine.board.cell_mut((row, col)) = Cell::default();
                }
            }
        }
    }

    fn food_count(engine: &Engine) -> usize {
        engine.board.count(CellType::Snack) + engine.board.count(CellType::Dessert)
    }

    #[test]
    fn test_reset_layout() {
        let engine = engine();
        let board = engine.get_board();

        assert_eq!(board.height(), 30);
        assert_eq!(board.width(), 30);
        for i in 0..30 {
            assert_eq!(board.cell((0, i)).kind, CellType::Wall);
            assert_eq!(board.cell((29, i)).kind, CellType::Wall);
            assert_eq!(board.cell((i, 0)).kind, CellType::Wall);
            assert_eq!(board.cell((i, 29)).kind, CellType::Wall);
        }
        for col in 1..5 {
            assert_eq!(board.cell((15, col)), &Cell::body(Right));
        }
        assert_eq!(engine.get_head(), (15, 4));
        assert_eq!(engine.get_tail(), (15, 1));
        assert_eq!(engine.get_score(), 0);
        assert_eq!(engine.get_snack_counter(), 0);
        assert_eq!(engine.get_direction(), Right);
        assert_eq!(engine.snake_len(), 4);
        assert_eq!(board.count(CellType::Snack), 1);
    }

    #[test]
    fn test_slide() {
        let mut engine = engine();
        clear_food(&mut engine);

        assert_eq!(engine.step(), StepOutcome::Moved);
        assert_eq!(engine.get_head(), (15, 5));
        assert_eq!(engine.get_tail(), (15, 2));
        assert_eq!(engine.board.cell((15, 1)).kind, CellType::Empty);
        assert_eq!(engine.board.cell((15, 4)).related, Some(Right));
        assert_eq!(engine.board.cell((15, 5)), &Cell::new(CellType::SnakeBody));
        assert_eq!(engine.snake_len(), 4);
    }

    #[test]
    fn test_turn_then_tail_follows() {
        let mut engine = engine();
        clear_food(&mut engine);

        assert!(engine.set_direction(Down));
        for _ in 0..4 {
            engine.step();
        }

        assert_eq!(engine.get_head(), (19, 4));
        assert_eq!(engine.get_tail(), (16, 4));
        assert_eq!(engine.snake_len(), 4);
        assert_eq!(engine.board.count(CellType::SnakeBody), 4);
    }

    #[test]
    fn test_eat_snack_grows() {
        let mut engine = engine();
        clear_food(&mut engine);
        engine.board.cell_mut((15, 5)).kind = CellType::Snack;

        assert_eq!(engine.step(), StepOutcome::Ate(CellType::Snack));
        assert_eq!(engine.get_score(), 10);
        assert_eq!(engine.get_snack_counter(), 1);
        assert_eq!(engine.get_tail(), (15, 1));
        assert_eq!(engine.board.cell((15, 1)).kind, CellType::SnakeBody);
        assert_eq!(engine.get_head(), (15, 5));
        assert_eq!(engine.snake_len(), 5);
        assert_eq!(food_count(&engine), 1);
    }

    #[test]
    fn test_tenth_item_brings_dessert() {
        let mut engine = engine();
        clear_food(&mut engine);
        engine.snack_counter = 9;
        engine.board.cell_mut((15, 5)).kind = CellType::Snack;

        engine.step();
        assert_eq!(engine.get_snack_counter(), 10);
        assert_eq!(engine.board.count(CellType::Dessert), 1);
        assert_eq!(engine.board.count(CellType::Snack), 0);

        clear_food(&mut engine);
        engine.board.cell_mut((15, 6)).kind = CellType::Dessert;
        assert_eq!(engine.step(), StepOutcome::Ate(CellType::Dessert));
        assert_eq!(engine.get_score(), 60);
        assert_eq!(engine.board.count(CellType::Snack), 1);
    }

    #[test]
    fn test_wall_blocks_step() {
        let mut engine = engine();
        clear_food(&mut engine);
        engine.board.cell_mut((15, 5)).kind = CellType::Wall;
        let before = engine.board.clone();

        assert!(engine.is_collision(Right));
        assert_eq!(engine.step(), StepOutcome::Blocked);
        assert_eq!(engine.board, before);
        assert_eq!(engine.get_head(), (15, 4));
        assert_eq!(engine.get_tail(), (15, 1));
        assert_eq!(engine.get_direction(), Right);
    }

    #[test]
    fn test_reverse_into_neck_rejected() {
        let mut engine = engine();

        assert!(engine.is_collision(Left));
        assert!(!engine.set_direction(Left));
        assert_eq!(engine.get_direction(), Right);
        assert!(engine.set_direction(Up));
        assert_eq!(engine.get_direction(), Up);
    }

    #[test]
    fn test_moving_into_tail_is_allowed() {
        // A square loop: the head sits right above the tail.
        let mut engine = engine();
        engine.load_map_str("######\n#EA  #\n#LW  #\n######\n").unwrap();
        clear_food(&mut engine);

        assert_eq!(engine.snake_len(), 4);
        assert!(!engine.is_collision(Down));
        assert!(engine.set_direction(Down));
        assert_eq!(engine.step(), StepOutcome::Moved);

        assert_eq!(engine.get_head(), (2, 1));
        assert_eq!(engine.get_tail(), (2, 2));
        assert_eq!(engine.board.cell((2, 1)).kind, CellType::SnakeBody);
        assert_eq!(engine.snake_len(), 4);
        assert_eq!(engine.board.count(CellType::SnakeBody), 4);
    }

    #[test]
    fn test_wraps_without_border() {
        let mut engine = engine();
        engine.load_map_str("     \n  LE \n     \n").unwrap();
        clear_food(&mut engine);

        engine.step();
        engine.step();
        assert_eq!(engine.get_head(), (1, 0));
        assert_eq!(engine.get_tail(), (1, 4));
        assert_eq!(engine.snake_len(), 2);
    }

    #[test]
    fn test_load_map_keeps_score() {
        let mut engine = engine();
        engine.score = 30;
        engine.snack_counter = 3;
        engine.set_direction(Up);

        engine.load_map_str("#####\n#E  #\n# H #\n#####\n").unwrap();

        assert_eq!(engine.get_score(), 30);
        assert_eq!(engine.get_snack_counter(), 3);
        assert_eq!(engine.get_direction(), Right);
        assert_eq!(food_count(&engine), 1);
    }

    #[test]
    fn test_failed_load_changes_nothing() {
        let mut engine = engine();
        let board = engine.board.clone();

        let err = engine.load_map_str("#####\n#E Z#\n#L  #\n").unwrap_err();
        assert_eq!(err, MapError::InvalidSymbol { symbol: 'Z', line: 2, column: 4 });
        assert_eq!(engine.board, board);
        assert_eq!(engine.get_head(), (15, 4));
        assert_eq!(engine.get_tail(), (15, 1));
    }

    #[test]
    fn test_score_saturates() {
        let mut engine = engine();
        clear_food(&mut engine);
        engine.score = u32::MAX - 5;
        engine.board.cell_mut((15, 5)).kind = CellType::Snack;

        assert_eq!(engine.step(), StepOutcome::Ate(CellType::Snack));
        assert_eq!(engine.get_score(), u32::MAX);
        assert_eq!(engine.get_snack_counter(), 1);
    }

    #[test]
    fn test_tail_without_direction_follows_heading() {
        let mut engine = engine();
        engine.load_map_str("     \n LE  \n     \n").unwrap();
        clear_food(&mut engine);
        engine.board.cell_mut((1, 1)).related = None;

        assert!(engine.set_direction(Down));
        assert_eq!(engine.step(), StepOutcome::Moved);

        assert_eq!(engine.get_head(), (2, 2));
        assert_eq!(engine.get_tail(), (2, 1));
        assert_eq!(engine.board.cell((1, 1)), &Cell::default());
        assert_eq!(engine.board.cell((1, 2)).related, Some(Down));
    }
}
