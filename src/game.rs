use std::{path::PathBuf, thread::sleep, time::Duration};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::{TermCoords, TermInt};
use crate::term::TermManager;
use gridsnake::{CellType, Direction::{*, self}, Engine, StepOutcome};
use gridsnake::config::{POLL_INTERVAL_MS, TICK_MS};

const TICKS_UNTIL_UPDATE: u64 = TICK_MS / POLL_INTERVAL_MS;

const SNAKE_BODY_CHAR: char = '█';
const WALL_CHAR: char = '▒';

/// What a key press asks the game to do
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
}

pub struct SnakeGame {
    engine: Engine,
    map_path: Option<PathBuf>,
    paused: bool,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(engine: Engine, map_path: Option<PathBuf>) -> Result<Self> {
        let term = TermManager::new().context("Error reading terminal size")?;
        Ok(SnakeGame { engine, map_path, paused: false, term })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup().context("Error setting up terminal")
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore().context("Error restoring terminal")
    }

    /// Shows the controls and waits for a key. Returns false if the player
    /// quit instead.
    pub fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause, R to restart",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.draw()?;
        self.term.show_message(lines)?;

        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;
        Ok(key_action(&key) != Some(KeyAction::Quit))
    }

    /// Runs the game until the player quits.
    pub fn play(&mut self) -> Result<()> {
        let mut ticks_until_step = TICKS_UNTIL_UPDATE;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match key_action(&key_ev) {
                    Some(KeyAction::Quit) => return Ok(()),
                    Some(KeyAction::Turn(dir)) => {
                        if !self.paused {
                            self.engine.set_direction(dir);
                        }
                    }
                    Some(KeyAction::TogglePause) => self.toggle_pause()?,
                    Some(KeyAction::Restart) => {
                        self.restart()?;
                        ticks_until_step = TICKS_UNTIL_UPDATE;
                    }
                    None => {}
                }
            }

            if self.paused { continue; }

            // Not paused, count down til the next game update
            ticks_until_step -= 1;
            if ticks_until_step == 0 {
                ticks_until_step = TICKS_UNTIL_UPDATE;

                if let StepOutcome::Ate(item) = self.engine.step() {
                    info!(?item, score = self.engine.get_score(), "food eaten");
                }
                self.draw()?;
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn restart(&mut self) -> Result<()> {
        self.engine.reset();

        if let Some(path) = &self.map_path {
            if let Err(e) = self.engine.load_map(path) {
                warn!(path = %path.display(), error = %e, "map reload failed, playing the default board");
            }
        }

        if self.paused {
            self.toggle_pause()?;
        }
        self.term.clear()?;
        self.draw()
    }

    fn draw(&mut self) -> Result<()> {
        let board = self.engine.get_board();
        let head = self.engine.get_head();
        let head_ch = head_char(self.engine.get_direction());

        for (row, cells) in board.rows().iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let glyph = if (row, col) == head {
                    [head_ch, head_ch]
                } else {
                    cell_glyph(cell.kind)
                };

                if let Some((x, y)) = screen_pos(row, col) {
                    self.term.print_at((x, y), glyph[0])?;
                    self.term.print_at((x.saturating_add(1), y), glyph[1])?;
                }
            }
        }

        let score_line = format!("Score: {:<8}", self.engine.get_score());
        if let Some((_, y)) = screen_pos(board.height(), 0) {
            self.term.print_str_at((0, y), &score_line)?;
        }

        self.term.flush()?;
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

/// Maps a key press to a game action.
pub fn key_action(ev: &KeyEvent) -> Option<KeyAction> {
    if is_ctrl_c(ev) {
        return Some(KeyAction::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(KeyAction::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(KeyAction::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(KeyAction::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(KeyAction::Turn(Right)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Restart),
        KeyCode::Esc => Some(KeyAction::TogglePause),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

fn head_char(dir: Direction) -> char {
    match dir {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    }
}

/// Two terminal columns per cell, since characters are about twice as tall
/// as they are wide.
fn cell_glyph(kind: CellType) -> [char; 2] {
    match kind {
        CellType::Empty => [' ', ' '],
        CellType::SnakeBody => [SNAKE_BODY_CHAR, SNAKE_BODY_CHAR],
        CellType::Wall => [WALL_CHAR, WALL_CHAR],
        CellType::Snack => ['(', ')'],
        CellType::Dessert => ['{', '}'],
    }
}

fn screen_pos(row: usize, col: usize) -> Option<TermCoords> {
    let x = TermInt::try_from(col.checked_mul(2)?).ok()?;
    let y = TermInt::try_from(row).ok()?;
    Some((x, y))
}
