use std::collections::VecDeque;

use tracing::debug;

use super::{check_mark, BLANK, O, X};
use crate::game::{check_target, windows, Board, Grid, Line, Move, MoveError};

/// Every this many placements the oldest surviving mark vanishes.
const VANISH_EVERY: usize = 3;

/// Infinity tic-tac-toe: a 3x3 board where marks do not last.
///
/// After every third placement the oldest mark still on the board is
/// removed, so the game only ends when someone lines up three.
#[derive(Debug, Clone)]
pub struct InfinityBoard {
    grid: Grid<char>,
    lines: Vec<Line>,
    /// Marks on the board, oldest first.
    live: VecDeque<Move<char>>,
    /// Every placement with the mark it made vanish, if any.
    history: Vec<(Move<char>, Option<Move<char>>)>,
}

impl InfinityBoard {
    pub fn new() -> Self {
        InfinityBoard {
            grid: Grid::new(3, 3),
            lines: windows(3, 3, 3, |_, _| true),
            live: VecDeque::new(),
            history: Vec::new(),
        }
    }

    /// The mark that will vanish next.
    pub fn oldest(&self) -> Option<&Move<char>> {
        self.live.front()
    }

    /// Placements made so far, including vanished ones.
    pub fn placements(&self) -> usize {
        self.history.len()
    }
}

impl Default for InfinityBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for InfinityBoard {
    type Symbol = char;

    fn grid(&self) -> &Grid<char> {
        &self.grid
    }

    /// Marks currently on the board.
    fn move_count(&self) -> usize {
        self.live.len()
    }

    fn players(&self) -> [char; 2] {
        [X, O]
    }

    fn update_board(&mut self, mv: &Move<char>) -> Result<(), MoveError> {
        check_target(&*self, mv.row(), mv.col())?;
        check_mark(mv.symbol())?;
        self.grid.set(mv.row(), mv.col(), mv.symbol());
        self.live.push_back(*mv);

        let mut vanished = None;
        if (self.history.len() + 1) % VANISH_EVERY == 0 {
            if let Some(old) = self.live.pop_front() {
                self.grid.set(old.row(), old.col(), BLANK);
                debug!(%old, "oldest mark vanished");
                vanished = Some(old);
            }
        }
        self.history.push((*mv, vanished));
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Move<char>> {
        let (mv, vanished) = self.history.pop()?;
        if let Some(old) = vanished {
            self.grid.set(old.row(), old.col(), old.symbol());
            self.live.push_front(old);
        }
        self.live.pop_back();
        self.grid.set(mv.row(), mv.col(), BLANK);
        Some(mv)
    }

    fn legal_moves(&self, player: char) -> Vec<Move<char>> {
        self.grid
            .blank_cells()
            .map(|(r, c)| Move::place(r, c, player))
            .collect()
    }

    fn is_win(&self, player: char) -> bool {
        self.grid.count_lines(&self.lines, player) > 0
    }

    /// Marks keep vanishing, so the board never fills up.
    fn is_draw(&self, _player: char) -> bool {
        false
    }

    fn status(&self) -> Option<String> {
        let until = VANISH_EVERY - self.history.len() % VANISH_EVERY;
        Some(match self.oldest() {
            Some(old) => format!("{old} vanishes in {until} move(s)"),
            None => format!("next vanish in {until} move(s)"),
        })
    }
}
