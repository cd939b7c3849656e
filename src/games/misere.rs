use super::{check_mark, BLANK, O, X};
use crate::game::{check_target, windows, Board, Grid, Line, Move, MoveError};

/// Misère tic-tac-toe: completing three in a row loses.
#[derive(Debug, Clone)]
pub struct MisereBoard {
    grid: Grid<char>,
    lines: Vec<Line>,
    history: Vec<Move<char>>,
}

impl MisereBoard {
    pub fn new() -> Self {
        MisereBoard {
            grid: Grid::new(3, 3),
            lines: windows(3, 3, 3, |_, _| true),
            history: Vec::new(),
        }
    }

    fn has_line(&self, symbol: char) -> bool {
        self.grid.count_lines(&self.lines, symbol) > 0
    }
}

impl Default for MisereBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for MisereBoard {
    type Symbol = char;

    fn grid(&self) -> &Grid<char> {
        &self.grid
    }

    fn move_count(&self) -> usize {
        self.history.len()
    }

    fn players(&self) -> [char; 2] {
        [X, O]
    }

    fn update_board(&mut self, mv: &Move<char>) -> Result<(), MoveError> {
        check_target(&*self, mv.row(), mv.col())?;
        check_mark(mv.symbol())?;
        self.grid.set(mv.row(), mv.col(), mv.symbol());
        self.history.push(*mv);
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Move<char>> {
        let mv = self.history.pop()?;
        self.grid.set(mv.row(), mv.col(), BLANK);
        Some(mv)
    }

    fn legal_moves(&self, player: char) -> Vec<Move<char>> {
        self.grid
            .blank_cells()
            .map(|(r, c)| Move::place(r, c, player))
            .collect()
    }

    /// `player` wins once the opponent has been forced into a line.
    fn is_win(&self, player: char) -> bool {
        self.has_line(self.opponent(player))
    }

    fn is_lose(&self, player: char) -> bool {
        self.has_line(player)
    }

    fn is_draw(&self, _player: char) -> bool {
        self.history.len() == 9 && !self.has_line(X) && !self.has_line(O)
    }
}
