use super::{check_mark, BLANK, O, X};
use crate::game::{check_target, windows, Board, Grid, Line, Move, MoveError};

const ROWS: usize = 3;
const COLS: usize = 5;
const CELLS: usize = 9;

fn in_pyramid(row: usize, col: usize) -> bool {
    2 - row.min(2) <= col && col <= 2 + row
}

/// Tic-tac-toe on a three-row pyramid of 1, 3 and 5 cells.
#[derive(Debug, Clone)]
pub struct PyramidBoard {
    grid: Grid<char>,
    lines: Vec<Line>,
    history: Vec<Move<char>>,
}

impl PyramidBoard {
    pub fn new() -> Self {
        PyramidBoard {
            grid: Grid::new(ROWS, COLS),
            lines: windows(ROWS, COLS, 3, in_pyramid),
            history: Vec::new(),
        }
    }
}

impl Default for PyramidBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for PyramidBoard {
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
            .filter(|&(r, c)| in_pyramid(r, c))
            .map(|(r, c)| Move::place(r, c, player))
            .collect()
    }

    fn is_win(&self, player: char) -> bool {
        self.grid.count_lines(&self.lines, player) > 0
    }

    fn is_draw(&self, _player: char) -> bool {
        self.history.len() == CELLS && !self.is_win(X) && !self.is_win(O)
    }

    fn is_playable(&self, row: usize, col: usize) -> bool {
        self.grid.in_bounds(row, col) && in_pyramid(row, col)
    }
}
