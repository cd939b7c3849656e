use super::{check_mark, BLANK, O, X};
use crate::game::{check_target, windows, Board, Grid, Line, Move, MoveError};

/// Standard 3x3 tic-tac-toe.
///
/// The memory variant plays by the same rules but asks renderers to hide the
/// marks, so players have to remember who owns each cell.
#[derive(Debug, Clone)]
pub struct ClassicBoard {
    grid: Grid<char>,
    lines: Vec<Line>,
    history: Vec<Move<char>>,
    concealed: bool,
}

impl ClassicBoard {
    pub fn new() -> Self {
        ClassicBoard {
            grid: Grid::new(3, 3),
            lines: windows(3, 3, 3, |_, _| true),
            history: Vec::new(),
            concealed: false,
        }
    }

    /// Memory tic-tac-toe: classic rules, hidden marks.
    pub fn memory() -> Self {
        ClassicBoard {
            concealed: true,
            ..Self::new()
        }
    }

    fn is_full(&self) -> bool {
        self.history.len() == 9
    }
}

impl Default for ClassicBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for ClassicBoard {
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

    fn is_win(&self, player: char) -> bool {
        self.grid.count_lines(&self.lines, player) > 0
    }

    fn is_draw(&self, _player: char) -> bool {
        self.is_full() && !self.is_win(X) && !self.is_win(O)
    }

    fn conceals_marks(&self) -> bool {
        self.concealed
    }
}
