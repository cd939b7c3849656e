use super::{check_mark, BLANK, O, X};
use crate::game::{check_target, windows, Board, Grid, Line, Move, MoveError};

const SIZE: usize = 7;
const CELLS: usize = 25;

/// Playable cells per row.
const ROW_WIDTHS: [usize; SIZE] = [1, 3, 5, 7, 5, 3, 1];

fn in_diamond(row: usize, col: usize) -> bool {
    let width = ROW_WIDTHS[row];
    let start = (SIZE - width) / 2;
    (start..start + width).contains(&col)
}

/// Diamond tic-tac-toe on a 7x7 grid masked to a diamond.
///
/// A player wins by holding a three-line and a four-line that run in
/// different directions and share at most one cell.
#[derive(Debug, Clone)]
pub struct DiamondBoard {
    grid: Grid<char>,
    threes: Vec<Line>,
    fours: Vec<Line>,
    history: Vec<Move<char>>,
}

impl DiamondBoard {
    pub fn new() -> Self {
        DiamondBoard {
            grid: Grid::new(SIZE, SIZE),
            threes: windows(SIZE, SIZE, 3, in_diamond),
            fours: windows(SIZE, SIZE, 4, in_diamond),
            history: Vec::new(),
        }
    }

    fn held<'a>(&'a self, lines: &'a [Line], symbol: char) -> impl Iterator<Item = &'a Line> + 'a {
        lines.iter().filter(move |l| self.grid.line_is(l, symbol))
    }
}

impl Default for DiamondBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for DiamondBoard {
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
            .filter(|&(r, c)| in_diamond(r, c))
            .map(|(r, c)| Move::place(r, c, player))
            .collect()
    }

    fn is_win(&self, player: char) -> bool {
        self.held(&self.threes, player).any(|three| {
            self.held(&self.fours, player).any(|four| {
                three.direction() != four.direction() && three.shared_cells(four) <= 1
            })
        })
    }

    fn is_draw(&self, _player: char) -> bool {
        self.history.len() >= CELLS && !self.is_win(X) && !self.is_win(O)
    }

    fn is_playable(&self, row: usize, col: usize) -> bool {
        self.grid.in_bounds(row, col) && in_diamond(row, col)
    }
}
