use super::{BLANK, O, X};
use crate::game::{check_target, windows, Board, Grid, Line, Move, MoveError};

pub const S: char = 'S';
pub const U: char = 'U';

const CELLS: usize = 9;

#[derive(Debug, Clone, Copy)]
struct Turn {
    mv: Move<char>,
    mover: char,
    gained: usize,
}

/// SUS: both players write S or U; every S-U-S a move completes scores a
/// point for its player. After nine moves the higher score wins.
#[derive(Debug, Clone)]
pub struct SusBoard {
    grid: Grid<char>,
    lines: Vec<Line>,
    history: Vec<Turn>,
    scores: [usize; 2],
}

impl SusBoard {
    pub fn new() -> Self {
        SusBoard {
            grid: Grid::new(3, 3),
            lines: windows(3, 3, 3, |_, _| true),
            history: Vec::new(),
            scores: [0, 0],
        }
    }

    pub fn score(&self, player: char) -> usize {
        self.scores[self.seat(player)]
    }

    fn seat(&self, player: char) -> usize {
        usize::from(player == O)
    }

    fn count_sus(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| self.grid.line_symbols(l) == [S, U, S])
            .count()
    }

    fn finished(&self) -> bool {
        self.history.len() >= CELLS
    }
}

impl Default for SusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for SusBoard {
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
        if mv.symbol() != S && mv.symbol() != U {
            return Err(MoveError::IllegalSymbol {
                symbol: mv.symbol().to_string(),
            });
        }
        let before = self.count_sus();
        self.grid.set(mv.row(), mv.col(), mv.symbol());
        let gained = self.count_sus() - before;

        let mover = self.players()[self.history.len() % 2];
        let seat = self.seat(mover);
        self.scores[seat] += gained;
        self.history.push(Turn {
            mv: *mv,
            mover,
            gained,
        });
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Move<char>> {
        let turn = self.history.pop()?;
        let seat = self.seat(turn.mover);
        self.scores[seat] -= turn.gained;
        self.grid.set(turn.mv.row(), turn.mv.col(), BLANK);
        Some(turn.mv)
    }

    fn legal_moves(&self, player: char) -> Vec<Move<char>> {
        let letters = self.placeable_symbols(player);
        self.grid
            .blank_cells()
            .flat_map(|(r, c)| letters.iter().map(move |&l| Move::place(r, c, l)))
            .collect()
    }

    fn is_win(&self, player: char) -> bool {
        self.finished() && self.score(player) > self.score(self.opponent(player))
    }

    fn is_lose(&self, player: char) -> bool {
        self.finished() && self.score(player) < self.score(self.opponent(player))
    }

    fn is_draw(&self, _player: char) -> bool {
        self.finished() && self.scores[0] == self.scores[1]
    }

    fn placeable_symbols(&self, _player: char) -> Vec<char> {
        vec![S, U]
    }

    fn status(&self) -> Option<String> {
        Some(format!("X: {}  O: {}", self.scores[0], self.scores[1]))
    }
}
