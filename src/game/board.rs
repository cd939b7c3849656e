use std::ops::{Deref, DerefMut};

use super::grid::{Coord, Grid};
use super::symbol::Symbol;

/// A single move: a target cell and the symbol written there.
///
/// Sliding variants also carry the source cell the token leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move<S> {
    row: usize,
    col: usize,
    symbol: S,
    from: Option<Coord>,
}

impl<S: Symbol> Move<S> {
    /// Place `symbol` at `(row, col)`.
    pub fn place(row: usize, col: usize, symbol: S) -> Self {
        Move {
            row,
            col,
            symbol,
            from: None,
        }
    }

    /// Slide the `symbol` token from `from` to `to`.
    pub fn slide(from: Coord, to: Coord, symbol: S) -> Self {
        Move {
            row: to.0,
            col: to.1,
            symbol,
            from: Some(from),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn target(&self) -> Coord {
        (self.row, self.col)
    }

    pub fn symbol(&self) -> S {
        self.symbol
    }

    /// Source cell of a sliding move.
    pub fn from(&self) -> Option<Coord> {
        self.from
    }
}

impl<S: Symbol> std::fmt::Display for Move<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.from {
            Some((fr, fc)) => write!(
                f,
                "{} ({}, {}) -> ({}, {})",
                self.symbol, fr, fc, self.row, self.col
            ),
            None => write!(f, "{} at ({}, {})", self.symbol, self.row, self.col),
        }
    }
}

/// Why a board rejected a move. The board is unchanged whenever one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already taken")]
    Occupied { row: usize, col: usize },

    #[error("cell ({row}, {col}) is not part of the playing area")]
    NotPlayable { row: usize, col: usize },

    #[error("'{symbol}' cannot be played here")]
    IllegalSymbol { symbol: String },

    #[error("number {0} has already been used")]
    SymbolUsed(String),

    #[error("you must play in sub-board ({sub_row}, {sub_col})")]
    WrongSubBoard { sub_row: usize, sub_col: usize },

    #[error("sub-board ({sub_row}, {sub_col}) is already decided")]
    SubBoardClosed { sub_row: usize, sub_col: usize },

    #[error("a sliding move needs a source cell")]
    MissingSource,

    #[error("there is no token of yours at ({row}, {col})")]
    NotOwnPiece { row: usize, col: usize },

    #[error("tokens move one step up, down, left or right")]
    NotAdjacent,

    #[error("no more moves are allowed")]
    MoveLimitReached,
}

/// The rule set of one game variant.
///
/// A board exclusively owns its grid and auxiliary state; the only way to
/// change it is [`Board::update_board`] and its exact inverse
/// [`Board::undo_move`].
pub trait Board {
    type Symbol: Symbol;

    /// Read access to the cells.
    fn grid(&self) -> &Grid<Self::Symbol>;

    fn rows(&self) -> usize {
        self.grid().rows()
    }

    fn cols(&self) -> usize {
        self.grid().cols()
    }

    /// Moves applied so far, net of removals.
    fn move_count(&self) -> usize;

    /// Identity symbols of the two sides, first mover first.
    fn players(&self) -> [Self::Symbol; 2];

    fn opponent(&self, player: Self::Symbol) -> Self::Symbol {
        let [first, second] = self.players();
        if player == first {
            second
        } else {
            first
        }
    }

    /// Validate and apply a move. On error nothing changes.
    fn update_board(&mut self, mv: &Move<Self::Symbol>) -> Result<(), MoveError>;

    /// Roll back the last accepted move, restoring the exact prior state.
    /// Returns the move that was undone.
    fn undo_move(&mut self) -> Option<Move<Self::Symbol>>;

    /// Every move `player` could make now, in a fixed enumeration order.
    fn legal_moves(&self, player: Self::Symbol) -> Vec<Move<Self::Symbol>>;

    fn is_win(&self, player: Self::Symbol) -> bool;

    /// Loss independent of the opponent's win. Most variants have none.
    fn is_lose(&self, _player: Self::Symbol) -> bool {
        false
    }

    /// Board exhausted with no win for either side.
    fn is_draw(&self, player: Self::Symbol) -> bool;

    fn game_is_over(&self, player: Self::Symbol) -> bool {
        self.is_win(player) || self.is_lose(player) || self.is_draw(player)
    }

    /// Symbols `player` may write into a cell.
    fn placeable_symbols(&self, player: Self::Symbol) -> Vec<Self::Symbol> {
        vec![player]
    }

    /// Whether a cell belongs to the board's shape.
    fn is_playable(&self, row: usize, col: usize) -> bool {
        self.grid().in_bounds(row, col)
    }

    /// Moves relocate a token instead of placing a new one.
    fn is_sliding(&self) -> bool {
        false
    }

    /// Renderers should hide which symbol occupies a cell.
    fn conceals_marks(&self) -> bool {
        false
    }

    /// One-line summary of auxiliary state (scores, active region).
    fn status(&self) -> Option<String> {
        None
    }
}

/// A move applied to a board for the lifetime of the guard.
///
/// Dropping the guard undoes the move, so search code cannot forget the
/// rollback on any return path.
pub struct ScopedMove<'a, B: Board + ?Sized> {
    board: &'a mut B,
}

impl<'a, B: Board + ?Sized> ScopedMove<'a, B> {
    pub fn apply(board: &'a mut B, mv: &Move<B::Symbol>) -> Result<Self, MoveError> {
        board.update_board(mv)?;
        Ok(ScopedMove { board })
    }
}

impl<B: Board + ?Sized> Deref for ScopedMove<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.board
    }
}

impl<B: Board + ?Sized> DerefMut for ScopedMove<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.board
    }
}

impl<B: Board + ?Sized> Drop for ScopedMove<'_, B> {
    fn drop(&mut self) {
        self.board.undo_move();
    }
}

/// Reject coordinates outside the grid or off the board's shape.
pub(crate) fn check_target<B: Board + ?Sized>(board: &B, row: usize, col: usize) -> Result<(), MoveError> {
    if !board.grid().in_bounds(row, col) {
        return Err(MoveError::OutOfBounds { row, col });
    }
    if !board.is_playable(row, col) {
        return Err(MoveError::NotPlayable { row, col });
    }
    if !board.grid().get(row, col).is_blank() {
        return Err(MoveError::Occupied { row, col });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ClassicBoard;

    #[test]
    fn test_move_accessors() {
        let mv = Move::place(1, 2, 'X');
        assert_eq!(mv.target(), (1, 2));
        assert_eq!(mv.symbol(), 'X');
        assert_eq!(mv.from(), None);

        let slide = Move::slide((0, 0), (1, 0), 'O');
        assert_eq!(slide.from(), Some((0, 0)));
        assert_eq!(slide.target(), (1, 0));
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::place(0, 1, 'X').to_string(), "X at (0, 1)");
        assert_eq!(
            Move::slide((0, 0), (1, 0), 'O').to_string(),
            "O (0, 0) -> (1, 0)"
        );
    }

    #[test]
    fn test_scoped_move_undoes_on_drop() {
        let mut board = ClassicBoard::new();
        {
            let scoped = ScopedMove::apply(&mut board, &Move::place(1, 1, 'X')).unwrap();
            assert_eq!(scoped.grid().get(1, 1), 'X');
            assert_eq!(scoped.move_count(), 1);
        }
        assert_eq!(board.grid().get(1, 1), '.');
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_scoped_move_rejected_leaves_board() {
        let mut board = ClassicBoard::new();
        board.update_board(&Move::place(0, 0, 'X')).unwrap();
        assert!(matches!(
            ScopedMove::apply(&mut board, &Move::place(0, 0, 'O')),
            Err(MoveError::Occupied { row: 0, col: 0 })
        ));
        assert_eq!(board.move_count(), 1);
        assert_eq!(board.grid().get(0, 0), 'X');
    }

    #[test]
    fn test_opponent() {
        let board = ClassicBoard::new();
        assert_eq!(board.opponent('X'), 'O');
        assert_eq!(board.opponent('O'), 'X');
    }

    #[test]
    fn test_move_error_display() {
        let err = MoveError::Occupied { row: 2, col: 1 };
        assert_eq!(err.to_string(), "cell (2, 1) is already taken");
    }
}
