use crate::game::{Board, Move, Symbol};

/// Universal interface for computer move generation.
///
/// Strategies get mutable access to the live board so search can apply and
/// undo moves in place; the board must be back in its original state when
/// `choose_move` returns.
pub trait Strategy<S: Symbol> {
    /// Pick a move for `player`, or `None` when no legal move exists.
    fn choose_move(&mut self, board: &mut dyn Board<Symbol = S>, player: S) -> Option<Move<S>>;

    /// Return the strategy's display name.
    fn name(&self) -> &str;
}
