//! User interfaces: the contract the turn loop talks to, a line-based console
//! front end, and a full-screen ratatui front end.

mod board_view;
mod console;
mod terminal;

pub use console::{parse_move, ConsoleUi};
pub use terminal::TerminalUi;

use crate::config::SeatConfig;
use crate::error::UiError;
use crate::game::{Board, GameOutcome, Move, Player, PlayerFactory, PlayerKind, Symbol};

/// What the turn loop needs from a front end.
pub trait Ui<S: Symbol> {
    /// Create both players, in seat order, bound to `symbols`.
    fn setup_players(
        &mut self,
        factory: &PlayerFactory,
        seats: &[SeatConfig; 2],
        symbols: [S; 2],
    ) -> Result<[Player<S>; 2], UiError> {
        let [first, second] = seats;
        Ok([
            self.create_player(factory, &first.name, symbols[0], first.kind, 0),
            self.create_player(factory, &second.name, symbols[1], second.kind, 1),
        ])
    }

    fn create_player(
        &mut self,
        factory: &PlayerFactory,
        name: &str,
        symbol: S,
        kind: PlayerKind,
        seat: usize,
    ) -> Player<S> {
        factory.create(name, symbol, kind, seat)
    }

    /// Blocking request for the player's next move.
    ///
    /// Computer players answer through their strategy; humans through
    /// [`Ui::read_move`]. The move is not validated against the rules here.
    fn get_move(
        &mut self,
        player: &mut Player<S>,
        board: &mut dyn Board<Symbol = S>,
    ) -> Result<Move<S>, UiError> {
        if player.is_human() {
            return self.read_move(player, &*board);
        }
        player
            .generate_move(board)
            .ok_or_else(|| UiError::NoMoveAvailable(player.name().to_string()))
    }

    /// Read a structurally valid move from a human.
    fn read_move(
        &mut self,
        player: &Player<S>,
        board: &dyn Board<Symbol = S>,
    ) -> Result<Move<S>, UiError>;

    fn show_board(&mut self, board: &dyn Board<Symbol = S>) -> Result<(), UiError>;

    fn show_message(&mut self, message: &str) -> Result<(), UiError>;

    fn report_outcome(
        &mut self,
        board: &dyn Board<Symbol = S>,
        outcome: GameOutcome,
        players: &[Player<S>; 2],
    ) -> Result<(), UiError>;
}
