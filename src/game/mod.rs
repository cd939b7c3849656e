//! Shared game engine: the board contract, grid storage, players, and the
//! turn manager that drives a session.

mod board;
mod dictionary;
mod grid;
mod manager;
mod player;
mod symbol;

pub(crate) use board::check_target;
pub use board::{Board, Move, MoveError, ScopedMove};
pub use dictionary::Dictionary;
pub use grid::{windows, Coord, Grid, Line, DIRECTIONS};
pub use manager::{GameManager, GameOutcome};
pub use player::{Player, PlayerFactory, PlayerKind};
pub use symbol::Symbol;
