//! # Grid Games
//!
//! Two-player turn-based games on a rectangular grid: tic-tac-toe and its
//! variants, Connect Four, SUS and a word game. Every variant implements one
//! [`game::Board`] contract, so a single turn loop and a single minimax
//! engine serve them all.
//!
//! ## Modules
//!
//! - [`game`]: Board contract, grid storage, players, turn manager
//! - [`games`]: Rule set of each variant and the variant factory
//! - [`ai`]: Strategy trait, random play, minimax with alpha-beta pruning
//! - [`ui`]: UI contract, console front end, terminal UI
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod games;
pub mod ui;
