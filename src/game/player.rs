use crate::ai::{MinimaxStrategy, RandomStrategy, Strategy};

use super::board::{Board, Move};
use super::symbol::Symbol;

/// How a seat produces its moves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Moves come from the UI.
    Human,
    /// The variant's default computer opponent.
    Computer,
    /// Minimax search.
    Ai,
    /// Uniform random choice.
    Random,
}

impl PlayerKind {
    /// Get kind name for display
    pub fn name(self) -> &'static str {
        match self {
            PlayerKind::Human => "Human",
            PlayerKind::Computer => "Computer",
            PlayerKind::Ai => "AI",
            PlayerKind::Random => "Random",
        }
    }
}

/// One side of a game session.
///
/// A player never holds the board; computer players borrow it only for the
/// duration of [`Player::generate_move`].
pub struct Player<S: Symbol> {
    name: String,
    symbol: S,
    kind: PlayerKind,
    strategy: Option<Box<dyn Strategy<S>>>,
}

impl<S: Symbol> Player<S> {
    pub fn new(
        name: impl Into<String>,
        symbol: S,
        kind: PlayerKind,
        strategy: Option<Box<dyn Strategy<S>>>,
    ) -> Self {
        Player {
            name: name.into(),
            symbol,
            kind,
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> S {
        self.symbol
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Whether the UI has to supply this player's moves.
    pub fn is_human(&self) -> bool {
        self.strategy.is_none()
    }

    /// Name of the strategy driving this player, if any.
    pub fn strategy_name(&self) -> Option<&str> {
        self.strategy.as_deref().map(|s| s.name())
    }

    /// Ask the player's strategy for a move. Humans always return `None`.
    pub fn generate_move(&mut self, board: &mut dyn Board<Symbol = S>) -> Option<Move<S>> {
        let symbol = self.symbol;
        self.strategy.as_mut()?.choose_move(board, symbol)
    }
}

impl<S: Symbol> std::fmt::Debug for Player<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .field("kind", &self.kind)
            .field("strategy", &self.strategy_name())
            .finish()
    }
}

/// Builds players with the strategy their kind calls for.
#[derive(Debug, Clone, Copy)]
pub struct PlayerFactory {
    /// What `Computer` resolves to; `Ai` or `Random`.
    pub computer: PlayerKind,
    /// Minimax depth budget.
    pub depth: u32,
    pub pruning: bool,
    /// Session seed. Each seat derives its own generator from it.
    pub seed: Option<u64>,
}

impl PlayerFactory {
    pub fn create<S: Symbol>(
        &self,
        name: impl Into<String>,
        symbol: S,
        kind: PlayerKind,
        seat: usize,
    ) -> Player<S> {
        let resolved = match kind {
            PlayerKind::Computer => self.computer,
            other => other,
        };
        let seed = self.seed.map(|s| s.wrapping_add(seat as u64 + 1));
        let strategy: Option<Box<dyn Strategy<S>>> = match resolved {
            PlayerKind::Human => None,
            PlayerKind::Ai => Some(Box::new(MinimaxStrategy::new(self.depth, self.pruning))),
            PlayerKind::Random | PlayerKind::Computer => Some(Box::new(RandomStrategy::new(seed))),
        };
        Player::new(name, symbol, kind, strategy)
    }
}
