//! Rule sets for every variant, plus the factory that builds a board for a
//! chosen [`GameKind`].

mod classic;
mod connect_four;
mod diamond;
mod five_by_five;
mod four_by_four;
mod infinity;
mod misere;
mod numerical;
mod obstacles;
mod pyramid;
mod sus;
mod ultimate;
mod word;

use std::path::PathBuf;

pub use classic::ClassicBoard;
pub use connect_four::ConnectFourBoard;
pub use diamond::DiamondBoard;
pub use five_by_five::FiveByFiveBoard;
pub use four_by_four::FourByFourBoard;
pub use infinity::InfinityBoard;
pub use misere::MisereBoard;
pub use numerical::NumericalBoard;
pub use obstacles::ObstaclesBoard;
pub use pyramid::PyramidBoard;
pub use sus::SusBoard;
pub use ultimate::UltimateBoard;
pub use word::WordBoard;

use crate::error::DictionaryError;
use crate::game::{Board, Dictionary, MoveError, PlayerKind, Symbol};

/// First-mover mark for letter games.
pub const X: char = 'X';
/// Second-mover mark for letter games.
pub const O: char = 'O';
/// Empty cell in letter games.
pub(crate) const BLANK: char = <char as Symbol>::BLANK;

/// Every playable variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    Classic,
    Memory,
    Misere,
    ConnectFour,
    FiveByFive,
    FourByFour,
    Diamond,
    Pyramid,
    Numerical,
    Obstacles,
    Infinity,
    Ultimate,
    Sus,
    Word,
}

/// Inputs some boards need at construction.
#[derive(Debug, Clone)]
pub struct BoardSettings {
    /// Seed for boards with random mechanics.
    pub seed: u64,
    /// Word list for the word game.
    pub dictionary: PathBuf,
}

/// A freshly built board, keyed on its symbol type.
pub enum AnyBoard {
    Letters(Box<dyn Board<Symbol = char>>),
    Numbers(Box<dyn Board<Symbol = u8>>),
}

impl GameKind {
    pub const ALL: [GameKind; 14] = [
        GameKind::Classic,
        GameKind::Memory,
        GameKind::Misere,
        GameKind::ConnectFour,
        GameKind::FiveByFive,
        GameKind::FourByFour,
        GameKind::Diamond,
        GameKind::Pyramid,
        GameKind::Numerical,
        GameKind::Obstacles,
        GameKind::Infinity,
        GameKind::Ultimate,
        GameKind::Sus,
        GameKind::Word,
    ];

    /// Build a new board for this variant.
    ///
    /// Only the word game can fail, when its dictionary cannot be loaded.
    pub fn build(self, settings: &BoardSettings) -> Result<AnyBoard, DictionaryError> {
        let board: Box<dyn Board<Symbol = char>> = match self {
            GameKind::Classic => Box::new(ClassicBoard::new()),
            GameKind::Memory => Box::new(ClassicBoard::memory()),
            GameKind::Misere => Box::new(MisereBoard::new()),
            GameKind::ConnectFour => Box::new(ConnectFourBoard::new()),
            GameKind::FiveByFive => Box::new(FiveByFiveBoard::new()),
            GameKind::FourByFour => Box::new(FourByFourBoard::new()),
            GameKind::Diamond => Box::new(DiamondBoard::new()),
            GameKind::Pyramid => Box::new(PyramidBoard::new()),
            GameKind::Numerical => return Ok(AnyBoard::Numbers(Box::new(NumericalBoard::new()))),
            GameKind::Obstacles => Box::new(ObstaclesBoard::new(settings.seed)),
            GameKind::Infinity => Box::new(InfinityBoard::new()),
            GameKind::Ultimate => Box::new(UltimateBoard::new()),
            GameKind::Sus => Box::new(SusBoard::new()),
            GameKind::Word => {
                let dictionary = Dictionary::load(&settings.dictionary)?;
                Box::new(WordBoard::new(dictionary))
            }
        };
        Ok(AnyBoard::Letters(board))
    }

    pub fn title(self) -> &'static str {
        match self {
            GameKind::Classic => "Tic-Tac-Toe",
            GameKind::Memory => "Memory Tic-Tac-Toe",
            GameKind::Misere => "Misère Tic-Tac-Toe",
            GameKind::ConnectFour => "Connect Four",
            GameKind::FiveByFive => "5 x 5 Tic-Tac-Toe",
            GameKind::FourByFour => "4 x 4 Sliding Tic-Tac-Toe",
            GameKind::Diamond => "Diamond Tic-Tac-Toe",
            GameKind::Pyramid => "Pyramid Tic-Tac-Toe",
            GameKind::Numerical => "Numerical Tic-Tac-Toe",
            GameKind::Obstacles => "Obstacles Tic-Tac-Toe",
            GameKind::Infinity => "Infinity Tic-Tac-Toe",
            GameKind::Ultimate => "Ultimate Tic-Tac-Toe",
            GameKind::Sus => "SUS",
            GameKind::Word => "Word Tic-Tac-Toe",
        }
    }

    pub fn rules(self) -> &'static str {
        match self {
            GameKind::Classic => "Three in a row wins.",
            GameKind::Memory => "Three in a row wins, but placed marks stay hidden until the game ends.",
            GameKind::Misere => "Whoever completes three in a row loses.",
            GameKind::ConnectFour => "Tokens drop to the lowest free row. Four in a row wins.",
            GameKind::FiveByFive => {
                "After 24 moves the player with more three-in-a-rows wins."
            }
            GameKind::FourByFour => {
                "Slide one of your tokens one step into an empty cell. Three in a row wins."
            }
            GameKind::Diamond => {
                "Own a line of three and a line of four in different directions to win."
            }
            GameKind::Pyramid => "Three in a row inside the pyramid wins.",
            GameKind::Numerical => {
                "First player writes odd numbers, second writes even ones. Complete a line summing to 15."
            }
            GameKind::Obstacles => {
                "Four in a row wins. Two obstacles appear after every round."
            }
            GameKind::Infinity => "Every third move the oldest mark vanishes. Three in a row wins.",
            GameKind::Ultimate => {
                "Win sub-boards to claim them; three claimed in a row wins. Your cell picks your opponent's sub-board."
            }
            GameKind::Sus => "Place S or U. Every S-U-S you form scores a point.",
            GameKind::Word => "Place letters. Complete a dictionary word in any line to win.",
        }
    }

    /// Search depth used by minimax players unless configured otherwise.
    pub fn default_depth(self) -> u32 {
        match self {
            GameKind::Classic | GameKind::Memory | GameKind::Misere | GameKind::Pyramid => 9,
            GameKind::ConnectFour | GameKind::FourByFour => 5,
            GameKind::Diamond | GameKind::Infinity | GameKind::Sus => 4,
            GameKind::FiveByFive | GameKind::Numerical | GameKind::Ultimate => 3,
            GameKind::Obstacles | GameKind::Word => 2,
        }
    }

    /// Strategy a COMPUTER player uses for this variant.
    pub fn computer_strategy(self) -> PlayerKind {
        match self {
            GameKind::Diamond | GameKind::FourByFour | GameKind::FiveByFive => PlayerKind::Ai,
            _ => PlayerKind::Random,
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Letter games accept only the two X/O marks.
pub(crate) fn check_mark(symbol: char) -> Result<(), MoveError> {
    if symbol == X || symbol == O {
        Ok(())
    } else {
        Err(MoveError::IllegalSymbol {
            symbol: symbol.to_string(),
        })
    }
}

/// The side that made the most recent of `moves` alternating moves.
pub(crate) fn last_mover<S: Copy>(players: [S; 2], moves: usize) -> Option<S> {
    (moves > 0).then(|| players[(moves - 1) % 2])
}
