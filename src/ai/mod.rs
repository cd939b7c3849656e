mod minimax;
mod random;
mod strategy;

pub use minimax::{Minimax, MinimaxStrategy, SearchOutcome, INF};
pub use random::RandomStrategy;
pub use strategy::Strategy;
