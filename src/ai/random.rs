use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

use super::strategy::Strategy;
use crate::game::{Board, Move, Symbol};

/// A strategy that selects uniformly at random from legal moves.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Seeded strategies replay the same choices for the same positions.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        RandomStrategy { rng }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<S: Symbol> Strategy<S> for RandomStrategy {
    fn choose_move(&mut self, board: &mut dyn Board<Symbol = S>, player: S) -> Option<Move<S>> {
        let moves = board.legal_moves(player);
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..moves.len());
        debug!(choice = %moves[idx], options = moves.len(), "random move");
        Some(moves[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{ClassicBoard, FourByFourBoard, NumericalBoard};

    #[test]
    fn test_random_strategy_selects_legal_move() {
        let mut strategy = RandomStrategy::new(None);
        let mut board = ClassicBoard::new();
        board.update_board(&Move::place(1, 1, 'X')).unwrap();
        let legal = board.legal_moves('O');

        for _ in 0..100 {
            let mv = strategy.choose_move(&mut board, 'O').unwrap();
            assert!(legal.contains(&mv), "Move {mv} is not legal");
        }
    }

    #[test]
    fn test_random_strategy_plays_full_game() {
        let mut strategy = RandomStrategy::new(Some(3));
        let mut board = ClassicBoard::new();
        let mut player = 'X';

        while !board.game_is_over(player) && !board.game_is_over(board.opponent(player)) {
            let mv = strategy.choose_move(&mut board, player).unwrap();
            board.update_board(&mv).unwrap();
            player = board.opponent(player);
        }

        assert!(board.move_count() >= 5);
    }

    #[test]
    fn test_seeded_strategies_agree() {
        let mut a = RandomStrategy::new(Some(11));
        let mut b = RandomStrategy::new(Some(11));
        let mut board = FourByFourBoard::new();
        for _ in 0..10 {
            assert_eq!(a.choose_move(&mut board, 'X'), b.choose_move(&mut board, 'X'));
        }
    }

    #[test]
    fn test_picks_symbol_too() {
        let mut strategy = RandomStrategy::new(Some(5));
        let mut board = NumericalBoard::new();
        let mv = strategy.choose_move(&mut board, 1).unwrap();
        assert_eq!(mv.symbol() % 2, 1);
    }

    #[test]
    fn test_no_move_on_full_board() {
        let mut strategy = RandomStrategy::default();
        let mut board = ClassicBoard::new();
        for (i, mv) in board.legal_moves('X').into_iter().enumerate() {
            let symbol = if i % 2 == 0 { 'X' } else { 'O' };
            board
                .update_board(&Move::place(mv.row(), mv.col(), symbol))
                .unwrap();
        }
        assert_eq!(strategy.choose_move(&mut board, 'X'), None);
    }

    #[test]
    fn test_random_strategy_name() {
        let strategy = RandomStrategy::default();
        assert_eq!(Strategy::<char>::name(&strategy), "Random");
    }
}
