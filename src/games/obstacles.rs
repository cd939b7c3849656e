use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::{check_mark, BLANK, O, X};
use crate::game::{check_target, windows, Board, Coord, Grid, Line, Move, MoveError};

/// Marker for a blocked cell.
pub const OBSTACLE: char = '#';

const SIZE: usize = 6;
const OBSTACLES_PER_ROUND: usize = 2;

#[derive(Debug, Clone)]
struct Turn {
    mv: Move<char>,
    obstacles: Vec<Coord>,
    /// Generator state before the obstacles were drawn.
    rng_before: Option<StdRng>,
}

/// 6x6 four-in-a-row where two random cells are blocked after every round.
///
/// The obstacle generator is seeded at construction, so a given seed and
/// move sequence always produce the same obstacles.
#[derive(Debug, Clone)]
pub struct ObstaclesBoard {
    grid: Grid<char>,
    lines: Vec<Line>,
    history: Vec<Turn>,
    rng: StdRng,
}

impl ObstaclesBoard {
    pub fn new(seed: u64) -> Self {
        ObstaclesBoard {
            grid: Grid::new(SIZE, SIZE),
            lines: windows(SIZE, SIZE, 4, |_, _| true),
            history: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Cells currently blocked.
    pub fn obstacles(&self) -> Vec<Coord> {
        self.history
            .iter()
            .flat_map(|t| t.obstacles.iter().copied())
            .collect()
    }

    fn drop_obstacles(&mut self) -> Vec<Coord> {
        let blanks: Vec<Coord> = self.grid.blank_cells().collect();
        let amount = OBSTACLES_PER_ROUND.min(blanks.len());
        let picked: Vec<Coord> = rand::seq::index::sample(&mut self.rng, blanks.len(), amount)
            .iter()
            .map(|i| blanks[i])
            .collect();
        for &(r, c) in &picked {
            self.grid.set(r, c, OBSTACLE);
        }
        picked
    }
}

impl Board for ObstaclesBoard {
    type Symbol = char;

    fn grid(&self) -> &Grid<char> {
        &self.grid
    }

    /// Player moves only; obstacles do not count.
    fn move_count(&self) -> usize {
        self.history.len()
    }

    fn players(&self) -> [char; 2] {
        [X, O]
    }

    fn update_board(&mut self, mv: &Move<char>) -> Result<(), MoveError> {
        check_target(&*self, mv.row(), mv.col())?;
        check_mark(mv.symbol())?;
        self.grid.set(mv.row(), mv.col(), mv.symbol());

        let mut turn = Turn {
            mv: *mv,
            obstacles: Vec::new(),
            rng_before: None,
        };
        if (self.history.len() + 1) % 2 == 0 {
            turn.rng_before = Some(self.rng.clone());
            turn.obstacles = self.drop_obstacles();
            debug!(obstacles = ?turn.obstacles, "round over, cells blocked");
        }
        self.history.push(turn);
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Move<char>> {
        let turn = self.history.pop()?;
        for &(r, c) in &turn.obstacles {
            self.grid.set(r, c, BLANK);
        }
        if let Some(rng) = turn.rng_before {
            self.rng = rng;
        }
        self.grid.set(turn.mv.row(), turn.mv.col(), BLANK);
        Some(turn.mv)
    }

    fn legal_moves(&self, player: char) -> Vec<Move<char>> {
        self.grid
            .blank_cells()
            .map(|(r, c)| Move::place(r, c, player))
            .collect()
    }

    fn is_win(&self, player: char) -> bool {
        self.grid.count_lines(&self.lines, player) > 0
    }

    fn is_draw(&self, _player: char) -> bool {
        self.grid.blank_cells().next().is_none() && !self.is_win(X) && !self.is_win(O)
    }

    fn status(&self) -> Option<String> {
        Some(format!("obstacles: {}", self.obstacles().len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacles_after_each_round() {
        let mut board = ObstaclesBoard::new(42);
        board.update_board(&Move::place(0, 0, X)).unwrap();
        assert!(board.obstacles().is_empty());
        board.update_board(&Move::place(0, 1, O)).unwrap();
        let obstacles = board.obstacles();
        assert_eq!(obstacles.len(), 2);
        for (r, c) in obstacles {
            assert_eq!(board.grid().get(r, c), OBSTACLE);
        }
        assert_eq!(board.move_count(), 2);
        assert_eq!(board.grid().occupied(), 4);
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let play = |seed| {
            let mut board = ObstaclesBoard::new(seed);
            board.update_board(&Move::place(2, 2, X)).unwrap();
            board.update_board(&Move::place(3, 3, O)).unwrap();
            board.obstacles()
        };
        assert_eq!(play(9), play(9));
    }

    #[test]
    fn test_obstacle_cell_rejects_moves() {
        let mut board = ObstaclesBoard::new(1);
        board.update_board(&Move::place(0, 0, X)).unwrap();
        board.update_board(&Move::place(0, 1, O)).unwrap();
        let (r, c) = board.obstacles()[0];
        assert_eq!(
            board.update_board(&Move::place(r, c, X)),
            Err(MoveError::Occupied { row: r, col: c })
        );
    }

    #[test]
    fn test_undo_clears_obstacles_and_rewinds() {
        let mut board = ObstaclesBoard::new(5);
        board.update_board(&Move::place(0, 0, X)).unwrap();
        let before = board.grid().clone();
        board.update_board(&Move::place(5, 5, O)).unwrap();
        let first = board.obstacles();
        board.undo_move();
        assert_eq!(board.grid(), &before);
        assert!(board.obstacles().is_empty());

        board.update_board(&Move::place(5, 5, O)).unwrap();
        assert_eq!(board.obstacles(), first);
    }

    #[test]
    fn test_four_in_a_row_wins() {
        let mut board = ObstaclesBoard::new(3);
        for r in 1..5 {
            board.grid.set(r, r, O);
        }
        assert!(board.is_win(O));
        assert!(!board.is_win(X));
        board.grid.set(4, 4, OBSTACLE);
        assert!(!board.is_win(O));
    }
}
