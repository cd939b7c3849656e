use super::{check_mark, BLANK, O, X};
use crate::game::{windows, Board, Coord, Grid, Line, Move, MoveError};

const SIZE: usize = 4;

/// Orthogonal steps a token may take.
const STEPS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 4x4 sliding tic-tac-toe.
///
/// Each side starts with four tokens on the edge rows and moves one of them
/// a single step into an empty neighbour per turn.
#[derive(Debug, Clone)]
pub struct FourByFourBoard {
    grid: Grid<char>,
    lines: Vec<Line>,
    history: Vec<Move<char>>,
}

impl FourByFourBoard {
    pub fn new() -> Self {
        let mut grid = Grid::new(SIZE, SIZE);
        for (col, (top, bottom)) in [(O, X), (X, O), (O, X), (X, O)].into_iter().enumerate() {
            grid.set(0, col, top);
            grid.set(SIZE - 1, col, bottom);
        }
        FourByFourBoard {
            grid,
            lines: windows(SIZE, SIZE, 3, |_, _| true),
            history: Vec::new(),
        }
    }

    fn step(&self, (row, col): Coord, (dr, dc): (isize, isize)) -> Option<Coord> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.grid.in_bounds(r, c).then_some((r, c))
    }
}

impl Default for FourByFourBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for FourByFourBoard {
    type Symbol = char;

    fn grid(&self) -> &Grid<char> {
        &self.grid
    }

    /// Slides made so far. The token count never changes.
    fn move_count(&self) -> usize {
        self.history.len()
    }

    fn players(&self) -> [char; 2] {
        [X, O]
    }

    fn update_board(&mut self, mv: &Move<char>) -> Result<(), MoveError> {
        let (from_row, from_col) = mv.from().ok_or(MoveError::MissingSource)?;
        let (to_row, to_col) = mv.target();
        check_mark(mv.symbol())?;
        if !self.grid.in_bounds(from_row, from_col) {
            return Err(MoveError::OutOfBounds {
                row: from_row,
                col: from_col,
            });
        }
        if !self.grid.in_bounds(to_row, to_col) {
            return Err(MoveError::OutOfBounds {
                row: to_row,
                col: to_col,
            });
        }
        if self.grid.get(from_row, from_col) != mv.symbol() {
            return Err(MoveError::NotOwnPiece {
                row: from_row,
                col: from_col,
            });
        }
        if self.grid.get(to_row, to_col) != BLANK {
            return Err(MoveError::Occupied {
                row: to_row,
                col: to_col,
            });
        }
        if from_row.abs_diff(to_row) + from_col.abs_diff(to_col) != 1 {
            return Err(MoveError::NotAdjacent);
        }

        self.grid.set(from_row, from_col, BLANK);
        self.grid.set(to_row, to_col, mv.symbol());
        self.history.push(*mv);
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Move<char>> {
        let mv = self.history.pop()?;
        let (from_row, from_col) = mv.from()?;
        self.grid.set(mv.row(), mv.col(), BLANK);
        self.grid.set(from_row, from_col, mv.symbol());
        Some(mv)
    }

    fn legal_moves(&self, player: char) -> Vec<Move<char>> {
        let mut moves = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.grid.get(row, col) != player {
                    continue;
                }
                for dir in STEPS {
                    if let Some(to) = self.step((row, col), dir) {
                        if self.grid.get(to.0, to.1) == BLANK {
                            moves.push(Move::slide((row, col), to, player));
                        }
                    }
                }
            }
        }
        moves
    }

    fn is_win(&self, player: char) -> bool {
        self.grid.count_lines(&self.lines, player) > 0
    }

    /// Tokens keep moving until someone lines up three.
    fn is_draw(&self, _player: char) -> bool {
        false
    }

    fn is_sliding(&self) -> bool {
        true
    }

    fn status(&self) -> Option<String> {
        Some("Choose one of your tokens, then an empty neighbour.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let board = FourByFourBoard::new();
        let matrix = board.grid().to_matrix();
        assert_eq!(matrix[0], vec![O, X, O, X]);
        assert_eq!(matrix[3], vec![X, O, X, O]);
        assert_eq!(board.grid().occupied(), 8);
        assert!(!board.is_win(X) && !board.is_win(O));
    }

    #[test]
    fn test_slide_moves_token() {
        let mut board = FourByFourBoard::new();
        board
            .update_board(&Move::slide((0, 1), (1, 1), X))
            .unwrap();
        assert_eq!(board.grid().get(0, 1), BLANK);
        assert_eq!(board.grid().get(1, 1), X);
        assert_eq!(board.move_count(), 1);
        assert_eq!(board.grid().occupied(), 8);
    }

    #[test]
    fn test_placement_without_source_rejected() {
        let mut board = FourByFourBoard::new();
        assert_eq!(
            board.update_board(&Move::place(1, 1, X)),
            Err(MoveError::MissingSource)
        );
    }

    #[test]
    fn test_cannot_move_opponent_token() {
        let mut board = FourByFourBoard::new();
        assert_eq!(
            board.update_board(&Move::slide((0, 0), (1, 0), X)),
            Err(MoveError::NotOwnPiece { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_diagonal_slide_rejected() {
        let mut board = FourByFourBoard::new();
        assert_eq!(
            board.update_board(&Move::slide((0, 1), (1, 2), X)),
            Err(MoveError::NotAdjacent)
        );
        assert_eq!(
            board.update_board(&Move::slide((0, 1), (2, 1), X)),
            Err(MoveError::NotAdjacent)
        );
        assert_eq!(board.grid().get(0, 1), X);
    }

    #[test]
    fn test_slide_into_token_rejected() {
        let mut board = FourByFourBoard::new();
        assert_eq!(
            board.update_board(&Move::slide((0, 1), (0, 2), X)),
            Err(MoveError::Occupied { row: 0, col: 2 })
        );
    }

    #[test]
    fn test_initial_legal_moves_step_forward() {
        let board = FourByFourBoard::new();
        let moves = board.legal_moves(X);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.from().is_some()));
        assert!(moves.contains(&Move::slide((0, 1), (1, 1), X)));
        assert!(moves.contains(&Move::slide((3, 0), (2, 0), X)));
    }

    #[test]
    fn test_three_on_anti_diagonal_wins() {
        let mut board = FourByFourBoard::new();
        board.update_board(&Move::slide((3, 2), (2, 2), X)).unwrap();
        board.update_board(&Move::slide((2, 2), (2, 1), X)).unwrap();
        board.update_board(&Move::slide((0, 3), (1, 3), X)).unwrap();
        assert!(!board.is_win(X));
        // (1, 2), (2, 1) and (3, 0) line up.
        board.update_board(&Move::slide((1, 3), (1, 2), X)).unwrap();
        assert!(board.is_win(X));
        assert!(!board.is_win(O));
        assert!(!board.is_draw(X));
    }

    #[test]
    fn test_undo_restores_source() {
        let mut board = FourByFourBoard::new();
        let before = board.grid().clone();
        board.update_board(&Move::slide((3, 0), (2, 0), X)).unwrap();
        board.undo_move();
        assert_eq!(board.grid(), &before);
        assert_eq!(board.move_count(), 0);
    }
}
