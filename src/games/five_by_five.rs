use super::{check_mark, BLANK, O, X};
use crate::game::{check_target, windows, Board, Grid, Line, Move, MoveError};

/// Moves played before the game is scored. One cell stays empty.
pub const MOVE_LIMIT: usize = 24;

/// 5x5 tic-tac-toe scored on overlapping three-in-a-rows.
#[derive(Debug, Clone)]
pub struct FiveByFiveBoard {
    grid: Grid<char>,
    lines: Vec<Line>,
    history: Vec<Move<char>>,
}

impl FiveByFiveBoard {
    pub fn new() -> Self {
        FiveByFiveBoard {
            grid: Grid::new(5, 5),
            lines: windows(5, 5, 3, |_, _| true),
            history: Vec::new(),
        }
    }

    /// Three-cell windows fully held by `symbol`, overlaps counted.
    pub fn score(&self, symbol: char) -> usize {
        self.grid.count_lines(&self.lines, symbol)
    }

    fn finished(&self) -> bool {
        self.history.len() >= MOVE_LIMIT
    }
}

impl Default for FiveByFiveBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for FiveByFiveBoard {
    type Symbol = char;

    fn grid(&self) -> &Grid<char> {
        &self.grid
    }

    fn move_count(&self) -> usize {
        self.history.len()
    }

    fn players(&self) -> [char; 2] {
        [X, O]
    }

    fn update_board(&mut self, mv: &Move<char>) -> Result<(), MoveError> {
        if self.finished() {
            return Err(MoveError::MoveLimitReached);
        }
        check_target(&*self, mv.row(), mv.col())?;
        check_mark(mv.symbol())?;
        self.grid.set(mv.row(), mv.col(), mv.symbol());
        self.history.push(*mv);
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Move<char>> {
        let mv = self.history.pop()?;
        self.grid.set(mv.row(), mv.col(), BLANK);
        Some(mv)
    }

    fn legal_moves(&self, player: char) -> Vec<Move<char>> {
        if self.finished() {
            return Vec::new();
        }
        self.grid
            .blank_cells()
            .map(|(r, c)| Move::place(r, c, player))
            .collect()
    }

    fn is_win(&self, player: char) -> bool {
        self.finished() && self.score(player) > self.score(self.opponent(player))
    }

    fn is_lose(&self, player: char) -> bool {
        self.finished() && self.score(player) < self.score(self.opponent(player))
    }

    fn is_draw(&self, _player: char) -> bool {
        self.finished() && self.score(X) == self.score(O)
    }

    fn status(&self) -> Option<String> {
        Some(format!(
            "X: {}  O: {}  moves left: {}",
            self.score(X),
            self.score(O),
            MOVE_LIMIT.saturating_sub(self.history.len())
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fill 24 cells row-major, alternating X and O, leaving (4, 4) empty.
    fn fill_alternating(board: &mut FiveByFiveBoard) {
        for i in 0..MOVE_LIMIT {
            let symbol = if i % 2 == 0 { X } else { O };
            board
                .update_board(&Move::place(i / 5, i % 5, symbol))
                .unwrap();
        }
    }

    #[test]
    fn test_forty_eight_windows() {
        assert_eq!(FiveByFiveBoard::new().lines.len(), 48);
    }

    #[test]
    fn test_not_over_before_limit() {
        let mut board = FiveByFiveBoard::new();
        for c in 0..3 {
            board.update_board(&Move::place(0, c, X)).unwrap();
        }
        assert_eq!(board.score(X), 1);
        assert!(!board.is_win(X));
        assert!(!board.game_is_over(X));
    }

    #[test]
    fn test_limit_rejects_further_moves() {
        let mut board = FiveByFiveBoard::new();
        fill_alternating(&mut board);
        assert_eq!(
            board.update_board(&Move::place(4, 4, X)),
            Err(MoveError::MoveLimitReached)
        );
        assert!(board.legal_moves(X).is_empty());
        assert!(board.game_is_over(X));
    }

    #[test]
    fn test_scoring_decides_result() {
        let mut board = FiveByFiveBoard::new();
        fill_alternating(&mut board);
        // Alternating row-major fill on an odd width puts the same symbol
        // along every diagonal: X ends with 9 windows, O with 8.
        let (x, o) = (board.score(X), board.score(O));
        assert!(x != o);
        let winner = if x > o { X } else { O };
        assert!(board.is_win(winner));
        assert!(board.is_lose(board.opponent(winner)));
        assert!(!board.is_draw(X));
    }

    #[test]
    fn test_equal_scores_draw() {
        let mut board = FiveByFiveBoard::new();
        // Columns of two, so nobody ever owns three in a line.
        let pattern = ["XXOOX", "OOXXO", "XXOOX", "OOXXO", "XXOO."];
        let mut xs = Vec::new();
        let mut os = Vec::new();
        for (r, row) in pattern.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                match ch {
                    'X' => xs.push((r, c)),
                    'O' => os.push((r, c)),
                    _ => {}
                }
            }
        }
        for ((xr, xc), (or, oc)) in xs.into_iter().zip(os) {
            board.update_board(&Move::place(xr, xc, X)).unwrap();
            board.update_board(&Move::place(or, oc, O)).unwrap();
        }
        assert_eq!(board.move_count(), MOVE_LIMIT);
        assert_eq!(board.score(X), board.score(O));
        assert!(board.is_draw(X));
        assert!(!board.is_win(X) && !board.is_win(O));
    }
}
