use super::{check_mark, BLANK, O, X};
use crate::game::{Board, Grid, Move, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Column ordering: center-first, so search meets strong moves early.
const MOVE_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Connect Four: tokens fall to the lowest empty row of the chosen column.
#[derive(Debug, Clone)]
pub struct ConnectFourBoard {
    grid: Grid<char>,
    /// Moves as played, with the landing row filled in.
    history: Vec<Move<char>>,
}

impl ConnectFourBoard {
    pub fn new() -> Self {
        ConnectFourBoard {
            grid: Grid::new(ROWS, COLS),
            history: Vec::new(),
        }
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.grid.get(0, col) != BLANK
    }

    /// Row a token dropped in `col` would land on. Row 0 is the top.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if self.is_column_full(col) {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.grid.get(row, col) == BLANK)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Check whether the token at (row, col) is part of four in a row.
    fn check_win(&self, row: usize, col: usize) -> bool {
        let cell = self.grid.get(row, col);
        if cell == BLANK {
            return false;
        }

        [(0, 1), (1, 0), (1, 1), (1, -1)].iter().any(|&(dr, dc)| {
            1 + self.count_direction(row, col, dr, dc, cell)
                + self.count_direction(row, col, -dr, -dc, cell)
                >= 4
        })
    }

    /// Consecutive `cell` tokens walking from (row, col), not counting it.
    fn count_direction(&self, row: usize, col: usize, dr: isize, dc: isize, cell: char) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while r >= 0
            && c >= 0
            && self.grid.try_get(r as usize, c as usize) == Some(cell)
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

impl Default for ConnectFourBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for ConnectFourBoard {
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

    /// Only the column matters; the row is decided by gravity.
    fn update_board(&mut self, mv: &Move<char>) -> Result<(), MoveError> {
        let col = mv.col();
        if col >= COLS {
            return Err(MoveError::OutOfBounds { row: mv.row(), col });
        }
        check_mark(mv.symbol())?;
        let row = self
            .landing_row(col)
            .ok_or(MoveError::Occupied { row: 0, col })?;
        self.grid.set(row, col, mv.symbol());
        self.history.push(Move::place(row, col, mv.symbol()));
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Move<char>> {
        let mv = self.history.pop()?;
        self.grid.set(mv.row(), mv.col(), BLANK);
        Some(mv)
    }

    fn legal_moves(&self, player: char) -> Vec<Move<char>> {
        MOVE_ORDER
            .iter()
            .filter_map(|&col| self.landing_row(col).map(|row| Move::place(row, col, player)))
            .collect()
    }

    /// A line can only appear on the move that completes it, so checking
    /// around the last token is enough.
    fn is_win(&self, player: char) -> bool {
        match self.history.last() {
            Some(last) if last.symbol() == player => self.check_win(last.row(), last.col()),
            _ => false,
        }
    }

    fn is_draw(&self, _player: char) -> bool {
        self.is_full() && !self.is_win(X) && !self.is_win(O)
    }

    fn status(&self) -> Option<String> {
        Some("Pick a column; the token drops to the bottom.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_piece(board: &mut ConnectFourBoard, col: usize, cell: char) -> usize {
        board.update_board(&Move::place(0, col, cell)).unwrap();
        board.history.last().unwrap().row()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = ConnectFourBoard::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.grid().get(row, col), BLANK);
            }
        }
    }

    #[test]
    fn test_drop_piece() {
        let mut board = ConnectFourBoard::new();

        let row = drop_piece(&mut board, 3, X);
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.grid().get(5, 3), X);

        let row = drop_piece(&mut board, 3, O);
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.grid().get(4, 3), O);
    }

    #[test]
    fn test_row_in_move_is_ignored() {
        let mut board = ConnectFourBoard::new();
        board.update_board(&Move::place(2, 1, X)).unwrap();
        assert_eq!(board.grid().get(5, 1), X);
        assert_eq!(board.grid().get(2, 1), BLANK);
    }

    #[test]
    fn test_column_full() {
        let mut board = ConnectFourBoard::new();
        for _ in 0..ROWS {
            drop_piece(&mut board, 0, X);
        }

        assert!(board.is_column_full(0));
        assert_eq!(
            board.update_board(&Move::place(0, 0, O)),
            Err(MoveError::Occupied { row: 0, col: 0 })
        );
        assert_eq!(board.move_count(), ROWS);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = ConnectFourBoard::new();
        assert_eq!(
            board.update_board(&Move::place(0, 7, X)),
            Err(MoveError::OutOfBounds { row: 0, col: 7 })
        );
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = ConnectFourBoard::new();
        for col in 0..4 {
            drop_piece(&mut board, col, X);
        }
        assert!(board.is_win(X));
        assert!(!board.is_win(O));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = ConnectFourBoard::new();
        for _ in 0..4 {
            drop_piece(&mut board, 3, O);
        }
        assert!(board.is_win(O));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = ConnectFourBoard::new();
        drop_piece(&mut board, 0, X);

        drop_piece(&mut board, 1, O);
        drop_piece(&mut board, 1, X);

        drop_piece(&mut board, 2, O);
        drop_piece(&mut board, 2, O);
        drop_piece(&mut board, 2, X);

        drop_piece(&mut board, 3, O);
        drop_piece(&mut board, 3, O);
        drop_piece(&mut board, 3, O);
        drop_piece(&mut board, 3, X);

        assert!(board.is_win(X));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = ConnectFourBoard::new();
        drop_piece(&mut board, 6, X);

        drop_piece(&mut board, 5, O);
        drop_piece(&mut board, 5, X);

        drop_piece(&mut board, 4, O);
        drop_piece(&mut board, 4, O);
        drop_piece(&mut board, 4, X);

        drop_piece(&mut board, 3, O);
        drop_piece(&mut board, 3, O);
        drop_piece(&mut board, 3, O);
        drop_piece(&mut board, 3, X);

        assert!(board.is_win(X));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = ConnectFourBoard::new();
        for col in 0..3 {
            drop_piece(&mut board, col, X);
        }
        assert!(!board.is_win(X));
    }

    #[test]
    fn test_legal_moves_center_first() {
        let board = ConnectFourBoard::new();
        let cols: Vec<usize> = board.legal_moves(X).iter().map(|m| m.col()).collect();
        assert_eq!(cols, vec![3, 2, 4, 1, 5, 0, 6]);
        assert!(board.legal_moves(X).iter().all(|m| m.row() == ROWS - 1));
    }

    #[test]
    fn test_undo_lifts_top_token() {
        let mut board = ConnectFourBoard::new();
        drop_piece(&mut board, 2, X);
        drop_piece(&mut board, 2, O);
        assert_eq!(board.undo_move(), Some(Move::place(4, 2, O)));
        assert_eq!(board.grid().get(4, 2), BLANK);
        assert_eq!(board.grid().get(5, 2), X);
        assert_eq!(board.landing_row(2), Some(4));
    }
}
