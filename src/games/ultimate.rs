use super::{check_mark, BLANK, O, X};
use crate::game::{check_target, windows, Board, Coord, Grid, Line, Move, MoveError};

const SUB: usize = 3;
const SIZE: usize = SUB * SUB;

#[derive(Debug, Clone, Copy)]
struct Turn {
    mv: Move<char>,
    active_before: Option<Coord>,
    claimed: bool,
}

/// Ultimate tic-tac-toe: nine 3x3 sub-boards arranged in a 3x3 main board.
///
/// The cell played inside a sub-board names the sub-board the opponent must
/// play in next. Winning a sub-board claims its square on the main board.
#[derive(Debug, Clone)]
pub struct UltimateBoard {
    grid: Grid<char>,
    /// Claimed sub-boards.
    main: Grid<char>,
    lines: Vec<Line>,
    active: Option<Coord>,
    history: Vec<Turn>,
}

impl UltimateBoard {
    pub fn new() -> Self {
        UltimateBoard {
            grid: Grid::new(SIZE, SIZE),
            main: Grid::new(SUB, SUB),
            lines: windows(SUB, SUB, SUB, |_, _| true),
            active: None,
            history: Vec::new(),
        }
    }

    /// Sub-board the next move must go to, or `None` for free choice.
    pub fn active_sub_board(&self) -> Option<Coord> {
        self.active
    }

    /// The claimed-sub-board grid.
    pub fn main_board(&self) -> &Grid<char> {
        &self.main
    }

    fn sub_is_full(&self, (sr, sc): Coord) -> bool {
        (0..SUB).all(|r| (0..SUB).all(|c| self.grid.get(sr * SUB + r, sc * SUB + c) != BLANK))
    }

    /// A sub-board accepts no more moves once it is won or full.
    fn sub_is_closed(&self, sub: Coord) -> bool {
        self.main.get(sub.0, sub.1) != BLANK || self.sub_is_full(sub)
    }

    fn sub_has_line(&self, (sr, sc): Coord, symbol: char) -> bool {
        self.lines.iter().any(|line| {
            line.cells()
                .iter()
                .all(|&(r, c)| self.grid.get(sr * SUB + r, sc * SUB + c) == symbol)
        })
    }

    /// Check the sub-board rules for a move at (row, col).
    fn validate(&self, row: usize, col: usize) -> Result<Coord, MoveError> {
        let sub = (row / SUB, col / SUB);
        if self.sub_is_closed(sub) {
            return Err(MoveError::SubBoardClosed {
                sub_row: sub.0,
                sub_col: sub.1,
            });
        }
        if let Some(active) = self.active {
            if active != sub {
                return Err(MoveError::WrongSubBoard {
                    sub_row: active.0,
                    sub_col: active.1,
                });
            }
        }
        Ok(sub)
    }
}

impl Default for UltimateBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for UltimateBoard {
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
        check_target(&*self, mv.row(), mv.col())?;
        check_mark(mv.symbol())?;
        let sub = self.validate(mv.row(), mv.col())?;

        self.grid.set(mv.row(), mv.col(), mv.symbol());
        let claimed = self.sub_has_line(sub, mv.symbol());
        if claimed {
            self.main.set(sub.0, sub.1, mv.symbol());
        }

        let active_before = self.active;
        let next = (mv.row() % SUB, mv.col() % SUB);
        self.active = (!self.sub_is_closed(next)).then_some(next);

        self.history.push(Turn {
            mv: *mv,
            active_before,
            claimed,
        });
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Move<char>> {
        let turn = self.history.pop()?;
        let mv = turn.mv;
        if turn.claimed {
            self.main.set(mv.row() / SUB, mv.col() / SUB, BLANK);
        }
        self.grid.set(mv.row(), mv.col(), BLANK);
        self.active = turn.active_before;
        Some(mv)
    }

    fn legal_moves(&self, player: char) -> Vec<Move<char>> {
        self.grid
            .blank_cells()
            .filter(|&(r, c)| self.validate(r, c).is_ok())
            .map(|(r, c)| Move::place(r, c, player))
            .collect()
    }

    fn is_win(&self, player: char) -> bool {
        self.main.count_lines(&self.lines, player) > 0
    }

    fn is_draw(&self, _player: char) -> bool {
        let all_closed = (0..SUB).all(|r| (0..SUB).all(|c| self.sub_is_closed((r, c))));
        all_closed && !self.is_win(X) && !self.is_win(O)
    }

    fn status(&self) -> Option<String> {
        Some(match self.active {
            Some((r, c)) => format!("play in sub-board ({r}, {c})"),
            None => "play in any open sub-board".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: &mut UltimateBoard, moves: &[(usize, usize, char)]) {
        for &(r, c, s) in moves {
            board.update_board(&Move::place(r, c, s)).unwrap();
        }
    }

    #[test]
    fn test_first_move_is_free() {
        let board = UltimateBoard::new();
        assert_eq!(board.active_sub_board(), None);
        assert_eq!(board.legal_moves(X).len(), 81);
    }

    #[test]
    fn test_cell_sends_opponent() {
        let mut board = UltimateBoard::new();
        // Top-right cell of the center sub-board.
        play(&mut board, &[(3, 5, X)]);
        assert_eq!(board.active_sub_board(), Some((0, 2)));
        assert_eq!(board.legal_moves(O).len(), 9);
        assert_eq!(
            board.update_board(&Move::place(8, 8, O)),
            Err(MoveError::WrongSubBoard {
                sub_row: 0,
                sub_col: 2
            })
        );
        play(&mut board, &[(1, 7, O)]);
        assert_eq!(board.active_sub_board(), Some((1, 1)));
    }

    /// X takes the top row of sub-board (0, 0); O keeps sending X back
    /// there by answering in the top-left cell of its own sub-board.
    const CLAIM_TOP_LEFT: [(usize, usize, char); 7] = [
        (4, 4, X),
        (3, 3, O),
        (0, 1, X),
        (0, 3, O),
        (0, 2, X),
        (0, 6, O),
        (0, 0, X),
    ];

    #[test]
    fn test_winning_sub_board_claims_it() {
        let mut board = UltimateBoard::new();
        play(&mut board, &CLAIM_TOP_LEFT);
        assert_eq!(board.main_board().get(0, 0), X);
        assert!(matches!(
            board.update_board(&Move::place(1, 1, O)),
            Err(MoveError::SubBoardClosed {
                sub_row: 0,
                sub_col: 0
            })
        ));
    }

    #[test]
    fn test_sent_to_closed_board_frees_choice() {
        let mut board = UltimateBoard::new();
        play(&mut board, &CLAIM_TOP_LEFT);
        // The winning cell (0, 0) points at the sub-board it just closed.
        assert_eq!(board.active_sub_board(), None);
        let moves = board.legal_moves(O);
        assert_eq!(moves.len(), 81 - 7 - 6);
        assert!(moves.iter().all(|m| (m.row() / 3, m.col() / 3) != (0, 0)));
    }

    #[test]
    fn test_undo_restores_claim_and_active() {
        let mut board = UltimateBoard::new();
        play(&mut board, &CLAIM_TOP_LEFT[..6]);
        assert_eq!(board.active_sub_board(), Some((0, 0)));
        play(&mut board, &CLAIM_TOP_LEFT[6..]);
        board.undo_move();
        assert_eq!(board.main_board().get(0, 0), BLANK);
        assert_eq!(board.active_sub_board(), Some((0, 0)));
        assert_eq!(board.grid().get(0, 0), BLANK);
    }

    #[test]
    fn test_main_line_wins() {
        let mut board = UltimateBoard::new();
        for c in 0..3 {
            board.main.set(0, c, O);
        }
        assert!(board.is_win(O));
        assert!(!board.is_win(X));
    }
}
