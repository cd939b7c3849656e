use super::last_mover;
use crate::game::{check_target, windows, Board, Grid, Line, Move, MoveError, Symbol};

/// Identity of the side writing odd numbers. Moves first.
pub const ODD: u8 = 1;
/// Identity of the side writing even numbers.
pub const EVEN: u8 = 2;

const TARGET: u32 = 15;

/// Numerical tic-tac-toe: each number 1..=9 may be written once, odd numbers
/// by the first player and even ones by the second. A full line summing to
/// 15 wins for whoever completed it.
#[derive(Debug, Clone)]
pub struct NumericalBoard {
    grid: Grid<u8>,
    lines: Vec<Line>,
    history: Vec<Move<u8>>,
}

impl NumericalBoard {
    pub fn new() -> Self {
        NumericalBoard {
            grid: Grid::new(3, 3),
            lines: windows(3, 3, 3, |_, _| true),
            history: Vec::new(),
        }
    }

    pub fn is_used(&self, number: u8) -> bool {
        self.history.iter().any(|m| m.symbol() == number)
    }

    fn parity_of(player: u8) -> u8 {
        if player == EVEN {
            0
        } else {
            1
        }
    }

    fn has_winning_line(&self) -> bool {
        self.lines.iter().any(|line| {
            let values = self.grid.line_symbols(line);
            values.iter().all(|v| !v.is_blank())
                && values.iter().map(|&v| u32::from(v)).sum::<u32>() == TARGET
        })
    }
}

impl Default for NumericalBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for NumericalBoard {
    type Symbol = u8;

    fn grid(&self) -> &Grid<u8> {
        &self.grid
    }

    fn move_count(&self) -> usize {
        self.history.len()
    }

    fn players(&self) -> [u8; 2] {
        [ODD, EVEN]
    }

    fn update_board(&mut self, mv: &Move<u8>) -> Result<(), MoveError> {
        check_target(&*self, mv.row(), mv.col())?;
        let number = mv.symbol();
        let to_move = self.players()[self.history.len() % 2];
        if !(1..=9).contains(&number) || number % 2 != Self::parity_of(to_move) {
            return Err(MoveError::IllegalSymbol {
                symbol: number.to_string(),
            });
        }
        if self.is_used(number) {
            return Err(MoveError::SymbolUsed(number.to_string()));
        }
        self.grid.set(mv.row(), mv.col(), number);
        self.history.push(*mv);
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Move<u8>> {
        let mv = self.history.pop()?;
        self.grid.set(mv.row(), mv.col(), u8::BLANK);
        Some(mv)
    }

    fn legal_moves(&self, player: u8) -> Vec<Move<u8>> {
        let numbers = self.placeable_symbols(player);
        self.grid
            .blank_cells()
            .flat_map(|(r, c)| numbers.iter().map(move |&n| Move::place(r, c, n)))
            .collect()
    }

    /// The line's completer wins, so only the last mover can hold a win.
    fn is_win(&self, player: u8) -> bool {
        last_mover(self.players(), self.history.len()) == Some(player) && self.has_winning_line()
    }

    fn is_lose(&self, player: u8) -> bool {
        last_mover(self.players(), self.history.len()).is_some_and(|last| last != player)
            && self.has_winning_line()
    }

    fn is_draw(&self, _player: u8) -> bool {
        self.history.len() == 9 && !self.has_winning_line()
    }

    fn placeable_symbols(&self, player: u8) -> Vec<u8> {
        let parity = Self::parity_of(player);
        (1..=9)
            .filter(|n| n % 2 == parity && !self.is_used(*n))
            .collect()
    }

    fn status(&self) -> Option<String> {
        let list = |player| {
            self.placeable_symbols(player)
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };
        Some(format!("odd left: {}  even left: {}", list(ODD), list(EVEN)))
    }
}
