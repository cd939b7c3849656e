use super::{last_mover, BLANK, O, X};
use crate::game::{check_target, windows, Board, Dictionary, Grid, Line, Move, MoveError};

/// Word tic-tac-toe: players write letters; whoever completes a row,
/// column or diagonal that spells a dictionary word wins.
#[derive(Debug, Clone)]
pub struct WordBoard {
    grid: Grid<char>,
    lines: Vec<Line>,
    history: Vec<Move<char>>,
    dictionary: Dictionary,
}

impl WordBoard {
    pub fn new(dictionary: Dictionary) -> Self {
        WordBoard {
            grid: Grid::new(3, 3),
            lines: windows(3, 3, 3, |_, _| true),
            history: Vec::new(),
            dictionary,
        }
    }

    /// First complete line that spells a word, read top to bottom and left
    /// to right.
    pub fn formed_word(&self) -> Option<String> {
        self.lines.iter().find_map(|line| {
            let letters = self.grid.line_symbols(line);
            if letters.contains(&BLANK) {
                return None;
            }
            let word: String = letters.into_iter().collect();
            self.dictionary.contains(&word).then_some(word)
        })
    }
}

impl Board for WordBoard {
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
        if !mv.symbol().is_ascii_alphabetic() {
            return Err(MoveError::IllegalSymbol {
                symbol: mv.symbol().to_string(),
            });
        }
        let letter = mv.symbol().to_ascii_uppercase();
        self.grid.set(mv.row(), mv.col(), letter);
        self.history.push(Move::place(mv.row(), mv.col(), letter));
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Move<char>> {
        let mv = self.history.pop()?;
        self.grid.set(mv.row(), mv.col(), BLANK);
        Some(mv)
    }

    fn legal_moves(&self, player: char) -> Vec<Move<char>> {
        let letters = self.placeable_symbols(player);
        self.grid
            .blank_cells()
            .flat_map(|(r, c)| letters.iter().map(move |&l| Move::place(r, c, l)))
            .collect()
    }

    /// Letters belong to nobody, so the word goes to whoever wrote last.
    fn is_win(&self, player: char) -> bool {
        last_mover(self.players(), self.history.len()) == Some(player)
            && self.formed_word().is_some()
    }

    fn is_lose(&self, player: char) -> bool {
        last_mover(self.players(), self.history.len()).is_some_and(|last| last != player)
            && self.formed_word().is_some()
    }

    fn is_draw(&self, _player: char) -> bool {
        self.history.len() == 9 && self.formed_word().is_none()
    }

    fn placeable_symbols(&self, _player: char) -> Vec<char> {
        ('A'..='Z').collect()
    }

    fn status(&self) -> Option<String> {
        Some(format!("{} words in play", self.dictionary.len()))
    }
}
