use std::io::{self, BufRead, Write};

use super::board_view::{board_text, move_hint};
use super::Ui;
use crate::error::{ParseMoveError, UiError};
use crate::game::{Board, GameOutcome, Move, Player, Symbol};

/// Line-based front end over any reader and writer.
pub struct ConsoleUi<R, W> {
    input: R,
    output: W,
}

impl ConsoleUi<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        ConsoleUi::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsoleUi { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parse one line of human input into a move for `player`.
///
/// Sliding boards take `from_row from_col to_row to_col`. Boards offering a
/// single symbol take `row col`; the symbol may still be given as a third
/// value. Other boards require `row col symbol`. Coordinates are 0-based and
/// only checked by the board.
pub fn parse_move<S: Symbol>(
    line: &str,
    board: &dyn Board<Symbol = S>,
    player: S,
) -> Result<Move<S>, ParseMoveError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if board.is_sliding() {
        let [fr, fc, tr, tc] = numbers::<4>(&tokens)?;
        return Ok(Move::slide((fr, fc), (tr, tc), player));
    }

    let choices = board.placeable_symbols(player);
    match (tokens.len(), choices.as_slice()) {
        (2, [only]) => {
            let [row, col] = numbers::<2>(&tokens)?;
            Ok(Move::place(row, col, *only))
        }
        (3, _) => {
            let [row, col] = numbers::<2>(&tokens[..2])?;
            Ok(Move::place(row, col, parse_symbol(tokens[2])?))
        }
        (found, [_]) if found < 2 => Err(ParseMoveError::WrongArity { expected: 2, found }),
        (found, _) => Err(ParseMoveError::WrongArity { expected: 3, found }),
    }
}

fn numbers<const N: usize>(tokens: &[&str]) -> Result<[usize; N], ParseMoveError> {
    if tokens.len() != N {
        return Err(ParseMoveError::WrongArity {
            expected: N,
            found: tokens.len(),
        });
    }
    let mut out = [0; N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = token
            .parse()
            .map_err(|_| ParseMoveError::NotANumber(token.to_string()))?;
    }
    Ok(out)
}

fn parse_symbol<S: Symbol>(token: &str) -> Result<S, ParseMoveError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => {
            S::from_key(key).ok_or_else(|| ParseMoveError::UnknownSymbol(token.to_string()))
        }
        _ => Err(ParseMoveError::UnknownSymbol(token.to_string())),
    }
}

impl<S: Symbol, R: BufRead, W: Write> Ui<S> for ConsoleUi<R, W> {
    fn get_move(
        &mut self,
        player: &mut Player<S>,
        board: &mut dyn Board<Symbol = S>,
    ) -> Result<Move<S>, UiError> {
        if player.is_human() {
            return self.read_move(player, &*board);
        }
        let mv = player
            .generate_move(board)
            .ok_or_else(|| UiError::NoMoveAvailable(player.name().to_string()))?;
        writeln!(self.output, "{} plays {mv}", player.name())?;
        Ok(mv)
    }

    fn read_move(
        &mut self,
        player: &Player<S>,
        board: &dyn Board<Symbol = S>,
    ) -> Result<Move<S>, UiError> {
        let hint = move_hint(board, player.symbol());
        loop {
            write!(
                self.output,
                "{} ({}) enter {hint}, or q to quit: ",
                player.name(),
                player.symbol()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(UiError::InputClosed);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                return Err(UiError::Aborted);
            }

            match parse_move(line, board, player.symbol()) {
                Ok(mv) => return Ok(mv),
                Err(err) => writeln!(self.output, "Invalid input: {err}")?,
            }
        }
    }

    fn show_board(&mut self, board: &dyn Board<Symbol = S>) -> Result<(), UiError> {
        writeln!(self.output)?;
        write!(self.output, "{}", board_text(board, false))?;
        if let Some(status) = board.status() {
            writeln!(self.output, "{status}")?;
        }
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> Result<(), UiError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn report_outcome(
        &mut self,
        board: &dyn Board<Symbol = S>,
        outcome: GameOutcome,
        players: &[Player<S>; 2],
    ) -> Result<(), UiError> {
        if board.conceals_marks() {
            writeln!(self.output)?;
            write!(self.output, "{}", board_text(board, true))?;
        }
        writeln!(self.output, "{}", outcome.describe(players))?;
        self.output.flush()?;
        Ok(())
    }
}
