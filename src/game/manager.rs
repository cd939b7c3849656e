use tracing::{info, instrument, warn};

use super::board::Board;
use super::player::{Player, PlayerFactory};
use super::symbol::Symbol;
use crate::config::SeatConfig;
use crate::error::{SessionError, UiError};
use crate::ui::Ui;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Index into the manager's players.
    Winner { seat: usize },
    Draw,
    /// The UI stopped the session before a terminal position.
    Abandoned,
}

impl GameOutcome {
    /// Message shown to the players at the end of a session.
    pub fn describe<S: Symbol>(&self, players: &[Player<S>; 2]) -> String {
        match *self {
            GameOutcome::Winner { seat } => {
                let winner = &players[seat];
                format!("{} ({}) wins!", winner.name(), winner.symbol())
            }
            GameOutcome::Draw => "It's a draw!".to_string(),
            GameOutcome::Abandoned => "Game abandoned.".to_string(),
        }
    }
}

/// Owns the board, both players and the UI for one session.
pub struct GameManager<S: Symbol, U: Ui<S>> {
    board: Box<dyn Board<Symbol = S>>,
    players: [Player<S>; 2],
    ui: U,
    current: usize,
}

impl<S: Symbol, U: Ui<S>> GameManager<S, U> {
    pub fn new(board: Box<dyn Board<Symbol = S>>, players: [Player<S>; 2], ui: U) -> Self {
        GameManager {
            board,
            players,
            ui,
            current: 0,
        }
    }

    /// Let the UI create both players, bound to the board's identity symbols.
    pub fn setup(
        board: Box<dyn Board<Symbol = S>>,
        mut ui: U,
        factory: &PlayerFactory,
        seats: &[SeatConfig; 2],
    ) -> Result<Self, SessionError> {
        let players = ui.setup_players(factory, seats, board.players())?;
        Ok(Self::new(board, players, ui))
    }

    pub fn board(&self) -> &dyn Board<Symbol = S> {
        &*self.board
    }

    pub fn players(&self) -> &[Player<S>; 2] {
        &self.players
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player<S> {
        &self.players[self.current]
    }

    pub fn into_ui(self) -> U {
        self.ui
    }

    /// Play until a terminal position or until the UI gives up.
    #[instrument(
        skip(self),
        fields(first = self.players[0].name(), second = self.players[1].name())
    )]
    pub fn run(&mut self) -> Result<GameOutcome, SessionError> {
        info!(
            first_kind = self.players[0].kind().name(),
            second_kind = self.players[1].kind().name(),
            "session started"
        );
        self.ui.show_board(&*self.board)?;

        let outcome = loop {
            if let Some(outcome) = self.play_turn()? {
                break outcome;
            }
        };

        self.ui
            .report_outcome(&*self.board, outcome, &self.players)?;
        info!(
            ?outcome,
            moves = self.board.move_count(),
            "session finished"
        );
        Ok(outcome)
    }

    /// Get one accepted move from the current player and apply it.
    ///
    /// Returns the outcome once the session is over.
    pub fn play_turn(&mut self) -> Result<Option<GameOutcome>, SessionError> {
        let seat = self.current;
        if self.board.legal_moves(self.players[seat].symbol()).is_empty() {
            info!(player = self.players[seat].name(), "no legal move left");
            return Ok(Some(GameOutcome::Draw));
        }

        loop {
            let mv = match self.ui.get_move(&mut self.players[seat], &mut *self.board) {
                Ok(mv) => mv,
                Err(UiError::Aborted | UiError::InputClosed) => {
                    return Ok(Some(GameOutcome::Abandoned));
                }
                Err(err) => return Err(err.into()),
            };

            match self.board.update_board(&mv) {
                Ok(()) => break,
                Err(err) => {
                    let player = &self.players[seat];
                    warn!(player = player.name(), %mv, %err, "move rejected");
                    if !player.is_human() {
                        return Err(SessionError::ComputerMoveRejected {
                            player: player.name().to_string(),
                            mv: mv.to_string(),
                            source: err,
                        });
                    }
                    self.ui.show_message(&format!("Invalid move: {err}. Try again."))?;
                }
            }
        }

        self.ui.show_board(&*self.board)?;
        if let Some(outcome) = self.check_terminal(seat) {
            return Ok(Some(outcome));
        }
        self.current = 1 - seat;
        Ok(None)
    }

    /// Inspect the position after `mover` played.
    ///
    /// The mover's own result is checked first; a mover that wins and makes
    /// the opponent lose in the same move is still one winner.
    fn check_terminal(&self, mover: usize) -> Option<GameOutcome> {
        let other = 1 - mover;
        let m = self.players[mover].symbol();
        let o = self.players[other].symbol();

        if self.board.is_win(m) || self.board.is_lose(o) {
            Some(GameOutcome::Winner { seat: mover })
        } else if self.board.is_win(o) || self.board.is_lose(m) {
            Some(GameOutcome::Winner { seat: other })
        } else if self.board.is_draw(m) || self.board.is_draw(o) {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::ai::Strategy;
    use crate::game::{Grid, Move, MoveError, PlayerKind};
    use crate::games::{ClassicBoard, MisereBoard};

    /// Plays back a fixed list of human moves and records what it was shown.
    #[derive(Default)]
    struct ScriptedUi {
        moves: VecDeque<Move<char>>,
        messages: Vec<String>,
        boards_shown: usize,
        reported: Option<GameOutcome>,
    }

    impl ScriptedUi {
        fn with_moves(moves: &[(usize, usize, char)]) -> Self {
            ScriptedUi {
                moves: moves.iter().map(|&(r, c, s)| Move::place(r, c, s)).collect(),
                ..Default::default()
            }
        }
    }

    impl Ui<char> for ScriptedUi {
        fn read_move(
            &mut self,
            _player: &Player<char>,
            _board: &dyn Board<Symbol = char>,
        ) -> Result<Move<char>, UiError> {
            self.moves.pop_front().ok_or(UiError::InputClosed)
        }

        fn show_board(&mut self, _board: &dyn Board<Symbol = char>) -> Result<(), UiError> {
            self.boards_shown += 1;
            Ok(())
        }

        fn show_message(&mut self, message: &str) -> Result<(), UiError> {
            self.messages.push(message.to_string());
            Ok(())
        }

        fn report_outcome(
            &mut self,
            _board: &dyn Board<Symbol = char>,
            outcome: GameOutcome,
            _players: &[Player<char>; 2],
        ) -> Result<(), UiError> {
            self.reported = Some(outcome);
            Ok(())
        }
    }

    fn humans() -> [Player<char>; 2] {
        [
            Player::new("Ann", 'X', PlayerKind::Human, None),
            Player::new("Bob", 'O', PlayerKind::Human, None),
        ]
    }

    fn factory(seed: u64) -> PlayerFactory {
        PlayerFactory {
            computer: PlayerKind::Random,
            depth: 9,
            pruning: true,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_first_player_wins_row() {
        let ui = ScriptedUi::with_moves(&[
            (0, 0, 'X'),
            (1, 0, 'O'),
            (0, 1, 'X'),
            (1, 1, 'O'),
            (0, 2, 'X'),
        ]);
        let mut manager = GameManager::new(Box::new(ClassicBoard::new()), humans(), ui);
        let outcome = manager.run().unwrap();

        assert_eq!(outcome, GameOutcome::Winner { seat: 0 });
        assert_eq!(manager.board().move_count(), 5);
        let ui = manager.into_ui();
        assert_eq!(ui.reported, Some(outcome));
        // Initial board plus one per accepted move.
        assert_eq!(ui.boards_shown, 6);
    }

    #[test]
    fn test_invalid_move_reprompts_same_player() {
        let ui = ScriptedUi::with_moves(&[(0, 0, 'X'), (0, 0, 'O'), (1, 1, 'O')]);
        let mut manager = GameManager::new(Box::new(ClassicBoard::new()), humans(), ui);

        assert_eq!(manager.play_turn().unwrap(), None);
        assert_eq!(manager.current_player().name(), "Bob");
        assert_eq!(manager.play_turn().unwrap(), None);
        assert_eq!(manager.board().grid().get(1, 1), 'O');
        assert_eq!(manager.current_player().name(), "Ann");

        let ui = manager.into_ui();
        assert_eq!(ui.messages.len(), 1);
        assert!(ui.messages[0].starts_with("Invalid move"));
    }

    #[test]
    fn test_closed_input_abandons() {
        let ui = ScriptedUi::with_moves(&[(1, 1, 'X')]);
        let mut manager = GameManager::new(Box::new(ClassicBoard::new()), humans(), ui);
        assert_eq!(manager.run().unwrap(), GameOutcome::Abandoned);
        assert_eq!(manager.board().move_count(), 1);
    }

    #[test]
    fn test_misere_line_makes_mover_lose() {
        let ui = ScriptedUi::with_moves(&[
            (0, 0, 'X'),
            (1, 0, 'O'),
            (0, 1, 'X'),
            (2, 2, 'O'),
            (0, 2, 'X'),
        ]);
        let mut manager = GameManager::new(Box::new(MisereBoard::new()), humans(), ui);
        assert_eq!(manager.run().unwrap(), GameOutcome::Winner { seat: 1 });
    }

    #[test]
    fn test_perfect_play_draws() {
        let board: Box<dyn Board<Symbol = char>> = Box::new(ClassicBoard::new());
        let seats = [
            SeatConfig::new("A", PlayerKind::Ai),
            SeatConfig::new("B", PlayerKind::Ai),
        ];
        let mut manager =
            GameManager::setup(board, ScriptedUi::default(), &factory(1), &seats).unwrap();
        assert_eq!(manager.players()[0].symbol(), 'X');
        assert_eq!(manager.players()[1].symbol(), 'O');
        assert_eq!(manager.run().unwrap(), GameOutcome::Draw);
        assert_eq!(manager.board().move_count(), 9);
    }

    #[test]
    fn test_random_players_finish() {
        for seed in 0..20 {
            let board: Box<dyn Board<Symbol = char>> = Box::new(ClassicBoard::new());
            let seats = [
                SeatConfig::new("A", PlayerKind::Random),
                SeatConfig::new("B", PlayerKind::Computer),
            ];
            let mut manager =
                GameManager::setup(board, ScriptedUi::default(), &factory(seed), &seats).unwrap();
            let outcome = manager.run().unwrap();
            assert_ne!(outcome, GameOutcome::Abandoned);
        }
    }

    /// A board where nobody can ever move.
    struct StuckBoard {
        grid: Grid<char>,
    }

    impl Board for StuckBoard {
        type Symbol = char;

        fn grid(&self) -> &Grid<char> {
            &self.grid
        }

        fn move_count(&self) -> usize {
            0
        }

        fn players(&self) -> [char; 2] {
            ['X', 'O']
        }

        fn update_board(&mut self, _mv: &Move<char>) -> Result<(), MoveError> {
            Err(MoveError::NotAdjacent)
        }

        fn undo_move(&mut self) -> Option<Move<char>> {
            None
        }

        fn legal_moves(&self, _player: char) -> Vec<Move<char>> {
            Vec::new()
        }

        fn is_win(&self, _player: char) -> bool {
            false
        }

        fn is_draw(&self, _player: char) -> bool {
            false
        }
    }

    #[test]
    fn test_no_legal_move_is_draw() {
        let board = Box::new(StuckBoard {
            grid: Grid::new(2, 2),
        });
        let mut manager = GameManager::new(board, humans(), ScriptedUi::default());
        assert_eq!(manager.run().unwrap(), GameOutcome::Draw);
    }

    struct StubbornStrategy;

    impl Strategy<char> for StubbornStrategy {
        fn choose_move(
            &mut self,
            _board: &mut dyn Board<Symbol = char>,
            player: char,
        ) -> Option<Move<char>> {
            Some(Move::place(0, 0, player))
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    #[test]
    fn test_rejected_computer_move_is_an_error() {
        let players = [
            Player::new("Ann", 'X', PlayerKind::Human, None),
            Player::new("Bot", 'O', PlayerKind::Computer, Some(Box::new(StubbornStrategy))),
        ];
        let ui = ScriptedUi::with_moves(&[(0, 0, 'X')]);
        let mut manager = GameManager::new(Box::new(ClassicBoard::new()), players, ui);
        let err = manager.run().unwrap_err();
        assert!(matches!(
            err,
            SessionError::ComputerMoveRejected {
                source: MoveError::Occupied { row: 0, col: 0 },
                ..
            }
        ));
    }

    #[test]
    fn test_outcome_description() {
        let players = humans();
        assert_eq!(
            GameOutcome::Winner { seat: 1 }.describe(&players),
            "Bob (O) wins!"
        );
        assert_eq!(GameOutcome::Draw.describe(&players), "It's a draw!");
    }
}
