use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use super::board_view::board_lines;
use super::Ui;
use crate::error::UiError;
use crate::game::{Board, Coord, GameOutcome, Move, Player, Symbol};
use crate::games::GameKind;

/// What a key press did to the move being composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction<S> {
    Continue,
    Submit(Move<S>),
    Quit,
}

/// Full-screen front end: a cursor over the board, a status header, a
/// message line and a controls panel.
pub struct TerminalUi<B: Backend> {
    terminal: Terminal<B>,
    title: String,
    cursor: Option<Coord>,
    /// Token picked up by a sliding move.
    source: Option<Coord>,
    /// Last symbol key typed, for boards offering several symbols.
    symbol_key: Option<char>,
    prompt: String,
    message: Option<String>,
    /// Show concealed marks; set once the game is over.
    reveal: bool,
    /// Owns the real terminal: waits for keys and restores the screen on drop.
    interactive: bool,
}

impl TerminalUi<CrosstermBackend<io::Stdout>> {
    /// Switch the terminal to raw mode on the alternate screen.
    pub fn enter(kind: GameKind) -> Result<Self, UiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };
        let mut ui = TerminalUi::new(terminal, kind);
        ui.interactive = true;
        Ok(ui)
    }
}

impl<B: Backend> TerminalUi<B>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    /// Wrap an already prepared terminal. The rules are shown until the
    /// first key press.
    pub fn new(terminal: Terminal<B>, kind: GameKind) -> Self {
        TerminalUi {
            terminal,
            title: kind.title().to_string(),
            cursor: None,
            source: None,
            symbol_key: None,
            prompt: String::new(),
            message: Some(kind.rules().to_string()),
            reveal: false,
            interactive: false,
        }
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Start the cursor in the middle of a fresh board.
    fn ensure_cursor<S: Symbol>(&mut self, board: &dyn Board<Symbol = S>) {
        if self.cursor.is_none() {
            self.cursor = Some((board.rows() / 2, board.cols() / 2));
        }
    }

    fn draw<S: Symbol>(&mut self, board: &dyn Board<Symbol = S>) -> Result<(), UiError> {
        let mut header = vec![Line::from(self.prompt.clone())];
        if let Some(status) = board.status() {
            header.push(Line::from(status));
        }
        let screen = Screen {
            title: self.title.clone(),
            header,
            board: board_lines(board, self.cursor, self.source, self.reveal),
            message: self.message.clone().unwrap_or_default(),
            controls: controls(board),
        };
        self.terminal
            .draw(|frame| screen.render(frame))
            .map_err(|e| UiError::Io(io::Error::other(e)))?;
        Ok(())
    }

    fn handle_key<S: Symbol>(
        &mut self,
        key: KeyEvent,
        board: &dyn Board<Symbol = S>,
        player: S,
    ) -> KeyAction<S> {
        // Clear message on any key press
        self.message = None;
        let (row, col) = self.cursor.unwrap_or((0, 0));

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Up => self.cursor = Some((row.saturating_sub(1), col)),
            KeyCode::Down => self.cursor = Some(((row + 1).min(board.rows() - 1), col)),
            KeyCode::Left => self.cursor = Some((row, col.saturating_sub(1))),
            KeyCode::Right => self.cursor = Some((row, (col + 1).min(board.cols() - 1))),
            KeyCode::Enter | KeyCode::Char(' ') => return self.submit(board, player),
            KeyCode::Char(key) => {
                let choices = board.placeable_symbols(player);
                match S::from_key(key) {
                    Some(symbol) if choices.len() > 1 && choices.contains(&symbol) => {
                        self.symbol_key = Some(key);
                        self.message = Some(format!("Writing {symbol}"));
                    }
                    _ => self.message = Some(format!("'{key}' is not a symbol you can write")),
                }
            }
            _ => {}
        }
        KeyAction::Continue
    }

    fn submit<S: Symbol>(&mut self, board: &dyn Board<Symbol = S>, player: S) -> KeyAction<S> {
        let Some(cursor) = self.cursor else {
            return KeyAction::Continue;
        };

        if board.is_sliding() {
            return match self.source.take() {
                None => {
                    self.source = Some(cursor);
                    self.message = Some("Pick the destination cell".to_string());
                    KeyAction::Continue
                }
                Some(from) if from == cursor => {
                    self.message = Some("Selection cleared".to_string());
                    KeyAction::Continue
                }
                Some(from) => KeyAction::Submit(Move::slide(from, cursor, player)),
            };
        }

        let choices = board.placeable_symbols(player);
        let symbol = match choices.as_slice() {
            [only] => Some(*only),
            _ => self
                .symbol_key
                .and_then(S::from_key)
                .filter(|s| choices.contains(s)),
        };
        match symbol {
            Some(symbol) => KeyAction::Submit(Move::place(cursor.0, cursor.1, symbol)),
            None => {
                self.message = Some("Type the symbol to write first".to_string());
                KeyAction::Continue
            }
        }
    }

    /// Block until any key is pressed.
    fn wait_for_key(&mut self) -> Result<(), UiError> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(());
                }
            }
        }
    }
}

impl<S: Symbol, B: Backend> Ui<S> for TerminalUi<B>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    fn get_move(
        &mut self,
        player: &mut Player<S>,
        board: &mut dyn Board<Symbol = S>,
    ) -> Result<Move<S>, UiError> {
        if player.is_human() {
            return self.read_move(player, &*board);
        }
        self.prompt = format!("{} ({}) is thinking...", player.name(), player.symbol());
        self.draw(&*board)?;
        let mv = player
            .generate_move(board)
            .ok_or_else(|| UiError::NoMoveAvailable(player.name().to_string()))?;
        self.message = Some(format!("{} played {mv}", player.name()));
        Ok(mv)
    }

    fn read_move(
        &mut self,
        player: &Player<S>,
        board: &dyn Board<Symbol = S>,
    ) -> Result<Move<S>, UiError> {
        self.ensure_cursor(board);
        self.source = None;
        self.symbol_key = None;
        self.prompt = format!("{} ({}) to move", player.name(), player.symbol());

        loop {
            self.draw(board)?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match self.handle_key(key, board, player.symbol()) {
                KeyAction::Submit(mv) => return Ok(mv),
                KeyAction::Quit => return Err(UiError::Aborted),
                KeyAction::Continue => {}
            }
        }
    }

    fn show_board(&mut self, board: &dyn Board<Symbol = S>) -> Result<(), UiError> {
        self.ensure_cursor(board);
        self.draw(board)
    }

    fn show_message(&mut self, message: &str) -> Result<(), UiError> {
        self.message = Some(message.to_string());
        Ok(())
    }

    fn report_outcome(
        &mut self,
        board: &dyn Board<Symbol = S>,
        outcome: GameOutcome,
        players: &[Player<S>; 2],
    ) -> Result<(), UiError> {
        self.prompt = outcome.describe(players);
        self.source = None;
        self.reveal = true;
        self.message = Some("Press any key to exit.".to_string());
        self.draw(board)?;
        if self.interactive {
            self.wait_for_key()?;
        }
        Ok(())
    }
}

impl<B: Backend> Drop for TerminalUi<B> {
    fn drop(&mut self) {
        if self.interactive {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = self.terminal.show_cursor();
        }
    }
}

fn controls<S: Symbol>(board: &dyn Board<Symbol = S>) -> Vec<Line<'static>> {
    let enter = if board.is_sliding() {
        "Enter: Pick up / Put down"
    } else {
        "Enter: Place"
    };
    let mut lines = vec![Line::from(format!(
        "←↑↓→: Move  |  {enter}  |  q/Esc: Quit"
    ))];
    let [first, _] = board.players();
    if board.placeable_symbols(first).len() > 1 {
        lines.push(Line::from(vec![
            Span::styled(
                "Symbol",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(": type the key of the symbol to write before Enter (Shift+Q for Q)"),
        ]));
    }
    lines
}

/// One frame's worth of content, prepared before drawing.
struct Screen {
    title: String,
    header: Vec<Line<'static>>,
    board: Vec<Line<'static>>,
    message: String,
    controls: Vec<Line<'static>>,
}

impl Screen {
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),                      // Header
                Constraint::Min(self.board.len() as u16),   // Board
                Constraint::Length(3),                      // Message
                Constraint::Length(4),                      // Controls
            ])
            .split(frame.area());

        let header = Paragraph::new(self.header.clone())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title.clone()),
            );
        frame.render_widget(header, chunks[0]);

        let board = Paragraph::new(self.board.clone()).alignment(Alignment::Center);
        frame.render_widget(board, chunks[1]);

        let message = Paragraph::new(self.message.clone())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(message, chunks[2]);

        let controls = Paragraph::new(self.controls.clone())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Controls"));
        frame.render_widget(controls, chunks[3]);
    }
}
