use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::game::{Board, Coord, Symbol};

/// Marks are hidden while the board conceals them, unless `reveal` is set.
fn hides_marks<S: Symbol>(board: &dyn Board<Symbol = S>, reveal: bool) -> bool {
    board.conceals_marks() && !reveal
}

/// Text of a single cell: blank cells show `.`, cells off the board's shape
/// show nothing, concealed marks show `*`.
pub(crate) fn cell_text<S: Symbol>(
    board: &dyn Board<Symbol = S>,
    row: usize,
    col: usize,
    reveal: bool,
) -> String {
    if !board.is_playable(row, col) {
        return " ".to_string();
    }
    let symbol = board.grid().get(row, col);
    if symbol.is_blank() {
        ".".to_string()
    } else if hides_marks(board, reveal) {
        "*".to_string()
    } else {
        symbol.to_string()
    }
}

/// Input format a human has to type for `player` on this board.
pub(crate) fn move_hint<S: Symbol>(board: &dyn Board<Symbol = S>, player: S) -> &'static str {
    if board.is_sliding() {
        "from_row from_col to_row to_col"
    } else if board.placeable_symbols(player).len() > 1 {
        "row col symbol"
    } else {
        "row col"
    }
}

/// Plain text rendering with row and column indices.
pub(crate) fn board_text<S: Symbol>(board: &dyn Board<Symbol = S>, reveal: bool) -> String {
    let mut out = String::from("   ");
    for col in 0..board.cols() {
        out.push_str(&format!(" {col}"));
    }
    out.push('\n');
    for row in 0..board.rows() {
        out.push_str(&format!("{row:>2} "));
        for col in 0..board.cols() {
            out.push(' ');
            out.push_str(&cell_text(board, row, col, reveal));
        }
        out.push('\n');
    }
    out
}

fn symbol_style<S: Symbol>(
    board: &dyn Board<Symbol = S>,
    row: usize,
    col: usize,
    reveal: bool,
) -> Style {
    let symbol = board.grid().get(row, col);
    let [first, second] = board.players();
    let color = if symbol.is_blank() {
        Color::DarkGray
    } else if hides_marks(board, reveal) {
        Color::White
    } else if symbol == first {
        Color::Red
    } else if symbol == second {
        Color::Yellow
    } else if symbol.to_string() == "#" {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    Style::default().fg(color)
}

/// Framed, coloured board for the terminal UI.
///
/// `cursor` is highlighted, `source` marks the token picked up by a sliding
/// move. `reveal` shows concealed marks once the game is over.
pub(crate) fn board_lines<S: Symbol>(
    board: &dyn Board<Symbol = S>,
    cursor: Option<Coord>,
    source: Option<Coord>,
    reveal: bool,
) -> Vec<Line<'static>> {
    let cols = board.cols();
    let mut lines = Vec::with_capacity(board.rows() + 3);

    // Column numbers with cursor indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..cols {
        let label = format!(" {col} ");
        if cursor.is_some_and(|(_, c)| c == col) {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw(" "));
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(cols * 3))));

    for row in 0..board.rows() {
        let mut spans = vec![Span::raw(format!("{row:>2}║"))];
        for col in 0..cols {
            let mut style = symbol_style(board, row, col, reveal);
            if source == Some((row, col)) {
                style = style.bg(Color::Blue).add_modifier(Modifier::BOLD);
            }
            if cursor == Some((row, col)) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(
                format!(" {} ", cell_text(board, row, col, reveal)),
                style,
            ));
        }
        spans.push(Span::raw("║"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(cols * 3))));
    lines
}
