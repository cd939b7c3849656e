use tracing::{debug, warn};

use super::strategy::Strategy;
use crate::game::{Board, Move, ScopedMove, Symbol};

/// Score bound larger than any reachable evaluation.
pub const INF: i32 = 1_000_000;

/// Base score of a decided position; the depth is subtracted from it.
const WIN: i32 = 10;

/// Result of a top-level search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome<S> {
    /// Evaluation of the position for the searching side.
    pub score: i32,
    /// First move achieving `score`, or `None` when there was no legal move.
    pub best_move: Option<Move<S>>,
    /// Positions visited, the root excluded.
    pub nodes: u64,
}

/// Depth-limited minimax with optional alpha-beta pruning.
///
/// Search mutates the board in place through [`ScopedMove`], so every
/// candidate is undone before the next one is tried.
#[derive(Debug, Clone, Copy)]
pub struct Minimax {
    max_depth: u32,
    pruning: bool,
}

impl Minimax {
    pub fn new(max_depth: u32) -> Self {
        Minimax {
            max_depth,
            pruning: true,
        }
    }

    pub fn with_pruning(self, pruning: bool) -> Self {
        Minimax { pruning, ..self }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Choose the best move for `ai` in the current position.
    ///
    /// Candidates are tried in the board's enumeration order and a later one
    /// only replaces the current best with a strictly higher score.
    pub fn search<B: Board + ?Sized>(&self, board: &mut B, ai: B::Symbol) -> SearchOutcome<B::Symbol> {
        let opponent = board.opponent(ai);
        let mut nodes = 0;
        let mut best_score = -INF;
        let mut best_move = None;
        let mut alpha = -INF;
        let beta = INF;

        for mv in board.legal_moves(ai) {
            let score = match ScopedMove::apply(&mut *board, &mv) {
                Ok(mut child) => {
                    self.minimax(&mut *child, ai, opponent, opponent, 0, alpha, beta, &mut nodes)
                }
                Err(err) => {
                    warn!(%mv, %err, "board rejected its own legal move");
                    continue;
                }
            };
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_score);
        }

        SearchOutcome {
            score: if best_move.is_some() { best_score } else { 0 },
            best_move,
            nodes,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax<B: Board + ?Sized>(
        &self,
        board: &mut B,
        ai: B::Symbol,
        opponent: B::Symbol,
        to_move: B::Symbol,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;

        if depth >= self.max_depth {
            return 0;
        }
        if board.is_win(ai) {
            return WIN - depth as i32;
        }
        if board.is_win(opponent) {
            return depth as i32 - WIN;
        }
        if board.is_draw(ai) {
            return 0;
        }

        let maximizing = to_move == ai;
        let next = if maximizing { opponent } else { ai };
        let mut best = if maximizing { -INF } else { INF };
        let mut explored = false;

        for mv in board.legal_moves(to_move) {
            let score = match ScopedMove::apply(&mut *board, &mv) {
                Ok(mut child) => self.minimax(
                    &mut *child,
                    ai,
                    opponent,
                    next,
                    depth + 1,
                    alpha,
                    beta,
                    nodes,
                ),
                Err(_) => continue,
            };
            explored = true;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.pruning && beta <= alpha {
                break;
            }
        }

        // No legal move without a decided position: treat as neutral.
        if explored {
            best
        } else {
            0
        }
    }
}

/// Minimax wrapped as a player strategy.
pub struct MinimaxStrategy {
    engine: Minimax,
}

impl MinimaxStrategy {
    pub fn new(max_depth: u32, pruning: bool) -> Self {
        MinimaxStrategy {
            engine: Minimax::new(max_depth).with_pruning(pruning),
        }
    }
}

impl<S: Symbol> Strategy<S> for MinimaxStrategy {
    fn choose_move(&mut self, board: &mut dyn Board<Symbol = S>, player: S) -> Option<Move<S>> {
        let outcome = self.engine.search(board, player);
        if let Some(mv) = &outcome.best_move {
            debug!(
                %mv,
                score = outcome.score,
                nodes = outcome.nodes,
                depth = self.engine.max_depth(),
                "minimax chose move"
            );
        }
        outcome.best_move
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
