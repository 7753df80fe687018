//! Best-move search for a known tile queue.
//!
//! This module provides two solver implementations:
//! - [`Solver`]: single-threaded iterative deepening.
//! - [`SolverParallel`]: rayon-based driver that runs the independent
//!   per-depth playthroughs on the thread pool.
//!
//! Both variants share the same public surface and return identical results
//! for identical inputs; the search itself is fully deterministic.
//!
//! Quick start
//! ```
//! use threes_ai::engine::Board;
//! use threes_ai::search::{SearchConfig, Solver};
//!
//! let mut grid = [[0u32; 4]; 4];
//! grid[0] = [1, 2, 0, 0];
//! let board = Board::new(grid, vec![1, 3, 2]);
//!
//! let mut solver = Solver::with_config(SearchConfig { max_depth: 3 });
//! let run = solver.solve(&board);
//! assert_eq!(run.final_score, run.final_board.score());
//! ```

use crate::engine::{Board, Move};

mod search_par;
mod search_seq;

pub use search_par::SolverParallel;
pub use search_seq::Solver;

/// Configurable knobs for the iterative-deepening driver.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Deepest look-ahead tried by the driver. Each depth from 1 up to this
    /// value replays the whole game once. The original player used 5; 8 is
    /// about the practical ceiling for a full playthrough.
    pub max_depth: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 5 }
    }
}

/// Basic search stats for a single `solve` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    /// Total states expanded across all depths.
    pub nodes: u64,
    /// Most states expanded by any single depth's playthrough.
    pub peak_nodes: u64,
}

/// One full game replayed at a fixed look-ahead depth.
///
/// The move that produced the terminal board is not part of `moves`; the
/// final board keeps the grid as it stood before that last, fruitless move.
#[derive(Debug, Clone)]
pub struct Playthrough {
    pub moves: Vec<Move>,
    /// Raw board score at termination, penalty excluded.
    pub final_score: u64,
    pub final_board: Board,
    /// Look-ahead depth this playthrough was searched at.
    pub depth: u64,
}

impl Playthrough {
    /// The moves rendered as a U/D/L/R string.
    pub fn move_string(&self) -> String {
        self.moves.iter().map(|m| m.key()).collect()
    }
}

/// Best reachable leaf value from `board` within `depth` further moves.
///
/// The running best starts at zero, not the first branch's value. A subtree
/// whose branches all evaluate negative therefore reports zero, as if a
/// zero-scoring branch existed. The original program behaves this way and it
/// can affect move selection, so it is kept.
pub(crate) fn best_score(board: &Board, depth: u64, nodes: &mut u64) -> i64 {
    *nodes += 1;
    if depth == 0 || board.is_game_over() {
        return board.evaluate();
    }
    let mut best = 0i64;
    for dir in Move::ALL {
        let score = best_score(&board.make_move(dir), depth - 1, nodes);
        if score > best {
            best = score;
        }
    }
    best
}

/// Best move from `board` looking `depth` moves ahead.
///
/// The first branch always installs itself and replacement requires a
/// strictly greater score, so ties go to the earlier move in [`Move::ALL`].
pub(crate) fn best_move(board: &Board, depth: u64, nodes: &mut u64) -> Option<Move> {
    let mut best_dir = None;
    let mut best = 0i64;
    for dir in Move::ALL {
        let score = best_score(&board.make_move(dir), depth.saturating_sub(1), nodes);
        if best_dir.is_none() || score > best {
            best_dir = Some(dir);
            best = score;
        }
    }
    best_dir
}

/// Replay a whole game from `start`, choosing every move at `depth`.
pub(crate) fn run_playthrough(start: &Board, depth: u64, nodes: &mut u64) -> Playthrough {
    let mut board = start.clone();
    let mut moves = Vec::new();
    loop {
        let Some(dir) = best_move(&board, depth, nodes) else {
            break;
        };
        let next = board.make_move(dir);
        let ended = next.is_game_over();
        board = next;
        if ended {
            break;
        }
        moves.push(dir);
    }
    Playthrough {
        final_score: board.score(),
        moves,
        final_board: board,
        depth,
    }
}
