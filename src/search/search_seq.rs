use crate::engine::{Board, Move};

use super::{best_move, best_score, run_playthrough, Playthrough, SearchConfig, SearchStats};

/// Single-threaded iterative-deepening solver.
///
/// Replays the game once per depth from 1 to `max_depth` and keeps the
/// playthrough with the highest raw final score. Depths are independent;
/// a deeper search never reuses a shallower result.
pub struct Solver {
    cfg: SearchConfig,
    stats: SearchStats,
}

impl Solver {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(cfg: SearchConfig) -> Self {
        Self {
            cfg,
            stats: SearchStats::default(),
        }
    }

    /// Best move from `board` looking `depth` moves ahead.
    ///
    /// Example
    /// ```
    /// use threes_ai::engine::Board;
    /// use threes_ai::search::Solver;
    ///
    /// let mut grid = [[0u32; 4]; 4];
    /// grid[0] = [1, 2, 0, 0];
    /// let board = Board::new(grid, vec![1, 2]);
    /// let mut solver = Solver::new();
    /// assert!(solver.best_move(&board, 2).is_some());
    /// ```
    #[inline]
    pub fn best_move(&mut self, board: &Board, depth: u64) -> Option<Move> {
        let mut nodes = 0;
        let result = best_move(board, depth, &mut nodes);
        self.note_nodes(nodes);
        result
    }

    /// Best reachable leaf value from `board` within `depth` moves.
    #[inline]
    pub fn best_score(&mut self, board: &Board, depth: u64) -> i64 {
        let mut nodes = 0;
        let result = best_score(board, depth, &mut nodes);
        self.note_nodes(nodes);
        result
    }

    /// Play the whole game at every depth up to the configured maximum and
    /// return the best-scoring playthrough. Ties keep the shallower depth.
    pub fn solve(&mut self, start: &Board) -> Playthrough {
        let mut best: Option<Playthrough> = None;
        let mut total_nodes = 0u64;
        for depth in 1..=self.cfg.max_depth.max(1) {
            let mut nodes = 0u64;
            let run = run_playthrough(start, depth, &mut nodes);
            total_nodes += nodes;
            self.stats.peak_nodes = self.stats.peak_nodes.max(nodes);
            let better = match &best {
                Some(b) => run.final_score > b.final_score,
                None => true,
            };
            if better {
                best = Some(run);
            }
        }
        self.stats.nodes = total_nodes;
        best.expect("at least one depth is always searched")
    }

    /// Statistics collected from the last call to [`Self::solve`],
    /// [`Self::best_move`] or [`Self::best_score`].
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Reset accumulated stats to zero.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    fn note_nodes(&mut self, nodes: u64) {
        self.stats.nodes = nodes;
        self.stats.peak_nodes = self.stats.peak_nodes.max(nodes);
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}
