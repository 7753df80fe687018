use rayon::prelude::*;

use crate::engine::Board;

use super::{run_playthrough, Playthrough, SearchConfig, SearchStats};

/// Parallel iterative-deepening solver.
///
/// The per-depth playthroughs are independent replays of the same game, so
/// they run as rayon tasks. The tile queue is shared read-only between the
/// branches; every simulated move works on its own board snapshot, so no
/// locking is involved. Results match [`super::Solver`] exactly: on equal
/// final scores the shallower depth wins, as in the sequential loop.
pub struct SolverParallel {
    cfg: SearchConfig,
    stats: SearchStats,
}

impl SolverParallel {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(cfg: SearchConfig) -> Self {
        Self {
            cfg,
            stats: SearchStats::default(),
        }
    }

    /// Parallel equivalent of [`super::Solver::solve`].
    pub fn solve(&mut self, start: &Board) -> Playthrough {
        let max_depth = self.cfg.max_depth.max(1);
        let runs: Vec<(Playthrough, u64)> = (1..=max_depth)
            .into_par_iter()
            .map(|depth| {
                let mut nodes = 0u64;
                let run = run_playthrough(start, depth, &mut nodes);
                (run, nodes)
            })
            .collect();

        let mut total_nodes = 0u64;
        let mut peak_nodes = 0u64;
        for (_, nodes) in &runs {
            total_nodes += nodes;
            peak_nodes = peak_nodes.max(*nodes);
        }
        self.stats.nodes = total_nodes;
        self.stats.peak_nodes = self.stats.peak_nodes.max(peak_nodes);

        runs.into_iter()
            .map(|(run, _)| run)
            .max_by(|a, b| {
                a.final_score
                    .cmp(&b.final_score)
                    .then(b.depth.cmp(&a.depth))
            })
            .expect("at least one depth is always searched")
    }

    /// Statistics collected from the last call to [`Self::solve`].
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Reset accumulated stats to zero.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }
}

impl Default for SolverParallel {
    fn default() -> Self {
        Self::new()
    }
}
