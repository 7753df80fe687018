//! threes-ai: a deterministic Threes solver.
//!
//! Given a 4x4 board and the full sequence of tiles that will be drawn, the
//! crate searches for the move string with the highest final score. It
//! provides:
//! - A `Board` type with the slide/merge rules and the score and penalty
//!   evaluators (`engine` module)
//! - Iterative-deepening solvers, single-threaded and rayon-parallel
//!   (`search` module)
//! - Board-file parsing and solution writing (`io` module) and random
//!   test-input generators (`gen` module)
//!
//! Quick start:
//! ```
//! use threes_ai::gen::{generate, Deck};
//! use threes_ai::search::{SearchConfig, Solver};
//!
//! let input = generate(Deck::Standard, 24, 42);
//! let mut solver = Solver::with_config(SearchConfig { max_depth: 2 });
//! let run = solver.solve(&input.board());
//! assert_eq!(run.final_score, run.final_board.score());
//! ```
pub mod engine;
pub mod gen;
pub mod io;
pub mod search;
