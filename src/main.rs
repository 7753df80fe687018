use std::error::Error;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;

use threes_ai::engine::{Board, Move};
use threes_ai::io::{read_board, write_solution};
use threes_ai::search::{Playthrough, SearchConfig, SearchStats, Solver, SolverParallel};

#[derive(Parser, Debug)]
#[command(
    name = "threes",
    version,
    about = "Search for the highest-scoring move sequence on a Threes board"
)]
struct Args {
    /// Input file: two comment lines, 16 board values, then the tile queue
    input: PathBuf,
    /// Output file: the move string followed by the final score
    output: PathBuf,
    /// Maximum look-ahead depth for iterative deepening
    #[arg(short, long, default_value_t = 5)]
    depth: u64,
    /// Run the per-depth playthroughs on the rayon pool
    #[arg(long)]
    parallel: bool,
    /// Replay moves typed on stdin (U/D/L/R) instead of searching
    #[arg(long)]
    interactive: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let board = read_board(&args.input)?;
    let cfg = SearchConfig {
        max_depth: args.depth,
    };

    let run = if args.interactive {
        play_interactive(board)?
    } else if args.parallel {
        let mut solver = SolverParallel::with_config(cfg);
        let run = solver.solve(&board);
        report_stats(solver.last_stats());
        run
    } else {
        let mut solver = Solver::with_config(cfg);
        let run = solver.solve(&board);
        report_stats(solver.last_stats());
        run
    };

    println!("{}", run.move_string());
    println!("{}", run.final_score);
    write_solution(&args.output, &run)?;
    Ok(())
}

fn report_stats(stats: SearchStats) {
    eprintln!(
        "States considered: {}, Max states considered for a depth: {}",
        stats.nodes, stats.peak_nodes
    );
}

/// Debug mode: apply moves typed by a human until the game ends or stdin
/// closes. Bytes that are not a move key are skipped.
fn play_interactive(start: Board) -> Result<Playthrough, Box<dyn Error>> {
    let mut board = start;
    let mut moves = Vec::new();
    let stdin = std::io::stdin();
    let mut bytes = stdin.lock().bytes();
    loop {
        println!("{board}");
        let dir = loop {
            match bytes.next() {
                Some(byte) => {
                    if let Some(dir) = Move::from_key(byte? as char) {
                        break dir;
                    }
                }
                None => return Ok(finished(board, moves)),
            }
        };
        let next = board.make_move(dir);
        let ended = next.is_game_over();
        board = next;
        if ended {
            break;
        }
        moves.push(dir);
    }
    Ok(finished(board, moves))
}

fn finished(board: Board, moves: Vec<Move>) -> Playthrough {
    Playthrough {
        final_score: board.score(),
        final_board: board,
        moves,
        depth: 0,
    }
}
