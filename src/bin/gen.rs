use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use threes_ai::gen::{generate, Deck};

#[derive(Parser, Debug)]
#[command(name = "gen", version, about = "Generate random Threes test inputs")]
struct Args {
    /// Number of queue tiles to emit
    #[arg(short, long, default_value_t = 4000)]
    tiles: usize,
    /// Use the extended deck (includes 6, 12 and 24 tiles)
    #[arg(long)]
    v2: bool,
    /// RNG seed; defaults to the current time in milliseconds
    #[arg(long)]
    seed: Option<u64>,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let seed = match args.seed {
        Some(seed) => seed,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64,
    };
    let deck = if args.v2 { Deck::Extended } else { Deck::Standard };
    let input = generate(deck, args.tiles, seed);
    match args.out {
        Some(path) => fs::write(path, input.to_string())?,
        None => print!("{input}"),
    }
    Ok(())
}
