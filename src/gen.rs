//! Random test-input generators.
//!
//! Tiles come off a shuffled deck that is refilled whenever it runs dry;
//! nine tiles seed the starting grid and the rest become the queue. With a
//! fixed seed the output is fully reproducible.

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::engine::Board;

/// Which tile deck feeds the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deck {
    /// Four each of 1, 2 and 3.
    Standard,
    /// Twelve 1s, twelve 2s, three 3s and one each of 6, 12 and 24.
    Extended,
}

impl Deck {
    fn refill(self, rng: &mut StdRng, queue: &mut VecDeque<u32>) {
        let mut deck: Vec<u32> = match self {
            Deck::Standard => (0..4).flat_map(|_| [1, 2, 3]).collect(),
            Deck::Extended => {
                let mut deck = Vec::with_capacity(30);
                for _ in 0..12 {
                    deck.push(1);
                    deck.push(2);
                }
                deck.extend([3, 3, 3, 6, 12, 24]);
                deck
            }
        };
        deck.shuffle(rng);
        queue.extend(deck);
    }
}

/// A generated starting position: grid, queue and the seed that made them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestInput {
    pub seed: u64,
    pub grid: [[u32; 4]; 4],
    pub tiles: Vec<u32>,
}

impl TestInput {
    /// Build the board this input describes.
    pub fn board(&self) -> Board {
        Board::new(self.grid, self.tiles.clone())
    }
}

impl fmt::Display for TestInput {
    /// Renders the board-file format: a seed comment, a blank line, the
    /// grid, a blank line, then the queue on one line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(f)?;
        for row in &self.grid {
            writeln!(f, "{} {} {} {}", row[0], row[1], row[2], row[3])?;
        }
        writeln!(f)?;
        let queue: Vec<String> = self.tiles.iter().map(u32::to_string).collect();
        writeln!(f, "{}", queue.join(" "))
    }
}

/// Generate a starting grid with nine seeded tiles and a queue of
/// `num_tiles` draws.
pub fn generate(deck: Deck, num_tiles: usize, seed: u64) -> TestInput {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut queue = VecDeque::new();
    deck.refill(&mut rng, &mut queue);

    let mut grid = [[0u32; 4]; 4];
    for _ in 0..9 {
        loop {
            let x = rng.gen_range(0..4);
            let y = rng.gen_range(0..4);
            if grid[y][x] == 0 {
                grid[y][x] = queue.pop_front().expect("a fresh deck holds at least nine tiles");
                break;
            }
        }
    }

    let mut tiles = Vec::with_capacity(num_tiles);
    for _ in 0..num_tiles {
        if queue.is_empty() {
            deck.refill(&mut rng, &mut queue);
        }
        tiles.push(queue.pop_front().expect("deck was just refilled"));
    }

    TestInput { seed, grid, tiles }
}
