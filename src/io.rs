//! Reading board files and writing solution files.
//!
//! A board file starts with two comment lines, then 16 whitespace-separated
//! values forming the grid row-major, then the tile queue running to the end
//! of the input. A solution file is the move string followed by the final
//! score on the next line.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::engine::Board;
use crate::search::Playthrough;

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid integer {0:?} in board file")]
    BadInt(String),
    #[error("expected 16 board values, found {0}")]
    ShortGrid(usize),
}

/// Read a board file from disk.
pub fn read_board<P: AsRef<Path>>(path: P) -> Result<Board, IoError> {
    let text = fs::read_to_string(path)?;
    parse_board(&text)
}

/// Parse board-file text. The first two lines are skipped as comments.
pub fn parse_board(text: &str) -> Result<Board, IoError> {
    let body = text.splitn(3, '\n').nth(2).unwrap_or("");

    let mut values = Vec::new();
    for word in body.split_whitespace() {
        let v: u32 = word.parse().map_err(|_| IoError::BadInt(word.to_string()))?;
        values.push(v);
    }
    if values.len() < 16 {
        return Err(IoError::ShortGrid(values.len()));
    }

    let mut grid = [[0u32; 4]; 4];
    for (i, &v) in values[..16].iter().enumerate() {
        grid[i / 4][i % 4] = v;
    }
    Ok(Board::new(grid, values[16..].to_vec()))
}

/// Write the move string and the final score, one per line.
pub fn write_solution<P: AsRef<Path>>(path: P, run: &Playthrough) -> Result<(), IoError> {
    let mut out = fs::File::create(path)?;
    writeln!(out, "{}", run.move_string())?;
    writeln!(out, "{}", run.final_score)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Move;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "Seed: 42\n\n\
        1 2 0 0\n\
        0 0 3 0\n\
        0 6 0 0\n\
        0 0 0 12\n\
        \n\
        1 2 3 1 2\n";

    #[test]
    fn parses_grid_and_queue() {
        let board = parse_board(SAMPLE).unwrap();
        assert_eq!(board.grid()[0], [1, 2, 0, 0]);
        assert_eq!(board.grid()[1], [0, 0, 3, 0]);
        assert_eq!(board.grid()[3], [0, 0, 0, 12]);
        assert_eq!(board.tiles_remaining(), 5);
    }

    #[test]
    fn reads_from_disk() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(SAMPLE.as_bytes()).unwrap();
        let board = read_board(tmp.path()).unwrap();
        assert_eq!(board.grid()[2], [0, 6, 0, 0]);
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = parse_board("a\nb\n1 2 three 4\n").unwrap_err();
        assert!(matches!(err, IoError::BadInt(_)));
    }

    #[test]
    fn rejects_short_grids() {
        let err = parse_board("a\nb\n1 2 3 4 5\n").unwrap_err();
        assert!(matches!(err, IoError::ShortGrid(5)));
    }

    #[test]
    fn empty_queue_is_allowed() {
        let board = parse_board("a\nb\n0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n").unwrap();
        assert_eq!(board.tiles_remaining(), 0);
    }

    #[test]
    fn writes_moves_then_score() {
        let mut grid = [[0u32; 4]; 4];
        grid[0] = [3, 0, 0, 1];
        let run = Playthrough {
            moves: vec![Move::Left, Move::Up],
            final_score: 4,
            final_board: Board::new(grid, vec![]),
            depth: 2,
        };
        let tmp = NamedTempFile::new().unwrap();
        write_solution(tmp.path(), &run).unwrap();
        let text = fs::read_to_string(tmp.path()).unwrap();
        assert_eq!(text, "LU\n4\n");
    }
}
