use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Canonical enumeration order. Search and tie-breaking depend on it,
    /// so iterate this array rather than any ad-hoc list.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// The one-character code used in move strings.
    #[inline]
    pub fn key(self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }

    /// Parse a one-character code back into a move.
    #[inline]
    pub fn from_key(key: char) -> Option<Move> {
        match key {
            'U' => Some(Move::Up),
            'D' => Some(Move::Down),
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

type Grid = [[u32; 4]; 4];

/// A 4x4 Threes board together with its fixed queue of future tiles.
///
/// Cells hold the actual tile values: 0 is empty, positive values are 1, 2
/// or `3 * 2^k`. The tile queue is shared read-only between snapshots; each
/// snapshot advances its own cursor.
///
/// Example
/// ```
/// use threes_ai::engine::{Board, Move};
/// let mut grid = [[0u32; 4]; 4];
/// grid[0] = [1, 2, 0, 0];
/// let board = Board::new(grid, vec![1]);
/// let next = board.make_move(Move::Left);
/// assert_eq!(next.grid()[0], [3, 0, 0, 1]);
/// assert_eq!(next.score(), 4);
/// ```
#[derive(Clone)]
pub struct Board {
    grid: Grid,
    tiles: Arc<[u32]>,
    cursor: usize,
    game_over: bool,
}

impl Board {
    /// Construct a board from an initial grid and the queue of tiles that
    /// will be drawn, in order.
    pub fn new(grid: Grid, tiles: Vec<u32>) -> Self {
        Board {
            grid,
            tiles: tiles.into(),
            cursor: 0,
            game_over: false,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// True once no move can change the board, or the queue ran out when a
    /// tile had to be placed. Terminal boards must not be simulated further.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Number of tiles still waiting to be drawn.
    #[inline]
    pub fn tiles_remaining(&self) -> usize {
        self.tiles.len() - self.cursor
    }

    /// Compute the total score for this board.
    ///
    /// A 1 or 2 is worth one point; a tile `v = 3 * 2^k` is worth `3^(k+1)`.
    ///
    /// # Panics
    ///
    /// Panics if a positive cell holds anything other than 1, 2 or
    /// `3 * 2^k`. That cannot happen through `make_move` and signals a
    /// corrupted board.
    pub fn score(&self) -> u64 {
        let mut total = 0u64;
        for row in &self.grid {
            for &v in row {
                total += match v {
                    0 => 0,
                    1 | 2 => 1,
                    v if v % 3 == 0 && (v / 3).is_power_of_two() => {
                        3u64.pow((v / 3).trailing_zeros() + 1)
                    }
                    v => panic!("invalid tile value {v} on board"),
                };
            }
        }
        total
    }

    /// Heuristic penalty added to leaf scores at the search horizon.
    ///
    /// Per cell: +1 for every neighbour it could merge with, -5 for being
    /// boxed in along the x axis (edge or strictly larger tile on both
    /// sides), -5 likewise along the y axis, +1 if any neighbour is exactly
    /// double its value (tiles above 2 only). Empty cells count +2 each.
    pub fn penalty(&self) -> i64 {
        let mut total = 0i64;
        for y in 0..4 {
            for x in 0..4 {
                let v = self.grid[y][x];
                if v == 0 {
                    total += 2;
                    continue;
                }
                let vu = if y > 0 { self.grid[y - 1][x] } else { 0 };
                let vd = if y < 3 { self.grid[y + 1][x] } else { 0 };
                let vl = if x > 0 { self.grid[y][x - 1] } else { 0 };
                let vr = if x < 3 { self.grid[y][x + 1] } else { 0 };

                for n in [vu, vd, vl, vr] {
                    if can_merge(v, n) {
                        total += 1;
                    }
                }

                // Low tiles trapped between two higher tiles, or between a
                // higher tile and an edge, are hard to free up again.
                if (x == 0 || (vl > 2 && v < vl)) && (x == 3 || (vr > 2 && v < vr)) {
                    total -= 5;
                }
                if (y == 0 || (vu > 2 && v < vu)) && (y == 3 || (vd > 2 && v < vd)) {
                    total -= 5;
                }

                if v > 2 && [vu, vd, vl, vr].contains(&(v * 2)) {
                    total += 1;
                }
            }
        }
        total
    }

    /// Score plus penalty, the value of a leaf in the search tree.
    #[inline]
    pub fn evaluate(&self) -> i64 {
        self.score() as i64 + self.penalty()
    }

    /// Return the board after sliding all tiles in `dir` and placing the
    /// next queued tile on the lowest-ranked line that moved.
    ///
    /// The input is never mutated. If the queue is exhausted, or no line
    /// changes, the returned copy is marked game over with the grid intact.
    pub fn make_move(&self, dir: Move) -> Board {
        let mut b = self.clone();
        b.game_over = false;

        if b.cursor == b.tiles.len() {
            b.game_over = true;
            return b;
        }

        let mut slides: Vec<Slide> = Vec::with_capacity(4);
        for i in 0..4 {
            let slid = match dir {
                Move::Up | Move::Down => b.slide_col(i, dir),
                Move::Left | Move::Right => b.slide_row(i, dir),
            };
            if slid {
                slides.push(Slide::capture(&b.grid, i, dir));
            }
        }

        if slides.is_empty() {
            b.game_over = true;
            return b;
        }

        slides.sort();
        let target = slides[0].index;
        let tile = b.tiles[b.cursor];
        b.cursor += 1;

        // The drawn tile enters at the trailing edge of the winning line.
        match dir {
            Move::Up => b.grid[3][target] = tile,
            Move::Down => b.grid[0][target] = tile,
            Move::Left => b.grid[target][3] = tile,
            Move::Right => b.grid[target][0] = tile,
        }

        b
    }

    /// Slide column `x` up or down in a single forward pass. Each adjacent
    /// pair is visited exactly once; there is no cascading re-merge within
    /// one move. Returns whether the column changed.
    fn slide_col(&mut self, x: usize, dir: Move) -> bool {
        let mut slid = false;
        match dir {
            Move::Up => {
                for y in 1..4 {
                    let va = self.grid[y - 1][x];
                    let vb = self.grid[y][x];
                    if va == 0 && vb > 0 {
                        self.grid[y - 1][x] = vb;
                        self.grid[y][x] = 0;
                        slid = true;
                    } else if can_merge(va, vb) {
                        self.grid[y - 1][x] = va + vb;
                        self.grid[y][x] = 0;
                        slid = true;
                    }
                }
            }
            Move::Down => {
                for y in (0..3).rev() {
                    let va = self.grid[y + 1][x];
                    let vb = self.grid[y][x];
                    if va == 0 && vb > 0 {
                        self.grid[y + 1][x] = vb;
                        self.grid[y][x] = 0;
                        slid = true;
                    } else if can_merge(va, vb) {
                        self.grid[y + 1][x] = va + vb;
                        self.grid[y][x] = 0;
                        slid = true;
                    }
                }
            }
            _ => panic!("trying to slide a column left or right"),
        }
        slid
    }

    /// Row counterpart of [`Self::slide_col`].
    fn slide_row(&mut self, y: usize, dir: Move) -> bool {
        let mut slid = false;
        match dir {
            Move::Left => {
                for x in 1..4 {
                    let va = self.grid[y][x - 1];
                    let vb = self.grid[y][x];
                    if va == 0 && vb > 0 {
                        self.grid[y][x - 1] = vb;
                        self.grid[y][x] = 0;
                        slid = true;
                    } else if can_merge(va, vb) {
                        self.grid[y][x - 1] = va + vb;
                        self.grid[y][x] = 0;
                        slid = true;
                    }
                }
            }
            Move::Right => {
                for x in (0..3).rev() {
                    let va = self.grid[y][x + 1];
                    let vb = self.grid[y][x];
                    if va == 0 && vb > 0 {
                        self.grid[y][x + 1] = vb;
                        self.grid[y][x] = 0;
                        slid = true;
                    } else if can_merge(va, vb) {
                        self.grid[y][x + 1] = va + vb;
                        self.grid[y][x] = 0;
                        slid = true;
                    }
                }
            }
            _ => panic!("trying to slide a row up or down"),
        }
        slid
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            writeln!(f, "{} {} {} {}", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board {{ grid: {:?}, cursor: {}, game_over: {} }}",
            self.grid, self.cursor, self.game_over
        )
    }
}

/// Two tiles merge when they are the 1/2 pair or equal values above 2.
#[inline]
fn can_merge(a: u32, b: u32) -> bool {
    (a == 1 && b == 2) || (a == 2 && b == 1) || (a > 2 && a == b)
}

/// One candidate line for tile placement after a move.
///
/// Holds the line's values read toward the move direction; candidates are
/// ranked lexicographically ascending and the smallest receives the drawn
/// tile. A full tie falls back to the line index: lower wins for up/right,
/// higher for down/left, so the order is strict for any fixed board.
struct Slide {
    index: usize,
    dir: Move,
    values: [u32; 4],
}

impl Slide {
    fn capture(grid: &Grid, index: usize, dir: Move) -> Slide {
        let values = match dir {
            Move::Up => [grid[3][index], grid[2][index], grid[1][index], grid[0][index]],
            Move::Down => [grid[0][index], grid[1][index], grid[2][index], grid[3][index]],
            Move::Left => [grid[index][3], grid[index][2], grid[index][1], grid[index][0]],
            Move::Right => [grid[index][0], grid[index][1], grid[index][2], grid[index][3]],
        };
        Slide { index, dir, values }
    }
}

impl Ord for Slide {
    fn cmp(&self, other: &Self) -> Ordering {
        self.values.cmp(&other.values).then_with(|| match self.dir {
            Move::Up | Move::Right => self.index.cmp(&other.index),
            Move::Down | Move::Left => other.index.cmp(&self.index),
        })
    }
}

impl PartialOrd for Slide {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Slide {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slide {}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_rows(rows: Grid, tiles: Vec<u32>) -> Board {
        Board::new(rows, tiles)
    }

    #[test]
    fn left_merges_and_places_drawn_tile() {
        let mut grid = [[0u32; 4]; 4];
        grid[0] = [1, 2, 0, 0];
        let board = board_with_rows(grid, vec![1]);
        let next = board.make_move(Move::Left);
        assert!(!next.is_game_over());
        assert_eq!(next.grid()[0], [3, 0, 0, 1]);
        assert_eq!(next.score(), 4);
        // Input board untouched
        assert_eq!(board.grid()[0], [1, 2, 0, 0]);
        assert_eq!(board.tiles_remaining(), 1);
    }

    #[test]
    fn single_pass_does_not_cascade() {
        let mut grid = [[0u32; 4]; 4];
        grid[0] = [1, 2, 3, 0];
        let board = board_with_rows(grid, vec![1]);
        let next = board.make_move(Move::Left);
        // 1+2 merge to 3, the trailing 3 slides into the gap, but the two
        // threes are not merged again within the same move.
        assert_eq!(next.grid()[0], [3, 3, 0, 1]);
    }

    #[test]
    fn up_tie_break_prefers_lower_column() {
        let mut grid = [[0u32; 4]; 4];
        grid[1] = [3, 3, 0, 0];
        let board = board_with_rows(grid, vec![1]);
        let next = board.make_move(Move::Up);
        // Both columns slide to the same value vector; column 0 wins.
        assert_eq!(next.grid()[3][0], 1);
        assert_eq!(next.grid()[3][1], 0);
        assert_eq!(next.grid()[0][0], 3);
        assert_eq!(next.grid()[0][1], 3);
    }

    #[test]
    fn down_tie_break_prefers_higher_column() {
        let mut grid = [[0u32; 4]; 4];
        grid[1] = [3, 3, 0, 0];
        let board = board_with_rows(grid, vec![2]);
        let next = board.make_move(Move::Down);
        assert_eq!(next.grid()[0][1], 2);
        assert_eq!(next.grid()[0][0], 0);
    }

    #[test]
    fn stuck_board_marks_game_over_for_every_move() {
        let grid = [
            [1, 6, 1, 6],
            [6, 1, 6, 1],
            [1, 6, 1, 6],
            [6, 1, 6, 1],
        ];
        let board = board_with_rows(grid, vec![1, 2, 3]);
        for dir in Move::ALL {
            let next = board.make_move(dir);
            assert!(next.is_game_over());
            assert_eq!(next.grid(), board.grid());
            assert_eq!(next.tiles_remaining(), 3);
        }
    }

    #[test]
    fn exhausted_queue_marks_game_over() {
        let mut grid = [[0u32; 4]; 4];
        grid[0] = [1, 2, 0, 0];
        let board = board_with_rows(grid, vec![]);
        let next = board.make_move(Move::Left);
        assert!(next.is_game_over());
        assert_eq!(next.grid(), board.grid());
    }

    #[test]
    fn score_sums_tile_values() {
        let grid = [
            [1, 2, 3, 6],
            [12, 96, 0, 0],
            [0; 4],
            [0; 4],
        ];
        let board = board_with_rows(grid, vec![]);
        // 1 + 1 + 3 + 9 + 27 + 729
        assert_eq!(board.score(), 770);
    }

    #[test]
    #[should_panic(expected = "invalid tile value")]
    fn score_rejects_corrupt_tile() {
        let mut grid = [[0u32; 4]; 4];
        grid[0][0] = 5;
        board_with_rows(grid, vec![]).score();
    }

    #[test]
    #[should_panic(expected = "slide a column")]
    fn column_slide_rejects_row_direction() {
        let mut board = board_with_rows([[0u32; 4]; 4], vec![]);
        board.slide_col(0, Move::Left);
    }

    #[test]
    #[should_panic(expected = "slide a row")]
    fn row_slide_rejects_column_direction() {
        let mut board = board_with_rows([[0u32; 4]; 4], vec![]);
        board.slide_row(0, Move::Up);
    }

    #[test]
    fn penalty_of_empty_board() {
        let board = board_with_rows([[0u32; 4]; 4], vec![]);
        assert_eq!(board.penalty(), 32);
    }

    #[test]
    fn penalty_counts_mergeable_pairs_from_both_sides() {
        let mut grid = [[0u32; 4]; 4];
        grid[0] = [1, 2, 0, 0];
        let board = board_with_rows(grid, vec![]);
        // +1 for each cell of the mergeable pair, +2 for each of 14 empties.
        assert_eq!(board.penalty(), 30);
    }

    #[test]
    fn penalty_boxed_tile_and_double_bonus() {
        let mut grid = [[0u32; 4]; 4];
        grid[0] = [6, 1, 6, 0];
        let board = board_with_rows(grid, vec![]);
        // The 1 is boxed on the x axis (-5); 13 empties contribute +26.
        assert_eq!(board.penalty(), 21);

        let mut grid = [[0u32; 4]; 4];
        grid[0] = [3, 6, 0, 0];
        let board = board_with_rows(grid, vec![]);
        // 3 is boxed against the left edge (-5) but gets the
        // double-neighbour bonus (+1); 14 empties +28.
        assert_eq!(board.penalty(), 24);
    }

    #[test]
    fn evaluators_are_pure_functions_of_the_grid() {
        let mut grid = [[0u32; 4]; 4];
        grid[0] = [1, 2, 3, 6];
        grid[2] = [6, 0, 12, 2];
        let board = board_with_rows(grid, vec![1, 2, 3]);
        let copy = board.clone();
        assert_eq!(board.score(), copy.score());
        assert_eq!(board.penalty(), copy.penalty());
        assert_eq!(board.evaluate(), copy.evaluate());
    }

    #[test]
    fn move_keys_round_trip() {
        for dir in Move::ALL {
            assert_eq!(Move::from_key(dir.key()), Some(dir));
        }
        assert_eq!(Move::from_key('X'), None);
    }
}
