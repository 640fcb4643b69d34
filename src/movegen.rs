//! Legal-move discovery by directional capture search.

use once_cell::sync::Lazy;

use crate::board::Board;
use crate::types::{BOARD_SIZE, NUM_SQUARES, Position, Side};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// For every square and direction, the squares visited walking outward until
/// the edge of the board, nearest first.
static RAYS: Lazy<Vec<[Vec<usize>; 8]>> = Lazy::new(|| {
    (0..NUM_SQUARES)
        .map(|idx| {
            let row = (idx / BOARD_SIZE) as i32;
            let col = (idx % BOARD_SIZE) as i32;
            DIRECTIONS.map(|(dr, dc)| {
                let mut ray = Vec::new();
                let (mut r, mut c) = (row + dr, col + dc);
                while in_bounds(r, c) {
                    ray.push(r as usize * BOARD_SIZE + c as usize);
                    r += dr;
                    c += dc;
                }
                ray
            })
        })
        .collect()
});

/// Opponent discs converted by one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CaptureSet(u64);

impl CaptureSet {
    pub fn mask(self) -> u64 {
        self.0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, pos: Position) -> bool {
        (self.0 & pos.bit()) != 0
    }

    /// Captured positions in row-major order.
    pub fn iter(self) -> impl Iterator<Item = Position> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let idx = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(Position::from_index(idx))
        })
    }
}

/// Every playable destination for one side on one board, indexed directly by
/// square. An entry is `Some` only when its capture set is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves {
    table: [Option<CaptureSet>; NUM_SQUARES],
    len: usize,
}

impl LegalMoves {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn captures(&self, pos: Position) -> Option<CaptureSet> {
        self.table[pos.index()]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.table[pos.index()].is_some()
    }

    /// Legal destinations with their capture sets, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CaptureSet)> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| entry.map(|captures| (Position::from_index(idx), captures)))
    }

    pub fn positions(&self) -> Vec<Position> {
        self.iter().map(|(pos, _)| pos).collect()
    }
}

/// Computes every legal move for `side`.
pub fn legal_moves(board: &Board, side: Side) -> LegalMoves {
    let me = board.discs(side);
    let opp = board.discs(side.opponent());
    let occupied = me | opp;

    let mut table = [None; NUM_SQUARES];
    let mut len = 0;

    for (idx, entry) in table.iter_mut().enumerate() {
        if (occupied & (1u64 << idx)) != 0 {
            continue;
        }
        let flips = collect_flips(idx, me, opp);
        if flips != 0 {
            *entry = Some(CaptureSet(flips));
            len += 1;
        }
    }

    LegalMoves { table, len }
}

/// Number of legal moves for `side`.
pub fn mobility(board: &Board, side: Side) -> usize {
    legal_moves(board, side).len()
}

fn collect_flips(idx: usize, me: u64, opp: u64) -> u64 {
    let mut flips = 0u64;

    for ray in &RAYS[idx] {
        let mut line = 0u64;
        for &square_idx in ray {
            let square = 1u64 << square_idx;
            if (opp & square) != 0 {
                line |= square;
            } else {
                if (me & square) != 0 {
                    flips |= line;
                }
                break;
            }
        }
    }

    flips
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn midgame() -> Board {
        "
        ........
        ........
        ..XO....
        ..OOOX..
        ..XOXO..
        ...XO...
        ....X...
        ........
        "
        .parse()
        .unwrap()
    }

    #[test]
    fn initial_dark_legal_moves_are_four_expected_squares() {
        let board = Board::new();
        let legal = legal_moves(&board, Side::Dark);

        // d3, c4, f5, e6
        assert_eq!(legal.positions(), vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]);
        assert_eq!(legal.captures(pos(2, 3)), Some(CaptureSet(pos(3, 3).bit())));
    }

    #[test]
    fn initial_light_has_four_legal_moves() {
        let legal = legal_moves(&Board::new(), Side::Light);

        assert_eq!(legal.len(), 4);
        assert_eq!(legal.positions(), vec![pos(2, 4), pos(3, 5), pos(4, 2), pos(5, 3)]);
    }

    #[test]
    fn captures_union_across_directions() {
        // Playing (4,4) brackets a column run and a row run at once.
        let board: Board = "
            ........
            ....X...
            ....O...
            ....O...
            .XOO....
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        let captures = legal_moves(&board, Side::Dark).captures(pos(4, 4)).unwrap();

        let expected: Vec<Position> = vec![pos(2, 4), pos(3, 4), pos(4, 2), pos(4, 3)];
        assert_eq!(captures.iter().collect::<Vec<_>>(), expected);
        assert_eq!(captures.len(), 4);
    }

    #[test]
    fn ray_leaving_the_board_captures_nothing() {
        let board: Board = "
            OOOOOOO.
            ........
            ........
            ........
            ........
            ........
            ........
            .......X
        "
        .parse()
        .unwrap();

        assert!(legal_moves(&board, Side::Dark).is_empty());
        assert_eq!(legal_moves(&board, Side::Dark).captures(pos(0, 7)), None);
    }

    #[test]
    fn every_capture_is_bracketed_opponent_disc_on_a_line() {
        let board = midgame();

        for side in [Side::Dark, Side::Light] {
            for (dest, captures) in legal_moves(&board, side).iter() {
                assert!(!captures.is_empty());
                assert_eq!(board.cell(dest), Cell::Empty);

                for captured in captures.iter() {
                    assert_eq!(board.cell(captured), Cell::from(side.opponent()));

                    let dr = (captured.row as i32 - dest.row as i32).signum();
                    let dc = (captured.col as i32 - dest.col as i32).signum();
                    let dist_r = (captured.row as i32 - dest.row as i32).abs();
                    let dist_c = (captured.col as i32 - dest.col as i32).abs();
                    assert!(dist_r == 0 || dist_c == 0 || dist_r == dist_c);

                    // Walk past the captured disc: only opponent discs until our own.
                    let (mut r, mut c) = (captured.row as i32 + dr, captured.col as i32 + dc);
                    loop {
                        assert!(in_bounds(r, c), "capture at {captured} is not bracketed");
                        let cell = board.cell(pos(r as u8, c as u8));
                        if cell == Cell::from(side) {
                            break;
                        }
                        assert_eq!(cell, Cell::from(side.opponent()));
                        r += dr;
                        c += dc;
                    }
                }
            }
        }
    }

    #[test]
    fn occupied_squares_are_never_legal() {
        let board = midgame();

        for side in [Side::Dark, Side::Light] {
            for (dest, _) in legal_moves(&board, side).iter() {
                assert_eq!(board.occupied() & dest.bit(), 0);
            }
        }
    }

    #[test]
    fn legal_moves_is_deterministic() {
        let board = midgame();

        assert_eq!(legal_moves(&board, Side::Light), legal_moves(&board, Side::Light));
        assert_eq!(legal_moves(&board, Side::Dark), legal_moves(&board, Side::Dark));
    }
}
