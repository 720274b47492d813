//! Legal move generation
//!
//! Candidates are produced by trying every destination square for every piece of the side,
//! and each candidate goes through full validation. The board has 64 squares, so this stays a
//! small bounded amount of work.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::Move;
use crate::types::{Color, Coord};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Upper bound for the number of moves of one side on any board
///
/// A side with `n` pieces can only move to the other `64 - n` squares, so there are at most
/// `n * (64 - n) <= 32 * 32` moves, even for boards which cannot arise in a real game.
pub const MAX_MOVES: usize = 32 * 32;

/// List of moves
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, MAX_MOVES>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, MAX_MOVES>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

fn legal_from(b: &Board, side: Color, src: Coord) -> impl Iterator<Item = Move> + '_ {
    Coord::iter()
        .map(move |dst| Move::new(src, dst))
        .filter(move |mv| mv.is_legal(b, side))
}

/// Returns the squares to which the piece on `src` can legally move
///
/// The result is empty if `src` holds no piece of color `side`.
pub fn destinations(b: &Board, side: Color, src: Coord) -> Bitboard {
    if b.get(src).color() != Some(side) {
        return Bitboard::EMPTY;
    }
    legal_from(b, side, src).map(|mv| mv.dst()).collect()
}

/// Generates all the legal moves of color `side`
pub fn gen_legal(b: &Board, side: Color) -> MoveList {
    let mut res = MoveList::new();
    for (src, _) in b.pieces(side) {
        // Cannot overflow, see `MAX_MOVES`
        res.extend(legal_from(b, side, src));
    }
    res
}

/// Returns `true` if color `side` has at least one legal move
///
/// Stops at the first legal move found.
pub fn has_legal_moves(b: &Board, side: Color) -> bool {
    b.pieces(side)
        .any(|(src, _)| legal_from(b, side, src).next().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(gen_legal(&b, Color::White).len(), 20);
        assert_eq!(gen_legal(&b, Color::Black).len(), 20);
        assert!(has_legal_moves(&b, Color::White));

        let g1 = Coord::from_parts(File::G, Rank::R1);
        assert_eq!(
            destinations(&b, Color::White, g1),
            Bitboard::EMPTY
                .with(Coord::from_parts(File::F, Rank::R3))
                .with(Coord::from_parts(File::H, Rank::R3))
        );
        assert_eq!(destinations(&b, Color::Black, g1), Bitboard::EMPTY);
        assert_eq!(
            destinations(&b, Color::White, Coord::from_parts(File::E, Rank::R4)),
            Bitboard::EMPTY
        );
        assert_eq!(
            destinations(&b, Color::White, Coord::from_parts(File::A, Rank::R1)),
            Bitboard::EMPTY
        );
    }

    #[test]
    fn test_counts() {
        for (cells, side, count) in [
            ("4k3/8/8/8/8/8/8/4K3", Color::White, 5),
            ("4k3/8/8/8/8/8/8/N3K3", Color::White, 5 + 2),
            ("4k3/8/8/8/8/8/8/Q3K3", Color::White, 5 + 17),
            ("7k/8/8/8/8/8/8/7K", Color::Black, 3),
        ] {
            let b = Board::from_cells(cells).unwrap();
            let moves = gen_legal(&b, side);
            assert_eq!(moves.len(), count, "position {}", cells);
            for mv in &moves {
                assert!(mv.is_legal(&b, side));
            }
        }
    }

    #[test]
    fn test_crowded_board() {
        // Far more pieces than a real game can have, the board is still accepted
        let b = Board::from_cells("Q1QQQQQQ/2Q4Q/1Q5Q/1Q5Q/1Q5Q/Q6Q/Q4QQQ/QQQQQ3").unwrap();
        let moves = gen_legal(&b, Color::White);
        assert!(moves.len() > 256);
        let total: u32 = b
            .pieces(Color::White)
            .map(|(src, _)| destinations(&b, Color::White, src).len())
            .sum();
        assert_eq!(moves.len(), total as usize);
        for mv in &moves {
            assert!(mv.is_legal(&b, Color::White));
        }
        assert!(gen_legal(&b, Color::Black).is_empty());

        // Worst case for the capacity: half of the board is ours, half is empty
        let b = Board::from_cells("QQQQQQQQ/QQQQQQQQ/QQQQQQQQ/QQQQQQQQ/8/8/8/8").unwrap();
        assert!(gen_legal(&b, Color::White).len() <= MAX_MOVES);
    }

    #[test]
    fn test_no_moves() {
        // Black king is stalemated in the corner
        let b = Board::from_cells("7k/5Q2/6K1/8/8/8/8/8").unwrap();
        assert!(!has_legal_moves(&b, Color::Black));
        assert!(gen_legal(&b, Color::Black).is_empty());
        assert!(has_legal_moves(&b, Color::White));

        // Nothing to move at all
        let b = Board::from_cells("8/8/8/8/8/8/8/4K3").unwrap();
        assert!(!has_legal_moves(&b, Color::Black));
    }
}
