//! Attack detection
//!
//! Attacks are pure geometry: a piece attacks a square if it could capture a piece standing
//! there, ignoring whether such a capture would expose its own king. The only difference from
//! normal movement is the pawn, which attacks both forward diagonals even when they are empty.

use crate::between;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::types::{Color, Coord, Piece};

#[inline]
fn delta(src: Coord, dst: Coord) -> (isize, isize) {
    (
        dst.row() as isize - src.row() as isize,
        dst.col() as isize - src.col() as isize,
    )
}

/// Returns `true` if a non-pawn piece `p` standing on `src` reaches `dst`
///
/// This geometry is shared by movement and attacks. Sliding pieces need a clear path; the
/// contents of `dst` itself are not inspected.
pub(crate) fn piece_reaches(b: &Board, p: Piece, src: Coord, dst: Coord) -> bool {
    let (dr, dc) = delta(src, dst);
    match p {
        Piece::Knight => matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2)),
        Piece::King => src != dst && dr.abs() <= 1 && dc.abs() <= 1,
        Piece::Bishop => between::is_diag(src, dst) && between::is_path_clear(b, src, dst),
        Piece::Rook => between::is_line(src, dst) && between::is_path_clear(b, src, dst),
        Piece::Queen => {
            (between::is_diag(src, dst) || between::is_line(src, dst))
                && between::is_path_clear(b, src, dst)
        }
        Piece::Pawn => false,
    }
}

/// Returns `true` if a pawn of color `c` on `src` attacks `dst`
#[inline]
pub fn pawn_attacks(c: Color, src: Coord, dst: Coord) -> bool {
    let (dr, dc) = delta(src, dst);
    dr == geometry::pawn_forward_delta(c) && dc.abs() == 1
}

/// Returns `true` if the piece on `src` attacks `dst`
///
/// Empty squares attack nothing.
pub fn can_attack(b: &Board, src: Coord, dst: Coord) -> bool {
    let cell = b.get(src);
    match (cell.color(), cell.piece()) {
        (Some(c), Some(Piece::Pawn)) => pawn_attacks(c, src, dst),
        (Some(_), Some(p)) => piece_reaches(b, p, src, dst),
        _ => false,
    }
}

/// Returns `true` if any piece of color `by` attacks `target`
pub fn is_square_attacked(b: &Board, by: Color, target: Coord) -> bool {
    b.pieces(by).any(|(src, _)| can_attack(b, src, target))
}

/// Returns all the pieces of color `by` attacking `target`
pub fn attackers(b: &Board, by: Color, target: Coord) -> Bitboard {
    b.pieces(by)
        .map(|(src, _)| src)
        .filter(|&src| can_attack(b, src, target))
        .collect()
}

/// Returns `true` if the king of color `c` is attacked
///
/// A board without such king is never in check.
pub fn is_king_in_check(b: &Board, c: Color) -> bool {
    match b.king_pos(c) {
        Some(king) => is_square_attacked(b, c.inv(), king),
        None => false,
    }
}
