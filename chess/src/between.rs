//! Straight and diagonal lines between two squares

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::types::Coord;

#[inline]
fn delta(src: Coord, dst: Coord) -> (isize, isize) {
    (
        dst.row() as isize - src.row() as isize,
        dst.col() as isize - src.col() as isize,
    )
}

/// Returns `true` if `src` and `dst` are distinct squares on one rank or one file
#[inline]
pub fn is_line(src: Coord, dst: Coord) -> bool {
    let (dr, dc) = delta(src, dst);
    (dr == 0) != (dc == 0)
}

/// Returns `true` if `src` and `dst` are distinct squares on one diagonal
#[inline]
pub fn is_diag(src: Coord, dst: Coord) -> bool {
    let (dr, dc) = delta(src, dst);
    dr != 0 && dr.abs() == dc.abs()
}

/// Returns the unit step leading from `src` to `dst`, or `None` if the squares are equal or
/// don't share a rank, a file or a diagonal
#[inline]
pub fn step(src: Coord, dst: Coord) -> Option<(isize, isize)> {
    if !is_line(src, dst) && !is_diag(src, dst) {
        return None;
    }
    let (dr, dc) = delta(src, dst);
    Some((dr.signum(), dc.signum()))
}

/// Returns the squares strictly between `src` and `dst`
///
/// The result is empty when the squares are adjacent or are not aligned.
pub fn strict(src: Coord, dst: Coord) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    let (dr, dc) = match step(src, dst) {
        Some(s) => s,
        None => return res,
    };
    let mut cur = src.try_shift(dr, dc);
    while let Some(c) = cur {
        if c == dst {
            break;
        }
        res.set(c);
        cur = c.try_shift(dr, dc);
    }
    res
}

/// Returns `true` if no square strictly between `src` and `dst` is occupied
///
/// Neither endpoint is inspected. The squares must be aligned, otherwise there is nothing
/// between them and the path is reported as clear.
pub fn is_path_clear(b: &Board, src: Coord, dst: Coord) -> bool {
    strict(src, dst).into_iter().all(|c| b.get(c).is_free())
}
