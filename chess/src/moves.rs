//! Moves and their validation

use crate::attack;
use crate::board::Board;
use crate::geometry;
use crate::types::{Color, Coord, CoordParseError, Piece};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Chess move
///
/// A move is just a pair of squares. Whether it can be made depends on the board it is
/// applied to and on the side to move.
///
/// Moves can have different degrees of validity:
///
/// - _Semilegal_. The piece on the source square belongs to the moving side, the
///   destination doesn't hold a piece of the same side, and the piece geometry allows the
///   move (including clear paths for sliding pieces).
///
/// - _Legal_. The move is semilegal and the king of the moving side is not attacked after
///   the move is made.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    src: Coord,
    dst: Coord,
}

/// Error indicating that move is invalid
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Source square is empty
    #[error("no piece on source square")]
    NoPiece,
    /// Piece on the source square belongs to the other side
    #[error("piece belongs to the other side")]
    WrongSide,
    /// Source and destination squares are equal
    #[error("source and destination are equal")]
    NullMove,
    /// Destination square holds a piece of the moving side
    #[error("destination holds a piece of the same side")]
    OwnPieceCaptured,
    /// The piece cannot move this way
    #[error("piece cannot move this way")]
    BadGeometry,
    /// The king of the moving side is attacked after the move
    #[error("king is left under attack")]
    KingExposed,
}

/// Error parsing [`Move`] from a coordinate pair
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    /// String is not two coordinates
    #[error("invalid string length")]
    BadLength,
    /// Bad source square
    #[error("bad source square: {0}")]
    Src(#[source] CoordParseError),
    /// Bad destination square
    #[error("bad destination square: {0}")]
    Dst(#[source] CoordParseError),
}

impl Move {
    #[inline]
    pub const fn new(src: Coord, dst: Coord) -> Move {
        Move { src, dst }
    }

    /// Creates a move from raw rows and columns
    ///
    /// Returns `None` if any of the coordinates lies outside the board.
    #[inline]
    pub fn from_row_col(src: (isize, isize), dst: (isize, isize)) -> Option<Move> {
        Some(Move {
            src: Coord::from_row_col(src.0, src.1)?,
            dst: Coord::from_row_col(dst.0, dst.1)?,
        })
    }

    /// Parses a move from a pair of coordinates, like `"e2e4"`
    ///
    /// Does the same as [`Move::from_str`].
    #[inline]
    pub fn from_coords(s: &str) -> Result<Move, MoveParseError> {
        Move::from_str(s)
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Returns `true` if the move is semilegal for side `side`
    #[inline]
    pub fn is_semilegal(&self, b: &Board, side: Color) -> bool {
        self.semi_validate(b, side).is_ok()
    }

    /// Returns `true` if the move is legal for side `side`
    #[inline]
    pub fn is_legal(&self, b: &Board, side: Color) -> bool {
        self.validate(b, side).is_ok()
    }

    /// Validates whether this move is semilegal for side `side`
    pub fn semi_validate(&self, b: &Board, side: Color) -> Result<(), ValidateError> {
        let src_cell = b.get(self.src);
        let (color, piece) = match (src_cell.color(), src_cell.piece()) {
            (Some(color), Some(piece)) => (color, piece),
            _ => return Err(ValidateError::NoPiece),
        };
        if color != side {
            return Err(ValidateError::WrongSide);
        }
        if self.src == self.dst {
            return Err(ValidateError::NullMove);
        }
        if b.get(self.dst).color() == Some(side) {
            return Err(ValidateError::OwnPieceCaptured);
        }
        let ok = match piece {
            Piece::Pawn => is_pawn_move_valid(b, side, self.src, self.dst),
            _ => attack::piece_reaches(b, piece, self.src, self.dst),
        };
        if !ok {
            return Err(ValidateError::BadGeometry);
        }
        Ok(())
    }

    /// Validates whether this move is legal for side `side`
    ///
    /// The move is tried on a scratch copy of the board, so `b` itself is never touched.
    pub fn validate(&self, b: &Board, side: Color) -> Result<(), ValidateError> {
        self.semi_validate(b, side)?;
        let mut scratch = *b;
        scratch.relocate(self.src, self.dst);
        if attack::is_king_in_check(&scratch, side) {
            return Err(ValidateError::KingExposed);
        }
        Ok(())
    }
}

fn is_pawn_move_valid(b: &Board, c: Color, src: Coord, dst: Coord) -> bool {
    let dir = geometry::pawn_forward_delta(c);
    let dr = dst.row() as isize - src.row() as isize;
    let dc = dst.col() as isize - src.col() as isize;
    let dst_cell = b.get(dst);

    if dc == 0 && dst_cell.is_free() {
        if dr == dir {
            return true;
        }
        if src.rank() == geometry::pawn_start_rank(c) && dr == 2 * dir {
            return src
                .try_shift(dir, 0)
                .map_or(false, |mid| b.get(mid).is_free());
        }
    }

    attack::pawn_attacks(c, src, dst) && dst_cell.color() == Some(c.inv())
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(MoveParseError::BadLength);
        }
        Ok(Move {
            src: Coord::from_str(&s[0..2]).map_err(MoveParseError::Src)?,
            dst: Coord::from_str(&s[2..4]).map_err(MoveParseError::Dst)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    fn mv(s: &str) -> Move {
        Move::from_str(s).unwrap()
    }

    #[test]
    fn test_parse() {
        let m = mv("e2e4");
        assert_eq!(m.src(), Coord::from_parts(File::E, Rank::R2));
        assert_eq!(m.dst(), Coord::from_parts(File::E, Rank::R4));
        assert_eq!(m.to_string(), "e2e4");
        assert_eq!(Move::from_row_col((6, 4), (4, 4)), Some(m));
        assert_eq!(Move::from_row_col((6, 4), (8, 4)), None);
        assert_eq!(Move::from_row_col((-1, 4), (4, 4)), None);

        assert_eq!(Move::from_str("e2e"), Err(MoveParseError::BadLength));
        assert_eq!(
            Move::from_str("e9e4"),
            Err(MoveParseError::Src(CoordParseError::UnexpectedRankChar('9')))
        );
        assert_eq!(
            Move::from_str("e2z4"),
            Err(MoveParseError::Dst(CoordParseError::UnexpectedFileChar('z')))
        );
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        for (s, res) in [
            ("e2e4", Ok(())),
            ("e2e3", Ok(())),
            ("g1f3", Ok(())),
            ("b1a3", Ok(())),
            ("e2e5", Err(ValidateError::BadGeometry)),
            ("e2d3", Err(ValidateError::BadGeometry)),
            ("f1c4", Err(ValidateError::BadGeometry)),
            ("a1a3", Err(ValidateError::BadGeometry)),
            ("d1d2", Err(ValidateError::OwnPieceCaptured)),
            ("e1e1", Err(ValidateError::NullMove)),
            ("e4e5", Err(ValidateError::NoPiece)),
            ("e7e5", Err(ValidateError::WrongSide)),
        ] {
            assert_eq!(mv(s).validate(&b, Color::White), res, "move {}", s);
        }
        assert!(mv("e7e5").is_legal(&b, Color::Black));
        assert!(mv("g8f6").is_legal(&b, Color::Black));
    }

    #[test]
    fn test_pawns() {
        let b = Board::from_cells("4k3/2p5/1P6/8/3p4/4P3/3PP3/4K3").unwrap();
        for (s, legal) in [
            // double step from the start rank
            ("d2d4", false), // blocked at the destination
            ("d2d3", true),
            ("e2e4", false), // blocked in the middle
            ("e3e4", true),
            ("e3e5", false), // not on the start rank
            ("e3d4", true),  // capture
            ("e3f4", false), // diagonal onto an empty square
            ("e2e3", false), // straight onto an occupied square
            ("b6c7", true),
            ("b6b7", true),
            ("b6a7", false),
            ("b6b5", false), // backwards
        ] {
            assert_eq!(mv(s).is_legal(&b, Color::White), legal, "move {}", s);
        }
        for (s, legal) in [
            ("c7c5", true),
            ("c7c6", true),
            ("c7b6", true),
            ("d4e3", true),
            ("d4d3", true),
            ("d4d2", false),
            ("d4c3", false),
        ] {
            assert_eq!(mv(s).is_legal(&b, Color::Black), legal, "move {}", s);
        }
    }

    #[test]
    fn test_sliders() {
        let b = Board::from_cells("4k3/8/8/3p4/8/1B3R2/8/Q3K3").unwrap();
        for (s, legal) in [
            ("b3d5", true),
            ("b3e6", false),
            ("b3a4", true),
            ("b3c3", false),
            ("f3f8", true),
            ("f3a3", false),
            ("f3c3", true),
            ("f3g4", false),
            ("a1h8", true),
            ("a1a8", true),
            ("a1b3", false),
            ("a1d1", true),
            ("a1f1", false),
        ] {
            assert_eq!(mv(s).is_legal(&b, Color::White), legal, "move {}", s);
        }
    }

    #[test]
    fn test_knight_king() {
        let b = Board::from_cells("4k3/8/8/8/4N3/8/8/4K3").unwrap();
        let knight_moves = ["e4f6", "e4d6", "e4c5", "e4c3", "e4d2", "e4f2", "e4g3", "e4g5"];
        for s in knight_moves {
            assert!(mv(s).is_legal(&b, Color::White), "move {}", s);
        }
        assert!(!mv("e4e6").is_legal(&b, Color::White));
        assert!(!mv("e4f5").is_legal(&b, Color::White));

        for s in ["e1d1", "e1d2", "e1e2", "e1f2", "e1f1"] {
            assert!(mv(s).is_legal(&b, Color::White), "move {}", s);
        }
        assert!(!mv("e1e3").is_legal(&b, Color::White));
        // No castling
        assert!(!mv("e1g1").is_legal(&b, Color::White));
    }

    #[test]
    fn test_self_check() {
        // Bishop on e2 is pinned by the rook on e8
        let b = Board::from_cells("4r2k/8/8/8/8/8/4B3/4K3").unwrap();
        assert_eq!(
            mv("e2d3").validate(&b, Color::White),
            Err(ValidateError::KingExposed)
        );
        assert!(mv("e2d3").is_semilegal(&b, Color::White));
        assert_eq!(
            mv("e1e2").validate(&b, Color::Black),
            Err(ValidateError::WrongSide)
        );

        // King cannot step onto an attacked square
        let b = Board::from_cells("3r3k/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(
            mv("e1d1").validate(&b, Color::White),
            Err(ValidateError::KingExposed)
        );
        assert_eq!(
            mv("e1d2").validate(&b, Color::White),
            Err(ValidateError::KingExposed)
        );
        assert_eq!(mv("e1f1").validate(&b, Color::White), Ok(()));

        // The scratch copy never leaks back
        let copy = b;
        let _ = mv("e1d1").validate(&b, Color::White);
        assert_eq!(b, copy);
    }

    #[test]
    fn test_check_evasions() {
        // White king on e1 is checked by the rook on e8
        let b = Board::from_cells("4r2k/8/8/8/8/8/3B4/R3K3").unwrap();
        // block
        assert!(mv("d2e3").is_legal(&b, Color::White));
        assert!(mv("a1e1").validate(&b, Color::White).is_err());
        // step away
        assert!(mv("e1f1").is_legal(&b, Color::White));
        assert!(!mv("e1e2").is_legal(&b, Color::White));
        // unrelated moves don't help
        assert_eq!(
            mv("a1a7").validate(&b, Color::White),
            Err(ValidateError::KingExposed)
        );

        // capture the checker
        let b = Board::from_cells("7k/8/8/8/8/8/4r3/R3K3").unwrap();
        assert!(mv("e1e2").is_legal(&b, Color::White));
        let b = Board::from_cells("R3r2k/8/8/8/8/8/8/4K3").unwrap();
        assert!(mv("a8e8").is_legal(&b, Color::White));
        assert!(!mv("a8a7").is_legal(&b, Color::White));
    }
}
