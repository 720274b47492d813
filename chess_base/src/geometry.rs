use crate::types::{Color, Rank};

pub const fn home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

pub const fn pawn_start_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// Rank on which a pawn of color `c` is promoted
pub const fn promote_rank(c: Color) -> Rank {
    home_rank(c.inv())
}

/// Row delta of a single pawn step
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks() {
        assert_eq!(pawn_start_rank(Color::White).index(), 6);
        assert_eq!(pawn_start_rank(Color::Black).index(), 1);
        assert_eq!(promote_rank(Color::White).index(), 0);
        assert_eq!(promote_rank(Color::Black).index(), 7);
        for c in Color::iter() {
            let start = pawn_start_rank(c).index() as isize;
            assert_eq!(start - pawn_forward_delta(c), home_rank(c).index() as isize);
        }
    }
}
