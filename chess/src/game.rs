//! Game session

use crate::attack;
use crate::bitboard::Bitboard;
use crate::board::{Board, CellsParseError, Pretty, PrettyStyle};
use crate::geometry;
use crate::movegen::{self, MoveList};
use crate::moves::{Move, ValidateError};
use crate::types::{Cell, Color, ColorParseError, Coord, DrawReason, Outcome, Piece, WinReason};

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use thiserror::Error;

/// Error parsing a position string, like `"4k3/8/8/8/8/8/8/4K3 w"`
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PositionParseError {
    #[error("board not specified")]
    NoBoard,
    #[error("bad board: {0}")]
    Board(#[from] CellsParseError),
    #[error("no move side")]
    NoMoveSide,
    #[error("bad move side: {0}")]
    MoveSide(#[from] ColorParseError),
    #[error("extra data in position")]
    ExtraData,
}

/// Applied move along with everything needed to take it back
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HistoryEntry {
    mv: Move,
    piece: Cell,
    captured: Option<Cell>,
}

impl HistoryEntry {
    #[inline]
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Piece as it stood on the source square before the move
    ///
    /// For a promoted pawn this is still the pawn.
    #[inline]
    pub fn piece(&self) -> Cell {
        self.piece
    }

    #[inline]
    pub fn captured(&self) -> Option<Cell> {
        self.captured
    }
}

/// Chess game in progress
///
/// Owns the board together with the side to move, the check flags, the history of applied
/// moves and the captured pieces. Commands never fail loudly: a move which cannot be made is
/// declined, and the game state stays untouched.
///
/// Once the game ends by checkmate or stalemate, it is frozen. No more moves can be made or
/// undone until [`Game::reset()`] is called.
///
/// # Example
///
/// ```
/// # use plainchess::{Color, Coord, File, Game, Rank};
/// #
/// let mut game = Game::new();
/// let e2 = Coord::from_parts(File::E, Rank::R2);
/// let e4 = Coord::from_parts(File::E, Rank::R4);
/// let e5 = Coord::from_parts(File::E, Rank::R5);
///
/// assert!(!game.make_move(e2, e5));
/// assert!(game.make_move(e2, e4));
/// assert_eq!(game.side(), Color::Black);
/// assert_eq!(game.len(), 1);
///
/// assert!(game.undo_move());
/// assert_eq!(game, Game::new());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    side: Color,
    check: [bool; 2],
    outcome: Option<Outcome>,
    history: Vec<HistoryEntry>,
    captured: [Vec<Cell>; 2],
}

impl Game {
    /// Creates a game from the standard initial position with White to move
    pub fn new() -> Game {
        Game::from_board(Board::initial(), Color::White)
    }

    /// Creates a game from an arbitrary board
    ///
    /// The board is not checked for sanity. Check flags are computed right away, and the game
    /// is already finished if `side` has no legal moves.
    pub fn from_board(board: Board, side: Color) -> Game {
        let mut res = Game {
            board,
            side,
            check: [false; 2],
            outcome: None,
            history: Vec::new(),
            captured: [Vec::new(), Vec::new()],
        };
        res.update_checks();
        res.outcome = res.calc_outcome();
        res
    }

    /// Parses a game from a position string
    ///
    /// The string contains the piece placement part of FEN and the side to move, separated by
    /// a space, like `"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"`.
    pub fn from_position(s: &str) -> Result<Game, PositionParseError> {
        let mut iter = s.split_ascii_whitespace();
        let board = Board::from_cells(iter.next().ok_or(PositionParseError::NoBoard)?)?;
        let side = Color::from_str(iter.next().ok_or(PositionParseError::NoMoveSide)?)?;
        if iter.next().is_some() {
            return Err(PositionParseError::ExtraData);
        }
        Ok(Game::from_board(board, side))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Returns `true` if the king of color `c` is in check
    #[inline]
    pub fn is_check(&self, c: Color) -> bool {
        self.check[c.index()]
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns the pieces of color `c` which were captured, in capture order
    #[inline]
    pub fn captured(&self, c: Color) -> &[Cell] {
        &self.captured[c.index()]
    }

    #[inline]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the number of applied moves
    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Checks whether the move from `src` to `dst` is legal for the side to move
    ///
    /// Unlike [`Game::make_move()`], doesn't care whether the game is finished.
    #[inline]
    pub fn validate(&self, src: Coord, dst: Coord) -> Result<(), ValidateError> {
        Move::new(src, dst).validate(&self.board, self.side)
    }

    #[inline]
    pub fn is_legal_move(&self, src: Coord, dst: Coord) -> bool {
        self.validate(src, dst).is_ok()
    }

    /// Same as [`Game::is_legal_move()`], but accepts raw `(row, col)` pairs
    ///
    /// Row 0 is the eighth rank and column 0 is the `a` file. Coordinates outside the board
    /// make the move illegal.
    pub fn is_legal_move_at(&self, src: (isize, isize), dst: (isize, isize)) -> bool {
        match Move::from_row_col(src, dst) {
            Some(mv) => mv.is_legal(&self.board, self.side),
            None => false,
        }
    }

    /// Returns the squares where the piece on `src` can legally move
    ///
    /// The result is empty for an empty square or a piece of the side not to move.
    pub fn legal_destinations(&self, src: Coord) -> Bitboard {
        movegen::destinations(&self.board, self.side, src)
    }

    /// Returns all the legal moves of the side to move
    pub fn legal_moves(&self) -> MoveList {
        movegen::gen_legal(&self.board, self.side)
    }

    /// Returns the pieces giving check to the side to move
    pub fn checkers(&self) -> Bitboard {
        match self.board.king_pos(self.side) {
            Some(king) => attack::attackers(&self.board, self.side.inv(), king),
            None => Bitboard::EMPTY,
        }
    }

    /// Returns `true` if color `side` has a legal move, as if it were its turn
    pub fn has_any_legal_move(&self, side: Color) -> bool {
        movegen::has_legal_moves(&self.board, side)
    }

    pub fn is_checkmate(&self, side: Color) -> bool {
        self.is_check(side) && !self.has_any_legal_move(side)
    }

    pub fn is_stalemate(&self, side: Color) -> bool {
        !self.is_check(side) && !self.has_any_legal_move(side)
    }

    /// Makes the move from `src` to `dst`
    ///
    /// Returns `false` and leaves the game untouched if the game is finished or the move is
    /// not legal. A pawn reaching the last rank always becomes a queen.
    pub fn make_move(&mut self, src: Coord, dst: Coord) -> bool {
        if let Some(outcome) = self.outcome {
            debug!("move {}{} declined: game is over ({})", src, dst, outcome);
            return false;
        }
        let mv = Move::new(src, dst);
        if let Err(e) = mv.validate(&self.board, self.side) {
            debug!("move {} declined: {}", mv, e);
            return false;
        }

        #[cfg(feature = "selftest")]
        let before = self.clone();

        let piece = self.board.get(src);
        let taken = self.board.relocate(src, dst);
        let captured = match taken.color() {
            Some(c) => {
                self.captured[c.index()].push(taken);
                Some(taken)
            }
            None => None,
        };
        self.history.push(HistoryEntry {
            mv,
            piece,
            captured,
        });
        if piece.piece() == Some(Piece::Pawn) && dst.rank() == geometry::promote_rank(self.side) {
            self.board.put(dst, piece.with_piece(Piece::Queen));
        }
        self.side = self.side.inv();
        self.update_checks();
        debug!("move {} applied, {} to move", mv, self.side);

        self.outcome = self.calc_outcome();
        if let Some(outcome) = self.outcome {
            info!("game over after {} moves: {}", self.len(), outcome);
        }

        #[cfg(feature = "selftest")]
        {
            let mut probe = self.clone();
            probe.unmake();
            assert_eq!(probe.board, before.board, "undo of {} broke the board", mv);
            assert_eq!(probe.side, before.side);
            assert_eq!(probe.check, before.check);
            assert_eq!(probe.captured, before.captured);
        }

        true
    }

    /// Same as [`Game::make_move()`], but accepts raw `(row, col)` pairs
    ///
    /// Coordinates outside the board make the move declined.
    pub fn make_move_at(&mut self, src: (isize, isize), dst: (isize, isize)) -> bool {
        match Move::from_row_col(src, dst) {
            Some(mv) => self.make_move(mv.src(), mv.dst()),
            None => {
                debug!("move {:?} -> {:?} declined: outside the board", src, dst);
                false
            }
        }
    }

    /// Takes back the last move
    ///
    /// Returns `false` if there are no moves to undo or the game is finished.
    pub fn undo_move(&mut self) -> bool {
        if self.outcome.is_some() {
            debug!("undo declined: game is over");
            return false;
        }
        match self.unmake() {
            Some(mv) => {
                debug!("move {} undone, {} to move", mv, self.side);
                true
            }
            None => {
                debug!("undo declined: no moves made");
                false
            }
        }
    }

    /// Restarts the game from the initial position
    pub fn reset(&mut self) {
        *self = Game::new();
        debug!("game reset");
    }

    /// Wraps the game to allow pretty-printing of its board
    ///
    /// The side to move is marked next to the diagram.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        self.board.pretty_with_side(self.side, style)
    }

    fn unmake(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        let (src, dst) = (entry.mv.src(), entry.mv.dst());
        self.board.put(src, entry.piece);
        match entry.captured {
            Some(cell) => {
                self.board.put(dst, cell);
                if let Some(c) = cell.color() {
                    self.captured[c.index()].pop();
                }
            }
            None => self.board.put(dst, Cell::EMPTY),
        }
        self.side = self.side.inv();
        self.update_checks();
        Some(entry.mv)
    }

    fn update_checks(&mut self) {
        for c in Color::iter() {
            self.check[c.index()] = attack::is_king_in_check(&self.board, c);
        }
    }

    fn calc_outcome(&self) -> Option<Outcome> {
        if self.has_any_legal_move(self.side) {
            return None;
        }
        if self.is_check(self.side) {
            Some(Outcome::Win {
                side: self.side.inv(),
                reason: WinReason::Checkmate,
            })
        } else {
            Some(Outcome::Draw(DrawReason::Stalemate))
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl FromStr for Game {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Game, Self::Err> {
        Game::from_position(s)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.board, self.side)
    }
}
