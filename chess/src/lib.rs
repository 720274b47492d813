//! # Plainchess
//!
//! A small chess rules engine for two human players. It keeps the board, checks whether moves
//! are legal (including the rule that a move must not leave its own king attacked), applies
//! and takes back moves, and detects check, checkmate and stalemate.
//!
//! The rule set is deliberately reduced: there is no castling, no en passant, and a pawn
//! reaching the last rank always becomes a queen. The only draw is stalemate.
//!
//! # Example
//!
//! ```
//! # use plainchess::{Color, Game, Move};
//! #
//! let mut game = Game::new();
//! for s in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     let mv: Move = s.parse().unwrap();
//!     assert!(game.make_move(mv.src(), mv.dst()));
//! }
//!
//! assert!(game.is_finished());
//! assert!(game.is_checkmate(Color::White));
//! assert_eq!(game.outcome().and_then(|o| o.winner()), Some(Color::Black));
//! ```

pub mod attack;
pub mod between;
pub mod board;
pub mod game;
pub mod movegen;
pub mod moves;

pub use plainchess_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::Board;
pub use game::{Game, HistoryEntry};
pub use movegen::MoveList;
pub use moves::{Move, ValidateError};
pub use types::{Cell, Color, Coord, DrawReason, File, Outcome, Piece, Rank, WinReason};
