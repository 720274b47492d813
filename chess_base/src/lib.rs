//! # Base types for plainchess
//!
//! This is an auxiliary crate for `plainchess` holding the plain value types: squares, colors,
//! pieces, board cells and coordinate sets. Everything here is independent from the rules.
//!
//! Normally you don't want to use this crate directly. Use `plainchess` instead, which re-exports
//! all the types from here.

pub mod bitboard;
pub mod geometry;
pub mod types;
