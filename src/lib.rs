//! Rules engine and move search for the board game Hive.
//!
//! The board is a [`Hive`]: stacks of pieces keyed by axial hex coordinates.
//! Per-insect movement lives in [`moves`], the one-hive rule in
//! [`connectivity`], turn assembly and win detection in [`game`], and a
//! seeded negamax searcher in [`ai`].

pub mod ai;
pub mod connectivity;
pub mod eval;
pub mod game;
pub mod hex;
pub mod hive;
pub mod moves;
pub mod pieces;

pub use ai::HiveAi;
pub use connectivity::locked_cells;
pub use eval::{evaluate, Heuristics};
pub use game::{available_insects, legal_moves, placements, remaining, winner, Winner, ORIGIN};
pub use hex::{Hex, DIRECTIONS};
pub use hive::{Hive, Move};
pub use moves::destinations;
pub use pieces::{Color, Insect, ParseInsectError, Piece, INSECTS};
