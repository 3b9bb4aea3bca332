//! The hive: an immutable stacking board

use crate::hex::Hex;
use crate::pieces::{Color, Piece};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// MOVES
// ============================================================================

/// A move: place a new piece from inventory, or relocate a stack's top piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Place { piece: Piece, to: Hex },
    Movement { from: Hex, to: Hex },
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { piece, to } => write!(f, "{}({},{})", piece, to.q, to.r),
            Move::Movement { from, to } => {
                write!(f, "({},{})->({},{})", from.q, from.r, to.q, to.r)
            }
        }
    }
}

// ============================================================================
// BOARD STATE
// ============================================================================

/// The board: occupied cells mapped to their piece stacks, bottom to top.
///
/// A key exists only while its stack is non-empty. Values are snapshots:
/// `apply` returns a new hive and never mutates the receiver, so callers may
/// keep old boards around for history or comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hive {
    cells: FxHashMap<Hex, Vec<Piece>>,
}

impl Hive {
    /// Empty board at game start
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hive by pushing pieces in slice order; later entries at the
    /// same cell stack on top of earlier ones
    pub fn from_pieces(pieces: &[(Hex, Piece)]) -> Self {
        let mut hive = Self::new();
        for &(hex, piece) in pieces {
            hive.push_top(hex, piece);
        }
        hive
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_occupied(&self, hex: Hex) -> bool {
        self.cells.contains_key(&hex)
    }

    /// Stack height at a cell (0 when empty)
    pub fn height(&self, hex: Hex) -> usize {
        self.cells.get(&hex).map_or(0, Vec::len)
    }

    /// Topmost piece at a cell
    pub fn top(&self, hex: Hex) -> Option<&Piece> {
        self.cells.get(&hex).and_then(|stack| stack.last())
    }

    /// Full stack at a cell, bottom to top
    pub fn stack(&self, hex: Hex) -> Option<&[Piece]> {
        self.cells.get(&hex).map(Vec::as_slice)
    }

    /// Iterate occupied cells
    pub fn occupied(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells.keys().copied()
    }

    /// Iterate (cell, stack) pairs
    pub fn stacks(&self) -> impl Iterator<Item = (Hex, &[Piece])> + '_ {
        self.cells.iter().map(|(&hex, stack)| (hex, stack.as_slice()))
    }

    /// Whether any piece of `color` sits anywhere in the hive, buried or not
    pub fn contains_color(&self, color: Color) -> bool {
        self.cells.values().flatten().any(|p| p.color == color)
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a move, returning the new board.
    ///
    /// Precondition: the move came from a query operation (placement spots or
    /// piece destinations). Illegal moves are not detected here; relocating
    /// from an empty cell panics.
    pub fn apply(&self, mv: &Move) -> Self {
        let mut next = self.clone();
        next.apply_internal(mv);
        next
    }

    fn apply_internal(&mut self, mv: &Move) {
        match *mv {
            Move::Place { piece, to } => self.push_top(to, piece),
            Move::Movement { from, to } => {
                let piece = self.pop_top(from);
                self.push_top(to, piece);
            }
        }
    }

    /// Hive with the top piece at `hex` removed, for reachability and
    /// connectivity checks
    pub(crate) fn lifted(&self, hex: Hex) -> Self {
        let mut next = self.clone();
        next.pop_top(hex);
        next
    }

    fn push_top(&mut self, hex: Hex, piece: Piece) {
        self.cells.entry(hex).or_default().push(piece);
    }

    fn pop_top(&mut self, hex: Hex) -> Piece {
        let stack = self.cells.get_mut(&hex).expect("No piece at from position");
        let piece = stack.pop().expect("No piece at from position");
        if stack.is_empty() {
            self.cells.remove(&hex);
        }
        piece
    }
}

impl fmt::Display for Hive {
    /// Staggered ASCII grid showing each cell's top piece code
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut min_q = 0;
        let mut max_q = 0;
        let mut min_r = 0;
        let mut max_r = 0;
        for hex in self.occupied() {
            min_q = min_q.min(hex.q);
            max_q = max_q.max(hex.q);
            min_r = min_r.min(hex.r);
            max_r = max_r.max(hex.r);
        }

        for r in (min_r - 1)..=(max_r + 1) {
            for _ in 0..(r - min_r + 1) {
                write!(f, " ")?;
            }
            for q in (min_q - 1)..=(max_q + 1) {
                match self.top(Hex::new(q, r)) {
                    Some(p) => write!(f, "{}{} ", p.color.letter(), p.insect.letter())?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Insect;

    fn piece(color: Color, insect: Insect, tag: u8) -> Piece {
        Piece::new(color, insect, tag)
    }

    #[test]
    fn test_from_pieces_stacks_in_order() {
        let hive = Hive::from_pieces(&[
            (Hex::new(0, 0), piece(Color::White, Insect::Ant, 1)),
            (Hex::new(0, 0), piece(Color::Black, Insect::Beetle, 1)),
            (Hex::new(1, 0), piece(Color::Black, Insect::Bee, 1)),
        ]);
        assert_eq!(hive.height(Hex::new(0, 0)), 2);
        assert_eq!(hive.top(Hex::new(0, 0)).unwrap().insect, Insect::Beetle);
        assert_eq!(hive.stack(Hex::new(0, 0)).unwrap()[0].insect, Insect::Ant);
        assert_eq!(hive.height(Hex::new(1, 0)), 1);
    }

    #[test]
    fn test_apply_never_mutates_the_receiver() {
        let hive = Hive::from_pieces(&[
            (Hex::new(0, 0), piece(Color::White, Insect::Bee, 1)),
            (Hex::new(1, 0), piece(Color::Black, Insect::Ant, 1)),
        ]);
        let moved = hive.apply(&Move::Movement {
            from: Hex::new(1, 0),
            to: Hex::new(1, -1),
        });
        assert!(hive.is_occupied(Hex::new(1, 0)));
        assert!(!moved.is_occupied(Hex::new(1, 0)));
        assert!(moved.is_occupied(Hex::new(1, -1)));
    }

    #[test]
    fn test_moving_back_restores_the_board() {
        let hive = Hive::from_pieces(&[
            (Hex::new(0, 0), piece(Color::White, Insect::Bee, 1)),
            (Hex::new(1, 0), piece(Color::Black, Insect::Ant, 1)),
        ]);
        let there = hive.apply(&Move::Movement {
            from: Hex::new(1, 0),
            to: Hex::new(0, 1),
        });
        let back = there.apply(&Move::Movement {
            from: Hex::new(0, 1),
            to: Hex::new(1, 0),
        });
        assert_eq!(hive, back);
    }

    #[test]
    fn test_last_piece_leaving_drops_the_key() {
        let hive = Hive::from_pieces(&[
            (Hex::new(0, 0), piece(Color::White, Insect::Bee, 1)),
            (Hex::new(1, 0), piece(Color::White, Insect::Beetle, 1)),
        ]);
        // Beetle climbs onto the bee, then leaves again
        let stacked = hive.apply(&Move::Movement {
            from: Hex::new(1, 0),
            to: Hex::new(0, 0),
        });
        assert!(!stacked.is_occupied(Hex::new(1, 0)));
        assert_eq!(stacked.height(Hex::new(0, 0)), 2);

        let unstacked = stacked.apply(&Move::Movement {
            from: Hex::new(0, 0),
            to: Hex::new(1, 0),
        });
        assert_eq!(unstacked.height(Hex::new(0, 0)), 1);
        assert_eq!(unstacked.top(Hex::new(0, 0)).unwrap().insect, Insect::Bee);
        assert_eq!(unstacked, hive);
    }

    #[test]
    fn test_place_draws_from_nowhere() {
        let hive = Hive::new();
        assert!(hive.is_empty());
        let placed = hive.apply(&Move::Place {
            piece: piece(Color::White, Insect::Spider, 1),
            to: Hex::new(0, 0),
        });
        assert!(hive.is_empty());
        assert_eq!(placed.height(Hex::new(0, 0)), 1);
        assert!(placed.contains_color(Color::White));
        assert!(!placed.contains_color(Color::Black));
    }

    #[test]
    fn test_move_notation() {
        let place = Move::Place {
            piece: piece(Color::White, Insect::Bee, 1),
            to: Hex::new(0, -1),
        };
        let movement = Move::Movement {
            from: Hex::new(0, 0),
            to: Hex::new(2, -1),
        };
        assert_eq!(place.to_string(), "wQ(0,-1)");
        assert_eq!(movement.to_string(), "(0,0)->(2,-1)");
    }

    #[test]
    fn test_display_renders_tops() {
        let hive = Hive::from_pieces(&[
            (Hex::new(0, 0), piece(Color::White, Insect::Bee, 1)),
            (Hex::new(1, 0), piece(Color::Black, Insect::Ant, 1)),
        ]);
        let text = hive.to_string();
        assert!(text.contains("wQ"));
        assert!(text.contains("bA"));
    }
}
