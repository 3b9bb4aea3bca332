//! Turn-level rules: placement, piece pools, win detection, legal moves

use crate::connectivity::locked_cells;
use crate::hex::Hex;
use crate::hive::{Hive, Move};
use crate::moves::destinations;
use crate::pieces::{Color, Insect, Piece, INSECTS};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Where the first piece of the game goes
pub const ORIGIN: Hex = Hex::new(0, 0);

/// Outcome of a finished game. A move that surrounds both bees at once is a
/// draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    White,
    Black,
    Draw,
}

// ============================================================================
// PLACEMENT
// ============================================================================

/// Empty cells where `color` may introduce a new piece.
///
/// On an empty board the only spot is [`ORIGIN`]. A color with no piece in
/// the hive yet may use any empty cell touching it. After that, spots must
/// touch one of the color's own top pieces and none of the enemy's.
pub fn placements(hive: &Hive, color: Color) -> FxHashSet<Hex> {
    let mut spots = FxHashSet::default();
    if hive.is_empty() {
        spots.insert(ORIGIN);
        return spots;
    }

    if !hive.contains_color(color) {
        for cell in hive.occupied() {
            for n in cell.neighbors() {
                if !hive.is_occupied(n) {
                    spots.insert(n);
                }
            }
        }
        return spots;
    }

    for cell in hive.occupied() {
        let top = hive.top(cell).expect("Occupied cell has a top piece");
        if top.color == color {
            for n in cell.neighbors() {
                if !hive.is_occupied(n) {
                    spots.insert(n);
                }
            }
        }
    }
    for cell in hive.occupied() {
        let top = hive.top(cell).expect("Occupied cell has a top piece");
        if top.color != color {
            for n in cell.neighbors() {
                spots.remove(&n);
            }
        }
    }
    spots
}

// ============================================================================
// PIECE POOLS
// ============================================================================

/// How many of `insect` the player still holds. Buried pieces count as
/// placed.
pub fn remaining(hive: &Hive, color: Color, insect: Insect) -> u8 {
    let placed = hive
        .stacks()
        .flat_map(|(_, stack)| stack.iter())
        .filter(|p| p.color == color && p.insect == insect)
        .count() as u8;
    insect.pool_size().saturating_sub(placed)
}

/// Insect kinds the player can still place, in fixed pool order.
pub fn available_insects(hive: &Hive, color: Color) -> Vec<Insect> {
    INSECTS
        .into_iter()
        .filter(|&insect| remaining(hive, color, insect) > 0)
        .collect()
}

/// Smallest pool tag not yet on the board for this color and kind.
pub(crate) fn next_tag(hive: &Hive, color: Color, insect: Insect) -> u8 {
    let used: FxHashSet<u8> = hive
        .stacks()
        .flat_map(|(_, stack)| stack.iter())
        .filter(|p| p.color == color && p.insect == insect)
        .map(|p| p.tag)
        .collect();
    (1..=insect.pool_size())
        .find(|tag| !used.contains(tag))
        .expect("No tag left in the pool")
}

// ============================================================================
// WIN DETECTION
// ============================================================================

/// Checks both bees, buried or not. A bee loses when all six neighbors of
/// its cell are occupied; both at once is a draw.
pub fn winner(hive: &Hive) -> Option<Winner> {
    let mut white_surrounded = false;
    let mut black_surrounded = false;
    for (cell, stack) in hive.stacks() {
        for piece in stack {
            if piece.insect != Insect::Bee {
                continue;
            }
            if cell.neighbors().iter().all(|&n| hive.is_occupied(n)) {
                match piece.color {
                    Color::White => white_surrounded = true,
                    Color::Black => black_surrounded = true,
                }
            }
        }
    }
    match (white_surrounded, black_surrounded) {
        (true, true) => Some(Winner::Draw),
        (true, false) => Some(Winner::Black),
        (false, true) => Some(Winner::White),
        (false, false) => None,
    }
}

// ============================================================================
// LEGAL MOVES
// ============================================================================

/// Every move `color` may play: one placement per open spot and available
/// kind, plus the movements of each unpinned top piece of that color.
pub fn legal_moves(hive: &Hive, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();

    let spots = placements(hive, color);
    for insect in available_insects(hive, color) {
        let piece = Piece::new(color, insect, next_tag(hive, color, insect));
        for &to in &spots {
            moves.push(Move::Place { piece, to });
        }
    }

    if let Some(root) = hive.occupied().min() {
        let locked = locked_cells(hive, root);
        for from in hive.occupied() {
            let top = hive.top(from).expect("Occupied cell has a top piece");
            if top.color != color || locked.contains(&from) {
                continue;
            }
            for to in destinations(hive, from) {
                moves.push(Move::Movement { from, to });
            }
        }
    }

    moves
}
