//! Position scoring: bee crowding and piece mobility

use crate::connectivity::locked_cells;
use crate::hive::Hive;
use crate::pieces::{Color, Insect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Evaluation weights, tunable and serializable so sets can be kept on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Points per occupied neighbor of a bee
    pub surround_weight: i32,
    /// Points per pinned single-piece cell
    pub mobility_weight: i32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            surround_weight: 100,
            mobility_weight: 10,
        }
    }
}

impl Heuristics {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let heuristics = serde_json::from_str(&text)?;
        Ok(heuristics)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// Score from white's point of view: positive favors white.
///
/// Each occupied neighbor of a bee counts against that bee's owner, buried
/// bees included. Each cell the one-hive rule pins counts against the owner
/// of its piece.
pub fn evaluate(hive: &Hive, heuristics: &Heuristics) -> i32 {
    let mut score = 0;

    for (cell, stack) in hive.stacks() {
        for piece in stack {
            if piece.insect != Insect::Bee {
                continue;
            }
            let crowding = cell
                .neighbors()
                .iter()
                .filter(|&&n| hive.is_occupied(n))
                .count() as i32;
            match piece.color {
                Color::White => score -= heuristics.surround_weight * crowding,
                Color::Black => score += heuristics.surround_weight * crowding,
            }
        }
    }

    if let Some(root) = hive.occupied().min() {
        for cell in locked_cells(hive, root) {
            let top = hive.top(cell).expect("Locked cell has a top piece");
            match top.color {
                Color::White => score -= heuristics.mobility_weight,
                Color::Black => score += heuristics.mobility_weight,
            }
        }
    }

    score
}
