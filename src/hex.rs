//! Hex grid geometry with axial coordinates

use serde::{Deserialize, Serialize};

/// Axial hex coordinates; the implied cube coordinate is s = -q - r
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: u8) -> Hex {
        let (dq, dr) = DIRECTIONS[direction as usize % 6];
        Hex::new(self.q + dq, self.r + dr)
    }

    /// All six neighbors, in ring order
    pub fn neighbors(&self) -> [Hex; 6] {
        let mut out = [*self; 6];
        for (i, &(dq, dr)) in DIRECTIONS.iter().enumerate() {
            out[i] = Hex::new(self.q + dq, self.r + dr);
        }
        out
    }

    /// The six gates around this cell as (left flank, destination, right flank).
    /// Gate i leads to neighbor i+1; its flanks are neighbors i and i+2, the
    /// two cells touching both ends of the crossed edge.
    pub fn gates(&self) -> [(Hex, Hex, Hex); 6] {
        let n = self.neighbors();
        let mut out = [(n[0], n[1], n[2]); 6];
        for (i, gate) in out.iter_mut().enumerate() {
            *gate = (n[i], n[(i + 1) % 6], n[(i + 2) % 6]);
        }
        out
    }
}

/// Direction vectors in axial coordinates (dq, dr), in ring order so that
/// consecutive entries are 60 degrees apart
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),  // E
    (1, -1), // NE
    (0, -1), // NW
    (-1, 0), // W
    (-1, 1), // SW
    (0, 1),  // SE
];
