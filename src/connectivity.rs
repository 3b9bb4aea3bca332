//! One-hive rule: cut-vertex detection over the occupied cells

use crate::hex::Hex;
use crate::hive::Hive;
use rustc_hash::{FxHashMap, FxHashSet};

/// In-progress DFS visit: the cell, the cell it was entered from, and the
/// next neighbor direction to try
#[derive(Clone, Copy)]
struct Frame {
    cell: Hex,
    parent: Option<Hex>,
    next_dir: u8,
}

/// Cells whose piece may not leave this turn: the articulation points of the
/// occupied-cell adjacency graph, found by one depth-first pass from `root`.
///
/// Each visited cell gets a visit rank and a low-link (the smallest rank
/// reachable through its subtree and back edges); a cell is an articulation
/// point when some child's low-link fails to get below the cell's own rank.
/// `root` itself is exempt: rank 0 precedes every low-link. Cells stacked two
/// or more high are exempt as well, since the cell stays occupied after the
/// top piece leaves.
///
/// Returns the empty set when `root` is not occupied.
pub fn locked_cells(hive: &Hive, root: Hex) -> FxHashSet<Hex> {
    let mut locked = FxHashSet::default();
    if !hive.is_occupied(root) {
        return locked;
    }

    let mut rank: FxHashMap<Hex, u32> = FxHashMap::default();
    let mut low: FxHashMap<Hex, u32> = FxHashMap::default();
    let mut counter = 0u32;

    rank.insert(root, counter);
    low.insert(root, counter);
    counter += 1;

    let mut stack = vec![Frame {
        cell: root,
        parent: None,
        next_dir: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.next_dir < 6 {
            let cell = frame.cell;
            let parent = frame.parent;
            let next = cell.neighbor(frame.next_dir);
            frame.next_dir += 1;

            if !hive.is_occupied(next) || parent == Some(next) {
                continue;
            }

            if let Some(&seen_rank) = rank.get(&next) {
                // Back edge: pull the low-link toward the older rank
                let folded = low[&cell].min(seen_rank);
                low.insert(cell, folded);
            } else {
                rank.insert(next, counter);
                low.insert(next, counter);
                counter += 1;
                stack.push(Frame {
                    cell: next,
                    parent: Some(cell),
                    next_dir: 0,
                });
            }
        } else {
            // Subtree finished: fold this cell's low-link into its parent and
            // test the articulation condition there
            let Frame { cell, parent, .. } = *frame;
            stack.pop();

            if let Some(parent) = parent {
                let child_low = low[&cell];
                let folded = low[&parent].min(child_low);
                low.insert(parent, folded);
                if parent != root && child_low >= rank[&parent] {
                    locked.insert(parent);
                }
            }
        }
    }

    // A shared stack never pins its top piece
    locked.retain(|&cell| hive.height(cell) == 1);

    tracing::trace!(
        "one-hive scan from ({},{}): {} locked of {} visited",
        root.q,
        root.r,
        locked.len(),
        rank.len()
    );
    locked
}
