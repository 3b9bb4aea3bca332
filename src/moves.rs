//! Per-insect move generation

use crate::hex::Hex;
use crate::hive::Hive;
use crate::pieces::Insect;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Slide distance a spider must cover, no more and no less
const SPIDER_STEPS: usize = 3;

/// Legal destinations for the top piece at `origin`, dispatched by its kind.
///
/// Panics if `origin` is empty; callers query occupied cells only.
pub fn destinations(hive: &Hive, origin: Hex) -> FxHashSet<Hex> {
    let piece = hive.top(origin).expect("No piece at origin");
    match piece.insect {
        Insect::Bee => slide_steps(hive, origin),
        Insect::Ant => ant_moves(hive, origin),
        Insect::Hopper => hopper_moves(hive, origin),
        Insect::Spider => spider_moves(hive, origin),
        Insect::Beetle => beetle_moves(hive, origin),
    }
}

/// One-step slide destinations out of `from`: an empty gate cell is reachable
/// when exactly one of the two flanks is occupied. Two occupied flanks pinch
/// the gap shut; two empty flanks would let the piece drift off the hive.
fn slide_steps(hive: &Hive, from: Hex) -> FxHashSet<Hex> {
    let mut moves = FxHashSet::default();
    for (left, dest, right) in from.gates() {
        if hive.is_occupied(dest) {
            continue;
        }
        if hive.is_occupied(left) != hive.is_occupied(right) {
            moves.insert(dest);
        }
    }
    moves
}

/// Unlimited slide: breadth-first expansion of one-step slides with the ant
/// lifted off the board so it cannot block itself. Excludes the origin.
fn ant_moves(hive: &Hive, origin: Hex) -> FxHashSet<Hex> {
    let lifted = hive.lifted(origin);
    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::new();
    seen.insert(origin);
    queue.push_back(origin);

    while let Some(cur) = queue.pop_front() {
        for step in slide_steps(&lifted, cur) {
            if seen.insert(step) {
                queue.push_back(step);
            }
        }
    }

    seen.remove(&origin);
    seen
}

/// Bounded slide: the ant expansion, keeping only cells first reached on
/// layer three. Shortest slide distance equals the BFS layer, so a deeper
/// path can never requalify a closer cell.
fn spider_moves(hive: &Hive, origin: Hex) -> FxHashSet<Hex> {
    let lifted = hive.lifted(origin);
    let mut distance: FxHashMap<Hex, usize> = FxHashMap::default();
    let mut queue = VecDeque::new();
    distance.insert(origin, 0);
    queue.push_back(origin);

    while let Some(cur) = queue.pop_front() {
        let next_dist = distance[&cur] + 1;
        if next_dist > SPIDER_STEPS {
            continue;
        }
        for step in slide_steps(&lifted, cur) {
            if !distance.contains_key(&step) {
                distance.insert(step, next_dist);
                queue.push_back(step);
            }
        }
    }

    distance
        .into_iter()
        .filter(|&(_, dist)| dist == SPIDER_STEPS)
        .map(|(hex, _)| hex)
        .collect()
}

/// Straight-line jump over the contiguous occupied run in each direction,
/// landing on the first empty cell. An empty adjacent cell offers nothing to
/// jump, so that direction contributes no move.
fn hopper_moves(hive: &Hive, origin: Hex) -> FxHashSet<Hex> {
    let mut moves = FxHashSet::default();
    for dir in 0..6u8 {
        let mut cur = origin.neighbor(dir);
        if !hive.is_occupied(cur) {
            continue;
        }
        while hive.is_occupied(cur) {
            cur = cur.neighbor(dir);
        }
        moves.insert(cur);
    }
    moves
}

/// Height-aware gate walk. The beetle leaves a stack `start` high and lands
/// on top of the destination at its height plus one. Per gate: staying level
/// needs a flank below the start height and a non-empty flank to brace
/// against; stepping down needs a flank below the start height; climbing
/// needs a flank below the landing height.
fn beetle_moves(hive: &Hive, origin: Hex) -> FxHashSet<Hex> {
    let mut moves = FxHashSet::default();
    let start = hive.height(origin);

    for (left, dest, right) in origin.gates() {
        let landing = hive.height(dest) + 1;
        let left_h = hive.height(left);
        let right_h = hive.height(right);

        if landing == start {
            if (left_h < start || right_h < start) && (left_h > 0 || right_h > 0) {
                moves.insert(dest);
            }
        } else if landing < start {
            if left_h < start || right_h < start {
                moves.insert(dest);
            }
        } else if left_h < landing || right_h < landing {
            moves.insert(dest);
        }
    }
    moves
}
