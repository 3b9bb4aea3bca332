//! Move search: depth-limited negamax with alpha-beta pruning

use crate::eval::{evaluate, Heuristics};
use crate::game::{legal_moves, next_tag, placements, remaining, winner};
use crate::hex::Hex;
use crate::hive::{Hive, Move};
use crate::pieces::{Color, Insect, Piece};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const INF: i32 = i32::MAX;

/// Fixed-depth searcher. The RNG only breaks ties between equal root moves
/// and picks opening spots, so a seeded instance replays identically.
pub struct HiveAi {
    pub depth: u32,
    pub heuristics: Heuristics,
    rng: ChaCha8Rng,
}

impl HiveAi {
    pub fn new(depth: u32, heuristics: Heuristics) -> Self {
        Self::with_seed(depth, heuristics, 42)
    }

    pub fn with_seed(depth: u32, heuristics: Heuristics, seed: u64) -> Self {
        Self {
            depth,
            heuristics,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    /// Strongest move for `color` with its exact score, or `None` when the
    /// position offers no move at all.
    pub fn best_move(&mut self, hive: &Hive, color: Color) -> Option<(Move, i32)> {
        let mut moves = legal_moves(hive, color);
        if moves.is_empty() {
            return None;
        }
        // Shuffle so equal-scoring moves do not always resolve the same way
        moves.shuffle(&mut self.rng);

        let mut best_move = moves[0];
        let mut best_score = -INF;
        let mut nodes = 0u64;
        for mv in moves {
            let child = hive.apply(&mv);
            let score = -negamax(
                &child,
                color.opponent(),
                self.depth as i32 - 1,
                -INF,
                INF,
                &self.heuristics,
                &mut nodes,
            );
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }

        tracing::debug!(
            "best move for {:?}: {} scoring {} ({} nodes at depth {})",
            color,
            best_move,
            best_score,
            nodes,
            self.depth
        );
        Some((best_move, best_score))
    }

    // ========================================================================
    // OPENING AND SELF-PLAY
    // ========================================================================

    /// Book placement for each side's first two pieces: a spider, then the
    /// bee. `None` once the book is exhausted or nothing fits.
    pub fn opening_move(&mut self, hive: &Hive, color: Color) -> Option<Move> {
        let placed = hive
            .stacks()
            .flat_map(|(_, stack)| stack.iter())
            .filter(|p| p.color == color)
            .count();
        let insect = match placed {
            0 => Insect::Spider,
            1 => Insect::Bee,
            _ => return None,
        };
        if remaining(hive, color, insect) == 0 {
            return None;
        }

        let spots: Vec<Hex> = placements(hive, color).into_iter().collect();
        let &to = spots.choose(&mut self.rng)?;
        let piece = Piece::new(color, insect, next_tag(hive, color, insect));
        Some(Move::Place { piece, to })
    }

    /// Plays both sides from `initial` until a result or `max_moves` plies,
    /// returning the final board and the moves played in order. A side with
    /// no legal move passes.
    pub fn play_game(
        &mut self,
        initial: &Hive,
        first: Color,
        max_moves: u32,
    ) -> (Hive, Vec<Move>) {
        let mut hive = initial.clone();
        let mut color = first;
        let mut history = Vec::new();
        for _ in 0..max_moves {
            if winner(&hive).is_some() {
                break;
            }
            let mv = match self.opening_move(&hive, color) {
                Some(mv) => mv,
                None => match self.best_move(&hive, color) {
                    Some((mv, _)) => mv,
                    None => {
                        color = color.opponent();
                        continue;
                    }
                },
            };
            tracing::debug!("{:?} plays {}", color, mv);
            history.push(mv);
            hive = hive.apply(&mv);
            color = color.opponent();
        }
        (hive, history)
    }
}

fn negamax(
    hive: &Hive,
    color: Color,
    depth: i32,
    mut alpha: i32,
    beta: i32,
    heuristics: &Heuristics,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;
    if depth <= 0 || winner(hive).is_some() {
        return perspective(color) * evaluate(hive, heuristics);
    }

    let moves = legal_moves(hive, color);
    if moves.is_empty() {
        return perspective(color) * evaluate(hive, heuristics);
    }

    let mut best = -INF;
    for mv in moves {
        let child = hive.apply(&mv);
        let score = -negamax(
            &child,
            color.opponent(),
            depth - 1,
            -beta,
            -alpha,
            heuristics,
            nodes,
        );
        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best
}

fn perspective(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Winner, ORIGIN};

    fn hex(q: i32, r: i32) -> Hex {
        Hex::new(q, r)
    }

    /// Black's bee has five occupied neighbors; a white ant two slides away
    /// can close the last gap at (0, 1)
    fn one_from_mate() -> Hive {
        Hive::from_pieces(&[
            (hex(0, 0), Piece::new(Color::Black, Insect::Bee, 1)),
            (hex(1, 0), Piece::new(Color::Black, Insect::Ant, 1)),
            (hex(1, -1), Piece::new(Color::Black, Insect::Ant, 2)),
            (hex(0, -1), Piece::new(Color::Black, Insect::Hopper, 1)),
            (hex(-1, 0), Piece::new(Color::Black, Insect::Hopper, 2)),
            (hex(-1, 1), Piece::new(Color::Black, Insect::Spider, 1)),
            (hex(2, 0), Piece::new(Color::White, Insect::Ant, 1)),
        ])
    }

    #[test]
    fn test_depth_zero_is_the_static_score() {
        let hive = Hive::from_pieces(&[
            (hex(0, 0), Piece::new(Color::White, Insect::Bee, 1)),
            (hex(1, 0), Piece::new(Color::Black, Insect::Ant, 1)),
        ]);
        let weights = Heuristics::default();
        let static_score = evaluate(&hive, &weights);
        let mut nodes = 0u64;
        assert_eq!(
            negamax(&hive, Color::White, 0, -INF, INF, &weights, &mut nodes),
            static_score
        );
        assert_eq!(
            negamax(&hive, Color::Black, 0, -INF, INF, &weights, &mut nodes),
            -static_score
        );
        assert_eq!(nodes, 2);
    }

    #[test]
    fn test_stalled_side_scores_as_a_static_leaf() {
        // Black's bee is the hive's only bridge and every empty cell beside
        // black touches a white top, so black can neither move nor place
        let hive = Hive::from_pieces(&[
            (hex(0, 0), Piece::new(Color::White, Insect::Bee, 1)),
            (hex(1, 0), Piece::new(Color::Black, Insect::Bee, 1)),
            (hex(2, 0), Piece::new(Color::White, Insect::Ant, 1)),
        ]);
        assert!(legal_moves(&hive, Color::Black).is_empty());

        let weights = Heuristics::default();
        let mut nodes = 0u64;
        let score = negamax(&hive, Color::Black, 2, -INF, INF, &weights, &mut nodes);
        assert_eq!(score, -evaluate(&hive, &weights));
        assert_eq!(nodes, 1);

        let mut ai = HiveAi::new(2, weights);
        assert!(ai.best_move(&hive, Color::Black).is_none());
    }

    #[test]
    fn test_won_position_is_a_leaf_at_any_depth() {
        let hive = one_from_mate().apply(&Move::Movement {
            from: hex(2, 0),
            to: hex(0, 1),
        });
        assert_eq!(winner(&hive), Some(Winner::White));

        let weights = Heuristics::default();
        let mut nodes = 0u64;
        let score = negamax(&hive, Color::Black, 3, -INF, INF, &weights, &mut nodes);
        assert_eq!(score, -evaluate(&hive, &weights));
        assert_eq!(score, -600);
        assert_eq!(nodes, 1);
    }

    #[test]
    fn test_open_position_yields_a_move() {
        let hive = Hive::from_pieces(&[
            (hex(0, 0), Piece::new(Color::White, Insect::Bee, 1)),
            (hex(1, 0), Piece::new(Color::Black, Insect::Bee, 1)),
        ]);
        let mut ai = HiveAi::new(1, Heuristics::default());
        assert!(ai.best_move(&hive, Color::White).is_some());
        assert!(ai.best_move(&hive, Color::Black).is_some());
    }

    #[test]
    fn test_finds_the_surround_in_one() {
        let hive = one_from_mate();
        let mut ai = HiveAi::new(1, Heuristics::default());
        let (mv, score) = ai.best_move(&hive, Color::White).unwrap();
        assert_eq!(
            mv,
            Move::Movement {
                from: hex(2, 0),
                to: hex(0, 1),
            }
        );
        assert_eq!(score, 600);
    }

    #[test]
    fn test_opening_book_plays_spider_then_bee() {
        let mut ai = HiveAi::new(1, Heuristics::default());
        let mut hive = Hive::new();

        let mv = ai.opening_move(&hive, Color::White).unwrap();
        assert!(matches!(mv, Move::Place { piece, .. } if piece.insect == Insect::Spider));
        assert!(matches!(mv, Move::Place { to, .. } if to == ORIGIN));
        hive = hive.apply(&mv);

        let mv = ai.opening_move(&hive, Color::Black).unwrap();
        assert!(matches!(mv, Move::Place { piece, .. } if piece.insect == Insect::Spider));
        hive = hive.apply(&mv);

        let mv = ai.opening_move(&hive, Color::White).unwrap();
        assert!(matches!(mv, Move::Place { piece, .. } if piece.insect == Insect::Bee));
        hive = hive.apply(&mv);

        let mv = ai.opening_move(&hive, Color::Black).unwrap();
        assert!(matches!(mv, Move::Place { piece, .. } if piece.insect == Insect::Bee));
        hive = hive.apply(&mv);

        assert!(ai.opening_move(&hive, Color::White).is_none());
        assert!(ai.opening_move(&hive, Color::Black).is_none());
    }

    #[test]
    fn test_seeded_search_replays_identically() {
        let hive = Hive::from_pieces(&[
            (hex(0, 0), Piece::new(Color::White, Insect::Bee, 1)),
            (hex(1, 0), Piece::new(Color::Black, Insect::Bee, 1)),
        ]);
        let weights = Heuristics::default();
        let mut a = HiveAi::with_seed(1, weights, 7);
        let mut b = HiveAi::with_seed(1, weights, 7);
        assert_eq!(a.best_move(&hive, Color::White), b.best_move(&hive, Color::White));
    }

    #[test]
    fn test_play_game_returns_the_moves_it_played() {
        let mut ai = HiveAi::new(1, Heuristics::default());
        let (final_hive, history) = ai.play_game(&Hive::new(), Color::White, 20);
        // Both opening books fire, so at least four pieces hit the board
        assert!(final_hive.occupied().count() >= 4);
        assert!(history.len() >= 4);
        assert!(history.len() <= 20);

        let mut replay = Hive::new();
        for mv in &history {
            replay = replay.apply(mv);
        }
        assert_eq!(replay, final_hive);
    }
}
