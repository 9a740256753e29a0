//! 三种对抗搜索：朴素 minimax、alpha-beta、带深度截断的 H-minimax。
//!
//! Every search scores a state for an explicit `perspective` player. The root
//! successors handed in by the move selector are at depth 1 and each recursive
//! descent adds exactly one ply, on the maximizing and minimizing side alike.

use serde::{Deserialize, Serialize};

use super::evaluation::{utility, Evaluator, Score};
use crate::game::{GameOracle, Player};

/// Counters collected while scoring one decision.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchStats {
    /// States visited below the root.
    pub nodes: u64,
    /// Terminal utilities or frontier evaluations computed.
    pub leaf_evaluations: u64,
    /// Deepest ply visited.
    pub max_depth: u32,
}

impl SearchStats {
    fn visit(&mut self, depth: u32) {
        self.nodes += 1;
        if depth > self.max_depth {
            self.max_depth = depth;
        }
    }

    fn leaf(&mut self) {
        self.leaf_evaluations += 1;
    }
}

/// One step of the game tree: a placed move, or a forced pass when the player
/// to move has nothing legal but the game is not over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ply<M> {
    Place(M),
    Pass,
}

impl<M: Copy> Ply<M> {
    pub fn play<S: GameOracle<Move = M>>(self, state: &S) -> Result<S, S::Error> {
        match self {
            Ply::Place(mv) => state.apply_move(mv),
            Ply::Pass => state.pass(),
        }
    }
}

/// Plies available at a non-terminal state.
pub fn plies<S: GameOracle>(state: &S) -> Vec<Ply<S::Move>> {
    let moves = state.legal_moves();
    if moves.is_empty() {
        return vec![Ply::Pass];
    }
    moves.into_iter().map(Ply::Place).collect()
}

/// A search strategy as seen by the move selector.
pub trait Search<S: GameOracle> {
    /// Value for `perspective` of a root successor, where the opponent of
    /// `perspective` chooses next.
    fn min_side(
        &self,
        state: &S,
        perspective: Player,
        stats: &mut SearchStats,
    ) -> Result<Score, S::Error>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainMinimax;

impl PlainMinimax {
    pub fn max_value<S: GameOracle>(
        &self,
        state: &S,
        perspective: Player,
        depth: u32,
        stats: &mut SearchStats,
    ) -> Result<Score, S::Error> {
        stats.visit(depth);
        if state.is_terminal() {
            stats.leaf();
            return Ok(utility(state, perspective));
        }

        let mut value = Score::MIN;
        for ply in plies(state) {
            let child = ply.play(state)?;
            value = value.max(self.min_value(&child, perspective, depth + 1, stats)?);
        }
        Ok(value)
    }

    pub fn min_value<S: GameOracle>(
        &self,
        state: &S,
        perspective: Player,
        depth: u32,
        stats: &mut SearchStats,
    ) -> Result<Score, S::Error> {
        stats.visit(depth);
        if state.is_terminal() {
            stats.leaf();
            return Ok(utility(state, perspective));
        }

        let mut value = Score::MAX;
        for ply in plies(state) {
            let child = ply.play(state)?;
            value = value.min(self.max_value(&child, perspective, depth + 1, stats)?);
        }
        Ok(value)
    }
}

impl<S: GameOracle> Search<S> for PlainMinimax {
    fn min_side(
        &self,
        state: &S,
        perspective: Player,
        stats: &mut SearchStats,
    ) -> Result<Score, S::Error> {
        self.min_value(state, perspective, 1, stats)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaBeta;

impl AlphaBeta {
    pub fn max_value<S: GameOracle>(
        &self,
        state: &S,
        perspective: Player,
        mut alpha: Score,
        beta: Score,
        depth: u32,
        stats: &mut SearchStats,
    ) -> Result<Score, S::Error> {
        stats.visit(depth);
        if state.is_terminal() {
            stats.leaf();
            return Ok(utility(state, perspective));
        }

        let mut value = Score::MIN;
        for ply in plies(state) {
            let child = ply.play(state)?;
            value = value.max(self.min_value(&child, perspective, alpha, beta, depth + 1, stats)?);
            if value >= beta {
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    pub fn min_value<S: GameOracle>(
        &self,
        state: &S,
        perspective: Player,
        alpha: Score,
        mut beta: Score,
        depth: u32,
        stats: &mut SearchStats,
    ) -> Result<Score, S::Error> {
        stats.visit(depth);
        if state.is_terminal() {
            stats.leaf();
            return Ok(utility(state, perspective));
        }

        let mut value = Score::MAX;
        for ply in plies(state) {
            let child = ply.play(state)?;
            value = value.min(self.max_value(&child, perspective, alpha, beta, depth + 1, stats)?);
            if value <= alpha {
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }
}

impl<S: GameOracle> Search<S> for AlphaBeta {
    fn min_side(
        &self,
        state: &S,
        perspective: Player,
        stats: &mut SearchStats,
    ) -> Result<Score, S::Error> {
        self.min_value(state, perspective, Score::MIN, Score::MAX, 1, stats)
    }
}

/// Alpha-beta with a ply cutoff; frontier and terminal states go to the
/// evaluator.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicMinimax<E> {
    evaluator: E,
    cutoff_depth: u32,
}

impl<E> HeuristicMinimax<E> {
    pub fn new(evaluator: E, cutoff_depth: u32) -> Self {
        Self {
            evaluator,
            cutoff_depth,
        }
    }

    pub fn cutoff_depth(&self) -> u32 {
        self.cutoff_depth
    }

    fn cutoff_test<S: GameOracle>(&self, state: &S, depth: u32) -> bool {
        state.is_terminal() || depth >= self.cutoff_depth
    }

    pub fn max_value<S>(
        &self,
        state: &S,
        perspective: Player,
        mut alpha: Score,
        beta: Score,
        depth: u32,
        stats: &mut SearchStats,
    ) -> Result<Score, S::Error>
    where
        S: GameOracle,
        E: Evaluator<S>,
    {
        stats.visit(depth);
        if self.cutoff_test(state, depth) {
            stats.leaf();
            return Ok(self.evaluator.evaluate(state, perspective));
        }

        let mut value = Score::MIN;
        for ply in plies(state) {
            let child = ply.play(state)?;
            value = value.max(self.min_value(&child, perspective, alpha, beta, depth + 1, stats)?);
            if value >= beta {
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    pub fn min_value<S>(
        &self,
        state: &S,
        perspective: Player,
        alpha: Score,
        mut beta: Score,
        depth: u32,
        stats: &mut SearchStats,
    ) -> Result<Score, S::Error>
    where
        S: GameOracle,
        E: Evaluator<S>,
    {
        stats.visit(depth);
        if self.cutoff_test(state, depth) {
            stats.leaf();
            return Ok(self.evaluator.evaluate(state, perspective));
        }

        let mut value = Score::MAX;
        for ply in plies(state) {
            let child = ply.play(state)?;
            value = value.min(self.max_value(&child, perspective, alpha, beta, depth + 1, stats)?);
            if value <= alpha {
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }
}

impl<S, E> Search<S> for HeuristicMinimax<E>
where
    S: GameOracle,
    E: Evaluator<S>,
{
    fn min_side(
        &self,
        state: &S,
        perspective: Player,
        stats: &mut SearchStats,
    ) -> Result<Score, S::Error> {
        self.min_value(state, perspective, Score::MIN, Score::MAX, 1, stats)
    }
}
