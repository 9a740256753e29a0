//! 终局效用与静态局面评估。

use std::cmp::Ordering;

use super::config::PositionalWeights;
use crate::game::{GameOracle, GameState, Player, Position};

pub type Score = i32;

/// Scale applied to a terminal utility inside the heuristic search, larger
/// than any positional sum a supported board can produce.
pub const WIN_SCORE: Score = 1_000_000;

/// Terminal outcome for `perspective`: 1 win, 0 draw, -1 loss.
///
/// `state` must be terminal; the tally is taken as final.
pub fn utility<S: GameOracle>(state: &S, perspective: Player) -> Score {
    let counts = state.token_counts();
    match counts.of(perspective).cmp(&counts.of(perspective.opponent())) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}

/// Static estimate used by the depth-limited search at its frontier.
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S, perspective: Player) -> Score;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionalEvaluator {
    weights: PositionalWeights,
}

impl PositionalEvaluator {
    pub fn new(weights: PositionalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> PositionalWeights {
        self.weights
    }

    /// Raw corner/edge control sum, positive when `perspective` holds more.
    pub fn positional_score(&self, state: &GameState, perspective: Player) -> Score {
        let last = state.size as i32 - 1;
        let weigh = |position: Position, weight: Score| match state.cell(position) {
            Some(owner) if owner == perspective => weight,
            Some(_) => -weight,
            None => 0,
        };

        let corners = [
            Position::new(0, 0),
            Position::new(last, 0),
            Position::new(0, last),
            Position::new(last, last),
        ];
        let mut score: Score = corners
            .into_iter()
            .map(|corner| weigh(corner, self.weights.corner))
            .sum();

        // 四条边，不含角
        for i in 1..last {
            score += weigh(Position::new(i, 0), self.weights.edge);
            score += weigh(Position::new(i, last), self.weights.edge);
            score += weigh(Position::new(0, i), self.weights.edge);
            score += weigh(Position::new(last, i), self.weights.edge);
        }
        score
    }
}

impl Evaluator<GameState> for PositionalEvaluator {
    fn evaluate(&self, state: &GameState, perspective: Player) -> Score {
        if state.is_terminal() {
            return utility(state, perspective) * WIN_SCORE;
        }
        self.positional_score(state, perspective)
    }
}
