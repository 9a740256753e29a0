use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::config::{ConfigError, SearchConfig, SearchStrategy};
use super::evaluation::{PositionalEvaluator, Score};
use super::search::{AlphaBeta, HeuristicMinimax, PlainMinimax, Search, SearchStats};
use crate::game::{GameOracle, GameState, MoveError, Position};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoredMove<M> {
    pub position: M,
    pub score: Score,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiDecision {
    /// `Position::PASS` when the player to move has nothing legal.
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Score>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub move_scores: Vec<ScoredMove<Position>>,
    pub strategy: SearchStrategy,
    pub stats: SearchStats,
}

/// Scores every legal move of the player to move by searching its successor
/// from the opponent's side. Scores come back in enumeration order.
pub fn score_moves<S, A>(
    state: &S,
    search: &A,
    stats: &mut SearchStats,
) -> Result<Vec<ScoredMove<S::Move>>, S::Error>
where
    S: GameOracle,
    A: Search<S>,
{
    let perspective = state.current_player();
    let mut scored = Vec::new();
    for mv in state.legal_moves() {
        let child = state.apply_move(mv)?;
        let score = search.min_side(&child, perspective, stats)?;
        trace!(?mv, score, "scored root move");
        scored.push(ScoredMove {
            position: mv,
            score,
        });
    }
    Ok(scored)
}

/// Highest score wins; on a tie the earliest move in enumeration order is kept.
pub fn best_move<M: Copy>(scored: &[ScoredMove<M>]) -> Option<ScoredMove<M>> {
    let mut best: Option<ScoredMove<M>> = None;
    for candidate in scored {
        if best.map_or(true, |current| candidate.score > current.score) {
            best = Some(*candidate);
        }
    }
    best
}

/// 按配置的单一策略为当前执子方选点。
#[derive(Debug, Clone, Default)]
pub struct MoveSelector {
    config: SearchConfig,
}

impl MoveSelector {
    /// Rejects configurations that fail `SearchConfig::validate`.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn decide_move(&self, state: &GameState) -> Result<Position, MoveError> {
        Ok(self.decide(state)?.position)
    }

    pub fn decide(&self, state: &GameState) -> Result<AiDecision, MoveError> {
        let mut stats = SearchStats::default();
        let strategy = self.config.strategy;

        let move_scores = match strategy {
            SearchStrategy::Minimax => score_moves(state, &PlainMinimax, &mut stats)?,
            SearchStrategy::AlphaBeta => score_moves(state, &AlphaBeta, &mut stats)?,
            SearchStrategy::Heuristic => {
                let search = HeuristicMinimax::new(
                    PositionalEvaluator::new(self.config.weights),
                    self.config.cutoff_depth,
                );
                score_moves(state, &search, &mut stats)?
            }
        };

        let best = best_move(&move_scores);
        let position = best.map_or(Position::PASS, |chosen| chosen.position);
        debug!(
            player = %state.current_player,
            ?strategy,
            %position,
            evaluation = ?best.map(|chosen| chosen.score),
            nodes = stats.nodes,
            leaves = stats.leaf_evaluations,
            max_depth = stats.max_depth,
            "move decided"
        );

        Ok(AiDecision {
            position,
            evaluation: best.map(|chosen| chosen.score),
            move_scores,
            strategy,
            stats,
        })
    }
}
