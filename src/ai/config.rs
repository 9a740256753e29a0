use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::evaluation::WIN_SCORE;
use crate::game::MAX_BOARD_SIZE;

pub const DEFAULT_CUTOFF_DEPTH: u32 = 6;
pub const DEFAULT_CORNER_WEIGHT: i32 = 4;
pub const DEFAULT_EDGE_WEIGHT: i32 = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// 穷举到终局，无剪枝。
    Minimax,
    /// 穷举到终局，alpha-beta 剪枝。
    AlphaBeta,
    /// alpha-beta + 深度截断 + 局面评估。
    Heuristic,
}

impl FromStr for SearchStrategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" | "plain" => Ok(SearchStrategy::Minimax),
            "alphabeta" | "alpha-beta" | "ab" => Ok(SearchStrategy::AlphaBeta),
            "heuristic" | "hminimax" | "h-minimax" => Ok(SearchStrategy::Heuristic),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "medium" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            "expert" | "extreme" => Ok(Difficulty::Expert),
            _ => Err(()),
        }
    }
}

/// 角与边的静态权重。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PositionalWeights {
    pub corner: i32,
    pub edge: i32,
}

impl Default for PositionalWeights {
    fn default() -> Self {
        Self {
            corner: DEFAULT_CORNER_WEIGHT,
            edge: DEFAULT_EDGE_WEIGHT,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cutoff depth must be at least 1, got {depth}")]
    InvalidCutoffDepth { depth: u32 },
    #[error("corner weight {corner} must exceed edge weight {edge}, edge weight must not be negative, and the largest board sum must stay below a proven win")]
    InvalidWeights { corner: i32, edge: i32 },
    #[error("invalid search config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: SearchStrategy,
    /// Plies expanded by the heuristic search before the evaluator takes over.
    pub cutoff_depth: u32,
    pub weights: PositionalWeights,
}

impl SearchConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let cutoff_depth = match difficulty {
            Difficulty::Easy => 2,
            Difficulty::Normal => DEFAULT_CUTOFF_DEPTH,
            Difficulty::Hard => 8,
            Difficulty::Expert => 10,
        };
        Self {
            strategy: SearchStrategy::Heuristic,
            cutoff_depth,
            weights: PositionalWeights::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_cutoff_depth(mut self, cutoff_depth: u32) -> Self {
        self.cutoff_depth = cutoff_depth;
        self
    }

    pub fn with_weights(mut self, weights: PositionalWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cutoff_depth == 0 {
            return Err(ConfigError::InvalidCutoffDepth {
                depth: self.cutoff_depth,
            });
        }
        let PositionalWeights { corner, edge } = self.weights;
        if edge < 0 || corner <= edge || max_positional_sum(corner, edge) >= i64::from(WIN_SCORE)
        {
            return Err(ConfigError::InvalidWeights { corner, edge });
        }
        Ok(())
    }
}

/// Largest evaluator magnitude on the biggest supported board: four corners
/// plus every non-corner border cell.
fn max_positional_sum(corner: i32, edge: i32) -> i64 {
    let edge_cells = 4 * (MAX_BOARD_SIZE as i64 - 2);
    4 * i64::from(corner) + edge_cells * i64::from(edge)
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::from_difficulty(Difficulty::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_heuristic_with_documented_constants() {
        let config = SearchConfig::default();
        assert_eq!(config.strategy, SearchStrategy::Heuristic);
        assert_eq!(config.cutoff_depth, 6);
        assert_eq!(config.weights, PositionalWeights { corner: 4, edge: 2 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_strategy_and_difficulty_aliases() {
        assert_eq!("AB".parse::<SearchStrategy>(), Ok(SearchStrategy::AlphaBeta));
        assert_eq!("h-minimax".parse::<SearchStrategy>(), Ok(SearchStrategy::Heuristic));
        assert_eq!("plain".parse::<SearchStrategy>(), Ok(SearchStrategy::Minimax));
        assert!("mcts".parse::<SearchStrategy>().is_err());
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = SearchConfig::from_json(r#"{"strategy":"alphabeta"}"#)
            .expect("partial config should parse");
        assert_eq!(config.strategy, SearchStrategy::AlphaBeta);
        assert_eq!(config.cutoff_depth, DEFAULT_CUTOFF_DEPTH);

        let config = SearchConfig::from_json(r#"{"weights":{"corner":5,"edge":3}}"#)
            .expect("weights should parse");
        assert_eq!(config.weights, PositionalWeights { corner: 5, edge: 3 });
    }

    #[test]
    fn rejects_invalid_settings() {
        assert!(matches!(
            SearchConfig::from_json(r#"{"cutoff_depth":0}"#),
            Err(ConfigError::InvalidCutoffDepth { depth: 0 })
        ));
        assert!(matches!(
            SearchConfig::from_json(r#"{"weights":{"corner":2,"edge":2}}"#),
            Err(ConfigError::InvalidWeights { corner: 2, edge: 2 })
        ));
        assert!(matches!(
            SearchConfig::from_json(r#"{"strategy":"mcts"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn weights_must_stay_below_a_proven_win() {
        // 16x16: 4 corners + 56 edge cells
        let largest = SearchConfig::default().with_weights(PositionalWeights {
            corner: 249_999,
            edge: 0,
        });
        assert!(largest.validate().is_ok());

        for (corner, edge) in [(250_000, 0), (400_000, 0), (i32::MAX, 0), (20_000, 17_500)] {
            let config = SearchConfig::default().with_weights(PositionalWeights { corner, edge });
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidWeights { .. })),
                "corner {corner} edge {edge} should be rejected"
            );
        }
        assert!(matches!(
            SearchConfig::from_json(r#"{"weights":{"corner":400000,"edge":0}}"#),
            Err(ConfigError::InvalidWeights {
                corner: 400_000,
                edge: 0
            })
        ));
    }

    #[test]
    fn builders_override_presets() {
        let config = SearchConfig::from_difficulty(Difficulty::Easy)
            .with_strategy(SearchStrategy::Minimax)
            .with_cutoff_depth(3);
        assert_eq!(config.strategy, SearchStrategy::Minimax);
        assert_eq!(config.cutoff_depth, 3);
        assert_eq!(SearchConfig::from_difficulty(Difficulty::Expert).cutoff_depth, 10);
    }
}
