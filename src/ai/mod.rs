//! AI 算法模块（minimax、alpha-beta、H-minimax 与局面评估）。

pub mod config;
pub mod evaluation;
pub mod minimax;
pub mod search;

pub use config::{ConfigError, Difficulty, PositionalWeights, SearchConfig, SearchStrategy};
pub use evaluation::{utility, Evaluator, PositionalEvaluator, Score, WIN_SCORE};
pub use minimax::{best_move, score_moves, AiDecision, MoveSelector, ScoredMove};
pub use search::{AlphaBeta, HeuristicMinimax, PlainMinimax, Ply, Search, SearchStats};
