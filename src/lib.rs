pub mod ai;
pub mod game;

use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use std::fmt::Display;
use std::str::FromStr;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::js_sys::Promise;

pub use ai::{
    AiDecision, ConfigError, Difficulty, MoveSelector, PositionalWeights, Score, SearchConfig,
    SearchStats, SearchStrategy,
};
pub use game::{
    play_match, GameOracle, GameState, IntegrityError, MatchReport, MoveError, MoveRecord, Player,
    Position, TokenCounts,
};

#[cfg(all(feature = "wee_alloc", target_arch = "wasm32"))]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
    web_sys::console::log_1(&"othello_search 已加载".into());
}

fn to_js_error<E: Serialize + Display>(error: E) -> JsValue {
    to_value(&error).unwrap_or_else(|_| JsValue::from_str(&error.to_string()))
}

fn serde_to_js_error<E: Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn checked(state: GameState) -> Result<GameState, JsValue> {
    state.integrity_check().map_err(to_js_error)?;
    Ok(state)
}

fn state_from_json(json: &str) -> Result<GameState, JsValue> {
    checked(serde_json::from_str(json).map_err(serde_to_js_error)?)
}

fn state_from_js(value: JsValue) -> Result<GameState, JsValue> {
    checked(from_value(value).map_err(JsValue::from)?)
}

fn config_from_options(difficulty: Option<&str>, strategy: Option<&str>) -> SearchConfig {
    let difficulty = difficulty
        .and_then(|value| Difficulty::from_str(value).ok())
        .unwrap_or(Difficulty::Normal);
    let config = SearchConfig::from_difficulty(difficulty);
    match strategy.and_then(|value| SearchStrategy::from_str(value).ok()) {
        Some(strategy) => config.with_strategy(strategy),
        None => config,
    }
}

#[derive(Serialize)]
struct AiMoveResponse {
    decision: AiDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<GameState>,
}

#[wasm_bindgen]
pub struct OthelloEngine {
    state: GameState,
    selector: MoveSelector,
}

#[wasm_bindgen]
impl OthelloEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(
        initial_state_json: Option<String>,
        config_json: Option<String>,
    ) -> Result<OthelloEngine, JsValue> {
        let state = match initial_state_json {
            Some(json) => state_from_json(&json)?,
            None => GameState::standard(),
        };
        let config = match config_json {
            Some(json) => SearchConfig::from_json(&json).map_err(serde_to_js_error)?,
            None => SearchConfig::default(),
        };
        let selector = MoveSelector::new(config).map_err(serde_to_js_error)?;
        Ok(OthelloEngine { state, selector })
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(serde_to_js_error)
    }

    pub fn set_state_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.state = state_from_json(json)?;
        Ok(())
    }

    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.selector.config()).map_err(serde_to_js_error)
    }

    pub fn set_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        let config = SearchConfig::from_json(json).map_err(serde_to_js_error)?;
        self.selector = MoveSelector::new(config).map_err(serde_to_js_error)?;
        Ok(())
    }

    pub fn legal_moves_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.legal_moves()).map_err(serde_to_js_error)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn token_counts_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.count_tokens()).map_err(serde_to_js_error)
    }

    pub fn play_move(&mut self, col: i32, row: i32) -> Result<String, JsValue> {
        self.state = self
            .state
            .apply_move(Position::new(col, row))
            .map_err(to_js_error)?;
        self.state_json()
    }

    pub fn pass_turn(&mut self) -> Result<String, JsValue> {
        self.state = self.state.pass().map_err(to_js_error)?;
        self.state_json()
    }

    pub fn decide_move_json(&self) -> Result<String, JsValue> {
        let decision = self.selector.decide(&self.state).map_err(to_js_error)?;
        serde_json::to_string(&decision).map_err(serde_to_js_error)
    }

    pub fn apply_ai_move(&mut self) -> Result<String, JsValue> {
        let decision = self.selector.decide(&self.state).map_err(to_js_error)?;

        // 终局时不落子
        let applied = if self.state.is_terminal() {
            None
        } else if decision.position.is_pass() {
            Some(self.state.pass().map_err(to_js_error)?)
        } else {
            Some(self.state.apply_move(decision.position).map_err(to_js_error)?)
        };
        if let Some(next) = &applied {
            self.state = next.clone();
        }

        let response = AiMoveResponse { decision, applied };
        serde_json::to_string(&response).map_err(serde_to_js_error)
    }

    pub fn think_move(&self, delay_ms: Option<u32>) -> Promise {
        let state = self.state.clone();
        let selector = self.selector.clone();
        let delay = delay_ms.unwrap_or(0);

        future_to_promise(async move {
            if delay > 0 {
                TimeoutFuture::new(delay).await;
            }
            let decision = selector.decide(&state).map_err(to_js_error)?;
            let json = serde_json::to_string(&decision).map_err(serde_to_js_error)?;
            Ok(JsValue::from_str(&json))
        })
    }
}

/// 返回指定边长（默认 8）的开局状态。
#[wasm_bindgen(js_name = "createGameState")]
pub fn create_game_state(size: Option<usize>) -> Result<JsValue, JsValue> {
    let state = match size {
        Some(size) => GameState::new(size).map_err(to_js_error)?,
        None => GameState::standard(),
    };
    to_value(&state).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "legalMoves")]
pub fn legal_moves(state: JsValue) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    to_value(&state.legal_moves()).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "applyMove")]
pub fn apply_move(state: JsValue, col: i32, row: i32) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    let next = state
        .apply_move(Position::new(col, row))
        .map_err(to_js_error)?;
    to_value(&next).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "validateState")]
pub fn validate_state(state: JsValue) -> Result<(), JsValue> {
    state_from_js(state)?;
    Ok(())
}

#[wasm_bindgen(js_name = "computeAiMove")]
pub fn compute_ai_move(
    state: JsValue,
    difficulty: Option<String>,
    strategy: Option<String>,
) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    let config = config_from_options(difficulty.as_deref(), strategy.as_deref());
    let decision = MoveSelector::new(config)
        .map_err(serde_to_js_error)?
        .decide(&state)
        .map_err(to_js_error)?;
    to_value(&decision).map_err(JsValue::from)
}

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn set_panic_hook() {}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_engine(strategy: &str) -> OthelloEngine {
        let state = GameState::new(4).expect("4x4 is supported");
        let state_json = serde_json::to_string(&state).expect("state should serialize");
        let config_json = format!(r#"{{"strategy":"{strategy}"}}"#);
        OthelloEngine::new(Some(state_json), Some(config_json)).expect("engine should build")
    }

    #[test]
    fn engine_defaults_to_standard_board_and_config() {
        let engine = OthelloEngine::new(None, None).expect("engine should build");
        let state: GameState = serde_json::from_str(&engine.state_json().expect("state json"))
            .expect("state should round trip");
        assert_eq!(state, GameState::standard());

        let config: SearchConfig = serde_json::from_str(&engine.config_json().expect("config json"))
            .expect("config should round trip");
        assert_eq!(config, SearchConfig::default());

        let moves: Vec<Position> =
            serde_json::from_str(&engine.legal_moves_json().expect("moves json"))
                .expect("moves should parse");
        assert_eq!(moves.len(), 4);
        assert!(!engine.is_terminal());
    }

    #[test]
    fn engine_plays_human_and_ai_moves() {
        let mut engine = small_engine("alphabeta");
        engine.play_move(1, 0).expect("opening move is legal");

        let response: serde_json::Value =
            serde_json::from_str(&engine.apply_ai_move().expect("ai should move"))
                .expect("response should parse");
        assert_eq!(response["decision"]["position"], serde_json::json!({"col": 0, "row": 0}));
        assert_eq!(response["applied"]["current_player"], "black");
        assert_eq!(engine.state.current_player, Player::Black);
        assert_eq!(engine.state.cell(Position::new(0, 0)), Some(Player::White));
    }

    #[test]
    fn config_can_be_replaced() {
        let mut engine = small_engine("heuristic");
        engine
            .set_config_json(r#"{"strategy":"minimax","cutoff_depth":3}"#)
            .expect("config should apply");
        assert_eq!(engine.selector.config().strategy, SearchStrategy::Minimax);
        assert_eq!(engine.selector.config().cutoff_depth, 3);

        let decision: AiDecision =
            serde_json::from_str(&engine.decide_move_json().expect("decision json"))
                .expect("decision should parse");
        assert_eq!(decision.position, Position::new(1, 0));
        assert_eq!(decision.evaluation, Some(-1));
    }

    #[test]
    fn ai_move_options_fall_back_to_normal_heuristic() {
        let config = config_from_options(None, None);
        assert_eq!(config, SearchConfig::default());

        let config = config_from_options(Some("expert"), Some("ab"));
        assert_eq!(config.strategy, SearchStrategy::AlphaBeta);
        assert_eq!(config.cutoff_depth, 10);

        let config = config_from_options(Some("unknown"), Some("mcts"));
        assert_eq!(config, SearchConfig::default());
    }
}
