//! 游戏核心逻辑模块（棋盘状态、落子规则、对局驱动）。

pub mod oracle;
pub mod play;
pub mod rules;
pub mod state;

pub use oracle::GameOracle;
pub use play::{play_match, MatchReport, MoveRecord};
pub use rules::MoveError;
pub use state::{
    GameState,
    IntegrityError,
    Player,
    Position,
    TokenCounts,
    DEFAULT_BOARD_SIZE,
    MAX_BOARD_SIZE,
    MIN_BOARD_SIZE,
};
