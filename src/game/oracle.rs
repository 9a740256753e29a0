use std::fmt::Debug;

use super::state::{Player, TokenCounts};

/// 搜索所依赖的最小棋局查询接口。
///
/// Implementations must hand out fresh successor values from `apply_move` and
/// `pass`; sibling branches of the search share the parent state.
pub trait GameOracle: Sized {
    type Move: Copy + PartialEq + Debug;
    type Error;

    /// Moves available to the player to move, in a stable enumeration order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn apply_move(&self, mv: Self::Move) -> Result<Self, Self::Error>;

    /// Hands the turn to the opponent. Only valid when `legal_moves` is empty.
    fn pass(&self) -> Result<Self, Self::Error>;

    fn is_terminal(&self) -> bool;

    fn token_counts(&self) -> TokenCounts;

    fn current_player(&self) -> Player;
}
