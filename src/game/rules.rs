use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    oracle::GameOracle,
    state::{GameState, Player, Position, TokenCounts},
};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[serde(tag = "type")]
pub enum MoveError {
    #[error("position {position} is outside the board")]
    OutOfBounds { position: Position },
    #[error("position {position} is already occupied")]
    Occupied { position: Position },
    #[error("{player} cannot play {position}: no discs would be captured")]
    IllegalMove { player: Player, position: Position },
    #[error("{player} still has a legal move and cannot pass")]
    PassNotAllowed { player: Player },
}

impl GameState {
    /// Opponent discs captured if `player` places a disc at `position`.
    pub fn captures(&self, position: Position, player: Player) -> Vec<Position> {
        let mut captured = Vec::new();
        if !self.is_empty_at(position) {
            return captured;
        }

        let opponent = player.opponent();
        for (dc, dr) in DIRECTIONS {
            let mut line = Vec::new();
            let mut cursor = Position::new(position.col + dc, position.row + dr);
            while self.cell(cursor) == Some(opponent) {
                line.push(cursor);
                cursor = Position::new(cursor.col + dc, cursor.row + dr);
            }
            if !line.is_empty() && self.cell(cursor) == Some(player) {
                captured.append(&mut line);
            }
        }
        captured
    }

    /// True when a disc at `position` would capture at least one line.
    pub fn flanks(&self, position: Position, player: Player) -> bool {
        if !self.is_empty_at(position) {
            return false;
        }

        let opponent = player.opponent();
        DIRECTIONS.iter().any(|&(dc, dr)| {
            let mut cursor = Position::new(position.col + dc, position.row + dr);
            let mut seen = false;
            while self.cell(cursor) == Some(opponent) {
                seen = true;
                cursor = Position::new(cursor.col + dc, cursor.row + dr);
            }
            seen && self.cell(cursor) == Some(player)
        })
    }

    pub fn moves_for(&self, player: Player) -> Vec<Position> {
        self.positions()
            .filter(|position| self.flanks(*position, player))
            .collect()
    }

    pub fn has_move(&self, player: Player) -> bool {
        self.positions().any(|position| self.flanks(position, player))
    }

    // 行优先：先行后列
    fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size as i32;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(col, row)))
    }

    pub fn winner(&self) -> Option<Player> {
        let counts = self.count_tokens();
        match counts.black.cmp(&counts.white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl GameOracle for GameState {
    type Move = Position;
    type Error = MoveError;

    fn legal_moves(&self) -> Vec<Position> {
        self.moves_for(self.current_player)
    }

    fn apply_move(&self, position: Position) -> Result<Self, MoveError> {
        if !self.in_bounds(position) {
            return Err(MoveError::OutOfBounds { position });
        }
        if !self.is_empty_at(position) {
            return Err(MoveError::Occupied { position });
        }

        let player = self.current_player;
        let captured = self.captures(position, player);
        if captured.is_empty() {
            return Err(MoveError::IllegalMove { player, position });
        }

        let mut next = self.clone();
        next.set(position, player);
        for flipped in captured {
            next.set(flipped, player);
        }
        next.current_player = player.opponent();
        Ok(next)
    }

    fn pass(&self) -> Result<Self, MoveError> {
        if self.has_move(self.current_player) {
            return Err(MoveError::PassNotAllowed {
                player: self.current_player,
            });
        }
        let mut next = self.clone();
        next.current_player = self.current_player.opponent();
        Ok(next)
    }

    fn is_terminal(&self) -> bool {
        !self.has_move(Player::Black) && !self.has_move(Player::White)
    }

    fn token_counts(&self) -> TokenCounts {
        self.count_tokens()
    }

    fn current_player(&self) -> Player {
        self.current_player
    }
}
