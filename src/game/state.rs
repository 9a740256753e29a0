use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BOARD_SIZE: usize = 8;
pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 16;

/// 对局双方。黑方先行。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    fn symbol(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("black"),
            Player::White => f.write_str("white"),
        }
    }
}

/// 棋盘坐标 (列, 行)。`Position::PASS` 表示无子可下。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const PASS: Position = Position { col: -1, row: -1 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn is_pass(&self) -> bool {
        *self == Self::PASS
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenCounts {
    pub black: u32,
    pub white: u32,
}

impl TokenCounts {
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[serde(tag = "type")]
pub enum IntegrityError {
    #[error("board size {size} is not an even number between 4 and 16")]
    UnsupportedBoardSize { size: usize },
    #[error("board of size {size} needs {expected} cells, got {actual}")]
    CellCountMismatch {
        size: usize,
        expected: usize,
        actual: usize,
    },
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("invalid cell '{character}' at ({col},{row})")]
    InvalidCell { character: char, col: usize, row: usize },
}

/// 棋局快照。格子按行优先存放，`index = row * size + col`。
///
/// 搜索只读取状态；落子和让步都会产生新的状态。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub size: usize,
    pub cells: Vec<Option<Player>>,
    pub current_player: Player,
}

impl GameState {
    /// Standard opening: two discs per side on the centre diagonals, black to move.
    pub fn new(size: usize) -> Result<Self, IntegrityError> {
        ensure_board_size(size)?;
        Ok(Self::opening(size))
    }

    pub fn standard() -> Self {
        Self::opening(DEFAULT_BOARD_SIZE)
    }

    fn opening(size: usize) -> Self {
        let mut state = Self {
            size,
            cells: vec![None; size * size],
            current_player: Player::Black,
        };
        let half = (size / 2) as i32;
        state.set(Position::new(half - 1, half - 1), Player::White);
        state.set(Position::new(half, half), Player::White);
        state.set(Position::new(half - 1, half), Player::Black);
        state.set(Position::new(half, half - 1), Player::Black);
        state
    }

    /// Builds a state from text rows: `B` black, `W` white, `.` empty.
    pub fn from_rows(rows: &[&str], current_player: Player) -> Result<Self, IntegrityError> {
        let size = rows.len();
        ensure_board_size(size)?;
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != size {
                return Err(IntegrityError::RaggedRow {
                    row,
                    expected: size,
                    actual,
                });
            }
            for (col, character) in line.chars().enumerate() {
                let cell = match character {
                    'B' | 'b' => Some(Player::Black),
                    'W' | 'w' => Some(Player::White),
                    '.' => None,
                    _ => return Err(IntegrityError::InvalidCell { character, col, row }),
                };
                cells.push(cell);
            }
        }
        Ok(Self {
            size,
            cells,
            current_player,
        })
    }

    pub fn rows(&self) -> Vec<String> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.size)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', Player::symbol))
                    .collect()
            })
            .collect()
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        let size = self.size as i32;
        (0..size).contains(&position.col) && (0..size).contains(&position.row)
    }

    pub fn cell(&self, position: Position) -> Option<Player> {
        if !self.in_bounds(position) {
            return None;
        }
        self.cells[self.index(position)]
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        self.in_bounds(position) && self.cells[self.index(position)].is_none()
    }

    pub(crate) fn set(&mut self, position: Position, player: Player) {
        let index = self.index(position);
        self.cells[index] = Some(player);
    }

    fn index(&self, position: Position) -> usize {
        position.row as usize * self.size + position.col as usize
    }

    pub fn count_tokens(&self) -> TokenCounts {
        self.cells
            .iter()
            .flatten()
            .fold(TokenCounts::default(), |mut counts, player| {
                match player {
                    Player::Black => counts.black += 1,
                    Player::White => counts.white += 1,
                }
                counts
            })
    }

    pub fn integrity_check(&self) -> Result<(), IntegrityError> {
        ensure_board_size(self.size)?;
        let expected = self.size * self.size;
        if self.cells.len() != expected {
            return Err(IntegrityError::CellCountMismatch {
                size: self.size,
                expected,
                actual: self.cells.len(),
            });
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}

fn ensure_board_size(size: usize) -> Result<(), IntegrityError> {
    if size % 2 != 0 || !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(IntegrityError::UnsupportedBoardSize { size });
    }
    Ok(())
}
