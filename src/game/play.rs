//! 双方 AI 对弈直到终局。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::oracle::GameOracle;
use super::rules::MoveError;
use super::state::{GameState, Player, Position, TokenCounts};
use crate::ai::MoveSelector;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveRecord {
    pub player: Player,
    /// `Position::PASS` for a skipped turn.
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchReport {
    pub final_state: GameState,
    pub moves: Vec<MoveRecord>,
    pub counts: TokenCounts,
    pub winner: Option<Player>,
}

pub fn play_match(
    initial: GameState,
    black: &MoveSelector,
    white: &MoveSelector,
) -> Result<MatchReport, MoveError> {
    let mut state = initial;
    let mut moves = Vec::new();

    while !state.is_terminal() {
        let player = state.current_player;
        let selector = match player {
            Player::Black => black,
            Player::White => white,
        };

        let position = selector.decide_move(&state)?;
        state = if position.is_pass() {
            state.pass()?
        } else {
            state.apply_move(position)?
        };
        debug!(ply = moves.len() + 1, %player, %position, "move played");
        moves.push(MoveRecord { player, position });
    }

    let counts = state.count_tokens();
    let winner = state.winner();
    info!(
        black = counts.black,
        white = counts.white,
        winner = ?winner,
        plies = moves.len(),
        "match finished"
    );

    Ok(MatchReport {
        final_state: state,
        moves,
        counts,
        winner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{SearchConfig, SearchStrategy};

    fn p(col: i32, row: i32) -> Position {
        Position::new(col, row)
    }

    #[test]
    fn perfect_play_on_four_by_four_is_a_white_win() {
        let selector =
            MoveSelector::new(SearchConfig::default().with_strategy(SearchStrategy::AlphaBeta))
                .expect("config should be valid");
        let initial = GameState::new(4).expect("4x4 is supported");
        let report = play_match(initial, &selector, &selector).expect("match should finish");

        let played: Vec<Position> = report.moves.iter().map(|record| record.position).collect();
        assert_eq!(
            played,
            vec![
                p(1, 0),
                p(0, 0),
                p(0, 1),
                p(2, 0),
                p(3, 0),
                p(0, 2),
                p(0, 3),
                p(3, 1),
                p(3, 2),
                p(1, 3),
                p(2, 3),
                p(3, 3),
            ]
        );
        assert_eq!(report.moves[0].player, Player::Black);
        assert_eq!(report.final_state.rows(), vec!["WWWB", "WWWB", "WWWB", "BBBW"]);
        assert_eq!(report.counts, TokenCounts { black: 6, white: 10 });
        assert_eq!(report.winner, Some(Player::White));
    }

    #[test]
    fn forced_pass_is_recorded() {
        let stuck = GameState::from_rows(&["WWW.", "WWB.", "WBBB", "..BW"], Player::Black)
            .expect("fixture should parse");
        let selector =
            MoveSelector::new(SearchConfig::default().with_strategy(SearchStrategy::AlphaBeta))
                .expect("config should be valid");
        let report = play_match(stuck, &selector, &selector).expect("match should finish");

        assert_eq!(
            report.moves[0],
            MoveRecord {
                player: Player::Black,
                position: Position::PASS
            }
        );
        assert_eq!(report.moves[1].player, Player::White);
        assert!(report.final_state.is_terminal());
    }

    #[test]
    fn heuristic_against_exhaustive_search_terminates() {
        let shallow = MoveSelector::new(SearchConfig::default().with_cutoff_depth(2))
            .expect("config should be valid");
        let exhaustive =
            MoveSelector::new(SearchConfig::default().with_strategy(SearchStrategy::AlphaBeta))
                .expect("config should be valid");
        let initial = GameState::new(4).expect("4x4 is supported");
        let report = play_match(initial, &shallow, &exhaustive).expect("match should finish");

        assert!(report.final_state.is_terminal());
        let placed = report
            .moves
            .iter()
            .filter(|record| !record.position.is_pass())
            .count();
        assert!(placed <= 12, "only twelve empty cells at the start");
        let counts = report.final_state.count_tokens();
        assert_eq!(counts, report.counts);
        assert_eq!(report.winner, report.final_state.winner());
    }
}
