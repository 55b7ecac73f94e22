use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::constants::{DEUCE_SCORE, SERVES_PER_TURN};
use crate::error::Result;
use crate::player::{PlayerProfile, Side};
use crate::point::{simulate_round, RoundWinner};

/// Outcome of a single game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Side,

    /// (player 1 points, player 2 points)
    pub score: (u32, u32),

    /// Whether the deciding rally was played as a key point
    pub had_key_point_round: bool,
}

impl GameResult {
    /// Winning margin in points.
    pub fn score_diff(&self) -> u32 {
        self.score.0.abs_diff(self.score.1)
    }
}

/// Whether the next rally is a key point.
///
/// True once both players reach 10 (fixed, whatever the win score), or as
/// soon as either one is exactly one point from the win score regardless of
/// the other's score.
pub fn is_key_point(score1: u32, score2: u32, config: &SimConfig) -> bool {
    let game_point = config.win_score.saturating_sub(1);
    (score1 >= DEUCE_SCORE && score2 >= DEUCE_SCORE) || score1 == game_point || score2 == game_point
}

fn is_game_over(score1: u32, score2: u32, config: &SimConfig) -> bool {
    score1.max(score2) >= config.win_score && score1.abs_diff(score2) >= config.deuce_diff
}

/// Simulate one game between two players.
///
/// The opening server is drawn at random and serve passes every two points.
pub fn simulate_game<R: Rng>(
    player1: &PlayerProfile,
    player2: &PlayerProfile,
    config: &SimConfig,
    rng: &mut R,
) -> Result<GameResult> {
    config.validate()?;
    player1.warn_if_out_of_range();
    player2.warn_if_out_of_range();
    Ok(play_game(player1, player2, config, rng))
}

/// Game loop without validation, for callers that already checked the config.
pub(crate) fn play_game<R: Rng>(
    player1: &PlayerProfile,
    player2: &PlayerProfile,
    config: &SimConfig,
    rng: &mut R,
) -> GameResult {
    let mut score1 = 0u32;
    let mut score2 = 0u32;
    let mut server = if rng.gen_bool(0.5) {
        Side::Player1
    } else {
        Side::Player2
    };
    let mut serve_count = 0u32;

    loop {
        let key_point = is_key_point(score1, score2, config);
        let receiver = server.other();

        let round = simulate_round(
            server.profile(player1, player2),
            receiver.profile(player1, player2),
            key_point,
            rng,
        );
        let point_winner = match round {
            RoundWinner::Server => server,
            RoundWinner::Receiver => receiver,
        };
        match point_winner {
            Side::Player1 => score1 += 1,
            Side::Player2 => score2 += 1,
        }

        // No alternating serve at deuce
        serve_count += 1;
        if serve_count >= SERVES_PER_TURN {
            server = server.other();
            serve_count = 0;
        }

        if is_game_over(score1, score2, config) {
            let winner = if score1 > score2 {
                Side::Player1
            } else {
                Side::Player2
            };
            tracing::trace!(score1, score2, ?winner, key_point, "game finished");
            return GameResult {
                winner,
                score: (score1, score2),
                had_key_point_round: key_point,
            };
        }
    }
}
