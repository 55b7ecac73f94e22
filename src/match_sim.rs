use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::Result;
use crate::game::{play_game, GameResult};
use crate::player::{PlayerProfile, Side};

/// Outcome of a best-of-N match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Side,

    /// Games in the order they were played
    pub games: Vec<GameResult>,

    /// Number of games whose deciding rally was a key point
    pub total_key_point_rounds: u32,
}

impl MatchResult {
    /// Games won by each side as (player 1, player 2).
    pub fn games_won(&self) -> (u32, u32) {
        self.games.iter().fold((0, 0), |(p1, p2), game| match game.winner {
            Side::Player1 => (p1 + 1, p2),
            Side::Player2 => (p1, p2 + 1),
        })
    }
}

/// Simulate games until one side reaches the majority of `config.best_of`.
pub fn simulate_match<R: Rng>(
    player1: &PlayerProfile,
    player2: &PlayerProfile,
    config: &SimConfig,
    rng: &mut R,
) -> Result<MatchResult> {
    config.validate()?;
    player1.warn_if_out_of_range();
    player2.warn_if_out_of_range();
    Ok(play_match(player1, player2, config, rng))
}

pub(crate) fn play_match<R: Rng>(
    player1: &PlayerProfile,
    player2: &PlayerProfile,
    config: &SimConfig,
    rng: &mut R,
) -> MatchResult {
    let games_to_win = config.games_to_win();
    let mut player1_wins = 0u32;
    let mut player2_wins = 0u32;
    let mut games = Vec::new();
    let mut total_key_point_rounds = 0u32;

    while player1_wins < games_to_win && player2_wins < games_to_win {
        let game = play_game(player1, player2, config, rng);
        total_key_point_rounds += u32::from(game.had_key_point_round);

        match game.winner {
            Side::Player1 => player1_wins += 1,
            Side::Player2 => player2_wins += 1,
        }
        games.push(game);
    }

    let winner = if player1_wins > player2_wins {
        Side::Player1
    } else {
        Side::Player2
    };

    MatchResult {
        winner,
        games,
        total_key_point_rounds,
    }
}
