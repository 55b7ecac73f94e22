//! Pingpong Core - Monte Carlo simulator for best-of-N table-tennis matches.
//!
//! Simulates rallies, games and matches between two parameterized players and
//! aggregates many matches into win rates, key-point performance and margin
//! statistics. Python bindings are available with the `python` feature.

pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod match_sim;
pub mod player;
pub mod point;

#[cfg(feature = "python")]
mod python;

pub use batch::{
    run_batch, run_batch_parallel, run_batch_seeded, BatchAccumulator, BatchStatistics, KeyPointRates,
};
pub use config::SimConfig;
pub use constants::{reference_players, BEST_OF, DEUCE_DIFF, OPENING_EXCHANGE_SHARE, SIM_TIMES, WIN_SCORE};
pub use error::{Result, SimError};
pub use game::{is_key_point, simulate_game, GameResult};
pub use match_sim::{simulate_match, MatchResult};
pub use player::{PlayerProfile, Side};
pub use point::{extended_rally_prob, opening_exchange_prob, simulate_round, RoundWinner};
