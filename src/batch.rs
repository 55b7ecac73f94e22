use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::SimConfig;
use crate::error::Result;
use crate::match_sim::{play_match, MatchResult};
use crate::player::{PlayerProfile, Side};

/// Share of key-point-deciding games each player won.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyPointRates {
    pub player1: f64,
    pub player2: f64,
}

impl KeyPointRates {
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Player1 => self.player1,
            Side::Player2 => self.player2,
        }
    }
}

/// Summary of a batch of simulated matches.
///
/// Plain data for reporting layers; nothing here refers back to the simulators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub player1_name: String,
    pub player2_name: String,
    pub best_of: u32,

    /// Matches simulated
    pub matches: usize,
    /// Games played across all matches
    pub games_played: usize,

    pub player1_wins: usize,
    pub player2_wins: usize,
    pub player1_win_rate: f64,
    pub player2_win_rate: f64,

    /// Mean |score1 - score2| over every game
    pub avg_score_diff: f64,
    /// Winning margin -> number of games
    pub score_diff_distribution: BTreeMap<u32, usize>,

    /// Games whose deciding rally was a key point (shared denominator)
    pub key_point_games: usize,
    pub key_point_win_rate: KeyPointRates,
    /// Key-point-deciding games per match
    pub avg_key_point_rounds_per_match: f64,
}

impl BatchStatistics {
    pub fn win_rate(&self, side: Side) -> f64 {
        match side {
            Side::Player1 => self.player1_win_rate,
            Side::Player2 => self.player2_win_rate,
        }
    }
}

impl fmt::Display for BatchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "Simulated {} best-of-{} matches:", self.matches, self.best_of)?;
        writeln!(f, "{} match win rate: {:.2}%", self.player1_name, self.player1_win_rate * 100.0)?;
        writeln!(f, "{} match win rate: {:.2}%", self.player2_name, self.player2_win_rate * 100.0)?;
        writeln!(f, "Average game margin: {:.2} points", self.avg_score_diff)?;
        writeln!(
            f,
            "{} key-point win rate: {:.2}%",
            self.player1_name,
            self.key_point_win_rate.player1 * 100.0
        )?;
        writeln!(
            f,
            "{} key-point win rate: {:.2}%",
            self.player2_name,
            self.key_point_win_rate.player2 * 100.0
        )?;
        writeln!(
            f,
            "Key-point-deciding games per match: {:.2}",
            self.avg_key_point_rounds_per_match
        )?;
        write!(f, "{}", rule)
    }
}

/// Running counters for a batch.
///
/// Accumulators from disjoint sets of matches combine with [`merge`](Self::merge),
/// so parallel workers can each keep one and reduce at the end.
#[derive(Clone, Debug, Default)]
pub struct BatchAccumulator {
    matches: usize,
    player1_wins: usize,
    player2_wins: usize,
    total_key_point_rounds: u64,
    score_diffs: Vec<u32>,
    key_point_wins: [usize; 2],
    key_point_games: usize,
}

impl BatchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one match into the counters.
    pub fn record(&mut self, result: &MatchResult) {
        self.matches += 1;
        self.total_key_point_rounds += u64::from(result.total_key_point_rounds);

        match result.winner {
            Side::Player1 => self.player1_wins += 1,
            Side::Player2 => self.player2_wins += 1,
        }

        for game in &result.games {
            self.score_diffs.push(game.score_diff());

            if game.had_key_point_round {
                match game.winner {
                    Side::Player1 => self.key_point_wins[0] += 1,
                    Side::Player2 => self.key_point_wins[1] += 1,
                }
                // Both players share one denominator
                self.key_point_games += 1;
            }
        }
    }

    /// Combine with counters from a later run of matches.
    pub fn merge(mut self, other: BatchAccumulator) -> Self {
        self.matches += other.matches;
        self.player1_wins += other.player1_wins;
        self.player2_wins += other.player2_wins;
        self.total_key_point_rounds += other.total_key_point_rounds;
        self.score_diffs.extend(other.score_diffs);
        self.key_point_wins[0] += other.key_point_wins[0];
        self.key_point_wins[1] += other.key_point_wins[1];
        self.key_point_games += other.key_point_games;
        self
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    /// Turn the counters into summary statistics.
    ///
    /// Rates and means are 0.0 when no match was recorded.
    pub fn finish(mut self, player1: &PlayerProfile, player2: &PlayerProfile, config: &SimConfig) -> BatchStatistics {
        // Sorted so the mean does not depend on the order workers merged in
        self.score_diffs.sort_unstable();
        let matches = self.matches as f64;
        let per_match = |count: f64| if self.matches > 0 { count / matches } else { 0.0 };
        let key_point_rate = |wins: usize| {
            if self.key_point_games > 0 {
                wins as f64 / self.key_point_games as f64
            } else {
                0.0
            }
        };
        let key_point_win_rate = KeyPointRates {
            player1: key_point_rate(self.key_point_wins[0]),
            player2: key_point_rate(self.key_point_wins[1]),
        };

        let mut score_diff_distribution = BTreeMap::new();
        for &diff in &self.score_diffs {
            *score_diff_distribution.entry(diff).or_insert(0) += 1;
        }
        let avg_score_diff = if self.score_diffs.is_empty() {
            0.0
        } else {
            self.score_diffs.iter().map(|&d| f64::from(d)).mean()
        };

        BatchStatistics {
            player1_name: player1.name.clone(),
            player2_name: player2.name.clone(),
            best_of: config.best_of,
            matches: self.matches,
            games_played: self.score_diffs.len(),
            player1_wins: self.player1_wins,
            player2_wins: self.player2_wins,
            player1_win_rate: per_match(self.player1_wins as f64),
            player2_win_rate: per_match(self.player2_wins as f64),
            avg_score_diff,
            score_diff_distribution,
            key_point_games: self.key_point_games,
            key_point_win_rate,
            avg_key_point_rounds_per_match: per_match(self.total_key_point_rounds as f64),
        }
    }
}

fn check_inputs(player1: &PlayerProfile, player2: &PlayerProfile, config: &SimConfig) -> Result<()> {
    config.validate()?;
    player1.warn_if_out_of_range();
    player2.warn_if_out_of_range();
    Ok(())
}

/// Simulate `config.sim_count` matches on one generator and summarise them.
pub fn run_batch<R: Rng>(
    player1: &PlayerProfile,
    player2: &PlayerProfile,
    config: &SimConfig,
    rng: &mut R,
) -> Result<BatchStatistics> {
    check_inputs(player1, player2, config)?;
    tracing::debug!(
        player1 = %player1.name,
        player2 = %player2.name,
        sim_count = config.sim_count,
        best_of = config.best_of,
        "starting batch"
    );

    let mut acc = BatchAccumulator::new();
    for _ in 0..config.sim_count {
        let result = play_match(player1, player2, config, rng);
        acc.record(&result);
    }

    let stats = acc.finish(player1, player2, config);
    tracing::debug!(
        games = stats.games_played,
        player1_win_rate = stats.player1_win_rate,
        "batch finished"
    );
    Ok(stats)
}

/// [`run_batch`] on a ChaCha8 generator; `None` seeds from entropy.
pub fn run_batch_seeded(
    player1: &PlayerProfile,
    player2: &PlayerProfile,
    config: &SimConfig,
    seed: Option<u64>,
) -> Result<BatchStatistics> {
    tracing::debug!(?seed, "seeding batch generator");
    let mut rng = make_rng(seed);
    run_batch(player1, player2, config, &mut rng)
}

/// Simulate matches across the rayon pool.
///
/// Each match gets its own generator seeded from a master stream, so the
/// result for a given seed does not depend on the number of threads.
pub fn run_batch_parallel(
    player1: &PlayerProfile,
    player2: &PlayerProfile,
    config: &SimConfig,
    seed: Option<u64>,
) -> Result<BatchStatistics> {
    check_inputs(player1, player2, config)?;
    tracing::debug!(
        player1 = %player1.name,
        player2 = %player2.name,
        sim_count = config.sim_count,
        ?seed,
        threads = rayon::current_num_threads(),
        "starting parallel batch"
    );

    let mut master = make_rng(seed);
    let match_seeds: Vec<u64> = (0..config.sim_count).map(|_| master.gen::<u64>()).collect();

    let acc = match_seeds
        .par_iter()
        .map(|&match_seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(match_seed);
            play_match(player1, player2, config, &mut rng)
        })
        .fold(BatchAccumulator::new, |mut acc, result| {
            acc.record(&result);
            acc
        })
        .reduce(BatchAccumulator::new, BatchAccumulator::merge);

    let stats = acc.finish(player1, player2, config);
    tracing::debug!(
        games = stats.games_played,
        player1_win_rate = stats.player1_win_rate,
        "parallel batch finished"
    );
    Ok(stats)
}

pub(crate) fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
