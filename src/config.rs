use serde::{Deserialize, Serialize};

use crate::constants::{BEST_OF, DEUCE_DIFF, SIM_TIMES, WIN_SCORE};
use crate::error::{Result, SimError};

/// Scoring rules and batch size for a simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Points needed to take a game
    pub win_score: u32,

    /// Lead required once the win score is reached
    pub deuce_diff: u32,

    /// Matches per batch
    pub sim_count: usize,

    /// Maximum games in a match, odd
    pub best_of: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            win_score: WIN_SCORE,
            deuce_diff: DEUCE_DIFF,
            sim_count: SIM_TIMES,
            best_of: BEST_OF,
        }
    }
}

impl SimConfig {
    pub fn with_win_score(mut self, win_score: u32) -> Self {
        self.win_score = win_score;
        self
    }

    pub fn with_deuce_diff(mut self, deuce_diff: u32) -> Self {
        self.deuce_diff = deuce_diff;
        self
    }

    pub fn with_sim_count(mut self, sim_count: usize) -> Self {
        self.sim_count = sim_count;
        self
    }

    pub fn with_best_of(mut self, best_of: u32) -> Self {
        self.best_of = best_of;
        self
    }

    /// Game wins needed to take the match.
    pub fn games_to_win(&self) -> u32 {
        self.best_of / 2 + 1
    }

    /// Reject rule sets the simulators cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.win_score == 0 {
            return Err(invalid("win_score", "must be greater than 0".to_string()));
        }
        if self.deuce_diff == 0 {
            return Err(invalid("deuce_diff", "must be at least 1".to_string()));
        }
        if self.sim_count == 0 {
            return Err(invalid("sim_count", "must be at least 1".to_string()));
        }
        if self.best_of == 0 || self.best_of % 2 == 0 {
            return Err(invalid(
                "best_of",
                format!("must be odd and at least 1, got {}", self.best_of),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> SimError {
    SimError::InvalidConfig { field, reason }
}
