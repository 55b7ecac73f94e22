//! Python bindings.
//!
//! Thin wrappers that hand plain values to the Python reporting layer
//! (text summary and charts live there).

use pyo3::prelude::*;
use std::collections::{BTreeMap, HashMap};

use crate::batch::{make_rng, run_batch_parallel, run_batch_seeded, BatchStatistics};
use crate::config::SimConfig;
use crate::constants::{BEST_OF, DEUCE_DIFF, SIM_TIMES, WIN_SCORE};
use crate::game::{simulate_game, GameResult};
use crate::match_sim::{simulate_match, MatchResult};
use crate::player::PlayerProfile;

/// Player parameters.
#[pyclass(name = "PlayerProfile")]
#[derive(Clone)]
pub struct PyPlayerProfile {
    inner: PlayerProfile,
}

#[pymethods]
impl PyPlayerProfile {
    #[new]
    fn new(name: String, serve3: f64, rally: f64, key_point: f64, serve_adv: f64) -> Self {
        PyPlayerProfile {
            inner: PlayerProfile::new(name, serve3, rally, key_point, serve_adv),
        }
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn serve3(&self) -> f64 {
        self.inner.serve3
    }

    #[getter]
    fn rally(&self) -> f64 {
        self.inner.rally
    }

    #[getter]
    fn key_point(&self) -> f64 {
        self.inner.key_point
    }

    #[getter]
    fn serve_adv(&self) -> f64 {
        self.inner.serve_adv
    }

    fn check_ranges(&self) -> Vec<String> {
        self.inner.check_ranges()
    }

    fn __repr__(&self) -> String {
        let p = &self.inner;
        format!(
            "PlayerProfile({:?}, {}, {}, {}, {})",
            p.name, p.serve3, p.rally, p.key_point, p.serve_adv
        )
    }
}

/// Scoring rules and batch size.
#[pyclass(name = "SimConfig")]
#[derive(Clone)]
pub struct PySimConfig {
    inner: SimConfig,
}

#[pymethods]
impl PySimConfig {
    #[new]
    #[pyo3(signature = (win_score = WIN_SCORE, deuce_diff = DEUCE_DIFF, sim_count = SIM_TIMES, best_of = BEST_OF))]
    fn new(win_score: u32, deuce_diff: u32, sim_count: usize, best_of: u32) -> PyResult<Self> {
        let inner = SimConfig {
            win_score,
            deuce_diff,
            sim_count,
            best_of,
        };
        inner.validate()?;
        Ok(PySimConfig { inner })
    }

    #[getter]
    fn win_score(&self) -> u32 {
        self.inner.win_score
    }

    #[getter]
    fn deuce_diff(&self) -> u32 {
        self.inner.deuce_diff
    }

    #[getter]
    fn sim_count(&self) -> usize {
        self.inner.sim_count
    }

    #[getter]
    fn best_of(&self) -> u32 {
        self.inner.best_of
    }

    fn __repr__(&self) -> String {
        format!(
            "SimConfig(win_score={}, deuce_diff={}, sim_count={}, best_of={})",
            self.inner.win_score, self.inner.deuce_diff, self.inner.sim_count, self.inner.best_of
        )
    }
}

/// Result of one game. `winner` is 1 or 2.
#[pyclass(name = "GameResult", get_all)]
#[derive(Clone)]
pub struct PyGameResult {
    pub winner: u8,
    pub score: (u32, u32),
    pub had_key_point_round: bool,
}

impl From<&GameResult> for PyGameResult {
    fn from(game: &GameResult) -> Self {
        PyGameResult {
            winner: game.winner.number(),
            score: game.score,
            had_key_point_round: game.had_key_point_round,
        }
    }
}

#[pymethods]
impl PyGameResult {
    fn __repr__(&self) -> String {
        format!(
            "GameResult(winner={}, score={:?}, had_key_point_round={})",
            self.winner, self.score, self.had_key_point_round
        )
    }
}

/// Result of one match. `winner` is 1 or 2.
#[pyclass(name = "MatchResult", get_all)]
#[derive(Clone)]
pub struct PyMatchResult {
    pub winner: u8,
    pub games: Vec<PyGameResult>,
    pub total_key_point_rounds: u32,
}

impl From<&MatchResult> for PyMatchResult {
    fn from(result: &MatchResult) -> Self {
        PyMatchResult {
            winner: result.winner.number(),
            games: result.games.iter().map(PyGameResult::from).collect(),
            total_key_point_rounds: result.total_key_point_rounds,
        }
    }
}

#[pymethods]
impl PyMatchResult {
    fn __repr__(&self) -> String {
        format!("MatchResult(winner={}, games={})", self.winner, self.games.len())
    }
}

/// Batch summary consumed by the reporting layer.
#[pyclass(name = "BatchStatistics", get_all)]
#[derive(Clone)]
pub struct PyBatchStatistics {
    pub player1_name: String,
    pub player2_name: String,
    pub best_of: u32,
    pub matches: usize,
    pub games_played: usize,
    pub player1_wins: usize,
    pub player2_wins: usize,
    pub player1_win_rate: f64,
    pub player2_win_rate: f64,
    pub avg_score_diff: f64,
    pub score_diff_distribution: BTreeMap<u32, usize>,
    pub key_point_games: usize,
    /// Keyed by "player1" / "player2"
    pub key_point_win_rate: HashMap<String, f64>,
    pub avg_key_point_rounds_per_match: f64,
    summary: String,
}

impl From<BatchStatistics> for PyBatchStatistics {
    fn from(stats: BatchStatistics) -> Self {
        let summary = stats.to_string();
        let key_point_win_rate = HashMap::from([
            ("player1".to_string(), stats.key_point_win_rate.player1),
            ("player2".to_string(), stats.key_point_win_rate.player2),
        ]);
        PyBatchStatistics {
            player1_name: stats.player1_name,
            player2_name: stats.player2_name,
            best_of: stats.best_of,
            matches: stats.matches,
            games_played: stats.games_played,
            player1_wins: stats.player1_wins,
            player2_wins: stats.player2_wins,
            player1_win_rate: stats.player1_win_rate,
            player2_win_rate: stats.player2_win_rate,
            avg_score_diff: stats.avg_score_diff,
            score_diff_distribution: stats.score_diff_distribution,
            key_point_games: stats.key_point_games,
            key_point_win_rate,
            avg_key_point_rounds_per_match: stats.avg_key_point_rounds_per_match,
            summary,
        }
    }
}

#[pymethods]
impl PyBatchStatistics {
    fn __str__(&self) -> String {
        self.summary.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "BatchStatistics({} matches, {}={:.4}, {}={:.4})",
            self.matches, self.player1_name, self.player1_win_rate, self.player2_name, self.player2_win_rate
        )
    }
}

fn resolve_config(config: Option<&PySimConfig>) -> SimConfig {
    config.map(|c| c.inner.clone()).unwrap_or_default()
}

/// Simulate a single game.
#[pyfunction(name = "simulate_game")]
#[pyo3(signature = (player1, player2, config = None, seed = None))]
fn py_simulate_game(
    player1: &PyPlayerProfile,
    player2: &PyPlayerProfile,
    config: Option<&PySimConfig>,
    seed: Option<u64>,
) -> PyResult<PyGameResult> {
    let config = resolve_config(config);
    let mut rng = make_rng(seed);
    let game = simulate_game(&player1.inner, &player2.inner, &config, &mut rng)?;
    Ok(PyGameResult::from(&game))
}

/// Simulate a single match.
#[pyfunction(name = "simulate_match")]
#[pyo3(signature = (player1, player2, config = None, seed = None))]
fn py_simulate_match(
    player1: &PyPlayerProfile,
    player2: &PyPlayerProfile,
    config: Option<&PySimConfig>,
    seed: Option<u64>,
) -> PyResult<PyMatchResult> {
    let config = resolve_config(config);
    let mut rng = make_rng(seed);
    let result = simulate_match(&player1.inner, &player2.inner, &config, &mut rng)?;
    Ok(PyMatchResult::from(&result))
}

/// Run a batch of matches. Releases the GIL while simulating.
#[pyfunction(name = "run_batch")]
#[pyo3(signature = (player1, player2, config = None, seed = None, parallel = false))]
fn py_run_batch(
    py: Python<'_>,
    player1: &PyPlayerProfile,
    player2: &PyPlayerProfile,
    config: Option<&PySimConfig>,
    seed: Option<u64>,
    parallel: bool,
) -> PyResult<PyBatchStatistics> {
    let config = resolve_config(config);
    let (p1, p2) = (player1.inner.clone(), player2.inner.clone());
    let stats = py.allow_threads(move || {
        if parallel {
            run_batch_parallel(&p1, &p2, &config, seed)
        } else {
            run_batch_seeded(&p1, &p2, &config, seed)
        }
    })?;
    Ok(PyBatchStatistics::from(stats))
}

/// The two profiles of the default demo run.
#[pyfunction]
fn reference_players() -> (PyPlayerProfile, PyPlayerProfile) {
    let (a, b) = crate::constants::reference_players();
    (PyPlayerProfile { inner: a }, PyPlayerProfile { inner: b })
}

/// Python module definition
#[pymodule]
fn pingpong_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<PyPlayerProfile>()?;
    m.add_class::<PySimConfig>()?;
    m.add_class::<PyGameResult>()?;
    m.add_class::<PyMatchResult>()?;
    m.add_class::<PyBatchStatistics>()?;

    // Simulation functions
    m.add_function(wrap_pyfunction!(py_simulate_game, m)?)?;
    m.add_function(wrap_pyfunction!(py_simulate_match, m)?)?;
    m.add_function(wrap_pyfunction!(py_run_batch, m)?)?;
    m.add_function(wrap_pyfunction!(reference_players, m)?)?;

    // Constants
    m.add("WIN_SCORE", WIN_SCORE)?;
    m.add("DEUCE_DIFF", DEUCE_DIFF)?;
    m.add("SIM_TIMES", SIM_TIMES)?;
    m.add("BEST_OF", BEST_OF)?;

    Ok(())
}
