//! Property-based tests for the game, match and batch simulators.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pingpong_core::{
    run_batch_seeded, simulate_game, simulate_match, PlayerProfile, SimConfig, Side,
};

/// Strategy: a profile with parameters inside the documented ranges.
///
/// Kept away from 0 and 1: a server that can never win a point makes
/// scores trade in pairs, which never opens a lead wider than two.
fn profile_strategy() -> impl Strategy<Value = PlayerProfile> {
    (0.05..=0.95f64, 0.05..=0.95f64, 1.0..=1.3f64, 0.05..=0.95f64).prop_map(
        |(serve3, rally, key_point, serve_adv)| {
            PlayerProfile::new("P".to_string(), serve3, rally, key_point, serve_adv)
        },
    )
}

/// Strategy: scoring rules with an odd match length.
fn config_strategy() -> impl Strategy<Value = SimConfig> {
    (1..=21u32, 1..=2u32, 0..=4u32).prop_map(|(win_score, deuce_diff, half)| {
        SimConfig::default()
            .with_win_score(win_score)
            .with_deuce_diff(deuce_diff)
            .with_best_of(2 * half + 1)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // 1. Games end past the win score with the required lead
    #[test]
    fn game_terminates_with_margin(
        p1 in profile_strategy(),
        p2 in profile_strategy(),
        config in config_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let game = simulate_game(&p1, &p2, &config, &mut rng).unwrap();
        let (s1, s2) = game.score;
        prop_assert!(s1.max(s2) >= config.win_score, "score={:?}", game.score);
        prop_assert!(s1.abs_diff(s2) >= config.deuce_diff, "score={:?}", game.score);
        let leader = if s1 > s2 { Side::Player1 } else { Side::Player2 };
        prop_assert_eq!(game.winner, leader);
    }

    // 2. The match winner reaches exactly the majority, within best_of games
    #[test]
    fn match_winner_reaches_majority(
        p1 in profile_strategy(),
        p2 in profile_strategy(),
        config in config_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = simulate_match(&p1, &p2, &config, &mut rng).unwrap();
        let needed = config.games_to_win();
        let (w1, w2) = result.games_won();
        let winner_games = if result.winner == Side::Player1 { w1 } else { w2 };
        prop_assert_eq!(winner_games, needed);
        prop_assert!(w1.min(w2) < needed);
        let played = result.games.len() as u32;
        prop_assert!(played >= needed && played <= config.best_of, "played={}", played);
    }

    // 3. Win rates are complementary and key-point rates stay in [0, 1]
    #[test]
    fn batch_rates_bounded(
        p1 in profile_strategy(),
        p2 in profile_strategy(),
        seed in any::<u64>(),
    ) {
        let config = SimConfig::default().with_sim_count(50);
        let stats = run_batch_seeded(&p1, &p2, &config, Some(seed)).unwrap();
        prop_assert!((stats.player1_win_rate + stats.player2_win_rate - 1.0).abs() < 1e-12);
        for rate in [stats.key_point_win_rate.player1, stats.key_point_win_rate.player2] {
            prop_assert!((0.0..=1.0).contains(&rate), "rate={}", rate);
        }
        if stats.key_point_games == 0 {
            prop_assert_eq!(stats.key_point_win_rate.player1, 0.0);
            prop_assert_eq!(stats.key_point_win_rate.player2, 0.0);
        } else {
            let total = stats.key_point_win_rate.player1 + stats.key_point_win_rate.player2;
            prop_assert!((total - 1.0).abs() < 1e-12);
        }
        prop_assert!(stats.avg_score_diff >= 2.0 && stats.avg_score_diff <= 11.0);
    }
}

#[test]
fn dominant_player_wins_every_game_to_love() {
    let a = PlayerProfile::new("A".to_string(), 1.0, 1.0, 1.0, 1.0);
    let b = PlayerProfile::new("B".to_string(), 0.0, 0.0, 1.0, 0.0);
    let config = SimConfig::default().with_sim_count(100);

    let stats = run_batch_seeded(&a, &b, &config, Some(11)).unwrap();
    assert_eq!(stats.player1_win_rate, 1.0);
    assert_eq!(stats.score_diff_distribution.len(), 1);
    assert_eq!(stats.score_diff_distribution.get(&11), Some(&300));
}
