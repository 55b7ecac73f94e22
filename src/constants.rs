use crate::player::PlayerProfile;

/// Points needed to take a game
pub const WIN_SCORE: u32 = 11;

/// Lead required to close out a game once the win score is reached
pub const DEUCE_DIFF: u32 = 2;

/// Matches simulated per batch
pub const SIM_TIMES: usize = 1000;

/// Games in a match (first to 3)
pub const BEST_OF: u32 = 5;

/// Score both players must reach for every rally to count as a key point
pub const DEUCE_SCORE: u32 = 10;

/// Share of rallies decided within the first three strokes
pub const OPENING_EXCHANGE_SHARE: f64 = 0.6;

/// Two-serves-per-turn rotation
pub const SERVES_PER_TURN: u32 = 2;

/// The two profiles used by the default demo run.
pub fn reference_players() -> (PlayerProfile, PlayerProfile) {
    (
        PlayerProfile::new("Ma Long".to_string(), 0.75, 0.6, 1.2, 0.6),
        PlayerProfile::new("Mima Ito".to_string(), 0.7, 0.55, 1.1, 0.58),
    )
}
