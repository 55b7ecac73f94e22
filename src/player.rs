use serde::{Deserialize, Serialize};

/// Player with per-point win probabilities and a pressure multiplier.
///
/// Probabilities are expected in [0, 1] and `key_point` at or above 1.0, but
/// nothing is clamped: out-of-range values skew the draws instead of failing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,

    /// Win probability on points decided in the first three strokes
    pub serve3: f64,

    /// Win probability on extended rallies
    pub rally: f64,

    /// Multiplier applied on key points (>1 means the player rises under pressure)
    pub key_point: f64,

    /// Serve advantage applied to opening exchanges
    pub serve_adv: f64,
}

impl PlayerProfile {
    pub fn new(name: String, serve3: f64, rally: f64, key_point: f64, serve_adv: f64) -> Self {
        PlayerProfile {
            name,
            serve3,
            rally,
            key_point,
            serve_adv,
        }
    }

    /// Names of fields outside their documented range.
    pub fn check_ranges(&self) -> Vec<String> {
        let mut out_of_range = Vec::new();
        for (field, value) in [
            ("serve3", self.serve3),
            ("rally", self.rally),
            ("serve_adv", self.serve_adv),
        ] {
            if !(0.0..=1.0).contains(&value) {
                out_of_range.push(field.to_string());
            }
        }
        if self.key_point.is_nan() || self.key_point < 1.0 {
            out_of_range.push("key_point".to_string());
        }
        out_of_range
    }

    /// Log any out-of-range parameters without rejecting the profile.
    pub(crate) fn warn_if_out_of_range(&self) {
        let fields = self.check_ranges();
        if !fields.is_empty() {
            tracing::warn!(
                player = %self.name,
                ?fields,
                "profile parameters outside documented range, draws will be skewed"
            );
        }
    }
}

/// One of the two players in a game or match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    /// Resolve this side to its profile.
    pub fn profile<'a>(self, player1: &'a PlayerProfile, player2: &'a PlayerProfile) -> &'a PlayerProfile {
        match self {
            Side::Player1 => player1,
            Side::Player2 => player2,
        }
    }

    /// 1 or 2, for reporting layers.
    pub fn number(self) -> u8 {
        match self {
            Side::Player1 => 1,
            Side::Player2 => 2,
        }
    }
}
