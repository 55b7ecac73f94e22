use rand::Rng;

use crate::constants::OPENING_EXCHANGE_SHARE;
use crate::player::PlayerProfile;

/// Which end of the table took the rally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundWinner {
    Server,
    Receiver,
}

/// Probability of the server taking a point decided in the opening exchange.
///
/// On key points the server's multiplier boosts its chance, then the
/// receiver's multiplier scales the remainder back in the receiver's favour.
pub fn opening_exchange_prob(server: &PlayerProfile, receiver: &PlayerProfile, is_key_point: bool) -> f64 {
    let server_win_prob = server.serve3 * server.serve_adv;
    if is_key_point {
        let boosted = server_win_prob * server.key_point;
        let receiver_win_prob = (1.0 - boosted) * receiver.key_point;
        1.0 - receiver_win_prob
    } else {
        server_win_prob
    }
}

/// Probability of the server taking an extended rally.
///
/// Only the server's key-point multiplier applies here.
pub fn extended_rally_prob(server: &PlayerProfile, is_key_point: bool) -> f64 {
    if is_key_point {
        server.rally * server.key_point
    } else {
        server.rally
    }
}

/// Simulate a single rally.
///
/// The first draw picks the rally type, the second decides the winner.
/// Probabilities are used as computed, even outside [0, 1].
pub fn simulate_round<R: Rng>(
    server: &PlayerProfile,
    receiver: &PlayerProfile,
    is_key_point: bool,
    rng: &mut R,
) -> RoundWinner {
    let is_opening_exchange = rng.gen::<f64>() < OPENING_EXCHANGE_SHARE;

    let server_win_prob = if is_opening_exchange {
        opening_exchange_prob(server, receiver, is_key_point)
    } else {
        extended_rally_prob(server, is_key_point)
    };

    if rng.gen::<f64>() < server_win_prob {
        RoundWinner::Server
    } else {
        RoundWinner::Receiver
    }
}
