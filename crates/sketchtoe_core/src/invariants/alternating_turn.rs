//! Alternating turn invariant: players alternate O, X, O, X, ...

use super::super::{Game, GameStatus, Player};
use super::Invariant;

/// Invariant: Players alternate turns, starting with O.
///
/// While the game is active, the player to move must be the one the history
/// implies. After a win the winner keeps the turn, so only the history
/// pattern is checked for terminal games.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();

        if let Some(first) = history.first() {
            if first.player != Player::O {
                return false;
            }
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        if *game.status() != GameStatus::Active {
            return true;
        }

        let expected_next = if history.len() % 2 == 0 {
            Player::O
        } else {
            Player::X
        };
        game.current_player() == expected_next
    }

    fn description() -> &'static str {
        "Players alternate turns (O, X, O, X, ...)"
    }
}
