//! Preconditions for placements.
//!
//! Each check is a small named rule; [`LegalPlacement`] composes them in the
//! order the state machine reports failures.

use super::action::{Placement, PlacementError};
use super::game::Game;
use tracing::instrument;

/// Precondition: the game has not reached a terminal status.
pub struct GameIsActive;

impl GameIsActive {
    /// Fails with [`PlacementError::GameOver`] once won or drawn.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), PlacementError> {
        if game.status().is_terminal() {
            Err(PlacementError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the square at the placement's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with [`PlacementError::SquareOccupied`].
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &Game) -> Result<(), PlacementError> {
        if !game.board().is_empty(placement.position) {
            Err(PlacementError::SquareOccupied(placement.position))
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`PlacementError::WrongPlayer`].
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &Game) -> Result<(), PlacementError> {
        if placement.player != game.current_player() {
            Err(PlacementError::WrongPlayer(placement.player))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for [`Game::place`].
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a placement.
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &Game) -> Result<(), PlacementError> {
        GameIsActive::check(game)?;
        SquareIsEmpty::check(placement, game)?;
        PlayersTurn::check(placement, game)?;
        Ok(())
    }
}
