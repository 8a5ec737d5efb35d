//! Game state machine.
//!
//! [`Game`] is the sole owner of the board, the player to move and the game
//! status. All mutation goes through [`Game::place`] and [`Game::reset`].

use super::action::{Placement, PlacementError, PlacementOutcome};
use super::contracts::LegalPlacement;
use super::invariants::{GameInvariants, InvariantSet};
use super::rules;
use super::types::{Board, GameStatus, Player, Square};
use super::Position;
use tracing::{debug, info, instrument};

/// Tic-tac-toe game engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Player,
    status: GameStatus,
    history: Vec<Placement>,
}

impl Game {
    /// Creates a new game: empty board, O to move, status active.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::O,
            status: GameStatus::Active,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    ///
    /// After a win this stays on the winner.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Returns true while placements are still accepted.
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// Returns placements in the order they were made.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Places `symbol` at `position`.
    ///
    /// The win check runs before the draw check, so a final placement that
    /// both completes a line and fills the board is a win. On error the game
    /// is unchanged.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn place(
        &mut self,
        position: Position,
        symbol: Player,
    ) -> Result<PlacementOutcome, PlacementError> {
        let placement = Placement::new(symbol, position);
        LegalPlacement::check(&placement, self)?;

        #[cfg(debug_assertions)]
        let snapshot = self.clone();

        self.board.set(position, Square::Occupied(symbol));
        self.history.push(placement);
        debug!(%placement, "Symbol written");

        let outcome = if let Some(winner) = rules::check_winner(&self.board) {
            self.status = GameStatus::Won(winner);
            info!(%winner, "Game won");
            PlacementOutcome::Won(winner)
        } else if rules::is_full(&self.board) {
            self.status = GameStatus::Draw;
            info!("Game drawn");
            PlacementOutcome::Draw
        } else {
            self.current_player = symbol.opponent();
            PlacementOutcome::Continue {
                next: self.current_player,
            }
        };

        #[cfg(debug_assertions)]
        if let Err(e) = self.check_invariants() {
            *self = snapshot;
            return Err(e);
        }

        Ok(outcome)
    }

    /// Places `symbol` at a raw cell index (0-8).
    pub fn place_index(
        &mut self,
        index: usize,
        symbol: Player,
    ) -> Result<PlacementOutcome, PlacementError> {
        let position = Position::try_from(index)?;
        self.place(position, symbol)
    }

    /// Clears the board, gives the turn to O and reactivates the game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(placements = self.history.len(), "Resetting game");
        *self = Self::new();
    }

    /// Verifies every game invariant, describing all violations at once.
    pub fn check_invariants(&self) -> Result<(), PlacementError> {
        GameInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            PlacementError::InvariantViolation(format!(
                "Postcondition failed: {}",
                descriptions
            ))
        })
    }

    /// Writes ink without recording history and forces the player to move.
    #[cfg(test)]
    pub(crate) fn corrupt_for_test(&mut self, position: Position, ink: Player, to_move: Player) {
        self.board.set(position, Square::Occupied(ink));
        self.current_player = to_move;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(debug_assertions)]
    #[test]
    fn test_invariant_failure_rolls_back_placement() {
        let mut game = Game::new();
        // Ink with no matching history entry.
        game.corrupt_for_test(Position::TopLeft, Player::X, Player::O);
        let before = game.clone();

        let result = game.place(Position::Center, Player::O);
        assert!(matches!(result, Err(PlacementError::InvariantViolation(_))));
        assert_eq!(game, before);
    }

    #[test]
    fn test_new_game_starts_with_o() {
        let game = Game::new();
        assert_eq!(game.current_player(), Player::O);
        assert_eq!(*game.status(), GameStatus::Active);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_place_advances_turn() {
        let mut game = Game::new();
        let outcome = game.place(Position::Center, Player::O).unwrap();
        assert_eq!(outcome, PlacementOutcome::Continue { next: Player::X });
        assert_eq!(game.current_player(), Player::X);
    }

    #[test]
    fn test_rejected_placement_leaves_game_unchanged() {
        let mut game = Game::new();
        game.place(Position::Center, Player::O).unwrap();
        let before = game.clone();

        assert_eq!(
            game.place(Position::Center, Player::X),
            Err(PlacementError::SquareOccupied(Position::Center))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_place_index_out_of_bounds() {
        let mut game = Game::new();
        assert_eq!(
            game.place_index(9, Player::O),
            Err(PlacementError::InvalidIndex(9))
        );
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Game::new();
        game.place(Position::Center, Player::O).unwrap();
        game.place(Position::TopLeft, Player::X).unwrap();
        game.reset();
        assert_eq!(game, Game::new());
    }
}
