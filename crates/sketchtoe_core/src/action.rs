//! First-class placement types.
//!
//! A placement is the domain event produced once a drawn symbol has been
//! recognised. It can be validated independently of execution.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A player placing their symbol at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// The player making the placement.
    pub player: Player,
    /// The cell receiving the symbol.
    pub position: Position,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Result of a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementOutcome {
    /// No line was completed and cells remain; `next` is now to move.
    Continue {
        /// The player whose turn it now is.
        next: Player,
    },
    /// The placement completed a line.
    Won(Player),
    /// The placement filled the board without completing a line.
    Draw,
}

/// Error that can occur when validating or applying a placement.
///
/// Every variant leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlacementError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Player),

    /// A raw cell index outside 0-8.
    #[display("Cell index {} is out of bounds (must be 0-8)", _0)]
    InvalidIndex(usize),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for PlacementError {}
