//! Monotonic board invariant: squares never change once set.

use super::super::{Board, Game, Square};
use super::Invariant;

/// Invariant: Board squares are monotonic (never overwritten).
///
/// Replaying the placement history onto an empty board must never touch an
/// occupied square and must reproduce the current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<Game> for MonotonicBoardInvariant {
    fn holds(game: &Game) -> bool {
        let mut reconstructed = Board::new();

        for placement in game.history() {
            if !reconstructed.is_empty(placement.position) {
                return false;
            }
            reconstructed.set(placement.position, Square::Occupied(placement.player));
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
