//! Draw detection logic.

use super::super::{Board, Square};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// Only meaningful as a draw once [`check_winner`](super::check_winner)
/// has come back empty.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::super::{Player, Position};
    use super::super::win::check_winner;
    use super::*;

    fn is_draw(board: &Board) -> bool {
        is_full(board) && check_winner(board).is_none()
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        use Player::{O, X};
        // O X O / O X X / X O O
        let board = Board::from(
            [O, X, O, O, X, X, X, O, O].map(Square::Occupied),
        );
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        use Player::{O, X};
        // O O O / X X O / X O X
        let board = Board::from(
            [O, O, O, X, X, O, X, O, X].map(Square::Occupied),
        );
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
