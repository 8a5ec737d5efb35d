//! Board layout on the square drawing surface.

use super::geometry::Point;
use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// Default edge length of the drawing surface.
pub const DEFAULT_BOARD_SIZE: f64 = 300.0;

/// Geometry of a symbol drawn in a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    /// An O: circle around the cell centre.
    Circle {
        /// Centre of the cell.
        center: Point,
        /// `cell_dim / 3`.
        radius: f64,
    },
    /// An X: two diagonals through the cell centre.
    Cross {
        /// Top-left to bottom-right, then top-right to bottom-left.
        strokes: [(Point, Point); 2],
    },
}

/// Maps surface coordinates to cells for a square board of side `size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    size: f64,
}

impl BoardLayout {
    /// Creates a layout for a surface of edge `size`.
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    /// Surface edge length.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Edge length of one cell.
    pub fn cell_dim(&self) -> f64 {
        self.size / 3.0
    }

    /// The cell under `point`, or `None` off the board.
    pub fn cell_at(&self, point: Point) -> Option<Position> {
        let inside = |v: f64| v >= 0.0 && v < self.size;
        if !inside(point.x) || !inside(point.y) {
            return None;
        }
        let cell = self.cell_dim();
        let col = ((point.x / cell).floor() as usize).min(2);
        let row = ((point.y / cell).floor() as usize).min(2);
        Position::from_row_col(row, col)
    }

    /// Top-left corner of a cell.
    pub fn cell_origin(&self, position: Position) -> Point {
        let cell = self.cell_dim();
        Point::new(position.col() as f64 * cell, position.row() as f64 * cell)
    }

    /// Centre of a cell.
    pub fn cell_center(&self, position: Position) -> Point {
        let origin = self.cell_origin(position);
        let half = self.cell_dim() / 2.0;
        Point::new(origin.x + half, origin.y + half)
    }

    /// Symbol geometry for `player` in `position`, shared by placed
    /// symbols and drawing hints.
    pub fn glyph(&self, player: Player, position: Position) -> Glyph {
        let center = self.cell_center(position);
        let cell = self.cell_dim();
        match player {
            Player::O => Glyph::Circle {
                center,
                radius: cell / 3.0,
            },
            Player::X => {
                let offset = cell / 4.0;
                Glyph::Cross {
                    strokes: [
                        (
                            Point::new(center.x - offset, center.y - offset),
                            Point::new(center.x + offset, center.y + offset),
                        ),
                        (
                            Point::new(center.x + offset, center.y - offset),
                            Point::new(center.x - offset, center.y + offset),
                        ),
                    ],
                }
            }
        }
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}
