//! Gesture capture.
//!
//! Tracks the single in-progress pointer path. A path exists only in the
//! `Capturing` state, so a second gesture cannot begin until the first has
//! been finished or cancelled.

use super::game::Game;
use super::geometry::Point;
use super::{Player, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// A pointer path bound to the cell it started in.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(try_from = "RawGesturePath")]
pub struct GesturePath {
    /// Cell under the first sample.
    position: Position,
    /// Player to move when the gesture began.
    player: Player,
    /// Samples in arrival order (never empty).
    points: Vec<Point>,
}

impl GesturePath {
    /// Creates a path seeded with its first sample.
    pub fn new(position: Position, player: Player, first: Point) -> Self {
        Self {
            position,
            player,
            points: vec![first],
        }
    }

    /// Builds a complete path from existing samples.
    ///
    /// Returns `None` for an empty sample list.
    pub fn from_points(position: Position, player: Player, points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self {
                position,
                player,
                points,
            })
        }
    }

    /// Appends a sample.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a path holds at least its first sample.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Unchecked wire form of [`GesturePath`].
#[derive(Deserialize)]
struct RawGesturePath {
    position: Position,
    player: Player,
    points: Vec<Point>,
}

impl TryFrom<RawGesturePath> for GesturePath {
    type Error = &'static str;

    fn try_from(raw: RawGesturePath) -> Result<Self, Self::Error> {
        Self::from_points(raw.position, raw.player, raw.points)
            .ok_or("a gesture path needs at least one point")
    }
}

/// Reason a gesture could not start.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CaptureError {
    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The target cell already holds a symbol.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// Another gesture is still being drawn.
    #[display("A gesture is already in progress in {}", _0)]
    AlreadyCapturing(Position),
}

impl std::error::Error for CaptureError {}

/// Capture state machine: `Idle` or `Capturing` exactly one path.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureCapture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture is being drawn.
    Capturing(GesturePath),
}

impl GestureCapture {
    /// Creates an idle capture.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Opens a new path at `position`, seeded with `point`.
    ///
    /// Fails without touching the open path when the game is over, the
    /// cell is occupied, or a gesture is already in progress.
    #[instrument(skip(self, game))]
    pub fn start(
        &mut self,
        game: &Game,
        position: Position,
        point: Point,
    ) -> Result<(), CaptureError> {
        if let GestureCapture::Capturing(open) = self {
            return Err(CaptureError::AlreadyCapturing(*open.position()));
        }
        if !game.is_active() {
            return Err(CaptureError::GameOver);
        }
        if !game.board().is_empty(position) {
            return Err(CaptureError::SquareOccupied(position));
        }

        let player = game.current_player();
        debug!(%position, %player, "Gesture capture started");
        *self = GestureCapture::Capturing(GesturePath::new(position, player, point));
        Ok(())
    }

    /// Appends `point` to the open path; no-op when idle.
    pub fn extend(&mut self, point: Point) {
        if let GestureCapture::Capturing(path) = self {
            trace!(x = point.x, y = point.y, "Gesture sample");
            path.push(point);
        }
    }

    /// Closes the capture and hands back the path, or `None` when idle.
    #[instrument(skip(self))]
    pub fn finish(&mut self) -> Option<GesturePath> {
        match std::mem::take(self) {
            GestureCapture::Capturing(path) => {
                debug!(samples = path.len(), "Gesture capture finished");
                Some(path)
            }
            GestureCapture::Idle => None,
        }
    }

    /// External abort; identical to [`finish`](Self::finish).
    pub fn cancel(&mut self) -> Option<GesturePath> {
        self.finish()
    }

    /// Returns true while a path is open.
    pub fn is_capturing(&self) -> bool {
        matches!(self, GestureCapture::Capturing(_))
    }

    /// The open path, if any.
    pub fn path(&self) -> Option<&GesturePath> {
        match self {
            GestureCapture::Capturing(path) => Some(path),
            GestureCapture::Idle => None,
        }
    }
}
