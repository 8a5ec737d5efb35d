//! Sketched tic-tac-toe core.
//!
//! Two players share one board and confirm every move by drawing their
//! symbol, an O or an X, inside an empty cell. This crate turns raw pointer
//! samples into placements:
//!
//! - **Capture**: one open gesture at a time, bound to the cell it began in
//! - **Classifier**: hand-tuned geometric checks per symbol
//! - **Game**: board, turn and win/draw state machine
//! - **Orientation**: tilt-driven presentation flip with hysteresis
//! - **Engine**: [`SketchGame`] wires the above and emits [`GameEvent`]s
//!
//! # Example
//!
//! ```
//! use sketchtoe_core::{EventLog, Point, Position, SketchGame};
//!
//! let mut game = SketchGame::new(EventLog::new());
//! game.start_gesture(Position::Center, Point::new(150.0, 120.0)).unwrap();
//! for i in 1..=24 {
//!     let a = i as f64 / 24.0 * std::f64::consts::TAU;
//!     game.extend_gesture(Point::new(150.0 + 30.0 * a.sin(), 150.0 - 30.0 * a.cos()));
//! }
//! assert!(game.finish_gesture().is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod capture;
mod classifier;
mod contracts;
mod engine;
mod events;
mod game;
mod geometry;
pub mod invariants;
mod layout;
mod orientation;
mod position;
pub mod rules;
mod types;

pub use action::{Placement, PlacementError, PlacementOutcome};
pub use capture::{CaptureError, GestureCapture, GesturePath};
pub use classifier::{
    classify, Classifier, ClassifierThresholds, PathMetrics, RejectReason, MIN_POINTS,
    O_ASPECT_MAX, O_ASPECT_MIN, O_CLOSURE_RATIO, O_MIN_INK_RATIO, X_MIN_EXTENT_RATIO,
    X_MIN_INK_RATIO,
};
pub use contracts::{GameIsActive, LegalPlacement, PlayersTurn, SquareIsEmpty};
pub use engine::{GestureOutcome, SketchGame};
pub use events::{EventLog, GameEvent, GameObserver, StatusReport};
pub use game::Game;
pub use geometry::{endpoint_gap, path_length, BoundingBox, Point};
pub use layout::{BoardLayout, Glyph, DEFAULT_BOARD_SIZE};
pub use orientation::{
    OrientationChange, OrientationController, TiltThresholds, FLIP_ABOVE_DEGREES,
    UNFLIP_BELOW_DEGREES,
};
pub use position::Position;
pub use types::{Board, GameStatus, Player, Square};
