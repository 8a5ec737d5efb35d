//! Shape classifier.
//!
//! Decides whether a finished path is an acceptable drawing of the symbol
//! owed by the player who drew it. The decision is a pure function of the
//! samples, the player and the cell edge length; there is no hidden state.
//!
//! All comparisons are strict, so a metric sitting exactly on a threshold
//! is rejected. Metrics that come out as NaN fail every comparison and are
//! therefore rejected as well.

use super::capture::GesturePath;
use super::geometry::{self, BoundingBox, Point};
use super::Player;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Paths with fewer samples than this are taps or flicks.
pub const MIN_POINTS: usize = 5;

/// O: aspect ratio must exceed this (exclusive).
pub const O_ASPECT_MIN: f64 = 0.5;

/// O: aspect ratio must stay below this (exclusive).
pub const O_ASPECT_MAX: f64 = 2.0;

/// O: first-to-last sample gap must be below `cell_dim` times this.
pub const O_CLOSURE_RATIO: f64 = 0.5;

/// O: total path length must exceed `cell_dim` times this.
pub const O_MIN_INK_RATIO: f64 = 0.8;

/// X: bounding box width and height must each exceed `cell_dim` times this.
pub const X_MIN_EXTENT_RATIO: f64 = 0.2;

/// X: total path length must exceed `cell_dim` times this.
pub const X_MIN_INK_RATIO: f64 = 0.2;

/// Threshold set used by a [`Classifier`].
///
/// Defaults are the named constants in this module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// See [`MIN_POINTS`].
    pub min_points: usize,
    /// See [`O_ASPECT_MIN`].
    pub o_aspect_min: f64,
    /// See [`O_ASPECT_MAX`].
    pub o_aspect_max: f64,
    /// See [`O_CLOSURE_RATIO`].
    pub o_closure_ratio: f64,
    /// See [`O_MIN_INK_RATIO`].
    pub o_min_ink_ratio: f64,
    /// See [`X_MIN_EXTENT_RATIO`].
    pub x_min_extent_ratio: f64,
    /// See [`X_MIN_INK_RATIO`].
    pub x_min_ink_ratio: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            min_points: MIN_POINTS,
            o_aspect_min: O_ASPECT_MIN,
            o_aspect_max: O_ASPECT_MAX,
            o_closure_ratio: O_CLOSURE_RATIO,
            o_min_ink_ratio: O_MIN_INK_RATIO,
            x_min_extent_ratio: X_MIN_EXTENT_RATIO,
            x_min_ink_ratio: X_MIN_INK_RATIO,
        }
    }
}

/// Why a path was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    /// Fewer samples than the minimum.
    #[display("only {count} samples")]
    TooFewPoints {
        /// Samples received.
        count: usize,
    },
    /// O: bounding box too wide or too tall; `None` for a zero-height box.
    #[display("aspect ratio {ratio:?} is not round enough")]
    AspectRatioOutOfRange {
        /// `width / height`, when defined.
        ratio: Option<f64>,
    },
    /// O: start and end are too far apart to close the loop.
    #[display("loop left open by {gap:.1}")]
    LoopNotClosed {
        /// Distance between first and last sample.
        gap: f64,
    },
    /// Not enough ink drawn for the symbol.
    #[display("stroke length {length:.1} is too short")]
    NotEnoughInk {
        /// Total path length.
        length: f64,
    },
    /// X: bounding box too narrow.
    #[display("width {width:.1} is too narrow")]
    TooNarrow {
        /// Bounding box width.
        width: f64,
    },
    /// X: bounding box too flat.
    #[display("height {height:.1} is too flat")]
    TooFlat {
        /// Bounding box height.
        height: f64,
    },
}

impl RejectReason {
    /// True when the path was dismissed before any shape heuristics ran.
    pub fn is_too_short(&self) -> bool {
        matches!(self, RejectReason::TooFewPoints { .. })
    }
}

/// Metrics derived once per finished path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathMetrics {
    /// Sum of distances between consecutive samples.
    pub total_distance: f64,
    /// Bounding box width.
    pub width: f64,
    /// Bounding box height.
    pub height: f64,
    /// `width / height`, undefined for a zero height.
    pub aspect_ratio: Option<f64>,
    /// Distance from the first to the last sample.
    pub endpoint_gap: f64,
}

impl PathMetrics {
    /// Measures a path; `None` when there are no samples.
    pub fn measure(points: &[Point]) -> Option<Self> {
        let bounds = BoundingBox::from_points(points)?;
        Some(Self {
            total_distance: geometry::path_length(points),
            width: bounds.width(),
            height: bounds.height(),
            aspect_ratio: bounds.aspect_ratio(),
            endpoint_gap: geometry::endpoint_gap(points),
        })
    }
}

/// Symbol recogniser for one board size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    cell_dim: f64,
    thresholds: ClassifierThresholds,
}

impl Classifier {
    /// Creates a classifier for cells of edge `cell_dim` with default thresholds.
    pub fn new(cell_dim: f64) -> Self {
        Self::with_thresholds(cell_dim, ClassifierThresholds::default())
    }

    /// Creates a classifier with explicit thresholds.
    pub fn with_thresholds(cell_dim: f64, thresholds: ClassifierThresholds) -> Self {
        Self {
            cell_dim,
            thresholds,
        }
    }

    /// Cell edge length used to scale every threshold.
    pub fn cell_dim(&self) -> f64 {
        self.cell_dim
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Classifies a finished path for the player recorded on it.
    pub fn classify(&self, path: &GesturePath) -> Result<(), RejectReason> {
        self.classify_points(path.points(), *path.player())
    }

    /// Classifies raw samples drawn by `player`.
    #[instrument(skip(self, points), fields(samples = points.len(), cell_dim = self.cell_dim))]
    pub fn classify_points(&self, points: &[Point], player: Player) -> Result<(), RejectReason> {
        if points.len() < self.thresholds.min_points {
            debug!("Path too short for shape analysis");
            return Err(RejectReason::TooFewPoints {
                count: points.len(),
            });
        }
        let metrics = PathMetrics::measure(points).ok_or(RejectReason::TooFewPoints { count: 0 })?;
        debug!(?metrics, "Path measured");

        let verdict = match player {
            Player::O => self.check_circle(&metrics),
            Player::X => self.check_cross(&metrics),
        };
        debug!(?verdict, "Classification done");
        verdict
    }

    fn check_circle(&self, m: &PathMetrics) -> Result<(), RejectReason> {
        let t = &self.thresholds;
        let round = m
            .aspect_ratio
            .is_some_and(|r| r > t.o_aspect_min && r < t.o_aspect_max);
        if !round {
            return Err(RejectReason::AspectRatioOutOfRange {
                ratio: m.aspect_ratio,
            });
        }
        // Written as positive predicates so NaN metrics fail them.
        let closed = m.endpoint_gap < self.cell_dim * t.o_closure_ratio;
        if !closed {
            return Err(RejectReason::LoopNotClosed {
                gap: m.endpoint_gap,
            });
        }
        let inked = m.total_distance > self.cell_dim * t.o_min_ink_ratio;
        if !inked {
            return Err(RejectReason::NotEnoughInk {
                length: m.total_distance,
            });
        }
        Ok(())
    }

    fn check_cross(&self, m: &PathMetrics) -> Result<(), RejectReason> {
        let t = &self.thresholds;
        let min_extent = self.cell_dim * t.x_min_extent_ratio;
        let wide = m.width > min_extent;
        if !wide {
            return Err(RejectReason::TooNarrow { width: m.width });
        }
        let tall = m.height > min_extent;
        if !tall {
            return Err(RejectReason::TooFlat { height: m.height });
        }
        let inked = m.total_distance > self.cell_dim * t.x_min_ink_ratio;
        if !inked {
            return Err(RejectReason::NotEnoughInk {
                length: m.total_distance,
            });
        }
        Ok(())
    }
}

/// Classifies `points` for `player` with the default thresholds.
pub fn classify(points: &[Point], player: Player, cell_dim: f64) -> Result<(), RejectReason> {
    Classifier::new(cell_dim).classify_points(points, player)
}
