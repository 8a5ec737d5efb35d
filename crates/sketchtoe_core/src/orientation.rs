//! Orientation mode controller.
//!
//! Watches a single tilt axis and toggles a presentation-only flip with
//! hysteresis. The controller has no access to the game, so it cannot
//! change whose turn it is.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Tilt (degrees) above which an upright board flips.
pub const FLIP_ABOVE_DEGREES: f64 = 60.0;

/// Tilt (degrees) below which a flipped board is restored.
pub const UNFLIP_BELOW_DEGREES: f64 = 30.0;

/// Hysteresis band for the flip toggle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltThresholds {
    /// Flip when upright and a sample exceeds this.
    pub flip_above: f64,
    /// Restore when flipped and a sample falls below this.
    pub unflip_below: f64,
}

impl Default for TiltThresholds {
    fn default() -> Self {
        Self {
            flip_above: FLIP_ABOVE_DEGREES,
            unflip_below: UNFLIP_BELOW_DEGREES,
        }
    }
}

/// A change in presentation orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationChange {
    /// The board should be shown upside down.
    Flipped,
    /// The board should be shown upright again.
    Unflipped,
}

impl OrientationChange {
    /// Flip state after this change.
    pub fn is_flipped(self) -> bool {
        self == OrientationChange::Flipped
    }
}

/// Tilt observer holding the flip flag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrientationController {
    flipped: bool,
    thresholds: TiltThresholds,
}

impl OrientationController {
    /// Creates an upright controller with the default band.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an upright controller with a custom band.
    pub fn with_thresholds(thresholds: TiltThresholds) -> Self {
        Self {
            flipped: false,
            thresholds,
        }
    }

    /// Current flip flag.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Band in use.
    pub fn thresholds(&self) -> &TiltThresholds {
        &self.thresholds
    }

    /// Feeds one tilt sample; returns the change it caused, if any.
    ///
    /// Samples inside the band never toggle. Non-finite samples fail both
    /// comparisons and are ignored.
    #[instrument(skip(self), fields(flipped = self.flipped))]
    pub fn submit(&mut self, degrees: f64) -> Option<OrientationChange> {
        let change = if !self.flipped && degrees > self.thresholds.flip_above {
            Some(OrientationChange::Flipped)
        } else if self.flipped && degrees < self.thresholds.unflip_below {
            Some(OrientationChange::Unflipped)
        } else {
            None
        };

        match change {
            Some(change) => {
                self.flipped = change.is_flipped();
                info!(?change, degrees, "Orientation toggled");
            }
            None => debug!(degrees, "Tilt inside hysteresis band"),
        }
        change
    }
}
