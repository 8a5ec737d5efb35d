//! Scripted sessions.
//!
//! A script is a TOML list of input steps played through a [`SketchGame`].
//! Every emitted event is written as one JSON line, followed by a summary.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sketchtoe_core::{
    BoardLayout, EventLog, GameEvent, GestureOutcome, Glyph, Player, Point, Position, SketchGame,
    StatusReport,
};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Samples per quarter of a synthesised circle.
const CIRCLE_SAMPLES_PER_QUARTER: usize = 6;

/// Samples per synthesised straight segment.
const SEGMENT_SAMPLES: usize = 6;

/// One input step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Raw pointer samples; the first one picks the cell.
    Stroke {
        /// Samples in order.
        points: Vec<[f64; 2]>,
        /// End with a cancel instead of a pointer-up.
        #[serde(default)]
        cancel: bool,
    },
    /// A clean O drawn in `cell`.
    Circle {
        /// Cell index 0-8.
        cell: usize,
    },
    /// A clean X drawn in `cell` as one continuous stroke.
    Cross {
        /// Cell index 0-8.
        cell: usize,
    },
    /// Pointer down and straight up again in `cell`.
    Tap {
        /// Cell index 0-8.
        cell: usize,
    },
    /// A tilt sensor sample.
    Tilt {
        /// Tilt angle in degrees.
        degrees: f64,
    },
    /// Start a new game.
    Reset,
}

/// A whole script file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    /// Steps in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parses a script from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse replay script")
    }

    /// Loads a script from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read script {}", path.as_ref().display()))?;
        Self::from_toml(&content)
    }
}

/// Final state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Steps executed.
    pub steps: usize,
    /// Symbols placed.
    pub placements: usize,
    /// Gestures rejected by the classifier.
    pub rejections: usize,
    /// Final status.
    pub status: StatusReport,
    /// Final flip state.
    pub flipped: bool,
    /// Final board, row by row.
    pub board: String,
}

/// Plays `script` under `config`, writing events as JSON lines to `out`.
#[instrument(skip_all, fields(steps = script.steps.len()))]
pub fn run_script(script: &Script, config: &AppConfig, out: &mut impl Write) -> Result<ReplaySummary> {
    let mut game = SketchGame::with_settings(
        EventLog::new(),
        config.layout(),
        *config.classifier(),
        *config.orientation(),
    );
    let mut placements = 0;
    let mut rejections = 0;

    for (index, step) in script.steps.iter().enumerate() {
        debug!(index, ?step, "Running step");
        match run_step(&mut game, step) {
            Some(GestureOutcome::Placed(_)) => placements += 1,
            Some(GestureOutcome::Rejected(_)) => rejections += 1,
            Some(GestureOutcome::Refused(e)) => warn!(index, error = %e, "Placement refused"),
            None => {}
        }
        for event in game.observer_mut().drain() {
            write_event(out, &event)?;
        }
    }

    let summary = ReplaySummary {
        steps: script.steps.len(),
        placements,
        rejections,
        status: game.status_report(),
        flipped: game.is_flipped(),
        board: game.game().board().display(),
    };
    serde_json::to_writer(&mut *out, &summary).context("Failed to write summary")?;
    writeln!(out)?;
    info!(placements, rejections, status = ?summary.status, "Replay finished");
    Ok(summary)
}

/// Loads config and script from disk and replays to stdout.
pub fn run_replay_file(script_path: &Path, config: &AppConfig) -> Result<ReplaySummary> {
    let script = Script::from_file(script_path)?;
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    run_script(&script, config, &mut lock)
}

fn write_event(out: &mut impl Write, event: &GameEvent) -> Result<()> {
    #[derive(Serialize)]
    struct Line<'a> {
        #[serde(flatten)]
        event: &'a GameEvent,
        message: String,
    }

    let line = Line {
        event,
        message: event.to_string(),
    };
    serde_json::to_writer(&mut *out, &line).context("Failed to write event")?;
    writeln!(out)?;
    Ok(())
}

fn run_step(game: &mut SketchGame<EventLog>, step: &Step) -> Option<GestureOutcome> {
    match step {
        Step::Stroke { points, cancel } => {
            let points: Vec<Point> = points.iter().copied().map(Point::from).collect();
            play_stroke(game, &points, *cancel)
        }
        Step::Circle { cell } => {
            let position = cell_position(*cell)?;
            let points = circle_stroke(game.layout(), position);
            play_stroke(game, &points, false)
        }
        Step::Cross { cell } => {
            let position = cell_position(*cell)?;
            let points = cross_stroke(game.layout(), position);
            play_stroke(game, &points, false)
        }
        Step::Tap { cell } => {
            let position = cell_position(*cell)?;
            let center = game.layout().cell_center(position);
            play_stroke(game, &[center, center], false)
        }
        Step::Tilt { degrees } => {
            game.submit_tilt(*degrees);
            None
        }
        Step::Reset => {
            game.reset();
            None
        }
    }
}

fn cell_position(cell: usize) -> Option<Position> {
    let position = Position::from_index(cell);
    if position.is_none() {
        warn!(cell, "Script names a cell outside 0-8, skipping");
    }
    position
}

fn play_stroke(
    game: &mut SketchGame<EventLog>,
    points: &[Point],
    cancel: bool,
) -> Option<GestureOutcome> {
    let (first, rest) = points.split_first()?;
    match game.start_gesture_at(*first) {
        None => {
            warn!(x = first.x, y = first.y, "Stroke starts off the board, skipping");
            return None;
        }
        Some(Err(e)) => {
            info!(error = %e, "Stroke ignored");
            return None;
        }
        Some(Ok(_)) => {}
    }
    for point in rest {
        game.extend_gesture(*point);
    }
    if cancel {
        game.cancel_gesture()
    } else {
        game.finish_gesture()
    }
}

/// A closed loop tracing the O glyph, starting and ending at its top.
pub fn circle_stroke(layout: &BoardLayout, position: Position) -> Vec<Point> {
    let Glyph::Circle { center, radius } = layout.glyph(Player::O, position) else {
        return Vec::new();
    };
    let samples = CIRCLE_SAMPLES_PER_QUARTER * 4;
    (0..=samples)
        .map(|i| {
            let angle = i as f64 / samples as f64 * std::f64::consts::TAU;
            Point::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
        })
        .collect()
}

/// The X glyph as one pointer-down path: first diagonal, up the right
/// edge, then the second diagonal.
pub fn cross_stroke(layout: &BoardLayout, position: Position) -> Vec<Point> {
    let Glyph::Cross { strokes } = layout.glyph(Player::X, position) else {
        return Vec::new();
    };
    let [(a0, a1), (b0, b1)] = strokes;
    let mut points = segment(a0, a1);
    points.extend(segment(a1, b0).into_iter().skip(1));
    points.extend(segment(b0, b1).into_iter().skip(1));
    points
}

fn segment(from: Point, to: Point) -> Vec<Point> {
    (0..=SEGMENT_SAMPLES)
        .map(|i| {
            let t = i as f64 / SEGMENT_SAMPLES as f64;
            Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchtoe_core::classify;

    #[test]
    fn test_synthesised_strokes_are_recognised() {
        let layout = BoardLayout::default();
        for position in Position::ALL {
            let circle = circle_stroke(&layout, position);
            let cross = cross_stroke(&layout, position);
            assert_eq!(layout.cell_at(circle[0]), Some(position));
            assert_eq!(layout.cell_at(cross[0]), Some(position));
            assert_eq!(classify(&circle, Player::O, layout.cell_dim()), Ok(()));
            assert_eq!(classify(&cross, Player::X, layout.cell_dim()), Ok(()));
        }
    }

    #[test]
    fn test_parse_all_step_kinds() {
        let script = Script::from_toml(
            r#"
            [[steps]]
            kind = "stroke"
            points = [[10.0, 10.0], [20.0, 20.0]]

            [[steps]]
            kind = "stroke"
            points = [[10.0, 10.0]]
            cancel = true

            [[steps]]
            kind = "circle"
            cell = 4

            [[steps]]
            kind = "cross"
            cell = 0

            [[steps]]
            kind = "tap"
            cell = 8

            [[steps]]
            kind = "tilt"
            degrees = 70.0

            [[steps]]
            kind = "reset"
            "#,
        )
        .unwrap();
        assert_eq!(script.steps.len(), 7);
        assert_eq!(
            script.steps[1],
            Step::Stroke {
                points: vec![[10.0, 10.0]],
                cancel: true
            }
        );
        assert_eq!(script.steps[6], Step::Reset);
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        assert!(Script::from_toml("[[steps]]\nkind = \"erase\"").is_err());
    }

    #[test]
    fn test_invalid_cell_is_skipped() {
        let script = Script {
            steps: vec![Step::Circle { cell: 11 }],
        };
        let mut out = Vec::new();
        let summary = run_script(&script, &AppConfig::default(), &mut out).unwrap();
        assert_eq!(summary.placements, 0);
        assert_eq!(summary.status, StatusReport::Turn(Player::O));
    }
}
