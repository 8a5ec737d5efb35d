//! The sketch game: gesture capture, classification and placement wired
//! together behind the inbound calls a presentation layer drives.
//!
//! Data flows pointer samples → [`GestureCapture`] → [`Classifier`] →
//! [`Game`], with every visible change reported to a [`GameObserver`].
//! Tilt samples go straight to the [`OrientationController`], which only
//! produces presentation events.

use super::action::{PlacementError, PlacementOutcome};
use super::capture::{CaptureError, GestureCapture, GesturePath};
use super::classifier::{Classifier, ClassifierThresholds, RejectReason};
use super::events::{GameEvent, GameObserver, StatusReport};
use super::game::Game;
use super::geometry::Point;
use super::layout::BoardLayout;
use super::orientation::{OrientationController, TiltThresholds};
use super::Position;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// What became of a finished (or cancelled) gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum GestureOutcome {
    /// Recognised and placed.
    Placed(PlacementOutcome),
    /// Not recognised; board and turn unchanged.
    Rejected(RejectReason),
    /// Recognised, but the state machine refused the placement.
    #[serde(skip)]
    Refused(PlacementError),
}

/// A full game session driven by pointer and tilt input.
#[derive(Debug)]
pub struct SketchGame<O: GameObserver> {
    game: Game,
    capture: GestureCapture,
    orientation: OrientationController,
    layout: BoardLayout,
    classifier: Classifier,
    observer: O,
}

impl<O: GameObserver> SketchGame<O> {
    /// Creates a session with the default layout and thresholds.
    pub fn new(observer: O) -> Self {
        Self::with_settings(
            observer,
            BoardLayout::default(),
            ClassifierThresholds::default(),
            TiltThresholds::default(),
        )
    }

    /// Creates a session with explicit settings.
    ///
    /// The classifier's cell edge is always taken from `layout`.
    pub fn with_settings(
        observer: O,
        layout: BoardLayout,
        thresholds: ClassifierThresholds,
        tilt: TiltThresholds,
    ) -> Self {
        Self {
            game: Game::new(),
            capture: GestureCapture::new(),
            orientation: OrientationController::with_thresholds(tilt),
            classifier: Classifier::with_thresholds(layout.cell_dim(), thresholds),
            layout,
            observer,
        }
    }

    /// Game state (read-only).
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Capture state (read-only), for drawing live ink.
    pub fn capture(&self) -> &GestureCapture {
        &self.capture
    }

    /// Current presentation flip.
    pub fn is_flipped(&self) -> bool {
        self.orientation.is_flipped()
    }

    /// Surface layout.
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Classifier in use.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Status as shown to players.
    pub fn status_report(&self) -> StatusReport {
        StatusReport::from_status(*self.game.status(), self.game.current_player())
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably (e.g. to drain a log).
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Begins a gesture in `position` seeded with `point`.
    ///
    /// Rejections are returned to the caller and leave all state unchanged.
    #[instrument(skip(self))]
    pub fn start_gesture(&mut self, position: Position, point: Point) -> Result<(), CaptureError> {
        if let Err(e) = self.capture.start(&self.game, position, point) {
            debug!(error = %e, "Gesture start refused");
            return Err(e);
        }
        self.emit(GameEvent::GestureStarted {
            position,
            player: self.game.current_player(),
        });
        Ok(())
    }

    /// Begins a gesture in whichever cell lies under `point`.
    ///
    /// Returns `None` when the point is off the board.
    pub fn start_gesture_at(&mut self, point: Point) -> Option<Result<Position, CaptureError>> {
        let position = self.layout.cell_at(point)?;
        Some(self.start_gesture(position, point).map(|()| position))
    }

    /// Adds a sample to the open gesture; ignored when idle.
    pub fn extend_gesture(&mut self, point: Point) {
        self.capture.extend(point);
    }

    /// Ends the open gesture and acts on its classification.
    ///
    /// Returns `None` when no gesture was open.
    #[instrument(skip(self))]
    pub fn finish_gesture(&mut self) -> Option<GestureOutcome> {
        let path = self.capture.finish()?;
        Some(self.resolve(path))
    }

    /// Aborts the open gesture through the same path as
    /// [`finish_gesture`](Self::finish_gesture).
    pub fn cancel_gesture(&mut self) -> Option<GestureOutcome> {
        debug!("Gesture cancelled");
        self.finish_gesture()
    }

    /// Feeds one tilt sample to the orientation controller.
    #[instrument(skip(self))]
    pub fn submit_tilt(&mut self, degrees: f64) -> Option<bool> {
        let change = self.orientation.submit(degrees)?;
        let flipped = change.is_flipped();
        self.emit(GameEvent::OrientationToggled {
            flipped,
            current_player: self.game.current_player(),
        });
        Some(flipped)
    }

    /// Starts a new game, discarding any open gesture.
    ///
    /// The presentation flip is left as it is.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        if self.capture.finish().is_some() {
            debug!("Discarded open gesture on reset");
        }
        self.game.reset();
        self.emit(GameEvent::Reset);
        self.emit(GameEvent::StatusChanged {
            status: self.status_report(),
        });
    }

    fn resolve(&mut self, path: GesturePath) -> GestureOutcome {
        let position = *path.position();
        let player = *path.player();

        if let Err(reason) = self.classifier.classify(&path) {
            info!(%position, %player, %reason, "Gesture rejected");
            self.emit(GameEvent::GestureRejected { reason, player });
            return GestureOutcome::Rejected(reason);
        }

        match self.game.place(position, player) {
            Ok(outcome) => {
                info!(%position, %player, ?outcome, "Symbol placed");
                self.emit(GameEvent::Placement {
                    position,
                    symbol: player,
                });
                self.emit(GameEvent::StatusChanged {
                    status: self.status_report(),
                });
                GestureOutcome::Placed(outcome)
            }
            Err(e) => {
                warn!(error = %e, %position, %player, "Recognised gesture could not be placed");
                GestureOutcome::Refused(e)
            }
        }
    }

    fn emit(&mut self, event: GameEvent) {
        debug!(?event, "Emitting event");
        self.observer.notify(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use crate::Player;

    fn circle(center: Point, radius: f64) -> Vec<Point> {
        (0..=24)
            .map(|i| {
                let a = i as f64 / 24.0 * std::f64::consts::TAU;
                Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
            })
            .collect()
    }

    fn draw(game: &mut SketchGame<EventLog>, points: &[Point]) -> Option<GestureOutcome> {
        game.start_gesture_at(points[0])?.ok()?;
        for p in &points[1..] {
            game.extend_gesture(*p);
        }
        game.finish_gesture()
    }

    #[test]
    fn test_circle_places_o() {
        let mut game = SketchGame::new(EventLog::new());
        let outcome = draw(&mut game, &circle(Point::new(150.0, 150.0), 30.0));
        assert_eq!(
            outcome,
            Some(GestureOutcome::Placed(PlacementOutcome::Continue { next: Player::X }))
        );
        assert_eq!(
            game.observer().events(),
            &[
                GameEvent::GestureStarted {
                    position: Position::Center,
                    player: Player::O
                },
                GameEvent::Placement {
                    position: Position::Center,
                    symbol: Player::O
                },
                GameEvent::StatusChanged {
                    status: StatusReport::Turn(Player::X)
                },
            ]
        );
    }

    #[test]
    fn test_finish_without_start() {
        let mut game = SketchGame::new(EventLog::new());
        assert_eq!(game.finish_gesture(), None);
        assert_eq!(game.cancel_gesture(), None);
        assert!(game.observer().events().is_empty());
    }

    #[test]
    fn test_reset_discards_open_gesture() {
        let mut game = SketchGame::new(EventLog::new());
        game.start_gesture(Position::Center, Point::new(150.0, 150.0)).unwrap();
        game.reset();
        assert!(!game.capture().is_capturing());
        assert_eq!(game.finish_gesture(), None);
    }

    #[test]
    fn test_start_off_board() {
        let mut game = SketchGame::new(EventLog::new());
        assert!(game.start_gesture_at(Point::new(400.0, 10.0)).is_none());
    }
}
