//! Application state and input handling.

use super::input::{adjust_tilt, surface_point};
use crate::config::AppConfig;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use sketchtoe_core::{EventLog, GameEvent, SketchGame};
use tracing::{debug, info};

/// Main application state.
pub struct App {
    game: SketchGame<EventLog>,
    status_message: String,
    tilt: f64,
    board_area: Rect,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            game: SketchGame::with_settings(
                EventLog::new(),
                config.layout(),
                *config.classifier(),
                *config.orientation(),
            ),
            status_message: GameEvent::Reset.to_string(),
            tilt: 0.0,
            board_area: Rect::default(),
            should_quit: false,
        }
    }

    /// Gets the game session.
    pub fn game(&self) -> &SketchGame<EventLog> {
        &self.game
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Simulated sensor tilt in degrees.
    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Records where the board was last drawn, for mouse hit testing.
    pub fn set_board_area(&mut self, area: Rect) {
        self.board_area = area;
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            // Restart is offered once the game is over.
            KeyCode::Char('r') if !self.game.game().is_active() => self.game.reset(),
            other => {
                if let Some(tilt) = adjust_tilt(self.tilt, other) {
                    self.tilt = tilt;
                    self.game.submit_tilt(tilt);
                }
            }
        }
        self.pump_events();
    }

    /// Handles a mouse event: left button down, drag and up draw a gesture.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let point = surface_point(
            self.board_area,
            event.column,
            event.row,
            self.game.layout().size(),
            self.game.is_flipped(),
        );

        match (event.kind, point) {
            (MouseEventKind::Down(MouseButton::Left), Some(point)) => {
                if let Some(Err(e)) = self.game.start_gesture_at(point) {
                    debug!(error = %e, "Pointer down ignored");
                }
            }
            (MouseEventKind::Drag(MouseButton::Left), Some(point)) => {
                self.game.extend_gesture(point);
            }
            (MouseEventKind::Drag(MouseButton::Left), None) => {
                self.game.cancel_gesture();
            }
            (MouseEventKind::Up(MouseButton::Left), _) => {
                self.game.finish_gesture();
            }
            _ => {}
        }
        self.pump_events();
    }

    /// Applies queued game events to the status line.
    fn pump_events(&mut self) {
        for event in self.game.observer_mut().drain() {
            debug!(?event, "Handling game event");
            self.status_message = event.to_string();
        }
    }
}
