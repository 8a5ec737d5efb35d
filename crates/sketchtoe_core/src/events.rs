//! Outbound notifications for the presentation layer.
//!
//! Every event carries enough data to be rendered without re-deriving game
//! logic, and its `Display` form is the player-facing status text.

use super::classifier::RejectReason;
use super::{GameStatus, Player, Position};
use serde::{Deserialize, Serialize};

/// Status as shown to players: whose turn it is, or how the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "player", rename_all = "snake_case")]
pub enum StatusReport {
    /// Game active; this player is to draw.
    Turn(Player),
    /// Game won by this player.
    Won(Player),
    /// Board full without a line.
    Draw,
}

impl StatusReport {
    /// Builds the report for a game status and its player to move.
    pub fn from_status(status: GameStatus, current_player: Player) -> Self {
        match status {
            GameStatus::Active => StatusReport::Turn(current_player),
            GameStatus::Won(player) => StatusReport::Won(player),
            GameStatus::Draw => StatusReport::Draw,
        }
    }
}

/// Notification emitted by [`crate::SketchGame`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A capture opened; the adapter may show a hint of the expected symbol.
    GestureStarted {
        /// Cell being drawn in.
        position: Position,
        /// Player drawing.
        player: Player,
    },
    /// A drawn symbol was accepted and written to the board.
    Placement {
        /// Cell receiving the symbol.
        position: Position,
        /// Symbol placed.
        symbol: Player,
    },
    /// Turn advanced or the game ended.
    StatusChanged {
        /// New status.
        status: StatusReport,
    },
    /// The drawing was not recognised; the same player may try again.
    GestureRejected {
        /// Classifier verdict.
        reason: RejectReason,
        /// Player who drew it (still to move).
        player: Player,
    },
    /// The presentation flip toggled.
    OrientationToggled {
        /// New flip state.
        flipped: bool,
        /// Player to move, for the status text.
        current_player: Player,
    },
    /// The board was cleared for a new game.
    Reset,
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::GestureStarted { player, .. } => {
                write!(f, "{}'s turn! Draw with your finger.", player)
            }
            GameEvent::Placement { position, symbol } => {
                write!(f, "{} placed in {}.", symbol, position)
            }
            GameEvent::StatusChanged { status } => match status {
                StatusReport::Turn(player) => {
                    write!(f, "Next up: {}! Draw with your finger.", player)
                }
                StatusReport::Won(player) => write!(f, "{} wins!", player),
                StatusReport::Draw => write!(f, "It's a draw!"),
            },
            GameEvent::GestureRejected { reason, player } if reason.is_too_short() => write!(
                f,
                "You lifted your finger! Start over. Still {}'s turn.",
                player
            ),
            GameEvent::GestureRejected { player, .. } => write!(
                f,
                "Gesture not recognised! Draw it again without lifting. Still {}'s turn.",
                player
            ),
            GameEvent::OrientationToggled {
                flipped: true,
                current_player,
            } => write!(f, "Board flipped! {} to play.", current_player),
            GameEvent::OrientationToggled {
                flipped: false,
                current_player,
            } => write!(f, "Board restored. {} to play.", current_player),
            GameEvent::Reset => write!(f, "Game start! O to play. Draw with your finger."),
        }
    }
}

/// Receiver of [`GameEvent`]s.
pub trait GameObserver {
    /// Called once per event, in emission order.
    fn notify(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Observer that records every event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Most recent event.
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }
}

impl GameObserver for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
