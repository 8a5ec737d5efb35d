//! Terminal input mapping: mouse cells to surface points, keys to tilt.

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use sketchtoe_core::Point;

/// Degrees added or removed per arrow key press.
pub const TILT_STEP: f64 = 10.0;

/// Simulated tilt range.
const TILT_RANGE: (f64, f64) = (-90.0, 180.0);

/// Maps a terminal cell inside `area` to drawing-surface coordinates.
///
/// The sample is taken at the centre of the terminal cell. While the board
/// is flipped it is drawn upside down, so the vertical axis is mirrored.
pub fn surface_point(area: Rect, column: u16, row: u16, size: f64, flipped: bool) -> Option<Point> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    if column < area.x || row < area.y {
        return None;
    }
    let dx = column - area.x;
    let dy = row - area.y;
    if dx >= area.width || dy >= area.height {
        return None;
    }

    let x = (f64::from(dx) + 0.5) * size / f64::from(area.width);
    let y = (f64::from(dy) + 0.5) * size / f64::from(area.height);
    let y = if flipped { size - y } else { y };
    Some(Point::new(x, y))
}

/// New simulated tilt after an arrow key, or `None` for other keys.
pub fn adjust_tilt(current: f64, key: KeyCode) -> Option<f64> {
    let next = match key {
        KeyCode::Up => current + TILT_STEP,
        KeyCode::Down => current - TILT_STEP,
        _ => return None,
    };
    Some(next.clamp(TILT_RANGE.0, TILT_RANGE.1))
}
