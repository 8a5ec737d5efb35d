//! Stateless UI rendering for the sketch board.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Context, Line},
        Block, Borders, Paragraph,
    },
    Frame,
};
use sketchtoe_core::{BoardLayout, Glyph, Player, Point, Position, Square};

use super::app::App;

/// Renders title, board and status; returns the board's inner area so
/// mouse input can be mapped onto it.
pub fn draw(frame: &mut Frame, app: &App) -> Rect {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Sketch Tac Toe - draw your mark")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let board_area = draw_board(frame, chunks[1], app);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let restart = if app.game().game().is_active() { "" } else { " | r restart" };
    let help = Paragraph::new(format!(
        "drag with the mouse to draw | ↑/↓ tilt ({:+.0}°){} | q quit",
        app.tilt(),
        restart
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    board_area
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) -> Rect {
    // Terminal cells are roughly twice as tall as wide.
    let height = area.height;
    let width = height.saturating_mul(2).min(area.width);
    let board_rect = center_rect(area, width, height);

    let session = app.game();
    let layout = *session.layout();
    let size = layout.size();
    let flipped = session.is_flipped();
    let board = session.game().board().clone();
    let hint = session.capture().path().map(|p| (*p.position(), *p.player()));
    let ink: Vec<Point> = session
        .capture()
        .path()
        .map(|p| p.points().clone())
        .unwrap_or_default();

    let title = if flipped { "Board (flipped)" } else { "Board" };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(board_rect);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, size])
        .y_bounds([0.0, size])
        .paint(move |ctx| {
            let view = View { size, flipped };
            draw_grid(ctx, &view);
            for position in Position::ALL {
                if let Square::Occupied(player) = board.get(position) {
                    draw_glyph(ctx, &view, &layout, player, position, symbol_color(player));
                }
            }
            if let Some((position, player)) = hint {
                draw_glyph(ctx, &view, &layout, player, position, Color::DarkGray);
            }
            for w in ink.windows(2) {
                view.line(ctx, w[0], w[1], Color::White);
            }
        });
    frame.render_widget(canvas, board_rect);

    inner
}

/// Converts surface coordinates (y down) to canvas coordinates (y up).
struct View {
    size: f64,
    flipped: bool,
}

impl View {
    fn y(&self, y: f64) -> f64 {
        if self.flipped { y } else { self.size - y }
    }

    fn line(&self, ctx: &mut Context<'_>, from: Point, to: Point, color: Color) {
        ctx.draw(&Line::new(from.x, self.y(from.y), to.x, self.y(to.y), color));
    }
}

fn draw_grid(ctx: &mut Context<'_>, view: &View) {
    let third = view.size / 3.0;
    for i in 1..3 {
        let at = third * i as f64;
        view.line(ctx, Point::new(at, 0.0), Point::new(at, view.size), Color::Gray);
        view.line(ctx, Point::new(0.0, at), Point::new(view.size, at), Color::Gray);
    }
}

fn draw_glyph(
    ctx: &mut Context<'_>,
    view: &View,
    layout: &BoardLayout,
    player: Player,
    position: Position,
    color: Color,
) {
    match layout.glyph(player, position) {
        Glyph::Circle { center, radius } => ctx.draw(&Circle {
            x: center.x,
            y: view.y(center.y),
            radius,
            color,
        }),
        Glyph::Cross { strokes } => {
            for (from, to) in strokes {
                view.line(ctx, from, to, color);
            }
        }
    }
}

fn symbol_color(player: Player) -> Color {
    match player {
        Player::O => Color::Red,
        Player::X => Color::Green,
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
