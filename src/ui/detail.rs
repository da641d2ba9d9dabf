//! Incident detail modal.
//!
//! Displays every incident phase that touched the clicked hour, one per
//! line, on top of the dashboard.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Minimum width required for the modal to render properly.
const MIN_OVERLAY_WIDTH: u16 = 30;
/// Minimum height required for the modal to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 6;
/// Preferred width, roughly a 40em dialog.
const MAX_OVERLAY_WIDTH: u16 = 80;

/// Render the incident modal if one is open.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref modal) = app.modal else {
        return;
    };

    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let overlay_width = (area.width * 90 / 100).clamp(MIN_OVERLAY_WIDTH, MAX_OVERLAY_WIDTH);
    // Body lines + borders + footer
    let wanted_height = modal.body.len() as u16 + 4;
    let max_height = (area.height * 90 / 100).max(MIN_OVERLAY_HEIGHT);
    let overlay_height = wanted_height.clamp(MIN_OVERLAY_HEIGHT, max_height);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height.min(area.height));

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(format!(" {} ", modal.title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.down));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let body: Vec<Line> = modal.body.iter().map(|reason| Line::from(format!(" {}", reason))).collect();
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), chunks[0]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[1]);
}
