//! Common UI components shared across the dashboard.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_elapsed;

/// Render the header bar with the overall status.
///
/// Displays: status indicator, title, up/down monitor counts, state age.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(
        format!("{} ", app.title.to_uppercase()),
        Style::default().add_modifier(Modifier::BOLD),
    );

    if app.state.is_none() {
        let line = Line::from(vec![Span::raw(" "), title, Span::raw("│ Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let total = app.rows.len();
    let down = app.down_count();
    let up = total - down;

    let mut spans = vec![
        Span::styled(" ● ", app.theme.status_style(down > 0)),
        title,
        Span::raw("│ "),
        Span::styled(format!("{}", up), Style::default().fg(app.theme.up)),
        Span::raw(" up "),
        if down > 0 {
            Span::styled(format!("{}", down), app.theme.status_style(true))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" down │ "),
        Span::styled(format!("{}", total), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" monitors"),
    ];

    if let Some(age) = state_age(app) {
        spans.push(Span::raw(format!(" │ checked {} ago", format_elapsed(age))));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Seconds since the poller last wrote the state.
fn state_age(app: &App) -> Option<u64> {
    let last_update = app.state.as_ref()?.last_update?;
    Some((app.now - last_update).max(0).unsigned_abs())
}

/// Render the status bar at the bottom.
///
/// Shows: data source, load errors, available controls. Temporary status
/// messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else if app.state.is_some() {
        let controls = if app.modal.is_some() {
            "Esc:close"
        } else {
            "↑↓:monitor ←→:hour Enter:detail ?:help q:quit"
        };
        format!(" {} | {}", app.source_description(), controls)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard and mouse controls.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Controls", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ↑/↓ j/k     Select monitor"),
        Line::from("  ←/→ h/l     Move across hours"),
        Line::from("  PgUp/PgDn   Jump 10 monitors"),
        Line::from("  Home/End    First/last monitor"),
        Line::from("  Enter       Incident detail"),
        Line::from("  Esc         Close detail / clear"),
        Line::from(""),
        section(" Mouse"),
        Line::from("  Hover       Hour tooltip"),
        Line::from("  Click       Incident detail"),
        Line::from("  Right-click Close detail"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Reload state"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 23u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
