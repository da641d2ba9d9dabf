//! Dashboard view: one uptime bar per monitor.
//!
//! Each monitor takes three rows: its name with the 24-hour aggregate, the
//! bar itself, and a line underneath for the hover cursor or time axis.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, BarLayout};
use crate::data::buckets::to_precision;
use crate::ui::bar::{strip_hidden, visible_ticks, UptimeBar, TICK_PITCH};

const ROW_HEIGHT: u16 = 3;

/// Render the monitor list and record where each bar was drawn.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(format!(" Monitors ({}) ", app.rows.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.rows.is_empty() {
        let message = if app.state.is_some() {
            "  No monitors to show"
        } else {
            "  Waiting for incident state..."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().add_modifier(Modifier::DIM))),
            inner,
        );
        app.bar_layouts.clear();
        return;
    }

    let per_page = (inner.height / ROW_HEIGHT).max(1) as usize;
    let offset = app.selected.saturating_sub(per_page - 1);
    let hide_strip = strip_hidden(inner.width);

    let mut layouts = Vec::new();
    for (slot, index) in (offset..app.rows.len()).take(per_page).enumerate() {
        let y = inner.y + slot as u16 * ROW_HEIGHT;
        if y >= inner.bottom() {
            break;
        }
        let row_area = Rect::new(inner.x, y, inner.width, ROW_HEIGHT.min(inner.bottom() - y));
        if let Some(layout) = render_row(frame, app, index, row_area, hide_strip) {
            layouts.push(layout);
        }
    }

    app.bar_layouts = layouts;
}

fn render_row(
    frame: &mut Frame,
    app: &App,
    index: usize,
    area: Rect,
    hide_strip: bool,
) -> Option<BarLayout> {
    let row = &app.rows[index];
    let is_selected = index == app.selected;

    // ----- Name line -----
    let name_area = Rect::new(area.x, area.y, area.width, 1);
    let name_style = if is_selected {
        app.theme.selected
    } else {
        Style::default()
    };
    let cols = Layout::horizontal([Constraint::Min(0), Constraint::Length(16)]).split(name_area);

    let mut name_spans = vec![
        Span::raw(if is_selected { "▶ " } else { "  " }),
        Span::styled("● ", app.theme.status_style(row.down)),
        Span::styled(row.target.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
    ];
    if row.missing {
        name_spans.push(Span::styled("  (no history)", app.theme.muted));
    }
    frame.render_widget(Paragraph::new(Line::from(name_spans)).style(name_style), cols[0]);

    let aggregate = match row.uptime_24h() {
        Some(p) => format!("{}% (24h) ", to_precision(p, 4)),
        None => "No Data ".to_string(),
    };
    frame.render_widget(
        Paragraph::new(aggregate).alignment(Alignment::Right).style(name_style),
        cols[1],
    );

    if hide_strip || area.height < 2 {
        return None;
    }

    // ----- Bar -----
    let strip_width = area.width.saturating_sub(2).min(row.buckets.len() as u16 * TICK_PITCH);
    let bar_area = Rect::new(area.x + 2, area.y + 1, strip_width, area.height - 1);

    let hovered = app.hover.filter(|h| h.monitor == index).map(|h| h.bucket);
    let bar = UptimeBar::new(&row.buckets, app.colors.as_ref())
        .highlight(hovered)
        .cursor_style(Style::default().fg(app.theme.highlight));
    let first_bucket = bar.first_visible(bar_area.width);
    let visible = visible_ticks(bar_area.width).min(row.buckets.len());

    if hovered.is_none() && bar_area.height > 1 {
        render_axis(frame, app, index, first_bucket, bar_area);
    }
    frame.render_widget(bar, bar_area);

    Some(BarLayout {
        monitor: index,
        area: Rect::new(bar_area.x, bar_area.y, bar_area.width, 1),
        first_bucket,
        visible,
    })
}

/// Oldest visible hour on the left, "now" on the right.
fn render_axis(frame: &mut Frame, app: &App, index: usize, first_bucket: usize, bar_area: Rect) {
    let Some(first) = app.rows[index].buckets.get(first_bucket) else {
        return;
    };
    let axis_area = Rect::new(bar_area.x, bar_area.y + 1, bar_area.width, 1);
    let cols = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(axis_area);

    frame.render_widget(Paragraph::new(first.hour_label.as_str()).style(app.theme.muted), cols[0]);
    frame.render_widget(
        Paragraph::new("now").alignment(Alignment::Right).style(app.theme.muted),
        cols[1],
    );
}
