//! Hover tooltip for a single tick.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, ElapsedFormatter};
use crate::data::HourBucket;

/// Tooltip text for a bucket.
///
/// Hours without monitored time only say "No Data". The downtime line is
/// shown only when the hour had any downtime.
pub fn tooltip_lines(bucket: &HourBucket, format_elapsed: ElapsedFormatter) -> Vec<String> {
    let Some(percent) = bucket.uptime_label() else {
        return vec!["No Data".to_string()];
    };

    let mut lines = vec![format!("{}% at {}", percent, bucket.hour_label)];
    if bucket.has_downtime() {
        lines.push(format!(
            "Down for {} (click for detail)",
            format_elapsed(bucket.down_secs.unsigned_abs())
        ));
    }
    lines
}

/// Render the tooltip for the hovered tick, just below it.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(tick) = app.hover else {
        return;
    };
    let Some((_, bucket)) = app.hovered() else {
        return;
    };
    let Some(layout) = app.layout_for(tick.monitor) else {
        return;
    };
    let Some(column) = layout.column_of(tick.bucket) else {
        return;
    };

    let lines = tooltip_lines(bucket, app.format_elapsed);
    let text_width = lines.iter().map(|l| Line::from(l.as_str()).width()).max().unwrap_or(0);

    let width = (text_width as u16 + 4).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);

    // Prefer below the cursor row, flip above when there is no room
    let below = layout.area.y + 2;
    let y = if below + height <= area.bottom() {
        below
    } else {
        layout.area.y.saturating_sub(height).max(area.y)
    };
    let x = column
        .saturating_sub(width / 2)
        .max(area.x)
        .min(area.right().saturating_sub(width));
    let tooltip_area = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let text: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                Line::styled(format!(" {}", l), Style::default().add_modifier(Modifier::BOLD))
            } else {
                Line::from(format!(" {}", l))
            }
        })
        .collect();

    frame.render_widget(Clear, tooltip_area);
    frame.render_widget(Paragraph::new(text).block(block), tooltip_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::buckets::hour_bucket;
    use crate::data::duration::format_elapsed;
    use crate::source::Incident;
    use chrono::Utc;

    fn outage(start: i64, end: i64) -> Incident {
        Incident {
            start: vec![start],
            error: vec!["timeout".to_string()],
            end: Some(end),
        }
    }

    #[test]
    fn no_data_only() {
        let bucket = hour_bucket(0, 7200, None, &[], &Utc);
        assert_eq!(tooltip_lines(&bucket, format_elapsed), vec!["No Data"]);
    }

    #[test]
    fn healthy_hour_has_no_downtime_line() {
        let bucket = hour_bucket(3600, 7200, Some(0), &[], &Utc);
        assert_eq!(tooltip_lines(&bucket, format_elapsed), vec!["100.0% at 01:00"]);
    }

    #[test]
    fn downtime_line_uses_formatter() {
        let bucket = hour_bucket(0, 7200, Some(0), &[outage(0, 900)], &Utc);
        assert_eq!(
            tooltip_lines(&bucket, format_elapsed),
            vec!["75.00% at 00:00", "Down for 15m (click for detail)"]
        );

        fn seconds(secs: u64) -> String {
            format!("{}s", secs)
        }
        assert_eq!(tooltip_lines(&bucket, seconds)[1], "Down for 900s (click for detail)");
    }
}
