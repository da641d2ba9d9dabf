//! The 24-hour uptime bar widget.
//!
//! Each hour is a one-cell tick followed by a one-cell gap. When the strip
//! does not fit, the oldest hours are dropped first so the most recent
//! ones stay visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::data::{ColorScale, HourBucket, HOURS};

/// Width of one tick plus its trailing gap, in cells.
pub const TICK_PITCH: u16 = 2;

/// Containers narrower than this hide the strip entirely.
pub const MIN_CONTAINER_WIDTH: u16 = 40;

const TICK_SYMBOL: &str = "█";
const CURSOR_SYMBOL: &str = "▲";

/// Number of ticks that fit in `width` cells, never fewer than one.
pub fn visible_ticks(width: u16) -> usize {
    let full = HOURS as u16 * TICK_PITCH;
    let dropped = (full.saturating_sub(width) / TICK_PITCH) as usize;
    HOURS.saturating_sub(dropped).max(1)
}

/// Whether a container of this width is too narrow to show the strip.
pub fn strip_hidden(container_width: u16) -> bool {
    container_width < MIN_CONTAINER_WIDTH
}

/// Renders one monitor's hourly buckets as colored ticks.
///
/// With a height of two or more rows, the highlighted tick gets a cursor
/// mark underneath it.
pub struct UptimeBar<'a> {
    buckets: &'a [HourBucket],
    colors: &'a dyn ColorScale,
    highlight: Option<usize>,
    cursor_style: Style,
}

impl<'a> UptimeBar<'a> {
    pub fn new(buckets: &'a [HourBucket], colors: &'a dyn ColorScale) -> Self {
        Self {
            buckets,
            colors,
            highlight: None,
            cursor_style: Style::default(),
        }
    }

    /// Mark a bucket (by index into `buckets`) as hovered.
    pub fn highlight(mut self, bucket: Option<usize>) -> Self {
        self.highlight = bucket;
        self
    }

    pub fn cursor_style(mut self, style: Style) -> Self {
        self.cursor_style = style;
        self
    }

    /// Index of the leftmost bucket drawn in a strip `width` cells wide.
    pub fn first_visible(&self, width: u16) -> usize {
        self.buckets.len().saturating_sub(visible_ticks(width))
    }
}

impl Widget for UptimeBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let first = self.first_visible(area.width);

        for (offset, (index, bucket)) in self.buckets.iter().enumerate().skip(first).enumerate() {
            let x = area.x + offset as u16 * TICK_PITCH;
            if x >= area.right() {
                break;
            }

            let color = self.colors.color(bucket.uptime(), false);
            let mut style = Style::default().fg(color);
            let highlighted = self.highlight == Some(index);
            if highlighted {
                style = style.add_modifier(Modifier::BOLD);
            }
            buf[(x, area.y)].set_symbol(TICK_SYMBOL).set_style(style);

            if highlighted && area.height > 1 {
                buf[(x, area.y + 1)].set_symbol(CURSOR_SYMBOL).set_style(self.cursor_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::buckets::hour_bucket;
    use crate::data::DefaultColorScale;
    use crate::source::Incident;
    use chrono::Utc;
    use ratatui::style::Color;

    fn buckets_with_outage_in_last_hour() -> Vec<HourBucket> {
        let now = 24 * 3600;
        let outage = Incident {
            start: vec![23 * 3600],
            error: vec!["down".to_string()],
            end: Some(23 * 3600 + 1800),
        };
        (0..24)
            .map(|i| hour_bucket(i * 3600, now, Some(3600), std::slice::from_ref(&outage), &Utc))
            .collect()
    }

    #[test]
    fn visible_tick_count() {
        assert_eq!(visible_ticks(0), 1);
        assert_eq!(visible_ticks(1), 1);
        assert_eq!(visible_ticks(10), 5);
        assert_eq!(visible_ticks(47), 24);
        assert_eq!(visible_ticks(48), 24);
        assert_eq!(visible_ticks(200), 24);
    }

    #[test]
    fn narrow_containers_hide_strip() {
        assert!(strip_hidden(39));
        assert!(!strip_hidden(40));
    }

    #[test]
    fn renders_all_ticks_when_wide() {
        let buckets = buckets_with_outage_in_last_hour();
        let area = Rect::new(0, 0, 48, 1);
        let mut buf = Buffer::empty(area);

        UptimeBar::new(&buckets, &DefaultColorScale).render(area, &mut buf);

        for x in (0..48u16).step_by(2) {
            assert_eq!(buf[(x, 0)].symbol(), TICK_SYMBOL);
        }
        for x in (1..48u16).step_by(2) {
            assert_eq!(buf[(x, 0)].symbol(), " ");
        }

        // First hour predates the monitor, the last one had an outage
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0xcc, 0xcc, 0xcc));
        assert_eq!(buf[(2, 0)].fg, Color::Rgb(0x3b, 0xd6, 0x71));
        assert_eq!(buf[(46, 0)].fg, Color::Rgb(0xdf, 0x48, 0x4a));
    }

    #[test]
    fn trims_oldest_ticks_first() {
        let buckets = buckets_with_outage_in_last_hour();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);

        let bar = UptimeBar::new(&buckets, &DefaultColorScale);
        assert_eq!(bar.first_visible(10), 19);
        bar.render(area, &mut buf);

        // Newest hour is the rightmost tick
        assert_eq!(buf[(8, 0)].fg, Color::Rgb(0xdf, 0x48, 0x4a));
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0x3b, 0xd6, 0x71));
    }

    #[test]
    fn highlighted_tick_gets_cursor() {
        let buckets = buckets_with_outage_in_last_hour();
        let area = Rect::new(0, 0, 48, 2);
        let mut buf = Buffer::empty(area);

        UptimeBar::new(&buckets, &DefaultColorScale).highlight(Some(23)).render(area, &mut buf);

        assert_eq!(buf[(46, 1)].symbol(), CURSOR_SYMBOL);
        assert_eq!(buf[(44, 1)].symbol(), " ");
        assert!(buf[(46, 0)].modifier.contains(Modifier::BOLD));
    }
}
