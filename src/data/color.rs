//! Uptime color policy.
//!
//! The bar does not decide what a given uptime looks like; it asks a
//! [`ColorScale`]. [`DefaultColorScale`] is the stock status-page palette.

use std::fmt::Debug;

use ratatui::style::Color;

/// Maps an uptime percentage to a tick color.
///
/// `uptime` is `None` when the hour has no monitored time. `degraded`
/// selects the darker rendering mode; the uptime bar always passes `false`.
pub trait ColorScale: Send + Debug {
    fn color(&self, uptime: Option<f64>, degraded: bool) -> Color;
}

/// Green above 99.9%, light green above 99%, amber above 95%, red below.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultColorScale;

impl ColorScale for DefaultColorScale {
    fn color(&self, uptime: Option<f64>, degraded: bool) -> Color {
        let Some(percent) = uptime.filter(|p| p.is_finite()) else {
            return Color::Rgb(0xcc, 0xcc, 0xcc);
        };

        let (normal, darker) = if percent >= 99.9 {
            ((0x3b, 0xd6, 0x71), (0x05, 0x96, 0x69))
        } else if percent >= 99.0 {
            ((0x9d, 0xea, 0xb8), (0x3b, 0xd6, 0x71))
        } else if percent >= 95.0 {
            ((0xf2, 0x90, 0x30), (0xd9, 0x77, 0x06))
        } else {
            ((0xdf, 0x48, 0x4a), (0xdc, 0x26, 0x26))
        };

        let (r, g, b) = if degraded { darker } else { normal };
        Color::Rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_is_gray() {
        let scale = DefaultColorScale;
        assert_eq!(scale.color(None, false), Color::Rgb(0xcc, 0xcc, 0xcc));
        assert_eq!(scale.color(Some(f64::NAN), true), Color::Rgb(0xcc, 0xcc, 0xcc));
    }

    #[test]
    fn thresholds() {
        let scale = DefaultColorScale;
        assert_eq!(scale.color(Some(100.0), false), Color::Rgb(0x3b, 0xd6, 0x71));
        assert_eq!(scale.color(Some(99.5), false), Color::Rgb(0x9d, 0xea, 0xb8));
        assert_eq!(scale.color(Some(96.0), false), Color::Rgb(0xf2, 0x90, 0x30));
        assert_eq!(scale.color(Some(75.0), false), Color::Rgb(0xdf, 0x48, 0x4a));
    }

    #[test]
    fn degraded_uses_darker_shades() {
        let scale = DefaultColorScale;
        assert_ne!(scale.color(Some(100.0), true), scale.color(Some(100.0), false));
        assert_eq!(scale.color(Some(0.0), true), Color::Rgb(0xdc, 0x26, 0x26));
    }
}
