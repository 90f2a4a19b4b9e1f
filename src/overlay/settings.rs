use std::fmt;
use std::time::Duration;

/// Font sizes offered in the control window, in points.
pub const FONT_SIZES: [u32; 17] = [
    12, 18, 24, 30, 36, 42, 48, 60, 72, 84, 96, 120, 144, 168, 192, 216, 240,
];

pub const DEFAULT_MESSAGE: &str = "Your message here...";
pub const DEFAULT_FONT_SIZE: u32 = 36;
pub const DEFAULT_PADDING: u32 = 40;
pub const DEFAULT_TIMER_SECONDS: u64 = 60;

/// Where on the monitor the overlay is anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Corner {
    #[default]
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
    Center,
}

impl Corner {
    pub const ALL: [Corner; 5] = [
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopLeft,
        Corner::TopRight,
        Corner::Center,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Corner::BottomLeft => "Bottom Left",
            Corner::BottomRight => "Bottom Right",
            Corner::TopLeft => "Top Left",
            Corner::TopRight => "Top Right",
            Corner::Center => "Center",
        }
    }

    /// Parse a dropdown label. Anything unrecognised anchors bottom-left.
    pub fn from_label(label: &str) -> Self {
        Corner::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .unwrap_or_default()
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the user can change about the overlay.
///
/// Numeric values are kept as the raw text the user typed; the accessors parse
/// them on use and fall back to the defaults when the text is not a usable
/// integer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlaySettings {
    pub message: String,
    pub font_size: String,
    pub padding: String,
    pub corner: Corner,
    pub timer_enabled: bool,
    pub timer_seconds: String,
    /// Dropdown label of the chosen monitor.
    pub monitor: String,
}

impl OverlaySettings {
    pub fn new(monitor: String) -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            padding: DEFAULT_PADDING.to_string(),
            corner: Corner::default(),
            timer_enabled: true,
            timer_seconds: DEFAULT_TIMER_SECONDS.to_string(),
            monitor,
        }
    }

    /// Font size in points. Zero is not a font size.
    pub fn font_points(&self) -> u32 {
        parse_positive(&self.font_size).unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Padding in pixels around the text, on every side.
    pub fn padding_px(&self) -> u32 {
        self.padding.trim().parse().unwrap_or(DEFAULT_PADDING)
    }

    /// Delay before the overlay hides itself, if auto-hide applies.
    ///
    /// `None` when the timer is disabled or its value is not a positive
    /// integer; an unusable timer never hides the overlay.
    pub fn auto_hide_delay(&self) -> Option<Duration> {
        if !self.timer_enabled {
            return None;
        }
        parse_positive::<u64>(&self.timer_seconds).map(Duration::from_secs)
    }
}

fn parse_positive<T>(text: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    text.trim()
        .parse::<T>()
        .ok()
        .filter(|v| *v > T::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> OverlaySettings {
        OverlaySettings::new("Monitor 1 (1920x1080)".into())
    }

    #[test]
    fn defaults_match_the_control_window() {
        let s = settings();
        assert_eq!(s.message, DEFAULT_MESSAGE);
        assert_eq!(s.font_points(), 36);
        assert_eq!(s.padding_px(), 40);
        assert_eq!(s.corner, Corner::BottomLeft);
        assert_eq!(s.auto_hide_delay(), Some(Duration::from_secs(60)));
        assert!(FONT_SIZES.contains(&DEFAULT_FONT_SIZE));
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let mut s = settings();
        s.font_size = "huge".into();
        s.padding = "4o".into();
        assert_eq!(s.font_points(), DEFAULT_FONT_SIZE);
        assert_eq!(s.padding_px(), DEFAULT_PADDING);

        s.font_size = "0".into();
        s.padding = "-5".into();
        assert_eq!(s.font_points(), DEFAULT_FONT_SIZE);
        assert_eq!(s.padding_px(), DEFAULT_PADDING);
    }

    #[test]
    fn numbers_tolerate_surrounding_whitespace() {
        let mut s = settings();
        s.font_size = " 72 ".into();
        s.padding = "0".into();
        assert_eq!(s.font_points(), 72);
        assert_eq!(s.padding_px(), 0);
    }

    #[test]
    fn auto_hide_needs_enabled_positive_timer() {
        let mut s = settings();
        s.timer_seconds = "5".into();
        assert_eq!(s.auto_hide_delay(), Some(Duration::from_secs(5)));

        s.timer_seconds = "0".into();
        assert_eq!(s.auto_hide_delay(), None);

        s.timer_seconds = "soon".into();
        assert_eq!(s.auto_hide_delay(), None);

        s.timer_seconds = "5".into();
        s.timer_enabled = false;
        assert_eq!(s.auto_hide_delay(), None);
    }

    #[test]
    fn corner_labels_round_trip_and_default() {
        for corner in Corner::ALL {
            assert_eq!(Corner::from_label(corner.label()), corner);
        }
        assert_eq!(Corner::from_label("Middle Earth"), Corner::BottomLeft);
    }
}
