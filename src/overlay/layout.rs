//! Overlay sizing and placement.
//!
//! Pure arithmetic: the platform surfaces measure text, everything after that
//! happens here so it can be tested without a display.

use crate::monitor::MonitorInfo;
use crate::overlay::settings::Corner;

/// Gap between the overlay and the monitor edge for corner placements.
pub const EDGE_MARGIN: i32 = 20;

/// DPI assumed when the platform does not report one.
pub const LOGICAL_DPI: u32 = 96;

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Extent {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Final on-screen rectangle of the overlay window, in virtual-screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    /// True when the frame lies entirely inside the monitor.
    pub fn fits_within(&self, monitor: &MonitorInfo) -> bool {
        self.x >= monitor.x
            && self.y >= monitor.y
            && self.x + self.width <= monitor.x + monitor.width
            && self.y + self.height <= monitor.y + monitor.height
    }
}

/// Convert a font size in points to pixels at the given DPI.
pub fn points_to_pixels(points: u32, dpi: u32) -> i32 {
    ((points as u64 * dpi as u64 + 36) / 72) as i32
}

/// Rough single-line text size for when no text system is available.
pub fn approximate_text_extent(text: &str, font_px: i32) -> Extent {
    let chars = text.chars().count().max(1) as f32;
    let em = font_px.max(1) as f32;
    Extent::new((chars * em * 0.6).ceil() as i32, (em * 1.2).ceil() as i32)
}

/// Overlay window size: the label's natural size plus padding on every side.
pub fn overlay_extent(text: Extent, padding: u32) -> Extent {
    let pad = padding.min(i32::MAX as u32 / 4) as i32;
    Extent::new(
        text.width.max(0).saturating_add(pad * 2),
        text.height.max(0).saturating_add(pad * 2),
    )
}

/// Anchor `extent` at `corner` of `monitor` and clamp the result on-screen.
///
/// An overlay bigger than the monitor is shrunk to the monitor size, so the
/// returned frame always satisfies [`Frame::fits_within`].
pub fn place(extent: Extent, corner: Corner, monitor: &MonitorInfo) -> Frame {
    let width = extent.width.clamp(0, monitor.width.max(0));
    let height = extent.height.clamp(0, monitor.height.max(0));

    let left = monitor.x + EDGE_MARGIN;
    let right = monitor.x + monitor.width - width - EDGE_MARGIN;
    let top = monitor.y + EDGE_MARGIN;
    let bottom = monitor.y + monitor.height - height - EDGE_MARGIN;

    let (x, y) = match corner {
        Corner::BottomLeft => (left, bottom),
        Corner::BottomRight => (right, bottom),
        Corner::TopLeft => (left, top),
        Corner::TopRight => (right, top),
        Corner::Center => (
            monitor.x + (monitor.width - width) / 2,
            monitor.y + (monitor.height - height) / 2,
        ),
    };

    let frame = Frame {
        x: clamp_axis(x, width, monitor.x, monitor.width),
        y: clamp_axis(y, height, monitor.y, monitor.height),
        width,
        height,
    };
    debug_assert!(frame.fits_within(monitor), "{frame:?} escaped {monitor:?}");
    frame
}

fn clamp_axis(pos: i32, len: i32, origin: i32, span: i32) -> i32 {
    let max = origin + (span - len).max(0);
    pos.clamp(origin, max)
}
