use anyhow::Result;

use crate::overlay::layout::{Extent, Frame};

/// What the overlay window draws: the text and how big it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayContent {
    pub text: String,
    /// Font size in points.
    pub font_points: u32,
    /// Padding in pixels between the text and the window edge.
    pub padding: u32,
}

/// A fully resolved overlay: content plus where to put it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayPlan {
    pub content: OverlayContent,
    pub frame: Frame,
}

/// A platform window that can display the overlay.
///
/// Implementations create their native window lazily on the first `apply`
/// and log when they do. Whether that window then lives for the whole run is
/// up to the backend.
pub trait OverlaySurface {
    /// Natural size of the rendered text, without padding.
    fn measure(&mut self, content: &OverlayContent, cx: &mut gpui::App) -> Extent;

    /// Move, resize and repaint the overlay to match `plan`.
    fn apply(&mut self, plan: &OverlayPlan, cx: &mut gpui::App) -> Result<()>;

    /// Show or hide the overlay window.
    fn set_visible(&mut self, visible: bool, cx: &mut gpui::App) -> Result<()>;
}
