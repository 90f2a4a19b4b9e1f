use anyhow::{Context as _, Result};
use gpui::prelude::*;
use gpui::{
    App, Bounds, Font, FontWeight, WindowBounds, WindowHandle, WindowKind, WindowOptions, div,
    font, point, px, rgb, size,
};

use crate::overlay::layout::{
    Extent, Frame, LOGICAL_DPI, approximate_text_extent, points_to_pixels,
};
use crate::overlay::surface::{OverlayContent, OverlayPlan, OverlaySurface};

/// Line box height relative to the font size, used both for measuring and
/// rendering so the two agree.
const LINE_HEIGHT_RATIO: f32 = 1.2;

fn overlay_font() -> Font {
    Font {
        weight: FontWeight::BOLD,
        ..font("Arial")
    }
}

/// Root view of the overlay popup: padded bold white text on black.
pub struct OverlayLabel {
    content: OverlayContent,
}

impl Render for OverlayLabel {
    fn render(
        &mut self,
        _window: &mut gpui::Window,
        _cx: &mut gpui::Context<Self>,
    ) -> impl IntoElement {
        let font_px = points_to_pixels(self.content.font_points, LOGICAL_DPI) as f32;
        let padding = px(self.content.padding as f32);

        div()
            .size_full()
            .bg(rgb(0x000000))
            .px(padding)
            .py(padding)
            .child(
                div()
                    .font_family("Arial")
                    .font_weight(FontWeight::BOLD)
                    .text_size(px(font_px))
                    .line_height(px(font_px * LINE_HEIGHT_RATIO))
                    .text_color(rgb(0xffffff))
                    .whitespace_nowrap()
                    .child(self.content.text.clone()),
            )
    }
}

/// Overlay rendered as a gpui pop-up window.
///
/// gpui cannot move an open window or hide it without closing it, so a frame
/// change reopens the popup and hiding removes it. Click-through is not
/// available here.
#[derive(Default)]
pub struct PopupOverlay {
    window: Option<WindowHandle<OverlayLabel>>,
    plan: Option<OverlayPlan>,
    visible: bool,
    warned_click_through: bool,
}

impl PopupOverlay {
    fn open(&mut self, plan: &OverlayPlan, cx: &mut App) -> Result<()> {
        let Frame { x, y, width, height } = plan.frame;
        let bounds = Bounds {
            origin: point(px(x as f32), px(y as f32)),
            size: size(px(width as f32), px(height as f32)),
        };
        let content = plan.content.clone();
        log::debug!("opening overlay popup {width}x{height} at ({x}, {y})");

        let handle = cx
            .open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    titlebar: None,
                    focus: false,
                    show: true,
                    kind: WindowKind::PopUp,
                    is_movable: false,
                    ..Default::default()
                },
                move |_, cx| cx.new(move |_| OverlayLabel { content }),
            )
            .context("opening overlay popup")?;

        if !self.warned_click_through {
            log::debug!("click-through is not supported for popup overlays on this platform");
            self.warned_click_through = true;
        }

        self.window = Some(handle);
        Ok(())
    }

    fn close(&mut self, cx: &mut App) {
        if let Some(handle) = self.window.take() {
            let _ = handle.update(cx, |_, window, _| window.remove_window());
        }
    }
}

impl OverlaySurface for PopupOverlay {
    fn measure(&mut self, content: &OverlayContent, cx: &mut App) -> Extent {
        let font_px = points_to_pixels(content.font_points, LOGICAL_DPI);
        let font_size = px(font_px as f32);
        let text_system = cx.text_system();
        let font_id = text_system.resolve_font(&overlay_font());

        let mut width = 0.0f32;
        for ch in content.text.chars() {
            match text_system.advance(font_id, font_size, ch) {
                Ok(advance) => width += f32::from(advance.width),
                Err(e) => {
                    log::debug!("text system could not measure {ch:?}: {e}");
                    return approximate_text_extent(&content.text, font_px);
                }
            }
        }

        let height = font_px as f32 * LINE_HEIGHT_RATIO;
        Extent::new(width.ceil() as i32, height.ceil() as i32)
    }

    fn apply(&mut self, plan: &OverlayPlan, cx: &mut App) -> Result<()> {
        let moved = self.plan.as_ref().map(|p| p.frame) != Some(plan.frame);
        self.plan = Some(plan.clone());

        if !self.visible {
            return Ok(());
        }

        if moved || self.window.is_none() {
            self.close(cx);
            return self.open(plan, cx);
        }

        if let Some(handle) = &self.window {
            let content = plan.content.clone();
            handle
                .update(cx, |label, _, cx| {
                    label.content = content;
                    cx.notify();
                })
                .context("updating overlay popup")?;
        }
        Ok(())
    }

    fn set_visible(&mut self, visible: bool, cx: &mut App) -> Result<()> {
        self.visible = visible;
        if !visible {
            self.close(cx);
            return Ok(());
        }

        match (self.window.is_some(), self.plan.clone()) {
            (false, Some(plan)) => self.open(&plan, cx),
            _ => Ok(()),
        }
    }
}
