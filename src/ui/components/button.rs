use gpui::prelude::*;
use gpui::{FontWeight, MouseButton, Rgba, div, px};

/// A filled push button.
pub fn button(
    label: &str,
    background: Rgba,
    bold: bool,
    on_click: impl Fn(&gpui::MouseDownEvent, &mut gpui::Window, &mut gpui::App) + 'static,
) -> impl IntoElement {
    div()
        .flex()
        .items_center()
        .justify_center()
        .min_w(px(160.0))
        .px_4()
        .py_2()
        .rounded(px(6.0))
        .bg(background)
        .text_color(gpui::rgb(0x000000))
        .font_weight(if bold {
            FontWeight::BOLD
        } else {
            FontWeight::NORMAL
        })
        .cursor_pointer()
        .on_mouse_down(MouseButton::Left, on_click)
        .child(label.to_string())
}
