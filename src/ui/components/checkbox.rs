use gpui::prelude::*;
use gpui::{MouseButton, div, px, rgb};

/// A labelled checkbox. The whole row is clickable.
pub fn checkbox(
    checked: bool,
    label: &str,
    on_click: impl Fn(&bool, &mut gpui::Window, &mut gpui::App) + 'static,
) -> impl IntoElement {
    div()
        .flex()
        .items_center()
        .gap_2()
        .cursor_pointer()
        .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
            cx.stop_propagation();
            on_click(&checked, window, cx);
        })
        .child(
            div()
                .flex()
                .items_center()
                .justify_center()
                .w(px(20.0))
                .h(px(20.0))
                .rounded(px(3.0))
                .bg(if checked {
                    rgb(0x2f6fde)
                } else {
                    rgb(0xffffff)
                })
                .border_1()
                .border_color(if checked {
                    rgb(0x2f6fde)
                } else {
                    rgb(0x666666)
                })
                .child(
                    div()
                        .text_color(rgb(0xffffff))
                        .child(if checked { "✓" } else { "" }),
                ),
        )
        .child(div().text_color(rgb(0x111111)).child(label.to_string()))
}
