use std::rc::Rc;

use gpui::prelude::*;
use gpui::{MouseButton, div, px, rgb};

use crate::ui::controller::Controller;

/// Callback invoked with the index of the chosen option.
pub type OnPick = Rc<dyn Fn(&mut Controller, usize, &mut gpui::Context<Controller>)>;

/// Which dropdown in the control window is expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownId {
    FontSize,
    Corner,
    Monitor,
}

/// An option menu: a button showing the current value that expands into a
/// list of choices below it. Only one dropdown is open at a time; the
/// controller tracks which.
pub fn dropdown(
    id: DropdownId,
    current: &str,
    options: &[String],
    open: bool,
    width: f32,
    on_pick: OnPick,
    cx: &mut gpui::Context<Controller>,
) -> impl IntoElement + use<> {
    let header = div()
        .flex()
        .items_center()
        .justify_between()
        .w(px(width))
        .h(px(32.0))
        .px_2()
        .rounded(px(4.0))
        .bg(rgb(0xe8e8e8))
        .border_1()
        .border_color(if open { rgb(0x2f6fde) } else { rgb(0x999999) })
        .text_color(rgb(0x111111))
        .cursor_pointer()
        .on_mouse_down(
            MouseButton::Left,
            cx.listener(move |this, _, _window, cx| {
                this.toggle_dropdown(id);
                cx.notify();
            }),
        )
        .child(current.to_string())
        .child(div().text_sm().child(if open { "▲" } else { "▼" }));

    let mut column = div().flex().flex_col().gap_1().child(header);

    if open {
        let mut list = div()
            .flex()
            .flex_col()
            .w(px(width))
            .rounded(px(4.0))
            .bg(rgb(0xffffff))
            .border_1()
            .border_color(rgb(0x999999));

        for (i, option) in options.iter().enumerate() {
            let is_current = option == current;
            let on_pick = on_pick.clone();
            list = list.child(
                div()
                    .px_2()
                    .py_1()
                    .bg(if is_current { rgb(0xd6e4ff) } else { rgb(0xffffff) })
                    .text_color(rgb(0x111111))
                    .cursor_pointer()
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |this, _, _window, cx| {
                            this.close_dropdowns();
                            on_pick(this, i, cx);
                            cx.notify();
                        }),
                    )
                    .child(option.clone()),
            );
        }

        column = column.child(list);
    }

    column
}
