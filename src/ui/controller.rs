use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use gpui::prelude::*;
use gpui::{Entity, FontWeight, Subscription, Task, div, px, rgb};
use gpui_component::input::{Input, InputEvent, InputState};

use crate::monitor::{MonitorInfo, monitor_labels, resolve_monitor};
use crate::overlay::settings::FONT_SIZES;
use crate::overlay::{
    AutoHide, Corner, OverlaySettings, OverlayState, OverlaySurface, PlatformOverlay, Toggle,
};
use crate::ui::components::{DropdownId, OnPick, button, checkbox, dropdown};

/// Time the overlay gets to lay out before it is repositioned and revealed.
const SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Text inputs in the control window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Message,
    Padding,
    TimerSeconds,
}

/// What a stored edit asks of a running overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reaction {
    None,
    Relayout,
    RearmTimer,
}

impl Field {
    /// Store an edited value in `settings`.
    fn store(self, settings: &mut OverlaySettings, value: &str) -> Reaction {
        let slot = match self {
            Field::Message => &mut settings.message,
            Field::Padding => &mut settings.padding,
            Field::TimerSeconds => &mut settings.timer_seconds,
        };
        if slot.as_str() == value {
            return Reaction::None;
        }
        value.clone_into(slot);

        match self {
            // The message is picked up on the next show.
            Field::Message => Reaction::None,
            Field::Padding => Reaction::Relayout,
            Field::TimerSeconds => Reaction::RearmTimer,
        }
    }
}

/// Central application controller.
///
/// Owns the overlay settings edited by the form, the overlay's lifecycle
/// state and platform surface, and the two deferred tasks: the settle delay
/// after a show and the auto-hide timer. Dropping a task cancels it.
pub struct Controller {
    /// Every connected monitor, in enumeration order.
    monitors: Vec<MonitorInfo>,
    /// Dropdown labels for `monitors`, same order.
    monitor_labels: Vec<String>,
    settings: OverlaySettings,
    overlay: OverlayState,
    surface: PlatformOverlay,
    open_dropdown: Option<DropdownId>,
    message_input: Entity<InputState>,
    padding_input: Entity<InputState>,
    timer_input: Entity<InputState>,
    settle_task: Option<Task<()>>,
    auto_hide_task: Option<Task<()>>,
    _subscriptions: Vec<Subscription>,
}

impl Controller {
    /// Create a controller for the given monitors. The first monitor starts
    /// selected.
    pub fn new(
        monitors: Vec<MonitorInfo>,
        window: &mut gpui::Window,
        cx: &mut gpui::Context<Self>,
    ) -> Self {
        let monitor_labels = monitor_labels(&monitors);
        let selected = monitor_labels.first().cloned().unwrap_or_default();
        let settings = OverlaySettings::new(selected);

        let message_input = text_input(&settings.message, window, cx);
        let padding_input = text_input(&settings.padding, window, cx);
        let timer_input = text_input(&settings.timer_seconds, window, cx);

        let _subscriptions = vec![
            watch(Field::Message, &message_input, window, cx),
            watch(Field::Padding, &padding_input, window, cx),
            watch(Field::TimerSeconds, &timer_input, window, cx),
        ];

        Self {
            monitors,
            monitor_labels,
            settings,
            overlay: OverlayState::default(),
            surface: PlatformOverlay::default(),
            open_dropdown: None,
            message_input,
            padding_input,
            timer_input,
            settle_task: None,
            auto_hide_task: None,
            _subscriptions,
        }
    }

    // ── Overlay lifecycle ────────────────────────────────────────────────

    pub fn toggle_overlay(&mut self, cx: &mut gpui::Context<Self>) {
        match self.overlay.next_toggle() {
            Toggle::Show => self.show_overlay(cx),
            Toggle::Hide => self.hide_overlay(cx),
        }
    }

    /// Show the overlay with the current message.
    ///
    /// The window is positioned while still hidden, then repositioned and
    /// revealed once the settle delay has passed. If the first layout fails
    /// the overlay stays hidden.
    pub fn show_overlay(&mut self, cx: &mut gpui::Context<Self>) {
        self.overlay.begin_show(&self.settings);
        if let Err(e) = self.relayout(cx) {
            log::error!("cannot show overlay: {e:#}");
            cx.notify();
            return;
        }

        let auto_hide = self.overlay.finish_show(&self.settings);
        log::info!("overlay shown on {}", self.settings.monitor);

        self.settle_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(SETTLE_DELAY).await;
            this.update(cx, |this, cx| this.reveal_overlay(cx)).ok();
        }));

        self.set_auto_hide(auto_hide, cx);
        cx.notify();
    }

    fn reveal_overlay(&mut self, cx: &mut gpui::Context<Self>) {
        if !self.overlay.settle_elapsed() {
            return;
        }
        if let Err(e) = self.relayout(cx) {
            log::warn!("failed to update overlay: {e:#}");
        }
        if let Err(e) = self.surface.set_visible(true, cx) {
            log::warn!("failed to reveal overlay: {e:#}");
        }
    }

    pub fn hide_overlay(&mut self, cx: &mut gpui::Context<Self>) {
        self.settle_task = None;
        self.auto_hide_task = None;
        let was_visible = self.overlay.hide();

        if self.overlay.is_created() {
            if let Err(e) = self.surface.set_visible(false, cx) {
                log::warn!("failed to hide overlay: {e:#}");
            }
        }
        if was_visible {
            log::info!("overlay hidden");
        }
        cx.notify();
    }

    /// Recompute size and position from the current settings and push them to
    /// the surface.
    fn relayout(&mut self, cx: &mut gpui::Context<Self>) -> Result<()> {
        let monitor = resolve_monitor(&self.monitors, &self.settings.monitor)
            .context("no monitor to place the overlay on")?;

        let surface = &mut self.surface;
        let plan = self
            .overlay
            .plan(&self.settings, monitor, |content| surface.measure(content, cx));

        log::debug!(
            "overlay {}x{} at ({}, {}) on {}, {}",
            plan.frame.width,
            plan.frame.height,
            plan.frame.x,
            plan.frame.y,
            self.settings.monitor,
            self.settings.corner,
        );

        self.surface.apply(&plan, cx)
    }

    /// Font size, corner, padding or monitor changed.
    fn on_setting_change(&mut self, cx: &mut gpui::Context<Self>) {
        if self.overlay.setting_changed() {
            if let Err(e) = self.relayout(cx) {
                log::warn!("failed to update overlay: {e:#}");
            }
        }
    }

    /// Timer checkbox or duration changed.
    fn on_timer_change(&mut self, cx: &mut gpui::Context<Self>) {
        let auto_hide = self.overlay.timer_changed(&self.settings);
        self.set_auto_hide(auto_hide, cx);
    }

    fn set_auto_hide(&mut self, auto_hide: AutoHide, cx: &mut gpui::Context<Self>) {
        let delay = match auto_hide {
            AutoHide::Keep => return,
            AutoHide::Cancel => {
                if self.auto_hide_task.take().is_some() {
                    log::info!("auto-hide cancelled");
                }
                return;
            }
            AutoHide::Arm(delay) => delay,
        };
        log::info!("overlay will auto-hide in {}s", delay.as_secs());

        self.auto_hide_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(delay).await;
            this.update(cx, |this, cx| {
                if this.overlay.auto_hide_elapsed() {
                    log::info!("auto-hide timer fired");
                    this.hide_overlay(cx);
                }
            })
            .ok();
        }));
    }

    // ── Form plumbing ────────────────────────────────────────────────────

    pub(crate) fn toggle_dropdown(&mut self, id: DropdownId) {
        self.open_dropdown = if self.open_dropdown == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub(crate) fn close_dropdowns(&mut self) {
        self.open_dropdown = None;
    }

    fn on_field_change(&mut self, field: Field, value: &str, cx: &mut gpui::Context<Self>) {
        match field.store(&mut self.settings, value) {
            Reaction::None => {}
            Reaction::Relayout => self.on_setting_change(cx),
            Reaction::RearmTimer => self.on_timer_change(cx),
        }
        cx.notify();
    }
}

fn text_input(
    value: &str,
    window: &mut gpui::Window,
    cx: &mut gpui::Context<Controller>,
) -> Entity<InputState> {
    let value = value.to_string();
    cx.new(|cx| InputState::new(window, cx).default_value(value))
}

/// Copy every edit of `input` into the settings field it belongs to.
fn watch(
    field: Field,
    input: &Entity<InputState>,
    window: &mut gpui::Window,
    cx: &mut gpui::Context<Controller>,
) -> Subscription {
    cx.subscribe_in(input, window, move |this, input, event: &InputEvent, _window, cx| {
        if matches!(event, InputEvent::Change) {
            let value = input.read(cx).value().to_string();
            this.on_field_change(field, &value, cx);
        }
    })
}

fn input_box(input: &Entity<InputState>, width: f32) -> impl IntoElement + use<> {
    div().w(px(width)).child(Input::new(input))
}

fn heading(text: &str) -> impl IntoElement + use<> {
    div()
        .font_weight(FontWeight::BOLD)
        .text_color(rgb(0x111111))
        .child(text.to_string())
}

impl Render for Controller {
    fn render(
        &mut self,
        _window: &mut gpui::Window,
        cx: &mut gpui::Context<Self>,
    ) -> impl IntoElement {
        let is_visible = self.overlay.is_visible();
        let open = self.open_dropdown;

        // ── Message ──────────────────────────────────────────────────────
        let message = input_box(&self.message_input, 380.0);

        // ── Font size / position / padding row ───────────────────────────
        let font_options: Vec<String> = FONT_SIZES.iter().map(|s| s.to_string()).collect();
        let on_font: OnPick = Rc::new(
            |this: &mut Controller, i: usize, cx: &mut gpui::Context<Controller>| {
                this.settings.font_size = FONT_SIZES[i].to_string();
                this.on_setting_change(cx);
            },
        );
        let font_menu = dropdown(
            DropdownId::FontSize,
            &self.settings.font_size,
            &font_options,
            open == Some(DropdownId::FontSize),
            110.0,
            on_font,
            cx,
        );

        let corner_options: Vec<String> = Corner::ALL.iter().map(|c| c.to_string()).collect();
        let on_corner: OnPick = Rc::new(
            |this: &mut Controller, i: usize, cx: &mut gpui::Context<Controller>| {
                this.settings.corner = Corner::ALL[i];
                this.on_setting_change(cx);
            },
        );
        let corner_menu = dropdown(
            DropdownId::Corner,
            self.settings.corner.label(),
            &corner_options,
            open == Some(DropdownId::Corner),
            130.0,
            on_corner,
            cx,
        );

        let padding = input_box(&self.padding_input, 90.0);

        let controls_row = div()
            .flex()
            .items_start()
            .gap_4()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .child(heading("Font Size:"))
                    .child(font_menu),
            )
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .child(heading("Position:"))
                    .child(corner_menu),
            )
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .child(heading("Padding (px):"))
                    .child(padding),
            );

        // ── Timer ────────────────────────────────────────────────────────
        let timer_box = checkbox(
            self.settings.timer_enabled,
            "Auto-hide after",
            cx.listener(|this, _: &bool, _window, cx| {
                this.settings.timer_enabled = !this.settings.timer_enabled;
                this.on_timer_change(cx);
                cx.notify();
            }),
        );
        let timer_row = div()
            .flex()
            .items_center()
            .gap_2()
            .child(timer_box)
            .child(input_box(&self.timer_input, 60.0))
            .child(div().text_color(rgb(0x111111)).child("seconds"));

        // ── Monitor ──────────────────────────────────────────────────────
        let on_monitor: OnPick = Rc::new(
            |this: &mut Controller, i: usize, cx: &mut gpui::Context<Controller>| {
                if let Some(label) = this.monitor_labels.get(i) {
                    this.settings.monitor = label.clone();
                    this.on_setting_change(cx);
                }
            },
        );
        let monitor_menu = dropdown(
            DropdownId::Monitor,
            &self.settings.monitor,
            &self.monitor_labels,
            open == Some(DropdownId::Monitor),
            380.0,
            on_monitor,
            cx,
        );

        // ── Buttons ──────────────────────────────────────────────────────
        let toggle = button(
            if is_visible { "Hide Overlay" } else { "Show Overlay" },
            if is_visible { rgb(0xffa500) } else { rgb(0x90ee90) },
            true,
            cx.listener(|this, _, _window, cx| {
                this.close_dropdowns();
                this.toggle_overlay(cx);
            }),
        );
        let quit = button("Quit", rgb(0xf08080), false, |_, _, cx| cx.quit());

        // ── Assemble the full layout ─────────────────────────────────────
        div()
            .id("overlay-controller")
            .size_full()
            .overflow_y_scroll()
            .bg(rgb(0xf0f0f0))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .items_center()
                    .gap_3()
                    .p_4()
                    .child(heading("Message:"))
                    .child(message)
                    .child(controls_row)
                    .child(timer_row)
                    .child(heading("Select Monitor:"))
                    .child(monitor_menu)
                    .child(toggle)
                    .child(quit),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> OverlaySettings {
        OverlaySettings::new("Monitor 1 (1920x1080)".into())
    }

    #[test]
    fn pasted_message_is_stored_whole() {
        let mut settings = settings();
        let pasted = "Q&A after the break: ask about the roadmap!";

        assert_eq!(Field::Message.store(&mut settings, pasted), Reaction::None);
        assert_eq!(settings.message, pasted);
    }

    #[test]
    fn padding_edit_relays_out() {
        let mut settings = settings();
        assert_eq!(Field::Padding.store(&mut settings, "12"), Reaction::Relayout);
        assert_eq!(settings.padding_px(), 12);
    }

    #[test]
    fn timer_edit_rearms() {
        let mut settings = settings();
        assert_eq!(
            Field::TimerSeconds.store(&mut settings, "90"),
            Reaction::RearmTimer
        );
        assert_eq!(settings.auto_hide_delay(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn unchanged_value_needs_nothing() {
        let mut settings = settings();
        let padding = settings.padding.clone();
        assert_eq!(Field::Padding.store(&mut settings, &padding), Reaction::None);
    }
}
