use std::time::Duration;

use crate::monitor::MonitorInfo;
use crate::overlay::layout::{Extent, overlay_extent, place};
use crate::overlay::settings::OverlaySettings;
use crate::overlay::surface::{OverlayContent, OverlayPlan};

/// What the Show/Hide button does next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Show,
    Hide,
}

/// Auto-hide timer the controller should be running after a lifecycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoHide {
    /// Leave the current timer alone.
    Keep,
    /// Drop any pending timer.
    Cancel,
    /// Replace any pending timer with one firing after this delay.
    Arm(Duration),
}

/// Lifecycle of the single overlay.
///
/// The message text is captured when the overlay is shown; later edits in the
/// control window only take effect on the next show. Font size, padding,
/// corner and monitor are read live on every plan.
///
/// The controller owns the actual tasks (settle delay, auto-hide timer) and
/// asks this type what to do with them, so every decision here is testable
/// without a window.
#[derive(Debug, Default)]
pub struct OverlayState {
    visible: bool,
    created: bool,
    shown_text: String,
    settle_pending: bool,
    auto_hide: Option<Duration>,
}

impl OverlayState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the overlay has been shown at least once.
    ///
    /// This tracks the logical overlay, not a native window: the Win32 surface
    /// keeps one window for the whole run, while the popup surface reopens its
    /// window whenever the frame changes.
    pub fn is_created(&self) -> bool {
        self.created
    }

    /// A show is waiting for its settle delay before the reveal.
    pub fn is_settling(&self) -> bool {
        self.settle_pending
    }

    /// Delay of the auto-hide timer currently armed, if any.
    pub fn armed_auto_hide(&self) -> Option<Duration> {
        self.auto_hide
    }

    pub fn next_toggle(&self) -> Toggle {
        if self.visible {
            Toggle::Hide
        } else {
            Toggle::Show
        }
    }

    /// Start a show: capture the message and remember that the overlay exists.
    ///
    /// The overlay is not visible until [`finish_show`](Self::finish_show);
    /// a show whose first layout fails stops here.
    pub fn begin_show(&mut self, settings: &OverlaySettings) {
        self.shown_text = settings.message.clone();
        self.created = true;
    }

    /// The first layout succeeded: the overlay counts as visible, the settle
    /// delay starts and the auto-hide timer follows the settings.
    pub fn finish_show(&mut self, settings: &OverlaySettings) -> AutoHide {
        self.visible = true;
        self.settle_pending = true;
        self.rearm(settings)
    }

    /// The settle delay ran out. Returns whether the overlay should now be
    /// repositioned and revealed.
    pub fn settle_elapsed(&mut self) -> bool {
        let due = self.visible && self.settle_pending;
        self.settle_pending = false;
        due
    }

    /// Hide the overlay, cancelling the settle delay and the auto-hide timer.
    /// Returns whether it was visible.
    pub fn hide(&mut self) -> bool {
        let was_visible = self.visible;
        self.visible = false;
        self.settle_pending = false;
        self.auto_hide = None;
        was_visible
    }

    /// Font size, padding, corner or monitor changed. Returns whether the
    /// overlay has to be laid out again.
    pub fn setting_changed(&self) -> bool {
        self.visible
    }

    /// The timer checkbox or duration changed. A hidden overlay has no timer
    /// to adjust.
    pub fn timer_changed(&mut self, settings: &OverlaySettings) -> AutoHide {
        if !self.visible {
            return AutoHide::Keep;
        }
        self.rearm(settings)
    }

    /// The auto-hide timer fired. Returns whether the overlay should be hidden.
    pub fn auto_hide_elapsed(&mut self) -> bool {
        self.visible && self.auto_hide.take().is_some()
    }

    fn rearm(&mut self, settings: &OverlaySettings) -> AutoHide {
        self.auto_hide = settings.auto_hide_delay();
        match self.auto_hide {
            Some(delay) => AutoHide::Arm(delay),
            None => AutoHide::Cancel,
        }
    }

    /// Content the overlay should draw under the current settings.
    pub fn content(&self, settings: &OverlaySettings) -> OverlayContent {
        OverlayContent {
            text: self.shown_text.clone(),
            font_points: settings.font_points(),
            padding: settings.padding_px(),
        }
    }

    /// Resolve size and position for the overlay on `monitor`.
    ///
    /// `measure` returns the natural size of the text as the platform renders
    /// it; padding and placement are applied here.
    pub fn plan(
        &self,
        settings: &OverlaySettings,
        monitor: &MonitorInfo,
        measure: impl FnOnce(&OverlayContent) -> Extent,
    ) -> OverlayPlan {
        let content = self.content(settings);
        let text = measure(&content);
        let frame = place(overlay_extent(text, content.padding), settings.corner, monitor);
        OverlayPlan { content, frame }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::layout::Frame;
    use crate::overlay::settings::Corner;

    fn monitor() -> MonitorInfo {
        MonitorInfo {
            name: Some("DISPLAY1".into()),
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
            is_primary: true,
        }
    }

    fn settings() -> OverlaySettings {
        OverlaySettings::new(monitor().label(0))
    }

    fn fixed_measure(_: &OverlayContent) -> Extent {
        Extent::new(300, 60)
    }

    fn shown(settings: &OverlaySettings) -> OverlayState {
        let mut state = OverlayState::default();
        state.begin_show(settings);
        state.finish_show(settings);
        state
    }

    #[test]
    fn starts_hidden_and_uncreated() {
        let state = OverlayState::default();
        assert!(!state.is_visible());
        assert!(!state.is_created());
        assert!(!state.is_settling());
        assert_eq!(state.armed_auto_hide(), None);
    }

    #[test]
    fn show_starts_settle_and_default_timer() {
        let settings = settings();
        let mut state = OverlayState::default();
        state.begin_show(&settings);

        assert_eq!(
            state.finish_show(&settings),
            AutoHide::Arm(Duration::from_secs(60))
        );
        assert!(state.is_visible());
        assert!(state.is_settling());

        assert!(state.settle_elapsed());
        assert!(!state.is_settling());
        assert!(!state.settle_elapsed());
    }

    #[test]
    fn show_without_timer_cancels_auto_hide() {
        let mut settings = settings();
        settings.timer_enabled = false;

        let mut state = OverlayState::default();
        state.begin_show(&settings);
        assert_eq!(state.finish_show(&settings), AutoHide::Cancel);
        assert_eq!(state.armed_auto_hide(), None);
    }

    #[test]
    fn failed_first_layout_leaves_overlay_hidden() {
        let settings = settings();
        let mut state = OverlayState::default();
        state.begin_show(&settings);

        assert!(!state.is_visible());
        assert_eq!(state.next_toggle(), Toggle::Show);
        assert_eq!(state.armed_auto_hide(), None);
        assert!(!state.settle_elapsed());
    }

    #[test]
    fn hide_cancels_settle_and_auto_hide() {
        let settings = settings();
        let mut state = shown(&settings);
        assert!(state.is_settling());
        assert!(state.armed_auto_hide().is_some());

        assert!(state.hide());
        assert!(!state.is_settling());
        assert_eq!(state.armed_auto_hide(), None);

        // Late wake-ups from tasks that were already cancelled do nothing.
        assert!(!state.settle_elapsed());
        assert!(!state.auto_hide_elapsed());
        assert!(!state.hide());
    }

    #[test]
    fn toggle_alternates() {
        let settings = settings();
        let mut state = OverlayState::default();
        assert_eq!(state.next_toggle(), Toggle::Show);

        state.begin_show(&settings);
        state.finish_show(&settings);
        assert_eq!(state.next_toggle(), Toggle::Hide);

        state.hide();
        assert_eq!(state.next_toggle(), Toggle::Show);
    }

    #[test]
    fn settings_relayout_only_while_visible() {
        let settings = settings();
        let mut state = OverlayState::default();
        assert!(!state.setting_changed());

        state.begin_show(&settings);
        state.finish_show(&settings);
        assert!(state.setting_changed());

        state.hide();
        assert!(!state.setting_changed());
    }

    #[test]
    fn timer_change_rearms_only_while_visible() {
        let mut settings = settings();
        let mut state = OverlayState::default();
        settings.timer_seconds = "5".into();
        assert_eq!(state.timer_changed(&settings), AutoHide::Keep);
        assert_eq!(state.armed_auto_hide(), None);

        state.begin_show(&settings);
        state.finish_show(&settings);
        settings.timer_seconds = "12".into();
        assert_eq!(
            state.timer_changed(&settings),
            AutoHide::Arm(Duration::from_secs(12))
        );
        assert_eq!(state.armed_auto_hide(), Some(Duration::from_secs(12)));
    }

    #[test]
    fn timer_change_to_invalid_or_zero_clears_timer() {
        let mut settings = settings();
        let mut state = shown(&settings);

        for bad in ["0", "", "soon", "-3"] {
            settings.timer_seconds = bad.into();
            assert_eq!(state.timer_changed(&settings), AutoHide::Cancel, "{bad:?}");
            assert_eq!(state.armed_auto_hide(), None);
        }

        settings.timer_seconds = "30".into();
        settings.timer_enabled = false;
        assert_eq!(state.timer_changed(&settings), AutoHide::Cancel);
        assert!(state.is_visible());
    }

    #[test]
    fn auto_hide_firing_hides_once() {
        let settings = settings();
        let mut state = shown(&settings);

        assert!(state.auto_hide_elapsed());
        assert!(state.hide());
        assert!(!state.auto_hide_elapsed());
    }

    #[test]
    fn cleared_timer_does_not_hide() {
        let mut settings = settings();
        let mut state = shown(&settings);
        settings.timer_enabled = false;
        state.timer_changed(&settings);

        assert!(!state.auto_hide_elapsed());
        assert!(state.is_visible());
    }

    #[test]
    fn plan_uses_padding_and_corner() {
        let mut settings = settings();
        settings.padding = "10".into();
        settings.corner = Corner::TopRight;

        let mut state = OverlayState::default();
        state.begin_show(&settings);
        let plan = state.plan(&settings, &monitor(), fixed_measure);

        assert_eq!(
            plan.frame,
            Frame {
                x: 1920 - 320 - 20,
                y: 20,
                width: 320,
                height: 80,
            }
        );
    }

    #[test]
    fn message_is_captured_at_show_time() {
        let mut settings = settings();
        settings.message = "Live".into();

        let mut state = shown(&settings);

        settings.message = "Edited while visible".into();
        settings.font_size = "72".into();
        let plan = state.plan(&settings, &monitor(), fixed_measure);
        assert_eq!(plan.content.text, "Live");
        assert_eq!(plan.content.font_points, 72);

        state.hide();
        state.begin_show(&settings);
        let plan = state.plan(&settings, &monitor(), fixed_measure);
        assert_eq!(plan.content.text, "Edited while visible");
    }

    #[test]
    fn measure_sees_the_parsed_font_size() {
        let mut settings = settings();
        settings.font_size = "not a number".into();

        let mut state = OverlayState::default();
        state.begin_show(&settings);
        let mut seen = None;
        state.plan(&settings, &monitor(), |content| {
            seen = Some(content.font_points);
            Extent::new(1, 1)
        });
        assert_eq!(seen, Some(36));
    }

    #[test]
    fn hide_keeps_overlay_created() {
        let settings = settings();
        let mut state = shown(&settings);
        state.hide();

        assert!(!state.is_visible());
        assert!(state.is_created());
    }
}
