use super::types::MonitorInfo;

/// Labels for every monitor, in enumeration order.
pub fn monitor_labels(monitors: &[MonitorInfo]) -> Vec<String> {
    monitors
        .iter()
        .enumerate()
        .map(|(i, mon)| mon.label(i))
        .collect()
}

/// Resolve a dropdown label back to a monitor.
///
/// Falls back to the first monitor when the label no longer matches anything
/// (e.g. a display was unplugged). Returns `None` only for an empty list.
pub fn resolve_monitor<'a>(monitors: &'a [MonitorInfo], label: &str) -> Option<&'a MonitorInfo> {
    monitors
        .iter()
        .enumerate()
        .find(|(i, mon)| mon.label(*i) == label)
        .map(|(_, mon)| mon)
        .or_else(|| monitors.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(name: Option<&str>, x: i32, y: i32, width: i32, height: i32) -> MonitorInfo {
        MonitorInfo {
            name: name.map(str::to_string),
            x,
            y,
            width,
            height,
            is_primary: x == 0 && y == 0,
        }
    }

    #[test]
    fn labels_use_name_when_present() {
        let monitors = vec![
            monitor(Some("DISPLAY1"), 0, 0, 1920, 1080),
            monitor(None, 1920, 0, 2560, 1440),
            monitor(Some(""), -1280, 0, 1280, 1024),
        ];

        assert_eq!(
            monitor_labels(&monitors),
            vec![
                "DISPLAY1 (1920x1080)".to_string(),
                "Monitor 2 (2560x1440)".to_string(),
                "Monitor 3 (1280x1024)".to_string(),
            ]
        );
    }

    #[test]
    fn resolves_matching_label() {
        let monitors = vec![
            monitor(Some("DISPLAY1"), 0, 0, 1920, 1080),
            monitor(Some("DISPLAY2"), 1920, 0, 2560, 1440),
        ];

        let found = resolve_monitor(&monitors, "DISPLAY2 (2560x1440)").unwrap();
        assert_eq!(found.x, 1920);
    }

    #[test]
    fn unknown_label_falls_back_to_first() {
        let monitors = vec![
            monitor(Some("DISPLAY1"), 0, 0, 1920, 1080),
            monitor(Some("DISPLAY2"), 1920, 0, 2560, 1440),
        ];

        let found = resolve_monitor(&monitors, "DISPLAY3 (800x600)").unwrap();
        assert_eq!(found, &monitors[0]);
    }

    #[test]
    fn empty_list_resolves_to_none() {
        assert!(resolve_monitor(&[], "Monitor 1 (1920x1080)").is_none());
    }

    #[test]
    fn ordinal_labels_depend_on_position() {
        // The same unnamed monitor gets a different label at a different index.
        let monitors = vec![
            monitor(None, 0, 0, 1920, 1080),
            monitor(None, 1920, 0, 1920, 1080),
        ];

        let second = resolve_monitor(&monitors, "Monitor 2 (1920x1080)").unwrap();
        assert_eq!(second.x, 1920);
    }
}
