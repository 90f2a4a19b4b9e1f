/// Information about a connected display monitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitorInfo {
    /// Name reported by the OS, if any (e.g. `DISPLAY1`).
    pub name: Option<String>,
    /// X coordinate of the monitor's top-left corner in virtual-screen space.
    pub x: i32,
    /// Y coordinate of the monitor's top-left corner in virtual-screen space.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Whether the OS reports this as the primary monitor.
    pub is_primary: bool,
}

impl MonitorInfo {
    /// Dropdown label for the monitor at `index` in the enumeration order.
    ///
    /// Named monitors render as `"DISPLAY1 (1920x1080)"`, unnamed ones fall
    /// back to a 1-based ordinal: `"Monitor 2 (2560x1440)"`.
    pub fn label(&self, index: usize) -> String {
        match self.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => format!("{} ({}x{})", name, self.width, self.height),
            None => format!("Monitor {} ({}x{})", index + 1, self.width, self.height),
        }
    }
}
