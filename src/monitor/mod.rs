mod enumerate;
mod select;
mod types;

pub use enumerate::enumerate_monitors;
pub use select::{monitor_labels, resolve_monitor};
pub use types::MonitorInfo;
