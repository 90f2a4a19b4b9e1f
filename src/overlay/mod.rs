pub mod layout;
pub mod settings;
pub mod state;
pub mod surface;

#[cfg(not(target_os = "windows"))]
mod popup;
#[cfg(target_os = "windows")]
mod window;

pub use settings::{Corner, OverlaySettings};
pub use state::{AutoHide, OverlayState, Toggle};
pub use surface::OverlaySurface;

/// Overlay surface for the platform this binary was built for.
#[cfg(target_os = "windows")]
pub type PlatformOverlay = window::Win32Overlay;
#[cfg(not(target_os = "windows"))]
pub type PlatformOverlay = popup::PopupOverlay;
