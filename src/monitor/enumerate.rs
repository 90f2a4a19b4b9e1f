use anyhow::{Result, bail};

use super::types::MonitorInfo;

/// Enumerate all monitors currently connected to the system.
///
/// On Windows this walks `EnumDisplayMonitors` so device names and the primary
/// flag are available. Elsewhere the display list comes from gpui. An empty
/// result is an error: there is nowhere to put the overlay.
pub fn enumerate_monitors(cx: &gpui::App) -> Result<Vec<MonitorInfo>> {
    let monitors = platform_monitors(cx);

    if monitors.is_empty() {
        bail!("no monitors detected");
    }

    for (i, mon) in monitors.iter().enumerate() {
        log::info!(
            "monitor [{}] {} at ({}, {}){}",
            i,
            mon.label(i),
            mon.x,
            mon.y,
            if mon.is_primary { " primary" } else { "" },
        );
    }

    Ok(monitors)
}

#[cfg(target_os = "windows")]
fn platform_monitors(_cx: &gpui::App) -> Vec<MonitorInfo> {
    use windows::Win32::Foundation::{LPARAM, RECT};
    use windows::Win32::Graphics::Gdi::{
        EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW, MONITORINFOF_PRIMARY,
    };

    unsafe extern "system" fn enum_proc(
        hmonitor: HMONITOR,
        _hdc: HDC,
        _rect: *mut RECT,
        lparam: LPARAM,
    ) -> windows::core::BOOL {
        unsafe {
            let monitors = &mut *(lparam.0 as *mut Vec<MonitorInfo>);

            let mut info = MONITORINFOEXW::default();
            info.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;

            if GetMonitorInfoW(hmonitor, &mut info as *mut _ as *mut _).as_bool() {
                let rc = info.monitorInfo.rcMonitor;
                let device = &info.szDevice;
                let len = device.iter().position(|&c| c == 0).unwrap_or(device.len());
                let name = String::from_utf16_lossy(&device[..len]).replace("\\\\.\\", "");

                monitors.push(MonitorInfo {
                    name: Some(name).filter(|n| !n.is_empty()),
                    x: rc.left,
                    y: rc.top,
                    width: rc.right - rc.left,
                    height: rc.bottom - rc.top,
                    is_primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
                });
            } else {
                log::warn!("GetMonitorInfoW failed for {:?}, skipping", hmonitor);
            }

            windows::core::BOOL(1) // keep enumerating
        }
    }

    let mut monitors: Vec<MonitorInfo> = Vec::new();
    unsafe {
        let ok = EnumDisplayMonitors(
            None,
            None,
            Some(enum_proc),
            LPARAM(&mut monitors as *mut Vec<MonitorInfo> as isize),
        );
        if !ok.as_bool() {
            log::warn!("EnumDisplayMonitors stopped early");
        }
    }
    monitors
}

#[cfg(not(target_os = "windows"))]
fn platform_monitors(cx: &gpui::App) -> Vec<MonitorInfo> {
    use gpui::PlatformDisplay as _;

    let primary = cx.primary_display().map(|d| d.id());

    cx.displays()
        .iter()
        .map(|display| {
            let bounds = display.bounds();
            let x: f32 = bounds.origin.x.into();
            let y: f32 = bounds.origin.y.into();
            let width: f32 = bounds.size.width.into();
            let height: f32 = bounds.size.height.into();

            MonitorInfo {
                name: None,
                x: x.round() as i32,
                y: y.round() as i32,
                width: width.round() as i32,
                height: height.round() as i32,
                is_primary: primary == Some(display.id()),
            }
        })
        .collect()
}
