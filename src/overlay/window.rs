use std::ffi::c_void;
use std::sync::{Mutex, mpsc};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use windows::Win32::Foundation::{
    COLORREF, GetLastError, HWND, LPARAM, LRESULT, SIZE, SetLastError, WIN32_ERROR, WPARAM,
};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CLEARTYPE_QUALITY, CLIP_DEFAULT_PRECIS, CreateFontW, CreateSolidBrush,
    DEFAULT_CHARSET, DEFAULT_PITCH, DeleteObject, EndPaint, FF_SWISS, FW_BOLD, FillRect, GetDC,
    GetDeviceCaps, GetTextExtentPoint32W, HDC, HFONT, InvalidateRect, LOGPIXELSY,
    OUT_DEFAULT_PRECIS, PAINTSTRUCT, ReleaseDC, SelectObject, SetBkMode, SetTextColor, TRANSPARENT,
    TextOutW,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, DispatchMessageW, GWL_EXSTYLE,
    GetMessageW, GetWindowLongPtrW, HWND_TOPMOST, LWA_ALPHA, MSG, PostMessageW, PostQuitMessage,
    RegisterClassW, SW_HIDE, SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SetLayeredWindowAttributes,
    SetWindowLongPtrW, SetWindowPos, ShowWindow, TranslateMessage, WINDOW_EX_STYLE, WM_APP,
    WM_CLOSE, WM_DESTROY, WM_PAINT, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW,
    WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};
use windows::core::{PCWSTR, w};

use crate::overlay::layout::{
    Extent, Frame, LOGICAL_DPI, approximate_text_extent, points_to_pixels,
};
use crate::overlay::surface::{OverlayContent, OverlayPlan, OverlaySurface};

/// Re-read [`SCENE`], move the window and repaint.
const WM_OVERLAY_SYNC: u32 = WM_APP + 1;
/// Show (`WPARAM` 1) or hide (`WPARAM` 0) the window.
const WM_OVERLAY_VISIBILITY: u32 = WM_APP + 2;

const CLASS_NAME: PCWSTR = w!("TextOverlayWindowClass");

/// What the overlay thread paints. There is only ever one overlay window.
static SCENE: Mutex<Option<Scene>> = Mutex::new(None);

struct Scene {
    text: Vec<u16>,
    font_points: u32,
    padding: i32,
    frame: Frame,
}

impl Scene {
    fn from_plan(plan: &OverlayPlan) -> Self {
        Self {
            text: plan.content.text.encode_utf16().collect(),
            font_points: plan.content.font_points,
            padding: plan.content.padding as i32,
            frame: plan.frame,
        }
    }
}

// ─── Window procedure ───────────────────────────────────────────────────────

unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        match msg {
            WM_PAINT => {
                paint(hwnd);
                LRESULT(0)
            }
            WM_OVERLAY_SYNC => {
                let frame = SCENE.lock().ok().and_then(|s| s.as_ref().map(|s| s.frame));
                if let Some(f) = frame {
                    if let Err(e) = SetWindowPos(
                        hwnd,
                        Some(HWND_TOPMOST),
                        f.x,
                        f.y,
                        f.width,
                        f.height,
                        SWP_NOACTIVATE,
                    ) {
                        log::warn!("SetWindowPos failed: {e}");
                    }
                }
                let _ = InvalidateRect(Some(hwnd), None, true);
                LRESULT(0)
            }
            WM_OVERLAY_VISIBILITY => {
                let cmd = if wparam.0 != 0 { SW_SHOWNOACTIVATE } else { SW_HIDE };
                let _ = ShowWindow(hwnd, cmd);
                LRESULT(0)
            }
            WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

/// Bold white text on solid black, inset by the padding.
unsafe fn paint(hwnd: HWND) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);
        if hdc.is_invalid() {
            return;
        }

        let brush = CreateSolidBrush(COLORREF(0x00000000));
        if !brush.is_invalid() {
            FillRect(hdc, &ps.rcPaint, brush);
            let _ = DeleteObject(brush.into());
        }

        if let Ok(guard) = SCENE.lock() {
            if let Some(scene) = guard.as_ref() {
                let font = create_font(hdc, scene.font_points);
                let old_font = SelectObject(hdc, font.into());
                SetBkMode(hdc, TRANSPARENT);
                SetTextColor(hdc, COLORREF(0x00ffffff));
                let _ = TextOutW(hdc, scene.padding, scene.padding, &scene.text);
                SelectObject(hdc, old_font);
                let _ = DeleteObject(font.into());
            }
        }

        let _ = EndPaint(hwnd, &ps);
    }
}

/// Bold Arial at `points`, scaled by the device's vertical DPI.
unsafe fn create_font(hdc: HDC, points: u32) -> HFONT {
    unsafe {
        let dpi = GetDeviceCaps(Some(hdc), LOGPIXELSY);
        let height = -((points as i32 * dpi + 36) / 72);
        CreateFontW(
            height,
            0,
            0,
            0,
            FW_BOLD.0 as i32,
            0,
            0,
            0,
            DEFAULT_CHARSET,
            OUT_DEFAULT_PRECIS,
            CLIP_DEFAULT_PRECIS,
            CLEARTYPE_QUALITY,
            (DEFAULT_PITCH.0 | FF_SWISS.0) as u32,
            w!("Arial"),
        )
    }
}

// ─── Class registration ─────────────────────────────────────────────────────

fn register_class() -> Result<()> {
    static REGISTERED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();

    let ok = *REGISTERED.get_or_init(|| unsafe {
        let Ok(module) = GetModuleHandleW(None) else {
            return false;
        };
        let wc = WNDCLASSW {
            lpfnWndProc: Some(wnd_proc),
            hInstance: module.into(),
            lpszClassName: CLASS_NAME,
            style: CS_HREDRAW | CS_VREDRAW,
            ..Default::default()
        };
        RegisterClassW(&wc) != 0
    });

    if ok {
        Ok(())
    } else {
        bail!("failed to register overlay window class")
    }
}

// ─── Window creation ────────────────────────────────────────────────────────

/// Create the overlay window hidden and run its message loop on this thread.
fn run_overlay_window(hwnd_tx: mpsc::Sender<usize>) -> Result<()> {
    unsafe {
        let module = GetModuleHandleW(None).context("GetModuleHandleW")?;

        let ex_style =
            WINDOW_EX_STYLE(WS_EX_TOPMOST.0 | WS_EX_TOOLWINDOW.0 | WS_EX_NOACTIVATE.0);
        let hwnd = CreateWindowExW(
            ex_style,
            CLASS_NAME,
            w!("Text Overlay"),
            WS_POPUP,
            0,
            0,
            1,
            1,
            None,
            None,
            Some(module.into()),
            None,
        )
        .context("CreateWindowExW")?;

        if let Err(e) = enable_click_through(hwnd) {
            log::warn!("overlay will not be click-through: {e:#}");
        }

        hwnd_tx
            .send(hwnd.0 as usize)
            .map_err(|_| anyhow!("overlay owner went away"))?;

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
        Ok(())
    }
}

/// Extended style that lets mouse events fall through the window.
const CLICK_THROUGH: isize = (WS_EX_LAYERED.0 | WS_EX_TRANSPARENT.0) as isize;

fn has_click_through(ex_style: isize) -> bool {
    ex_style & CLICK_THROUGH == CLICK_THROUGH
}

/// Let mouse events fall through to whatever is under the overlay.
fn enable_click_through(hwnd: HWND) -> Result<()> {
    unsafe {
        let style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);

        // A previous style of 0 is only an error if the last error is set.
        SetLastError(WIN32_ERROR(0));
        if SetWindowLongPtrW(hwnd, GWL_EXSTYLE, style | CLICK_THROUGH) == 0 {
            let err = GetLastError();
            if err != WIN32_ERROR(0) {
                bail!("SetWindowLongPtrW failed with error {}", err.0);
            }
        }

        let applied = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        if !has_click_through(applied) {
            bail!("extended style {applied:#x} lacks layered/transparent bits");
        }

        SetLayeredWindowAttributes(hwnd, COLORREF(0), 255, LWA_ALPHA)
            .context("SetLayeredWindowAttributes")?;
    }
    Ok(())
}

// ─── Surface ────────────────────────────────────────────────────────────────

/// Win32 overlay: a topmost popup on a dedicated message-loop thread.
///
/// The thread and window are created on the first `apply` and live until the
/// surface is dropped. All cross-thread control goes through posted messages.
#[derive(Default)]
pub struct Win32Overlay {
    hwnd: Option<usize>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl Win32Overlay {
    fn ensure_window(&mut self) -> Result<HWND> {
        if let Some(ptr) = self.hwnd {
            return Ok(HWND(ptr as *mut c_void));
        }

        register_class()?;
        let (tx, rx) = mpsc::channel::<usize>();
        let thread = std::thread::Builder::new()
            .name("overlay-window".into())
            .spawn(move || {
                if let Err(e) = run_overlay_window(tx) {
                    log::error!("overlay thread error: {e:#}");
                }
            })
            .context("spawning overlay thread")?;

        let ptr = rx
            .recv_timeout(Duration::from_secs(2))
            .context("overlay window was not created")?;
        log::info!("overlay window created: {ptr:#x}");

        self.hwnd = Some(ptr);
        self.thread = Some(thread);
        Ok(HWND(ptr as *mut c_void))
    }

    fn post(&self, msg: u32, wparam: usize) -> Result<()> {
        let Some(ptr) = self.hwnd else {
            return Ok(());
        };
        unsafe {
            PostMessageW(
                Some(HWND(ptr as *mut c_void)),
                msg,
                WPARAM(wparam),
                LPARAM(0),
            )
            .context("PostMessageW")
        }
    }
}

impl OverlaySurface for Win32Overlay {
    fn measure(&mut self, content: &OverlayContent, _cx: &mut gpui::App) -> Extent {
        let text: Vec<u16> = if content.text.is_empty() {
            " ".encode_utf16().collect()
        } else {
            content.text.encode_utf16().collect()
        };

        unsafe {
            let hdc = GetDC(None);
            let font = create_font(hdc, content.font_points);
            let old_font = SelectObject(hdc, font.into());

            let mut size = SIZE::default();
            let measured = GetTextExtentPoint32W(hdc, &text, &mut size).as_bool();

            SelectObject(hdc, old_font);
            let _ = DeleteObject(font.into());
            ReleaseDC(None, hdc);

            if measured {
                Extent::new(size.cx, size.cy)
            } else {
                log::warn!("GetTextExtentPoint32W failed, estimating text size");
                let font_px = points_to_pixels(content.font_points, LOGICAL_DPI);
                approximate_text_extent(&content.text, font_px)
            }
        }
    }

    fn apply(&mut self, plan: &OverlayPlan, _cx: &mut gpui::App) -> Result<()> {
        self.ensure_window()?;
        *SCENE.lock().map_err(|_| anyhow!("overlay scene poisoned"))? = Some(Scene::from_plan(plan));
        self.post(WM_OVERLAY_SYNC, 0)
    }

    fn set_visible(&mut self, visible: bool, _cx: &mut gpui::App) -> Result<()> {
        self.post(WM_OVERLAY_VISIBILITY, visible as usize)
    }
}

impl Drop for Win32Overlay {
    fn drop(&mut self) {
        let _ = self.post(WM_CLOSE, 0);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_through_needs_both_bits() {
        let topmost = (WS_EX_TOPMOST.0 | WS_EX_TOOLWINDOW.0) as isize;
        assert!(!has_click_through(topmost));
        assert!(!has_click_through(topmost | WS_EX_LAYERED.0 as isize));
        assert!(has_click_through(topmost | CLICK_THROUGH));
    }
}
