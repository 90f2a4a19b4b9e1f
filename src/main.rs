#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

mod monitor;
mod options;
mod overlay;
mod ui;

use anyhow::{Context as _, Result};
use gpui::{
    AnyView, App, AppContext, Application, AsyncApp, Bounds, WindowBounds, WindowOptions, px,
    size,
};
use gpui_component::Root;

use crate::monitor::enumerate_monitors;
use crate::options::{LaunchOptions, USAGE};
use crate::ui::Controller;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const LOG_FILE_NAME: &str = "text_overlay.log";

/// Send logs to a file in the temp directory, falling back to stderr.
///
/// A release build on Windows has no console, so the file is the only place
/// its logs can be read.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();

    if cfg!(all(target_os = "windows", not(debug_assertions))) {
        let log_path = std::env::temp_dir().join(LOG_FILE_NAME);
        match std::fs::File::create(&log_path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("cannot create {}: {e}", log_path.display()),
        }
    }

    builder.init();
}

/// Log a fatal error and tell the user about it.
fn report_fatal(error: &anyhow::Error) {
    log::error!("fatal error: {error:?}");

    #[cfg(target_os = "windows")]
    unsafe {
        use windows::Win32::UI::WindowsAndMessaging::{MB_ICONERROR, MB_OK, MessageBoxW};
        use windows::core::{HSTRING, w};

        let text = HSTRING::from(format!("Text Overlay could not start:\n\n{error:#}"));
        let _ = MessageBoxW(None, &text, w!("Text Overlay"), MB_OK | MB_ICONERROR);
    }

    #[cfg(not(target_os = "windows"))]
    eprintln!("Text Overlay could not start: {error:#}");
}

/// Whether the control window is gone from the set of open windows.
fn controller_closed<W: PartialEq>(mut open: impl Iterator<Item = W>, controller: &W) -> bool {
    !open.any(|w| &w == controller)
}

/// Open the control window. In test mode the overlay is shown immediately
/// and the app quits once the test duration has passed.
///
/// Closing the control window quits the app, which takes the overlay down
/// with it.
fn open_controller(options: &LaunchOptions, cx: &mut App) -> Result<()> {
    let monitors = enumerate_monitors(cx).context("enumerating monitors")?;

    let bounds = Bounds::centered(None, size(px(480.0), px(560.0)), cx);
    let mut controller = None;
    let handle = cx
        .open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(gpui::TitlebarOptions {
                    title: Some("Overlay Controller".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            |window, cx| {
                let view = cx.new(|cx| Controller::new(monitors, window, cx));
                controller = Some(view.clone());
                cx.new(|cx| Root::new(AnyView::from(view), window, cx))
            },
        )
        .context("opening control window")?;
    let controller = controller.context("control window has no controller")?;

    let controller_window = handle.window_id();
    cx.on_window_closed(move |cx| {
        let open = cx.windows();
        if controller_closed(open.iter().map(|w| w.window_id()), &controller_window) {
            log::info!("control window closed, quitting");
            cx.quit();
        }
    })
    .detach();

    if let Some(duration) = options.exit_after {
        log::info!("test mode: quitting after {}s", duration.as_secs());
        controller.update(cx, |controller, cx| controller.show_overlay(cx));

        cx.spawn(async move |cx: &mut AsyncApp| {
            cx.background_executor().timer(duration).await;
            log::info!("test mode finished");
            cx.update(|cx| cx.quit()).ok();
        })
        .detach();
    }

    Ok(())
}

fn main() {
    init_logging();
    log::info!("Text Overlay v{} starting", APP_VERSION);

    let options = match LaunchOptions::from_env() {
        Ok(options) => options,
        Err(e) => {
            report_fatal(&e);
            std::process::exit(2);
        }
    };

    if options.show_help {
        println!("{USAGE}");
        return;
    }

    Application::new().run(move |cx: &mut App| {
        gpui_component::init(cx);
        if let Err(e) = open_controller(&options, cx) {
            report_fatal(&e);
            cx.quit();
        }
    });

    log::info!("Text Overlay exited");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_the_overlay_keeps_running() {
        let open = [1u64, 2];
        assert!(!controller_closed(open.into_iter(), &1));
    }

    #[test]
    fn closing_the_controller_quits() {
        // Only the overlay popup is left.
        let open = [2u64];
        assert!(controller_closed(open.into_iter(), &1));
        assert!(controller_closed(std::iter::empty(), &1));
    }
}
