// SPDX-License-Identifier: Apache-2.0
//
// wry/tao webview host.
//
// The tao event loop is the UI-affine context: every `HostCommand` is pumped
// in as a user event and applied here, on this thread only. Page callbacks
// (ipc, navigation policy, load progress) feed the shell handle; the
// navigation handler is answered synchronously from the pure gate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use skiff_core::config::ShellConfig;
use skiff_core::error::{Result, SkiffError};
use skiff_core::types::NavRequest;
use skiff_shell::events::HostCommand;
use skiff_shell::page;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::window::WindowBuilder;
use tracing::{debug, info, warn};
use url::Url;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

const ONBOARDING_TITLE: &str = "Enable Notifications";
const ONBOARDING_BODY: &str =
    "Stay up to date with alerts and updates. Tap below to allow notifications.";
const ONBOARDING_ACCEPT: &str = "Allow Notifications";

/// Build the window, the webview, and the shell, then run the UI loop.
/// Never returns on success; the process exits with the event loop.
pub fn run(config: ShellConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let bridge = skiff_bridge::platform_bridge();
    let (handle, mut commands) = skiff_shell::shell::spawn(config.clone(), bridge);

    let event_loop = EventLoopBuilder::<HostCommand>::with_user_event().build();
    let proxy = event_loop.create_proxy();
    runtime.spawn(async move {
        while let Some(command) = commands.recv().await {
            if proxy.send_event(command).is_err() {
                break;
            }
        }
    });

    let window = WindowBuilder::new()
        .with_title("Skiff")
        .build(&event_loop)
        .map_err(|e| SkiffError::Bridge(format!("window creation failed: {e}")))?;

    let loaded = Arc::new(AtomicBool::new(false));

    let nav_handle = handle.clone();
    let ipc_handle = handle.clone();
    let load_handle = handle.clone();
    let load_flag = Arc::clone(&loaded);

    let builder = WebViewBuilder::new()
        .with_user_agent(&config.user_agent)
        .with_initialization_script(page::INIT_SCRIPT)
        .with_navigation_handler(move |uri: String| match Url::parse(&uri) {
            Ok(url) => nav_handle.decide_navigation(&NavRequest::main_frame(url)).allows(),
            Err(e) => {
                debug!(uri = %uri, error = %e, "cancelling unparseable navigation");
                false
            }
        })
        .with_ipc_handler(move |request| {
            let body = request.body().as_str();
            if body == page::ONBOARDING_ACCEPT_SIGNAL {
                ipc_handle.onboarding_accepted();
            } else if body.starts_with(page::CONTROL_PREFIX) {
                debug!(body, "unknown control signal dropped");
            } else {
                ipc_handle.on_bridge_payload(body);
            }
        })
        .with_on_page_load_handler(move |event, url| {
            if let PageLoadEvent::Finished = event {
                debug!(url = %url, "page finished loading");
                load_flag.store(true, Ordering::SeqCst);
                load_handle.page_loaded();
            }
        })
        .with_url(config.start_url.as_str());

    #[cfg(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    ))]
    let webview = builder
        .build(&window)
        .map_err(|e| SkiffError::Bridge(format!("webview creation failed: {e}")))?;
    #[cfg(not(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    )))]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        builder
            .build_gtk(window.gtk_window())
            .map_err(|e| SkiffError::Bridge(format!("webview creation failed: {e}")))?
    };

    // Bounded initial-load timeout; failure substitutes the offline document.
    let timeout_handle = handle.clone();
    let timeout = Duration::from_secs(config.load_timeout_secs);
    runtime.spawn(async move {
        tokio::time::sleep(timeout).await;
        if !loaded.load(Ordering::SeqCst) {
            timeout_handle.load_failed("initial page load timed out");
        }
    });

    info!("entering UI event loop");
    event_loop.run(move |event, _target, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event: WindowEvent::CloseRequested, .. } => {
                handle.shutdown();
                *control_flow = ControlFlow::Exit;
            }
            Event::UserEvent(command) => apply_command(&webview, command),
            _ => {}
        }
    });
}

/// Apply one shell command to the webview surface.
fn apply_command(webview: &WebView, command: HostCommand) {
    match command {
        HostCommand::EvaluateScript(js) => {
            if let Err(e) = webview.evaluate_script(&js) {
                warn!(error = %e, "script evaluation failed");
            }
        }
        HostCommand::LoadHtml(html) => {
            if let Err(e) = webview.load_html(&html) {
                warn!(error = %e, "static document load failed");
            }
        }
        HostCommand::LoadUrl(url) => {
            if let Err(e) = webview.load_url(url.as_str()) {
                warn!(%url, error = %e, "navigation failed");
            }
        }
        HostCommand::ShowBanner { message } => {
            if let Err(e) = webview.evaluate_script(&page::banner_show_js(&message)) {
                warn!(error = %e, "banner injection failed");
            }
        }
        HostCommand::HideBanner => {
            let _ = webview.evaluate_script(page::BANNER_HIDE_JS);
        }
        HostCommand::ShowOnboarding => {
            let js = page::onboarding_show_js(ONBOARDING_TITLE, ONBOARDING_BODY, ONBOARDING_ACCEPT);
            if let Err(e) = webview.evaluate_script(&js) {
                warn!(error = %e, "onboarding overlay injection failed");
            }
        }
        HostCommand::HideOnboarding => {
            let _ = webview.evaluate_script(page::ONBOARDING_HIDE_JS);
        }
        // This host has no native dialog surface; page dialogs are answered
        // with their dismissive defaults.
        HostCommand::PresentAlert { message, respond } => {
            info!(message = %message, "page alert");
            let _ = respond.send(());
        }
        HostCommand::PresentConfirm { message, respond } => {
            info!(message = %message, "page confirm answered with cancel");
            let _ = respond.send(false);
        }
        HostCommand::PresentPrompt { message, respond, .. } => {
            info!(message = %message, "page prompt answered with cancel");
            let _ = respond.send(None);
        }
    }
}
