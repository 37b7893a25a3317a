// SPDX-License-Identifier: Apache-2.0
//
// The shell actor.
//
// One task owns every piece of mutable shell state: the pending file-input
// waiter, the capture ticket, the connectivity monitor, the banner ticket,
// and the onboarding flag. All mutation happens by processing `ShellEvent`s
// in order; all UI effects leave as `HostCommand`s. Blocking adapter calls
// run in `spawn_blocking` workers whose completions re-enter as events, so
// no event turn ever waits on a dialog or picker.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use skiff_bridge::traits::{
    NativeBrowser, NativePermissions, NativeReachability, NativeShareSheet, PlatformBridge,
};
use skiff_core::config::ShellConfig;
use skiff_core::types::{
    BridgeMessage, ConnectivityState, MessageName, NavDecision, NavRequest, PermissionKind,
    PermissionStatus, PickedMedia, ShareItem,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use url::Url;

use crate::connectivity::ConnectivityMonitor;
use crate::dispatch;
use crate::events::{HostCommand, ShellEvent};
use crate::gate::NavigationPolicy;
use crate::media;
use crate::page;

/// Text of the transient offline advisory.
const OFFLINE_BANNER_MESSAGE: &str = "You're offline — showing cached pages";

/// Clonable façade the host talks to.
///
/// Navigation decisions are answered synchronously from the pure policy
/// gate; everything else is posted onto the shell's event channel. Sends
/// after shutdown are silently dropped.
#[derive(Debug, Clone)]
pub struct ShellHandle {
    events: mpsc::UnboundedSender<ShellEvent>,
    policy: NavigationPolicy,
}

impl ShellHandle {
    /// Decide one navigation attempt.
    ///
    /// Returns promptly: side effects (external open, overlay raise,
    /// permission preflight) are posted as events and never awaited here.
    pub fn decide_navigation(&self, request: &NavRequest) -> NavDecision {
        let verdict = self.policy.evaluate(request);
        if verdict.preflight_capture_permissions {
            self.send(ShellEvent::CapturePreflight);
        }
        match &verdict.decision {
            NavDecision::OpenExternal(url) => self.send(ShellEvent::ExternalOpen(url.clone())),
            NavDecision::ShowOnboarding => self.send(ShellEvent::OnboardingRequested),
            NavDecision::Allow | NavDecision::Cancel => {}
        }
        verdict.decision
    }

    /// Feed a raw page-posted ipc payload into the dispatcher. Malformed
    /// payloads are dropped with no page-visible effect.
    pub fn on_bridge_payload(&self, raw: &str) {
        match dispatch::parse_message(raw) {
            Ok(message) => self.send(ShellEvent::Bridge(message)),
            Err(e) => debug!(error = %e, "dropping malformed bridge payload"),
        }
    }

    /// The page's own file-input UI fired. The returned receiver is the
    /// platform completion channel; it resolves with the picked files, or
    /// with an empty list on cancellation or replacement by a newer request.
    pub fn file_input(&self, allow_multiple: bool) -> oneshot::Receiver<Vec<PickedMedia>> {
        let (respond, receiver) = oneshot::channel();
        self.send(ShellEvent::FileInputRequested { allow_multiple, respond });
        receiver
    }

    /// The main frame finished loading.
    pub fn page_loaded(&self) {
        self.send(ShellEvent::PageLoaded);
    }

    /// The initial/provisional load failed.
    pub fn load_failed(&self, error: impl Into<String>) {
        self.send(ShellEvent::LoadFailed { error: error.into() });
    }

    /// Reachability update from the platform.
    pub fn reachability(&self, state: ConnectivityState) {
        self.send(ShellEvent::Reachability(state));
    }

    /// The user accepted the onboarding overlay.
    pub fn onboarding_accepted(&self) {
        self.send(ShellEvent::OnboardingAccepted);
    }

    /// Page script raised `alert()`; the receiver resolves when the user
    /// dismisses the native presentation.
    pub fn js_alert(&self, message: impl Into<String>) -> oneshot::Receiver<()> {
        let (respond, receiver) = oneshot::channel();
        self.send(ShellEvent::JsAlert { message: message.into(), respond });
        receiver
    }

    /// Page script raised `confirm()`.
    pub fn js_confirm(&self, message: impl Into<String>) -> oneshot::Receiver<bool> {
        let (respond, receiver) = oneshot::channel();
        self.send(ShellEvent::JsConfirm { message: message.into(), respond });
        receiver
    }

    /// Page script raised `prompt()`.
    pub fn js_prompt(
        &self,
        message: impl Into<String>,
        default: Option<String>,
    ) -> oneshot::Receiver<Option<String>> {
        let (respond, receiver) = oneshot::channel();
        self.send(ShellEvent::JsPrompt { message: message.into(), default, respond });
        receiver
    }

    /// Stop the shell actor.
    pub fn shutdown(&self) {
        self.send(ShellEvent::Shutdown);
    }

    fn send(&self, event: ShellEvent) {
        if self.events.send(event).is_err() {
            debug!("shell is gone; event dropped");
        }
    }
}

/// Spawn the shell actor onto the current tokio runtime.
///
/// Returns the handle the host feeds and the command stream the host
/// applies on its UI context. Reachability monitoring is registered
/// immediately; platforms without it (the stub) are tolerated.
pub fn spawn(
    config: ShellConfig,
    bridge: Arc<dyn PlatformBridge>,
) -> (ShellHandle, mpsc::UnboundedReceiver<HostCommand>) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();

    let policy = NavigationPolicy::from_config(&config);
    let handle = ShellHandle { events: events_tx.clone(), policy };

    let feed = events_tx.clone();
    if let Err(e) = bridge.start_monitoring(Box::new(move |state| {
        let _ = feed.send(ShellEvent::Reachability(state));
    })) {
        warn!(error = %e, "reachability monitoring unavailable");
    }

    let shell = Shell {
        config,
        bridge,
        events: events_tx,
        commands: commands_tx,
        monitor: ConnectivityMonitor::new(),
        pending_input: None,
        capture_ticket: 0,
        banner_ticket: 0,
        onboarding_visible: false,
        temp_dir: std::env::temp_dir(),
    };
    tokio::spawn(shell.run(events_rx));

    (handle, commands_rx)
}

struct Shell {
    config: ShellConfig,
    bridge: Arc<dyn PlatformBridge>,
    /// Clone handed to background workers for completion events.
    events: mpsc::UnboundedSender<ShellEvent>,
    commands: mpsc::UnboundedSender<HostCommand>,
    monitor: ConnectivityMonitor,
    /// The platform completion channel of the outstanding file-input
    /// request. Invariant: at most one is alive at any time.
    pending_input: Option<oneshot::Sender<Vec<PickedMedia>>>,
    /// Generation counter for capture flows; a completion carrying a stale
    /// ticket can never resolve a newer waiter.
    capture_ticket: u64,
    /// Generation counter for the banner auto-dismiss timer.
    banner_ticket: u64,
    onboarding_visible: bool,
    temp_dir: PathBuf,
}

impl Shell {
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<ShellEvent>) {
        info!(platform = self.bridge.platform_name(), "shell actor started");
        while let Some(event) = events.recv().await {
            if !self.handle_event(event) {
                break;
            }
        }
        info!("shell actor stopped");
    }

    /// Process one event. Returns `false` to stop the actor.
    fn handle_event(&mut self, event: ShellEvent) -> bool {
        match event {
            ShellEvent::Bridge(message) => self.handle_bridge_message(message),
            ShellEvent::FileInputRequested { allow_multiple, respond } => {
                if let Some(stale) = self.pending_input.take() {
                    debug!("resolving stale file-input waiter with no selection");
                    let _ = stale.send(Vec::new());
                }
                self.pending_input = Some(respond);
                self.begin_capture(allow_multiple);
            }
            ShellEvent::CaptureFinished { ticket, media } => {
                if ticket != self.capture_ticket {
                    debug!(ticket, "dropping stale capture result");
                } else if let Some(respond) = self.pending_input.take() {
                    let _ = respond.send(media);
                } else if !media.is_empty() {
                    debug!(count = media.len(), "capture finished with no waiter; result dropped");
                }
            }
            ShellEvent::PermissionResolved { status } => {
                self.command(HostCommand::EvaluateScript(page::permission_callback_js(status)));
            }
            ShellEvent::CapturePreflight => self.preflight_capture_permissions(),
            ShellEvent::ExternalOpen(url) => self.open_external(url),
            ShellEvent::OnboardingRequested => {
                if !self.onboarding_visible {
                    self.onboarding_visible = true;
                    self.command(HostCommand::ShowOnboarding);
                }
            }
            ShellEvent::OnboardingAccepted => self.request_onboarding_permissions(),
            ShellEvent::OnboardingReady => {
                self.onboarding_visible = false;
                self.command(HostCommand::HideOnboarding);
                if let Some(url) = self.config.post_onboarding_url.clone() {
                    self.command(HostCommand::LoadUrl(url));
                }
            }
            ShellEvent::PageLoaded => {
                self.command(HostCommand::EvaluateScript(page::native_flags_js(
                    &self.config.user_agent,
                )));
            }
            ShellEvent::LoadFailed { error } => {
                warn!(error = %error, "page load failed; substituting offline document");
                self.command(HostCommand::LoadHtml(page::OFFLINE_HTML.to_owned()));
            }
            ShellEvent::Reachability(state) => {
                if self.monitor.observe(state) {
                    self.show_offline_banner();
                }
            }
            ShellEvent::BannerExpired { ticket } => {
                if ticket == self.banner_ticket {
                    self.command(HostCommand::HideBanner);
                }
            }
            ShellEvent::JsAlert { message, respond } => {
                self.command(HostCommand::PresentAlert { message, respond });
            }
            ShellEvent::JsConfirm { message, respond } => {
                self.command(HostCommand::PresentConfirm { message, respond });
            }
            ShellEvent::JsPrompt { message, default, respond } => {
                self.command(HostCommand::PresentPrompt { message, default, respond });
            }
            ShellEvent::Shutdown => return false,
        }
        true
    }

    /// Route one bridge message. Must complete within this turn; anything
    /// slow is handed to a worker.
    fn handle_bridge_message(&mut self, message: BridgeMessage) {
        match message.name {
            MessageName::NotifyPermission => self.request_notification_permission(),
            MessageName::OpenCamera => self.begin_capture(false),
            MessageName::Share => self.present_share(dispatch::share_items(&message.body)),
            MessageName::OpenExternal => {
                if let Some(url) = dispatch::external_url(&message.body) {
                    self.open_external(url);
                }
            }
            MessageName::Unknown => {
                debug!(origin = ?message.origin, "unknown bridge message dropped");
            }
        }
    }

    fn request_notification_permission(&self) {
        let bridge = Arc::clone(&self.bridge);
        let events = self.events.clone();
        tokio::task::spawn_blocking(move || {
            // Adapter failure surfaces to the page the same way a refusal
            // does; the callback fires exactly once either way.
            let status = match bridge.request(PermissionKind::Notifications) {
                Ok(status) => status,
                Err(e) => {
                    warn!(error = %e, "notification permission request failed");
                    PermissionStatus::Denied
                }
            };
            let _ = events.send(ShellEvent::PermissionResolved { status });
        });
    }

    fn begin_capture(&mut self, allow_multiple: bool) {
        self.capture_ticket += 1;
        let ticket = self.capture_ticket;
        let bridge = Arc::clone(&self.bridge);
        let events = self.events.clone();
        let temp_dir = self.temp_dir.clone();
        tokio::task::spawn_blocking(move || {
            let media = media::run_capture(bridge.as_ref(), allow_multiple, &temp_dir);
            let _ = events.send(ShellEvent::CaptureFinished { ticket, media });
        });
    }

    fn present_share(&self, items: Vec<ShareItem>) {
        let bridge = Arc::clone(&self.bridge);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = bridge.present(&items) {
                warn!(error = %e, "share sheet unavailable");
            }
        });
    }

    fn open_external(&self, url: Url) {
        let bridge = Arc::clone(&self.bridge);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = bridge.open(&url) {
                warn!(%url, error = %e, "external browser handoff failed");
            }
        });
    }

    /// Rule 3's proactive prompt: ask for both capture permissions in the
    /// background while the posting page keeps loading.
    fn preflight_capture_permissions(&self) {
        let bridge = Arc::clone(&self.bridge);
        tokio::task::spawn_blocking(move || {
            for kind in [PermissionKind::PhotoLibrary, PermissionKind::Camera] {
                match bridge.request(kind) {
                    Ok(status) => debug!(%kind, ?status, "capture permission preflighted"),
                    Err(e) => debug!(%kind, error = %e, "capture preflight unavailable"),
                }
            }
        });
    }

    fn request_onboarding_permissions(&self) {
        let bridge = Arc::clone(&self.bridge);
        let events = self.events.clone();
        tokio::task::spawn_blocking(move || {
            for kind in [
                PermissionKind::Notifications,
                PermissionKind::Camera,
                PermissionKind::PhotoLibrary,
            ] {
                match bridge.request(kind) {
                    Ok(status) => info!(%kind, ?status, "onboarding permission resolved"),
                    Err(e) => warn!(%kind, error = %e, "onboarding permission unavailable"),
                }
            }
            let _ = events.send(ShellEvent::OnboardingReady);
        });
    }

    fn show_offline_banner(&mut self) {
        self.banner_ticket += 1;
        let ticket = self.banner_ticket;
        self.command(HostCommand::ShowBanner { message: OFFLINE_BANNER_MESSAGE.to_owned() });

        let events = self.events.clone();
        let deadline = Duration::from_secs(self.config.offline_banner_secs);
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            let _ = events.send(ShellEvent::BannerExpired { ticket });
        });
    }

    fn command(&self, command: HostCommand) {
        if self.commands.send(command).is_err() {
            debug!("host is gone; command dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeBridge;
    use skiff_bridge::traits::CapturedImage;
    use skiff_core::types::CaptureSource;
    use tokio::time::timeout;

    fn test_config() -> ShellConfig {
        ShellConfig { offline_banner_secs: 0, ..ShellConfig::default() }
    }

    fn start(bridge: Arc<FakeBridge>) -> (ShellHandle, mpsc::UnboundedReceiver<HostCommand>) {
        spawn(test_config(), bridge)
    }

    async fn next_command(rx: &mut mpsc::UnboundedReceiver<HostCommand>) -> HostCommand {
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for host command")
            .expect("command channel closed")
    }

    async fn wait_until(mut cond: impl FnMut() -> bool) {
        for _ in 0..400 {
            if cond() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not met in time");
    }

    fn nav(url: &str) -> NavRequest {
        NavRequest::main_frame(Url::parse(url).expect("test URL"))
    }

    #[tokio::test]
    async fn notify_permission_granted_invokes_callback_exactly_once() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, mut commands) = start(Arc::clone(&bridge));

        handle.on_bridge_payload(r#"{"name":"notifyPermission"}"#);

        match next_command(&mut commands).await {
            HostCommand::EvaluateScript(js) => assert!(js.contains("'granted'")),
            other => panic!("expected script invocation, got {other:?}"),
        }

        // Marker: the very next command must be the page-loaded injection,
        // not a second callback.
        handle.page_loaded();
        match next_command(&mut commands).await {
            HostCommand::EvaluateScript(js) => assert!(js.contains("__isNativeApp")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test]
    async fn notify_permission_denied_reports_denied() {
        let bridge = Arc::new(FakeBridge::new());
        bridge.deny(PermissionKind::Notifications);
        let (handle, mut commands) = start(Arc::clone(&bridge));

        handle.on_bridge_payload(r#"{"name":"notifyPermission"}"#);

        match next_command(&mut commands).await {
            HostCommand::EvaluateScript(js) => assert!(js.contains("'denied'")),
            other => panic!("expected script invocation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn notify_permission_adapter_failure_surfaces_as_denied() {
        let bridge = Arc::new(FakeBridge::new());
        bridge.fail_permissions();
        let (handle, mut commands) = start(Arc::clone(&bridge));

        handle.on_bridge_payload(r#"{"name":"notifyPermission"}"#);

        match next_command(&mut commands).await {
            HostCommand::EvaluateScript(js) => assert!(js.contains("'denied'")),
            other => panic!("expected script invocation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_message_changes_nothing() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, mut commands) = start(Arc::clone(&bridge));

        handle.on_bridge_payload(r#"{"name":"definitelyNotABridgeCall","body":{"x":1}}"#);
        handle.on_bridge_payload("not even json");

        handle.page_loaded();
        match next_command(&mut commands).await {
            HostCommand::EvaluateScript(js) => assert!(js.contains("__isNativeApp")),
            other => panic!("unexpected command {other:?}"),
        }
        assert!(bridge.requested_permissions().is_empty());
        assert!(bridge.shared().is_empty());
        assert!(bridge.opened().is_empty());
    }

    #[tokio::test]
    async fn share_string_presents_one_text_item() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, _commands) = start(Arc::clone(&bridge));

        handle.on_bridge_payload(r#"{"name":"share","body":"hello"}"#);

        let recorder = Arc::clone(&bridge);
        wait_until(move || !recorder.shared().is_empty()).await;
        assert_eq!(bridge.shared(), vec![vec![ShareItem::Text("hello".into())]]);
    }

    #[tokio::test]
    async fn share_empty_object_presents_empty_list() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, _commands) = start(Arc::clone(&bridge));

        handle.on_bridge_payload(r#"{"name":"share","body":{}}"#);

        let recorder = Arc::clone(&bridge);
        wait_until(move || !recorder.shared().is_empty()).await;
        assert_eq!(bridge.shared(), vec![Vec::new()]);
    }

    #[tokio::test]
    async fn open_external_hands_off_valid_urls_only() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, _commands) = start(Arc::clone(&bridge));

        handle.on_bridge_payload(r#"{"name":"openExternal","body":"not a url"}"#);
        handle.on_bridge_payload(r#"{"name":"openExternal","body":"https://example.org/x"}"#);

        let recorder = Arc::clone(&bridge);
        wait_until(move || !recorder.opened().is_empty()).await;
        assert_eq!(bridge.opened(), vec![Url::parse("https://example.org/x").expect("url")]);
    }

    #[tokio::test]
    async fn second_file_input_resolves_the_first_with_no_selection() {
        // Gate the fake source sheet so both captures stay blocked while we
        // observe the waiter hand-off.
        let bridge = Arc::new(FakeBridge::gated());
        let (handle, _commands) = start(Arc::clone(&bridge));

        let first = handle.file_input(false);
        let second = handle.file_input(false);

        // The stale waiter resolves empty while both pickers are still up.
        let stale = timeout(Duration::from_secs(2), first)
            .await
            .expect("first waiter should resolve promptly")
            .expect("first waiter dropped");
        assert!(stale.is_empty());

        // Release the pickers; only the current ticket may resolve the
        // surviving waiter.
        bridge.permit_sources(2);
        let media = timeout(Duration::from_secs(2), second)
            .await
            .expect("second waiter should resolve")
            .expect("second waiter dropped");
        assert!(media.is_empty());
    }

    #[tokio::test]
    async fn file_input_receives_picked_media() {
        let bridge = Arc::new(FakeBridge::new());
        bridge.script_source(Some(CaptureSource::PhotoLibrary));
        bridge.script_photos(vec![CapturedImage {
            bytes: b"pixels".to_vec(),
            mime_type: "image/jpeg".into(),
        }]);
        let (handle, _commands) = start(Arc::clone(&bridge));

        let media = timeout(Duration::from_secs(2), handle.file_input(false))
            .await
            .expect("waiter should resolve")
            .expect("waiter dropped");
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].mime_type, "image/jpeg");
        assert_eq!(std::fs::read(&media[0].path).expect("read"), b"pixels");
        let _ = std::fs::remove_file(&media[0].path);
    }

    #[tokio::test]
    async fn open_camera_with_no_waiter_is_a_no_op() {
        let bridge = Arc::new(FakeBridge::new());
        bridge.script_source(Some(CaptureSource::PhotoLibrary));
        bridge.script_photos(vec![CapturedImage {
            bytes: b"pixels".to_vec(),
            mime_type: "image/jpeg".into(),
        }]);
        let (handle, mut commands) = start(Arc::clone(&bridge));

        handle.on_bridge_payload(r#"{"name":"openCamera"}"#);
        let recorder = Arc::clone(&bridge);
        wait_until(move || recorder.photo_picker_presentations() == 1).await;

        // Nothing observable happens: no command, no waiter resolution.
        handle.page_loaded();
        match next_command(&mut commands).await {
            HostCommand::EvaluateScript(js) => assert!(js.contains("__isNativeApp")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test]
    async fn repeated_offline_signals_raise_the_banner_once() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, mut commands) = start(Arc::clone(&bridge));

        handle.reachability(ConnectivityState::offline());
        handle.reachability(ConnectivityState::offline());

        match next_command(&mut commands).await {
            HostCommand::ShowBanner { message } => assert!(message.contains("offline")),
            other => panic!("expected banner, got {other:?}"),
        }
        // Auto-dismiss (deadline zero in tests), and no second ShowBanner.
        match next_command(&mut commands).await {
            HostCommand::HideBanner => {}
            other => panic!("expected hide, got {other:?}"),
        }
        handle.page_loaded();
        match next_command(&mut commands).await {
            HostCommand::EvaluateScript(js) => assert!(js.contains("__isNativeApp")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test]
    async fn each_offline_edge_raises_a_fresh_banner() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, mut commands) = start(Arc::clone(&bridge));

        handle.reachability(ConnectivityState::offline());
        handle.reachability(ConnectivityState::online());
        handle.reachability(ConnectivityState::offline());

        let mut shows = 0;
        while shows < 2 {
            match next_command(&mut commands).await {
                HostCommand::ShowBanner { .. } => shows += 1,
                HostCommand::HideBanner => {}
                other => panic!("unexpected command {other:?}"),
            }
        }

        // No third banner: only dismissals may precede the marker.
        handle.page_loaded();
        loop {
            match next_command(&mut commands).await {
                HostCommand::HideBanner => {}
                HostCommand::EvaluateScript(js) => {
                    assert!(js.contains("__isNativeApp"));
                    break;
                }
                other => panic!("unexpected command {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn load_failure_substitutes_offline_document_independently() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, mut commands) = start(Arc::clone(&bridge));

        // Monitor still says online; the load-failure signal is its own path.
        handle.load_failed("could not reach server");

        match next_command(&mut commands).await {
            HostCommand::LoadHtml(html) => assert!(html.contains("You're Offline")),
            other => panic!("expected offline document, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn onboarding_flow_prompts_then_navigates_home() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, mut commands) = start(Arc::clone(&bridge));

        let decision = handle.decide_navigation(&nav("https://example.com/native/app-ready"));
        assert_eq!(decision, NavDecision::ShowOnboarding);

        match next_command(&mut commands).await {
            HostCommand::ShowOnboarding => {}
            other => panic!("expected overlay, got {other:?}"),
        }

        handle.onboarding_accepted();
        match next_command(&mut commands).await {
            HostCommand::HideOnboarding => {}
            other => panic!("expected overlay dismissal, got {other:?}"),
        }
        match next_command(&mut commands).await {
            HostCommand::LoadUrl(url) => assert_eq!(url.path(), "/home"),
            other => panic!("expected home navigation, got {other:?}"),
        }
        assert_eq!(
            bridge.requested_permissions(),
            vec![
                PermissionKind::Notifications,
                PermissionKind::Camera,
                PermissionKind::PhotoLibrary,
            ]
        );
    }

    #[tokio::test]
    async fn repeated_onboarding_markers_raise_one_overlay() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, mut commands) = start(Arc::clone(&bridge));

        handle.decide_navigation(&nav("https://example.com/native/app-ready"));
        handle.decide_navigation(&nav("https://example.com/native/app-ready"));

        match next_command(&mut commands).await {
            HostCommand::ShowOnboarding => {}
            other => panic!("expected overlay, got {other:?}"),
        }
        handle.page_loaded();
        match next_command(&mut commands).await {
            HostCommand::EvaluateScript(js) => assert!(js.contains("__isNativeApp")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test]
    async fn external_navigation_reaches_the_system_browser() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, _commands) = start(Arc::clone(&bridge));

        let decision = handle.decide_navigation(&nav("https://news.other.net/story"));
        assert!(matches!(decision, NavDecision::OpenExternal(_)));

        let recorder = Arc::clone(&bridge);
        wait_until(move || !recorder.opened().is_empty()).await;
        assert_eq!(bridge.opened()[0].host_str(), Some("news.other.net"));
    }

    #[tokio::test]
    async fn posting_navigation_preflights_capture_permissions() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, _commands) = start(Arc::clone(&bridge));

        let decision = handle.decide_navigation(&nav("https://example.com/post/new"));
        assert_eq!(decision, NavDecision::Allow);

        let recorder = Arc::clone(&bridge);
        wait_until(move || recorder.requested_permissions().len() == 2).await;
        assert_eq!(
            bridge.requested_permissions(),
            vec![PermissionKind::PhotoLibrary, PermissionKind::Camera]
        );
    }

    #[tokio::test]
    async fn js_confirm_round_trips_through_the_host() {
        let bridge = Arc::new(FakeBridge::new());
        let (handle, mut commands) = start(Arc::clone(&bridge));

        let answer = handle.js_confirm("Delete this post?");
        match next_command(&mut commands).await {
            HostCommand::PresentConfirm { message, respond } => {
                assert_eq!(message, "Delete this post?");
                respond.send(true).expect("responder alive");
            }
            other => panic!("expected confirm presentation, got {other:?}"),
        }
        assert!(timeout(Duration::from_secs(2), answer)
            .await
            .expect("confirm should resolve")
            .expect("responder dropped"));
    }
}
