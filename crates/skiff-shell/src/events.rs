// SPDX-License-Identifier: Apache-2.0
//
// Channel types connecting the host surface, the shell actor, and its
// background workers.
//
// Inputs (`ShellEvent`) arrive on one mpsc channel; user-visible effects
// (`HostCommand`) leave on another. Completion continuations travel as
// oneshot senders inside the events, so no handler ever waits in place.

use skiff_core::types::{BridgeMessage, ConnectivityState, PermissionStatus, PickedMedia};
use tokio::sync::oneshot;
use url::Url;

/// Everything that can happen to the shell.
#[derive(Debug)]
pub enum ShellEvent {
    /// The page posted a bridge message.
    Bridge(BridgeMessage),
    /// The page's own file-input UI fired; the platform expects the picked
    /// files back on `respond`.
    FileInputRequested {
        allow_multiple: bool,
        respond: oneshot::Sender<Vec<PickedMedia>>,
    },
    /// The main frame finished loading.
    PageLoaded,
    /// The initial/provisional load failed.
    LoadFailed { error: String },
    /// Reachability update from the platform monitor.
    Reachability(ConnectivityState),
    /// The policy gate intercepted the onboarding marker.
    OnboardingRequested,
    /// The user accepted the onboarding overlay.
    OnboardingAccepted,
    /// The policy gate routed a URL to the external browser.
    ExternalOpen(Url),
    /// The policy gate asked for a proactive capture-permission prompt.
    CapturePreflight,
    /// Page script raised `alert()`.
    JsAlert { message: String, respond: oneshot::Sender<()> },
    /// Page script raised `confirm()`.
    JsConfirm { message: String, respond: oneshot::Sender<bool> },
    /// Page script raised `prompt()`.
    JsPrompt {
        message: String,
        default: Option<String>,
        respond: oneshot::Sender<Option<String>>,
    },
    /// Stop the actor.
    Shutdown,

    // -- Internal completions (posted by background workers) --
    /// A capture flow finished. Stale tickets are dropped.
    CaptureFinished { ticket: u64, media: Vec<PickedMedia> },
    /// The notification permission prompt resolved.
    PermissionResolved { status: PermissionStatus },
    /// Onboarding permission requests finished.
    OnboardingReady,
    /// The transient banner reached its auto-dismiss deadline.
    BannerExpired { ticket: u64 },
}

/// UI effects the host applies on its UI-affine context.
#[derive(Debug)]
pub enum HostCommand {
    /// Run a script inside the page.
    EvaluateScript(String),
    /// Replace the surface content with a static document.
    LoadHtml(String),
    /// Navigate the surface to a URL.
    LoadUrl(Url),
    /// Raise the transient offline advisory.
    ShowBanner { message: String },
    /// Dismiss the transient offline advisory.
    HideBanner,
    /// Raise the full-screen onboarding overlay.
    ShowOnboarding,
    /// Dismiss the onboarding overlay.
    HideOnboarding,
    /// Present a native alert for a page `alert()`.
    PresentAlert { message: String, respond: oneshot::Sender<()> },
    /// Present a native confirm dialog for a page `confirm()`.
    PresentConfirm { message: String, respond: oneshot::Sender<bool> },
    /// Present a native text prompt for a page `prompt()`.
    PresentPrompt {
        message: String,
        default: Option<String>,
        respond: oneshot::Sender<Option<String>>,
    },
}
