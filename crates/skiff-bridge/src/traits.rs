// SPDX-License-Identifier: Apache-2.0
//
// Platform-agnostic trait definitions for native capabilities.
//
// Methods are synchronous and may block until the user answers a dialog;
// the shell always invokes them from `tokio::task::spawn_blocking` and never
// from its own event turn. Implementations therefore need `Send + Sync` but
// no async machinery of their own.

use skiff_core::error::Result;
use skiff_core::types::{
    CaptureSource, ConnectivityState, PermissionKind, PermissionStatus, ShareItem,
};
use url::Url;

/// Unified bridge that groups all native capabilities.
///
/// Held as `Arc<dyn PlatformBridge>` and shared across blocking workers.
/// Platforms that lack a capability return
/// `SkiffError::PlatformUnavailable` from the stub implementation.
pub trait PlatformBridge:
    NativePermissions + NativeCapture + NativeShareSheet + NativeBrowser + NativeReachability
    + Send
    + Sync
{
    /// Human-readable platform name (e.g. "iOS 18", "Android 15").
    fn platform_name(&self) -> &str;
}

/// Request OS-level authorization from the user.
pub trait NativePermissions {
    /// Prompt for the given authorization and block until the user answers.
    /// No timeout is imposed: the dialog stays up as long as the OS keeps it.
    fn request(&self, kind: PermissionKind) -> Result<PermissionStatus>;
}

/// Present native capture UI (camera and photo library pickers).
pub trait NativeCapture {
    /// Whether camera hardware is present and usable.
    fn camera_available(&self) -> bool;

    /// Present the source action sheet. The camera entry is offered only
    /// when `include_camera` is true. Returns `None` when the user dismisses
    /// the sheet.
    fn choose_source(&self, include_camera: bool) -> Result<Option<CaptureSource>>;

    /// Present the camera and block until a photo is taken or the user
    /// cancels (`None`).
    fn capture_photo(&self) -> Result<Option<CapturedImage>>;

    /// Present the photo-library picker. An empty vector means the user
    /// cancelled without selecting.
    fn pick_photos(&self, allow_multiple: bool) -> Result<Vec<CapturedImage>>;
}

/// Present the OS share sheet.
pub trait NativeShareSheet {
    /// Show the share surface for the given items. The item list may be
    /// empty; the sheet is presented regardless.
    fn present(&self, items: &[ShareItem]) -> Result<()>;
}

/// Hand a URL to the system (or in-app system) browser.
pub trait NativeBrowser {
    fn open(&self, url: &Url) -> Result<()>;
}

/// Observe system network reachability.
pub trait NativeReachability {
    /// Register a callback fired on every reachability update. The callback
    /// may be invoked from an arbitrary thread; the shell re-enters its own
    /// context before touching state.
    fn start_monitoring(
        &self,
        on_change: Box<dyn Fn(ConnectivityState) + Send + Sync>,
    ) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Info structs
// ---------------------------------------------------------------------------

/// An image as returned by a picker, before materialization to a file.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}
