// SPDX-License-Identifier: Apache-2.0
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// Every capability degrades to `PlatformUnavailable`; the shell treats that
// as a cancelled or empty result rather than an error worth surfacing.

use skiff_core::error::{Result, SkiffError};
use skiff_core::types::{
    CaptureSource, ConnectivityState, PermissionKind, PermissionStatus, ShareItem,
};
use url::Url;

use crate::traits::*;

/// No-op bridge returned on builds without a linked device bridge.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativePermissions for StubBridge {
    fn request(&self, kind: PermissionKind) -> Result<PermissionStatus> {
        tracing::warn!(%kind, "NativePermissions::request called on stub bridge");
        Err(SkiffError::PlatformUnavailable)
    }
}

impl NativeCapture for StubBridge {
    fn camera_available(&self) -> bool {
        false
    }

    fn choose_source(&self, _include_camera: bool) -> Result<Option<CaptureSource>> {
        tracing::warn!("NativeCapture::choose_source called on stub bridge");
        Err(SkiffError::PlatformUnavailable)
    }

    fn capture_photo(&self) -> Result<Option<CapturedImage>> {
        Err(SkiffError::PlatformUnavailable)
    }

    fn pick_photos(&self, _allow_multiple: bool) -> Result<Vec<CapturedImage>> {
        Err(SkiffError::PlatformUnavailable)
    }
}

impl NativeShareSheet for StubBridge {
    fn present(&self, items: &[ShareItem]) -> Result<()> {
        tracing::warn!(count = items.len(), "NativeShareSheet::present called on stub bridge");
        Err(SkiffError::PlatformUnavailable)
    }
}

impl NativeBrowser for StubBridge {
    fn open(&self, url: &Url) -> Result<()> {
        tracing::warn!(%url, "NativeBrowser::open called on stub bridge");
        Err(SkiffError::PlatformUnavailable)
    }
}

impl NativeReachability for StubBridge {
    fn start_monitoring(
        &self,
        _on_change: Box<dyn Fn(ConnectivityState) + Send + Sync>,
    ) -> Result<()> {
        tracing::warn!("NativeReachability::start_monitoring called on stub bridge");
        Err(SkiffError::PlatformUnavailable)
    }
}
