// SPDX-License-Identifier: Apache-2.0
//
// Core domain types for the Skiff web shell.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// Names of the page-to-native bridge calls.
///
/// This set is closed: the page can only ever trigger these behaviors.
/// Anything else deserializes to [`MessageName::Unknown`] and is dropped by
/// the dispatcher, so a typo in page script can never crash the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageName {
    /// Request notification authorization; result is delivered back into the
    /// page through a fixed callback.
    NotifyPermission,
    /// Present the native capture flow (camera or photo library).
    OpenCamera,
    /// Present the native share sheet.
    Share,
    /// Hand a URL to the system browser.
    OpenExternal,
    /// Any name outside the closed set.
    #[serde(other)]
    Unknown,
}

/// One message emitted by a page-side bridge call.
///
/// Transient: created per call, consumed synchronously by the dispatcher.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeMessage {
    pub name: MessageName,
    /// Untyped payload; shape depends on the message name. Absent bodies
    /// deserialize to `Value::Null`.
    #[serde(default)]
    pub body: serde_json::Value,
    /// The issuing page, when the host reports it.
    #[serde(default)]
    pub origin: Option<Url>,
}

/// One outgoing navigation attempt from the embedded page.
#[derive(Debug, Clone)]
pub struct NavRequest {
    pub url: Url,
    /// Whether the navigation targets the main frame.
    pub main_frame: bool,
}

impl NavRequest {
    pub fn main_frame(url: Url) -> Self {
        Self { url, main_frame: true }
    }
}

/// The policy gate's answer for a single navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDecision {
    /// Let the page continue loading in place.
    Allow,
    /// Drop the navigation with no further action.
    Cancel,
    /// Drop the navigation and hand the URL to the system browser.
    OpenExternal(Url),
    /// Drop the navigation and raise the native onboarding overlay; the
    /// underlying page is not replaced.
    ShowOnboarding,
}

impl NavDecision {
    /// Whether the host should let the load proceed.
    pub fn allows(&self) -> bool {
        matches!(self, NavDecision::Allow)
    }
}

/// Decision plus any side effect that rides beside it.
///
/// Side effects never delay the decision: the gate returns promptly and the
/// shell performs them asynchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavVerdict {
    pub decision: NavDecision,
    /// Rule 3: proactively prompt for capture permissions while the page
    /// keeps loading.
    pub preflight_capture_permissions: bool,
}

impl NavVerdict {
    pub fn plain(decision: NavDecision) -> Self {
        Self { decision, preflight_capture_permissions: false }
    }
}

/// One entry in a normalized share payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareItem {
    Text(String),
    Link(Url),
}

/// A capture result materialized as a standalone file.
///
/// The file lives in the OS temporary area and carries no persistence
/// guarantee: the consumer is expected to upload it promptly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedMedia {
    pub path: PathBuf,
    pub mime_type: String,
}

/// The capture source the user chose from the native action sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSource {
    Camera,
    PhotoLibrary,
}

/// The OS authorizations the shell can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKind {
    Camera,
    PhotoLibrary,
    Notifications,
}

impl std::fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Camera => "camera",
            Self::PhotoLibrary => "photo library",
            Self::Notifications => "notifications",
        };
        f.write_str(name)
    }
}

/// Outcome of a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    /// The string the page-side callback receives.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

/// Snapshot of system network reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityState {
    pub is_online: bool,
}

impl ConnectivityState {
    pub fn online() -> Self {
        Self { is_online: true }
    }

    pub fn offline() -> Self {
        Self { is_online: false }
    }
}
