// SPDX-License-Identifier: Apache-2.0
//
// Scriptable in-memory bridge used by the shell and media tests.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};

use skiff_bridge::traits::*;
use skiff_core::error::{Result, SkiffError};
use skiff_core::types::{
    CaptureSource, ConnectivityState, PermissionKind, PermissionStatus, ShareItem,
};
use url::Url;

/// Bridge double that records every interaction and replays scripted
/// picker outcomes. Response queues pop in call order; exhausted queues
/// behave as user cancellation.
pub struct FakeBridge {
    camera_available: AtomicBool,
    denied: Mutex<HashSet<PermissionKind>>,
    fail_permissions: AtomicBool,
    requested: Mutex<Vec<PermissionKind>>,
    sources: Mutex<VecDeque<Option<CaptureSource>>>,
    source_flags: Mutex<Vec<bool>>,
    /// Number of `choose_source` calls allowed to proceed; `gated()` starts
    /// at zero so tests can hold pickers open.
    source_permits: Mutex<usize>,
    source_released: Condvar,
    shots: Mutex<VecDeque<Option<CapturedImage>>>,
    photos: Mutex<VecDeque<Vec<CapturedImage>>>,
    photo_presentations: AtomicUsize,
    shared: Mutex<Vec<Vec<ShareItem>>>,
    opened: Mutex<Vec<Url>>,
}

impl FakeBridge {
    pub fn new() -> Self {
        Self::with_permits(usize::MAX / 2)
    }

    /// A bridge whose source sheet blocks until `permit_sources` is called.
    pub fn gated() -> Self {
        Self::with_permits(0)
    }

    fn with_permits(permits: usize) -> Self {
        Self {
            camera_available: AtomicBool::new(false),
            denied: Mutex::new(HashSet::new()),
            fail_permissions: AtomicBool::new(false),
            requested: Mutex::new(Vec::new()),
            sources: Mutex::new(VecDeque::new()),
            source_flags: Mutex::new(Vec::new()),
            source_permits: Mutex::new(permits),
            source_released: Condvar::new(),
            shots: Mutex::new(VecDeque::new()),
            photos: Mutex::new(VecDeque::new()),
            photo_presentations: AtomicUsize::new(0),
            shared: Mutex::new(Vec::new()),
            opened: Mutex::new(Vec::new()),
        }
    }

    // -- scripting ----------------------------------------------------------

    pub fn set_camera_available(&self, available: bool) {
        self.camera_available.store(available, Ordering::SeqCst);
    }

    pub fn deny(&self, kind: PermissionKind) {
        self.denied.lock().expect("denied lock").insert(kind);
    }

    pub fn fail_permissions(&self) {
        self.fail_permissions.store(true, Ordering::SeqCst);
    }

    pub fn script_source(&self, source: Option<CaptureSource>) {
        self.sources.lock().expect("sources lock").push_back(source);
    }

    pub fn script_shot(&self, shot: Option<CapturedImage>) {
        self.shots.lock().expect("shots lock").push_back(shot);
    }

    pub fn script_photos(&self, photos: Vec<CapturedImage>) {
        self.photos.lock().expect("photos lock").push_back(photos);
    }

    /// Let `n` blocked (or future) source sheets proceed.
    pub fn permit_sources(&self, n: usize) {
        *self.source_permits.lock().expect("permits lock") += n;
        self.source_released.notify_all();
    }

    // -- observations -------------------------------------------------------

    pub fn requested_permissions(&self) -> Vec<PermissionKind> {
        self.requested.lock().expect("requested lock").clone()
    }

    pub fn source_sheet_camera_flags(&self) -> Vec<bool> {
        self.source_flags.lock().expect("flags lock").clone()
    }

    pub fn photo_picker_presentations(&self) -> usize {
        self.photo_presentations.load(Ordering::SeqCst)
    }

    pub fn shared(&self) -> Vec<Vec<ShareItem>> {
        self.shared.lock().expect("shared lock").clone()
    }

    pub fn opened(&self) -> Vec<Url> {
        self.opened.lock().expect("opened lock").clone()
    }
}

impl PlatformBridge for FakeBridge {
    fn platform_name(&self) -> &str {
        "Fake (test)"
    }
}

impl NativePermissions for FakeBridge {
    fn request(&self, kind: PermissionKind) -> Result<PermissionStatus> {
        self.requested.lock().expect("requested lock").push(kind);
        if self.fail_permissions.load(Ordering::SeqCst) {
            return Err(SkiffError::Bridge("scripted permission failure".into()));
        }
        if self.denied.lock().expect("denied lock").contains(&kind) {
            Ok(PermissionStatus::Denied)
        } else {
            Ok(PermissionStatus::Granted)
        }
    }
}

impl NativeCapture for FakeBridge {
    fn camera_available(&self) -> bool {
        self.camera_available.load(Ordering::SeqCst)
    }

    fn choose_source(&self, include_camera: bool) -> Result<Option<CaptureSource>> {
        let mut permits = self.source_permits.lock().expect("permits lock");
        while *permits == 0 {
            permits = self.source_released.wait(permits).expect("permits wait");
        }
        *permits -= 1;
        drop(permits);

        self.source_flags.lock().expect("flags lock").push(include_camera);
        Ok(self.sources.lock().expect("sources lock").pop_front().flatten())
    }

    fn capture_photo(&self) -> Result<Option<CapturedImage>> {
        Ok(self.shots.lock().expect("shots lock").pop_front().flatten())
    }

    fn pick_photos(&self, _allow_multiple: bool) -> Result<Vec<CapturedImage>> {
        self.photo_presentations.fetch_add(1, Ordering::SeqCst);
        Ok(self.photos.lock().expect("photos lock").pop_front().unwrap_or_default())
    }
}

impl NativeShareSheet for FakeBridge {
    fn present(&self, items: &[ShareItem]) -> Result<()> {
        self.shared.lock().expect("shared lock").push(items.to_vec());
        Ok(())
    }
}

impl NativeBrowser for FakeBridge {
    fn open(&self, url: &Url) -> Result<()> {
        self.opened.lock().expect("opened lock").push(url.clone());
        Ok(())
    }
}

impl NativeReachability for FakeBridge {
    fn start_monitoring(
        &self,
        _on_change: Box<dyn Fn(ConnectivityState) + Send + Sync>,
    ) -> Result<()> {
        // Tests inject reachability through the shell handle instead.
        Ok(())
    }
}
