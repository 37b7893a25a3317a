// SPDX-License-Identifier: Apache-2.0
//
// Media capture flow.
//
// Presents the source choice, requests the permission relevant to the chosen
// source, runs the OS picker, and materializes every selection as a
// standalone temp file. The whole flow blocks on user interaction and is
// always run inside `spawn_blocking`; its surface is infallible and the
// worst outcome is an empty result.

use std::path::{Path, PathBuf};

use skiff_bridge::traits::{CapturedImage, NativeCapture, NativePermissions, PlatformBridge};
use skiff_core::error::{Result, SkiffError};
use skiff_core::types::{CaptureSource, PermissionKind, PermissionStatus, PickedMedia};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Run one capture request end to end and return the materialized results.
pub fn run_capture(
    bridge: &dyn PlatformBridge,
    allow_multiple: bool,
    temp_dir: &Path,
) -> Vec<PickedMedia> {
    match capture_flow(bridge, allow_multiple) {
        Ok(images) => materialize_all(&images, temp_dir),
        Err(SkiffError::PickerCancelled) => {
            debug!("capture cancelled by the user");
            Vec::new()
        }
        Err(SkiffError::PermissionDenied(kind)) => {
            info!(%kind, "capture permission denied; picker not presented");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "capture flow unavailable");
            Vec::new()
        }
    }
}

/// Source choice, permission, picker. Returns the picked images still in
/// memory; an empty vector is a picker-level "nothing selected".
fn capture_flow(bridge: &dyn PlatformBridge, allow_multiple: bool) -> Result<Vec<CapturedImage>> {
    let source = bridge
        .choose_source(bridge.camera_available())?
        .ok_or(SkiffError::PickerCancelled)?;

    let kind = match source {
        CaptureSource::Camera => PermissionKind::Camera,
        CaptureSource::PhotoLibrary => PermissionKind::PhotoLibrary,
    };
    if bridge.request(kind)? == PermissionStatus::Denied {
        return Err(SkiffError::PermissionDenied(kind));
    }

    match source {
        CaptureSource::Camera => bridge
            .capture_photo()?
            .map(|image| vec![image])
            .ok_or(SkiffError::PickerCancelled),
        CaptureSource::PhotoLibrary => bridge.pick_photos(allow_multiple),
    }
}

/// Write each image to its own file, keeping selection order.
///
/// An item that fails to write is dropped from the result rather than
/// failing the whole capture.
pub fn materialize_all(images: &[CapturedImage], dir: &Path) -> Vec<PickedMedia> {
    images
        .iter()
        .filter_map(|image| match materialize(image, dir) {
            Ok(media) => Some(media),
            Err(e) => {
                warn!(error = %e, mime = %image.mime_type, "dropping item that failed to materialize");
                None
            }
        })
        .collect()
}

fn materialize(image: &CapturedImage, dir: &Path) -> Result<PickedMedia> {
    let file_name = format!("upload-{}.{}", Uuid::new_v4(), extension_for(&image.mime_type));
    let path: PathBuf = dir.join(file_name);
    std::fs::write(&path, &image.bytes)
        .map_err(|e| SkiffError::Materialization(format!("{}: {e}", path.display())))?;
    Ok(PickedMedia { path, mime_type: image.mime_type.clone() })
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/heic" => "heic",
        _ => "bin",
    }
}
