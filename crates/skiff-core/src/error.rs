// SPDX-License-Identifier: Apache-2.0
//
// Unified error types for Skiff.

use thiserror::Error;

use crate::types::PermissionKind;

/// Top-level error type for all Skiff operations.
///
/// Nothing in this subsystem is fatal to the process: the worst outcome of
/// any of these is an empty result delivered to the page or a static
/// fallback document.
#[derive(Debug, Error)]
pub enum SkiffError {
    // -- Bridge call handling --
    #[error("malformed bridge payload: {0}")]
    MalformedPayload(String),

    // -- Capture / permissions --
    #[error("permission denied for {0}")]
    PermissionDenied(PermissionKind),

    #[error("picker cancelled")]
    PickerCancelled,

    #[error("failed to materialize captured media: {0}")]
    Materialization(String),

    // -- Page loading --
    #[error("page load failed: {0}")]
    LoadFailure(String),

    // -- Plumbing --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SkiffError>;
