// SPDX-License-Identifier: Apache-2.0
//
// Skiff — Native platform capability abstractions.
//
// The shell never talks to an OS SDK directly; every capability (permission
// prompts, capture pickers, share sheet, system browser, reachability) sits
// behind a narrow trait defined here.

use std::sync::Arc;

pub mod stub;
pub mod traits;

/// Retrieves the bridge implementation for the current build.
///
/// Real device bridges are linked in by the embedding application; every
/// in-tree build gets the stub so desktop and CI runs stay functional
/// (capabilities degrade to unavailable rather than failing to build).
pub fn platform_bridge() -> Arc<dyn traits::PlatformBridge> {
    Arc::new(stub::StubBridge)
}
