// SPDX-License-Identifier: Apache-2.0
//
// Navigation policy gate.
//
// Every outgoing navigation from the embedded page passes through here
// before the host honors it. Evaluation is pure and synchronous: the
// decision is returned promptly and any side effect (external open, overlay
// raise, proactive permission prompt) is carried out by the shell after the
// fact, never on the decision path.

use skiff_core::config::ShellConfig;
use skiff_core::types::{NavDecision, NavRequest, NavVerdict};
use tracing::debug;

/// Schemes the embedded surface is allowed to load at all.
const ALLOWED_SCHEMES: [&str; 3] = ["https", "about", "data"];

/// Ordered rule table deciding the fate of each navigation attempt.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    trusted_host: String,
    onboarding_marker: String,
    posting_paths: Vec<String>,
}

impl NavigationPolicy {
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            trusted_host: config.trusted_host.to_ascii_lowercase(),
            onboarding_marker: config.onboarding_marker.clone(),
            posting_paths: config.posting_paths.clone(),
        }
    }

    /// Evaluate one navigation request. First matching rule wins.
    pub fn evaluate(&self, request: &NavRequest) -> NavVerdict {
        let url = &request.url;

        // 1. Hard security boundary: never load arbitrary custom schemes.
        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            debug!(%url, scheme = url.scheme(), "navigation cancelled: scheme not allowed");
            return NavVerdict::plain(NavDecision::Cancel);
        }

        // 2. Reserved marker raises the native onboarding overlay.
        if url.as_str().contains(&self.onboarding_marker) {
            debug!(%url, "navigation intercepted: onboarding marker");
            return NavVerdict::plain(NavDecision::ShowOnboarding);
        }

        // 3. Content-posting pages load normally but trigger a proactive
        //    capture-permission prompt alongside.
        if self.posting_paths.iter().any(|p| url.path().contains(p.as_str())) {
            debug!(%url, "posting page: preflighting capture permissions");
            return NavVerdict {
                decision: NavDecision::Allow,
                preflight_capture_permissions: true,
            };
        }

        // 4. Foreign hosts are handed to the system browser. `about:` and
        //    `data:` URLs have no host and fall through.
        if let Some(host) = url.host_str() {
            if !self.host_is_trusted(host) {
                debug!(%url, host, "navigation redirected to external browser");
                return NavVerdict::plain(NavDecision::OpenExternal(url.clone()));
            }
        }

        // 5. In-place load on the trusted origin.
        NavVerdict::plain(NavDecision::Allow)
    }

    /// Exact host match or a dot-separated subdomain of the trusted host.
    fn host_is_trusted(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        host == self.trusted_host
            || host
                .strip_suffix(&self.trusted_host)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}
