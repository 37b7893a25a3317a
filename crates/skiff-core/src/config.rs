// SPDX-License-Identifier: Apache-2.0
//
// Shell configuration.
//
// One Skiff build serves one web property; everything property-specific
// (origin, marker paths, user agent) lives here so the shell logic stays
// generic.

use serde::{Deserialize, Serialize};
use url::Url;

/// Persistent shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// First page loaded into the web surface.
    pub start_url: Url,
    /// The single origin whose navigations proceed in place. Exact host or
    /// any of its subdomains; everything else is handed to the system
    /// browser.
    pub trusted_host: String,
    /// Reserved URL marker: navigating to a URL containing this string
    /// raises the native onboarding overlay instead of loading.
    pub onboarding_marker: String,
    /// Path patterns for content-posting pages; matching navigations
    /// proactively prompt for capture permissions while loading.
    pub posting_paths: Vec<String>,
    /// Page loaded after the user accepts the onboarding overlay.
    pub post_onboarding_url: Option<Url>,
    /// User-agent string announced to the page as the native-shell identity.
    pub user_agent: String,
    /// How long the transient offline banner stays up, in seconds.
    pub offline_banner_secs: u64,
    /// Bounded timeout for the initial page load, in seconds.
    pub load_timeout_secs: u64,
    /// Prefer cached content for the initial request when the platform
    /// request API exposes a cache policy (host concern).
    pub prefer_cached_content: bool,
    /// In-memory HTTP cache capacity, in megabytes (host concern).
    pub cache_memory_mb: u64,
    /// On-disk HTTP cache capacity, in megabytes (host concern).
    pub cache_disk_mb: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_url: Url::parse("https://example.com/welcome")
                .expect("default start URL is valid"),
            trusted_host: "example.com".into(),
            onboarding_marker: "/native/app-ready".into(),
            posting_paths: vec!["/post".into()],
            post_onboarding_url: Some(
                Url::parse("https://example.com/home").expect("default home URL is valid"),
            ),
            user_agent: "SkiffShell/0.2 (native)".into(),
            offline_banner_secs: 3,
            load_timeout_secs: 30,
            prefer_cached_content: true,
            cache_memory_mb: 50,
            cache_disk_mb: 200,
        }
    }
}
