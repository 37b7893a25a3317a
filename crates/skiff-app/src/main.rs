// SPDX-License-Identifier: Apache-2.0
//
// Skiff — native shell around an embedded web surface.
//
// Entry point. Initialises logging and configuration, then hands off to the
// webview host (when the `native` feature is linked).

mod settings;

#[cfg(feature = "native")]
mod native;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Skiff starting");

    let config = settings::load_config().unwrap_or_else(|| {
        let config = skiff_core::config::ShellConfig::default();
        if let Err(e) = settings::persist_config(&config) {
            tracing::warn!(error = %e, "could not write default config");
        }
        config
    });
    tracing::info!(start_url = %config.start_url, trusted = %config.trusted_host, "config loaded");

    #[cfg(feature = "native")]
    {
        if let Err(e) = native::run(config) {
            tracing::error!(error = %e, "webview host failed");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "native"))]
    {
        let _ = config;
        tracing::error!(
            "this build has no webview backend; rebuild with `--features native` to host a surface"
        );
        std::process::exit(2);
    }
}
