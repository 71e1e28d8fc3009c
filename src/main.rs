//! Portfolio site client
//!
//! Launches the Dioxus app with whichever renderer feature is enabled
//! (`web` for the site itself, `desktop` for local previews).

use portfolio_client::app::App;

fn main() {
    // The web renderer installs its own console logger on launch
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "portfolio_client=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();

        tracing::info!(
            "Starting portfolio client v{} ({})",
            env!("SITE_VERSION"),
            env!("SITE_GIT_SHA")
        );
    }

    #[cfg(any(feature = "web", feature = "desktop"))]
    dioxus::launch(App);

    #[cfg(not(any(feature = "web", feature = "desktop")))]
    {
        let _ = App;
        tracing::error!("No renderer compiled in; rebuild with --features web or --features desktop");
        std::process::exit(1);
    }
}
