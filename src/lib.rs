pub mod config;
pub mod error;
pub mod imaging;
pub mod metrics;
pub mod provider;
pub mod relay;
pub mod server;

/// Process-level helpers
pub mod util {
    use tracing_subscriber::EnvFilter;

    /// Install the global tracing subscriber. `RUST_LOG` wins over the
    /// configured level
    pub fn init_tracing(default_level: &str) {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
