//! Shared helpers for integration tests

/// Installs a compact stdout subscriber once; later calls are no-ops.
///
/// `RUST_LOG` overrides the default level.
pub fn try_init_test_tracing(level_filter: tracing_subscriber::filter::LevelFilter) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level_filter.into())
                .from_env_lossy(),
        )
        .with_target(true)
        .compact()
        .try_init()
        .ok();
}
