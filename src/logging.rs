use tracing_subscriber::EnvFilter;

/// Installs a global stderr subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Fails instead of panicking when a global subscriber is already set, which
/// is common when several test binaries share a harness.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
