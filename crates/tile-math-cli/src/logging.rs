use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr.
///
/// RUST_LOG takes precedence. Without it, `verbose` selects `debug` for this
/// workspace and `warn` for everything else.
pub fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,tile_math=trace,tile_math_cli=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {err}");
    }
}

/// Log the binary name and version at debug level
pub fn log_version_info() {
    tracing::debug!(
        "{} {} (tile-math library)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
}
