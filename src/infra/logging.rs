use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Diagnostics go to stderr so stdout stays
/// clean for previews and `--json`.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` for this crate
/// with `--verbose`.
pub fn init(verbose: bool, no_color: bool) {
    let default = if verbose { "warn,foldup=debug" } else { "warn" };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .try_init();
}
