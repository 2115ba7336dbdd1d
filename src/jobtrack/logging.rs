use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Logs go to stderr so stdout stays reserved
/// for command output (and for the JSON stream in `serve`).
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` when verbose.
pub fn init(verbose: bool) {
    let default_level = if verbose { "jobtrack=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
