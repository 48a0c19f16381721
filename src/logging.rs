use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. stdout is reserved for the report.
///
/// `RUST_LOG` wins when set; otherwise `--debug` picks the level.
pub(crate) fn init(debug: bool, use_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug {
            "txsummary=debug"
        } else {
            "txsummary=warn"
        })
    });

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(false)
        .without_time();

    // A second init (tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .try_init();
}
