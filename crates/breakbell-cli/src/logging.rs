use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log to stderr so the clock on stdout stays readable.
///
/// `BREAKBELL_LOG` takes a normal `EnvFilter` directive; without it the
/// level comes from the `-v` count.
pub fn init(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_env("BREAKBELL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();
}
