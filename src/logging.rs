use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity flag.
///
/// Logs go to stderr, stdout belongs to the speed readout.
pub fn setup_tracing(verbosity_level: u8) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity_level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn level_for(verbosity_level: u8) -> LevelFilter {
    match verbosity_level {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
