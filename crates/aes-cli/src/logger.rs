//! Tracing subscriber setup. Log lines go to stderr so stdout only carries results.

use tracing::{metadata::LevelFilter, Subscriber};
use tracing_subscriber::{
    layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Installs the global subscriber. `RUST_LOG` takes precedence over `default_level`.
pub fn init(default_level: LevelFilter) {
    tracing_subscriber::registry()
        .with(stderr_layer(default_level))
        .init();
}

fn stderr_layer<S>(default_level: LevelFilter) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .and_then(env_filter)
}
