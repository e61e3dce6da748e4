use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber.
///
/// A valid `RUST_LOG` replaces the defaults entirely. Otherwise the service
/// logs its own targets at `info` (`debug` when `verbose`), and one-shot CLI
/// commands stay quiet so their tables are not interleaved with log lines.
pub fn init_logging(verbose: bool, serving: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_subscriber(verbose, serving, directives.as_deref()).init();
}

fn build_subscriber(
    verbose: bool,
    serving: bool,
    directives: Option<&str>,
) -> impl Subscriber + Send + Sync {
    let (app_filter, env_filter) = match directives.and_then(|d| EnvFilter::try_new(d).ok()) {
        Some(env_filter) => (None, env_filter),
        None => {
            let (level_filter, level) = match (verbose, serving) {
                (true, _) => (LevelFilter::DEBUG, "debug"),
                (false, true) => (LevelFilter::INFO, "info"),
                (false, false) => (LevelFilter::OFF, "off"),
            };
            let targets = Targets::new()
                .with_target("stockdesk", level_filter)
                .with_target("tower_http", level_filter);
            (Some(targets), EnvFilter::new(level))
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time())
        .with(app_filter)
        .with(env_filter)
}
