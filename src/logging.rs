//! Per-invocation structured logger.

use is_terminal::IsTerminal;
use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Build a subscriber writing `key=value` events to stderr.
///
/// Callers scope it with `tracing::subscriber::with_default`; nothing is
/// installed globally. An unparsable `filter` falls back to `info` and the
/// parse error is returned so the caller can report it once the subscriber
/// is active.
pub fn build_subscriber(filter: &str) -> (impl Subscriber + Send + Sync, Option<String>) {
    let (filter, rejected) = match EnvFilter::try_new(filter) {
        Ok(f) => (f, None),
        Err(e) => (EnvFilter::new("info"), Some(e.to_string())),
    };
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false),
    );
    (subscriber, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_falls_back() {
        let (subscriber, rejected) = build_subscriber("simrun=verbose");
        assert!(rejected.is_some());
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(tracing::Level::INFO));
            assert!(!tracing::enabled!(tracing::Level::DEBUG));
        });
    }

    #[test]
    fn test_filter_levels() {
        let (subscriber, rejected) = build_subscriber("warn");
        assert!(rejected.is_none());
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(tracing::Level::WARN));
            assert!(!tracing::enabled!(tracing::Level::INFO));
        });
    }
}
