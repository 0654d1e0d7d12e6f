use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prints the spans of webhook dispatch and directory searches to stdout, next to the `log` output
pub fn init_tracing_subscriber() {
    let tracing_subscriber_info = tracing_subscriber::filter::LevelFilter::from_level(Level::INFO);

    tracing_subscriber::registry()
        .with(tracing_subscriber_info)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE),
        )
        .init();
}
