use crate::cli::args::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. Logs always go to stderr so stdout stays
/// clean for command output.
pub fn init(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => fmt()
            .with_env_filter(filter)
            .json()
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_target(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
    }
}
