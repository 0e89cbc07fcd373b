//! Opt-in tracing subscriber for relation and validation queries.
//!
//! The solver emits events under three targets:
//!
//! | target              | level   | events                                              |
//! |---------------------|---------|-----------------------------------------------------|
//! | `typemap::subtype`  | `trace` | every `is_subtype` verdict, origin mismatches        |
//! | `typemap::compat`   | `trace` | `fully_compatible` pairs whose origins differ        |
//! | `typemap::validate` | `trace` | `conforms` verdicts, the first failing element index |
//! | all three           | `debug` | depth ceiling hits, with the configured `limit`      |
//!
//! Expressions are recorded with their `Display` form (`sub`, `sup`,
//! `expected` fields), so a failed `Mapping[str, Optional[int]]` check shows
//! which nested argument rejected the value.
//!
//! `TYPEMAP_LOG` takes an `EnvFilter` directive (falling back to `RUST_LOG`);
//! `TYPEMAP_LOG_FORMAT` picks `text` (default), `tree` or `json`:
//!
//! ```bash
//! # Why did a subtype query fail? Nested verdicts as an indented tree.
//! TYPEMAP_LOG=typemap::subtype=trace TYPEMAP_LOG_FORMAT=tree cargo test
//!
//! # Ceiling hits only, one JSON object per line.
//! TYPEMAP_LOG=typemap=debug TYPEMAP_LOG_FORMAT=json my-service
//! ```
//!
//! Without either variable [`init_tracing`] installs nothing, so hosts that
//! own the global subscriber keep it.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const FILTER_VAR: &str = "TYPEMAP_LOG";
const FORMAT_VAR: &str = "TYPEMAP_LOG_FORMAT";

/// Output format for [`init_tracing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One line per event.
    Text,
    /// Nested checks indented under the query that issued them.
    Tree,
    /// Newline-delimited JSON, for log pipelines.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to [`LogFormat::Text`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(FORMAT_VAR).unwrap_or_default())
    }
}

fn filter_from_env() -> Option<EnvFilter> {
    match std::env::var(FILTER_VAR) {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() => Some(EnvFilter::from_default_env()),
        Err(_) => None,
    }
}

/// Install the global subscriber described by the environment.
///
/// Safe to call more than once: a subscriber installed earlier, by this
/// function or by the host, is left in place. Output goes to stderr.
pub fn init_tracing() {
    let Some(filter) = filter_from_env() else {
        return;
    };
    let format = LogFormat::from_env();

    let installed = match format {
        LogFormat::Tree => Registry::default()
            .with(filter)
            .with(
                tracing_tree::HierarchicalLayer::default()
                    .with_indent_amount(2)
                    .with_indent_lines(true)
                    .with_targets(true),
            )
            .try_init(),
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => Registry::default()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(target: "typemap", ?format, "tracing initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
    }
}
