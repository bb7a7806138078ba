use std::sync::Arc;

use serde_json::{json, Value};
use sqlcanon_scrub::CallsMode;

use crate::error::{ConfigError, Error};

/// A validated `all_columns` configuration value: the only value this can
/// hold is the literal wildcard `"*"`, since that's the only non-default
/// value spec §6's option table accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AllColumns;

impl AllColumns {
    /// Validates a raw `all_columns` option, per spec §6: only `None` or
    /// `Some("*")` are accepted, everything else is a `ConfigError`.
    pub(crate) fn validate(raw: Option<&str>) -> Result<Option<AllColumns>, Error> {
        match raw {
            None => Ok(None),
            Some("*") => Ok(Some(AllColumns)),
            Some(other) => Err(ConfigError::InvalidAllColumns(other.to_string()).into()),
        }
    }
}

/// Configuration for a single `parse`/`parse_mysql`/`parse_sqlserver`/
/// `parse_bigquery` call, per spec §6's option table.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// The value substituted for every SQL `NULL` in the source.
    pub null: Value,
    /// The call shape used for every operator/function node.
    pub calls: CallsMode,
    /// Raw `all_columns` option; validated to `None` or `Some("*")` before
    /// use, anything else is rejected with `ConfigError::InvalidAllColumns`.
    pub all_columns: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            null: json!({"null": {}}),
            calls: CallsMode::default(),
            all_columns: None,
        }
    }
}

/// Re-exported so callers don't need a direct `sqlcanon-fmt` dependency.
pub use sqlcanon_fmt::FormatOptions;

/// Builds the `should_quote` field of a [`FormatOptions`] from a plain
/// closure, for callers who'd rather not spell out the `Arc<dyn Fn(..)>`.
pub fn should_quote(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Arc<dyn Fn(&str) -> bool + Send + Sync> {
    Arc::new(f)
}
