use std::collections::HashSet;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::{
    error::Error,
    options::AllColumns,
};

/// The dialect tag used as half of the parser-cache key, mirroring the
/// source library's four named grammars (`common_parser`, `mysql_parser`,
/// `sqlserver_parser`, `bigquery_parser`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DialectTag {
    Common,
    MySql,
    SqlServer,
    BigQuery,
}

/// `(dialect, all_columns is "*")`: the cache key of spec §4.5.
type CacheKey = (DialectTag, bool);

/// Single process-wide lock serializing grammar "construction" and parse
/// execution, grounded on `parse_locker = Lock()` in the source library.
/// Held for the full duration of [`with_parser`], including the parse call
/// itself, since the source's `_parse` mutates shared scratch state
/// (`null_locations`, the `calls` hook) that this lock protects.
static PARSE_LOCK: Mutex<()> = Mutex::new(());

/// Memoizes the `(dialect, all_columns)` pairs already validated, mirroring
/// `lookup_parsers`. This Rust grammar has no per-dialect build cost to
/// amortize (it's fixed code, not a PEG compiled at runtime), so the cache
/// degenerates to recording validation outcomes rather than built grammars;
/// it is kept for structural parity with the source and because a future
/// dialect extension with real per-dialect setup cost would slot in here.
static LOOKUP: Lazy<Mutex<HashSet<CacheKey>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// Validates `all_columns`, records the `(dialect, all_columns)` pair in the
/// lookup cache, and runs `body` under the single process-wide parse lock.
pub(crate) fn with_parser<T>(
    dialect: DialectTag,
    all_columns: Option<&str>,
    body: impl FnOnce(Option<AllColumns>) -> Result<T, Error>,
) -> Result<T, Error> {
    let _guard = PARSE_LOCK.lock();
    let validated = AllColumns::validate(all_columns)?;
    let key = (dialect, validated.is_some());
    LOOKUP.lock().insert(key);
    body(validated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_all_columns_other_than_star() {
        let result = with_parser(DialectTag::Common, Some("all"), |_| Ok(()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn accepts_absent_and_star() {
        assert!(with_parser(DialectTag::Common, None, |_| Ok(())).is_ok());
        assert!(with_parser(DialectTag::Common, Some("*"), |_| Ok(())).is_ok());
    }
}
