use serde_json::{json, Value};

/// Selects the call shape produced for every operator and function
/// application, matching the two hooks of the library this tree shape was
/// distilled from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CallsMode {
    /// `{op: args}`, or `{op: {}}` when the call takes no arguments.
    Simple,
    /// `{"op": name, "args": [...], "kwargs": {...}}`; `args`/`kwargs` are
    /// only present when non-empty.
    Normal,
}

impl Default for CallsMode {
    fn default() -> Self {
        Self::Simple
    }
}

/// Configuration for a single [`crate::scrub`] call.
#[derive(Clone, Debug)]
pub struct ScrubOptions {
    /// The value substituted for every SQL `NULL` in the source.
    pub null: Value,
    /// The call shape used for every operator/function node.
    pub calls: CallsMode,
}

impl Default for ScrubOptions {
    fn default() -> Self {
        Self {
            null: json!({"null": {}}),
            calls: CallsMode::default(),
        }
    }
}
