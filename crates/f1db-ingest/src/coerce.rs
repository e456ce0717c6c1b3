//! Field coercion
//!
//! Converts raw textual cells from the source files into typed relational
//! values. Coercion is total: a cell that matches a null sentinel or fails to
//! parse becomes [`Value::Null`] with a debug-level diagnostic, never an
//! error. This mirrors the "invalid -> NULL" contract of the dataset: a
//! malformed lap count must load as absent, not as zero and not as a failed
//! run.

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

/// Date format used by the source files (e.g. "1985-01-07").
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time-of-day format used by the source files (e.g. "13:00:00").
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Default null sentinel token used by the source files.
pub const DEFAULT_NULL_SENTINEL: &str = r"\N";

/// Target type tag for a coerced cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    Date,
    Time,
    Text,
}

/// A typed relational value produced by coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// The set of textual tokens meaning "value absent"
///
/// The empty string is always treated as absent for non-text types; for text
/// it is a valid (empty) value, distinct from the sentinel.
#[derive(Debug, Clone)]
pub struct NullSentinels {
    tokens: Vec<String>,
}

impl Default for NullSentinels {
    fn default() -> Self {
        Self {
            tokens: vec![DEFAULT_NULL_SENTINEL.to_string()],
        }
    }
}

impl NullSentinels {
    /// Build a sentinel set from explicit tokens.
    pub fn new(tokens: impl IntoIterator<Item = String>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Whether the raw cell matches a configured sentinel token.
    pub fn matches(&self, raw: &str) -> bool {
        self.tokens.iter().any(|t| t == raw)
    }
}

/// Coerce a raw cell into a typed value.
///
/// Sentinel tokens map to null for every type tag. For numeric, date and
/// time tags an empty cell is also null, and a parse failure degrades to
/// null. Text passes through verbatim.
pub fn coerce(raw: &str, ty: FieldType, sentinels: &NullSentinels) -> Value {
    if sentinels.matches(raw) {
        return Value::Null;
    }

    match ty {
        FieldType::Text => Value::Text(raw.to_string()),
        _ if raw.is_empty() => Value::Null,
        FieldType::Integer => match raw.trim().parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => {
                debug!(cell = raw, "cell failed integer coercion, loading as NULL");
                Value::Null
            }
        },
        FieldType::Float => match raw.trim().parse::<f64>() {
            Ok(f) => Value::Float(f),
            Err(_) => {
                debug!(cell = raw, "cell failed float coercion, loading as NULL");
                Value::Null
            }
        },
        FieldType::Date => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(d) => Value::Date(d),
            Err(_) => {
                debug!(cell = raw, "cell failed date coercion, loading as NULL");
                Value::Null
            }
        },
        FieldType::Time => match NaiveTime::parse_from_str(raw, TIME_FORMAT) {
            Ok(t) => Value::Time(t),
            Err(_) => {
                debug!(cell = raw, "cell failed time coercion, loading as NULL");
                Value::Null
            }
        },
    }
}
