//! Typed parameter values for template bindings.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value bound to a template parameter.
///
/// Values never appear in generated SQL text; they only travel through the
/// ordered bind list of a [`ParsedSql`](crate::parsed::ParsedSql).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Uuid(Uuid),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// List of values for IN (...) markers.
    List(Vec<ParamValue>),
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Numeric view of the value, when it has one. Only genuinely numeric
    /// values qualify; numeric-looking strings still compare as text.
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(n) => Some(*n as f64),
            ParamValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Plain-text rendering used by condition comparison. Strings are
    /// unquoted here, unlike [`Display`](std::fmt::Display).
    pub(crate) fn compare_text(&self) -> String {
        match self {
            ParamValue::Null => "null".to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::Float(n) => n.to_string(),
            ParamValue::String(s) => s.clone(),
            ParamValue::Uuid(u) => u.to_string(),
            ParamValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            ParamValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            ParamValue::List(items) => items
                .iter()
                .map(ParamValue::compare_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Null => write!(f, "NULL"),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Float(n) => write!(f, "{}", n),
            ParamValue::String(s) => write!(f, "'{}'", s),
            ParamValue::Uuid(u) => write!(f, "'{}'", u),
            ParamValue::Date(d) => write!(f, "'{}'", d.format("%Y-%m-%d")),
            ParamValue::DateTime(dt) => write!(f, "'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
            ParamValue::List(items) => {
                write!(f, "(")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Int(n as i64)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Float(n)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<Uuid> for ParamValue {
    fn from(u: Uuid) -> Self {
        ParamValue::Uuid(u)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(d: NaiveDate) -> Self {
        ParamValue::Date(d)
    }
}

impl From<NaiveDateTime> for ParamValue {
    fn from(dt: NaiveDateTime) -> Self {
        ParamValue::DateTime(dt)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => ParamValue::Null,
        }
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        ParamValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ParamValue::Null,
            serde_json::Value::Bool(b) => ParamValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::Int(i),
                None => ParamValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ParamValue::String(s),
            serde_json::Value::Array(items) => {
                ParamValue::List(items.into_iter().map(Into::into).collect())
            }
            other => ParamValue::String(other.to_string()),
        }
    }
}
