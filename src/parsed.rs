//! Parsed template output.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::ParamValue;

/// The engine's output: final SQL with positional `?` placeholders, plus
/// the values to bind in placeholder order. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSql {
    sql: String,
    names: Vec<String>,
    values: Vec<ParamValue>,
}

impl ParsedSql {
    pub(crate) fn new(sql: String, names: Vec<String>, values: Vec<ParamValue>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { sql, names, values }
    }

    /// Wrap raw SQL verbatim with no bindings (tolerant fallback mode).
    pub(crate) fn raw(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
            names: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values to bind, one per `?`, in left-to-right placeholder order.
    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }

    /// Parameter names aligned with [`values`](Self::values), for
    /// named-binding execution APIs.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// Name-keyed view of the bound values. When a parameter binds more
    /// than once the entries collapse to one (the value is identical).
    pub fn named_values(&self) -> HashMap<String, ParamValue> {
        self.names
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }

    pub fn command_type(&self) -> Option<CommandType> {
        CommandType::detect(&self.sql)
    }

    pub fn into_parts(self) -> (String, Vec<ParamValue>) {
        (self.sql, self.values)
    }
}

/// SQL command classification, sniffed from the leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandType {
    Select,
    Insert,
    Update,
    Delete,
}

impl CommandType {
    pub fn detect(sql: &str) -> Option<Self> {
        let first = sql.split_whitespace().next()?;
        match first.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "INSERT" => Some(Self::Insert),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandType::Select => write!(f, "SELECT"),
            CommandType::Insert => write!(f, "INSERT"),
            CommandType::Update => write!(f, "UPDATE"),
            CommandType::Delete => write!(f, "DELETE"),
        }
    }
}
