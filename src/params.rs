//! Named bind parameters for one template invocation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::ParamValue;

/// Parameter map handed to the engine. Read-only during processing; a
/// missing entry is treated as a null value, never as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    map: HashMap<String, ParamValue>,
}

const NULL: ParamValue = ParamValue::Null;

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ```
    /// use sqlweave::Params;
    /// let params = Params::new().set("id", 42).set("name", "alice");
    /// assert_eq!(params.len(), 2);
    /// ```
    pub fn set(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.map.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.map.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Build a parameter map from a JSON object. Non-object values yield an
    /// empty map.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(fields) => fields
                .into_iter()
                .map(|(k, v)| (k, ParamValue::from(v)))
                .collect(),
            _ => Self::new(),
        }
    }

    pub(crate) fn value_or_null(&self, name: &str) -> &ParamValue {
        self.map.get(name).unwrap_or(&NULL)
    }
}

impl FromIterator<(String, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}
