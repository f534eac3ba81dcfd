#![forbid(unsafe_code)]

//! Run-time configuration forwarded to checkers
//!
//! A [`CheckConfig`] is an ordered mapping of named parameters. The execution engine
//! forwards the same configuration to every checker; each checker reads the keys it
//! understands and ignores the rest, so adding a parameter for one checker never
//! breaks another.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Named parameters passed to every checker invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckConfig(BTreeMap<String, Value>);

impl CheckConfig {
    /// Creates an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value under the same key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Looks up a parameter as its raw JSON value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Looks up a parameter as a float
    ///
    /// Integer values are widened; anything else returns None.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Looks up a parameter as a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Looks up a parameter as a bool
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Parses `KEY=VALUE` pairs as passed on the command line
    ///
    /// The value side is parsed as JSON when possible (`0.9`, `true`) and falls back
    /// to a plain string otherwise (`F90`). A pair without `=` is an error.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = CheckConfig::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, raw) = pair
                .split_once('=')
                .ok_or_else(|| format!("Invalid parameter '{}': expected KEY=VALUE", pair))?;
            if key.is_empty() {
                return Err(format!("Invalid parameter '{}': empty key", pair));
            }
            let value = serde_json::from_str::<Value>(raw)
                .unwrap_or_else(|_| Value::String(raw.to_string()));
            config.set(key, value);
        }
        Ok(config)
    }
}
