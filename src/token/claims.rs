//! Claims carried by a token
//!
//! Claims are an untyped JSON object. Only two keys mean anything to the
//! validation pipeline: `exp` and `nbf`, both seconds since the Unix epoch.
//! A reserved key holding anything other than a JSON number is ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Claim key holding the expiration time
pub const EXPIRATION: &str = "exp";

/// Claim key holding the not-before time
pub const NOT_BEFORE: &str = "nbf";

/// How JSON numbers in claims are represented after decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberMode {
    /// Every number becomes a 64-bit float (integers above 2^53 lose precision)
    #[default]
    Float,

    /// Numbers keep the exact digits they were written with
    Exact,
}

/// Token claims
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Expiration time (`exp`) as a Unix timestamp
    pub fn expiration(&self) -> Option<i64> {
        self.0.get(EXPIRATION).and_then(timestamp)
    }

    /// Not-before time (`nbf`) as a Unix timestamp
    pub fn not_before(&self) -> Option<i64> {
        self.0.get(NOT_BEFORE).and_then(timestamp)
    }

    /// Set the expiration time (`exp`)
    pub fn set_expiration(&mut self, timestamp: i64) {
        self.0.insert(EXPIRATION.into(), timestamp.into());
    }

    /// Set the not-before time (`nbf`)
    pub fn set_not_before(&mut self, timestamp: i64) {
        self.0.insert(NOT_BEFORE.into(), timestamp.into());
    }

    /// Get a claim
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a claim, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a claim
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Whether a claim is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no claims
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All claims
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the claims, returning the underlying object
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Re-express every number according to `mode`
    pub(crate) fn apply_number_mode(&mut self, mode: NumberMode) {
        if mode == NumberMode::Float {
            self.0.values_mut().for_each(to_float);
        }
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Claims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Integer and float representations are both accepted; floats truncate
fn timestamp(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|float| float as i64))
}

fn to_float(value: &mut Value) {
    match value {
        Value::Number(number) => {
            if let Some(float) = number.as_f64().and_then(Number::from_f64) {
                *number = float;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(to_float),
        Value::Object(map) => map.values_mut().for_each(to_float),
        _ => {}
    }
}
