use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header key selecting the signing method
pub const ALG: &str = "alg";

/// Header key naming the token format
pub const TYP: &str = "typ";

/// Value of the `typ` header for this format
pub const TOKEN_TYPE: &str = "NEWT";

/// Token header
///
/// Holds at least `typ` and `alg`; any extension fields a caller adds are kept
/// and serialized alongside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header(Map<String, Value>);

impl Header {
    /// Create an empty header
    pub fn new() -> Self {
        Self::default()
    }

    /// Algorithm identifier (`alg`), if present and a string
    pub fn algorithm(&self) -> Option<&str> {
        self.0.get(ALG).and_then(Value::as_str)
    }

    /// Token type (`typ`), if present and a string
    pub fn token_type(&self) -> Option<&str> {
        self.0.get(TYP).and_then(Value::as_str)
    }

    /// Get a header field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a header field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a header field
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Whether a header field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// All header fields
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the header, returning its fields
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Header {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
