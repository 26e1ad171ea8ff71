/// Key material handed to signing methods
///
/// This module provides a small, typed stand-in for "whatever the method
/// needs":
/// - Cipher keys (key + initialization vector) for the AES method
/// - Shared secrets for HMAC methods
/// - No key at all, for methods that do not need one to verify
use std::fmt;

/// A key that can be used to sign or verify a token
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Key {
    /// No key material
    #[default]
    Empty,

    /// Shared secret for HMAC methods
    Secret(Vec<u8>),

    /// Block cipher key and initialization vector
    Cipher { key: Vec<u8>, iv: Vec<u8> },
}

impl Key {
    /// Create a shared secret from bytes
    pub fn secret(secret: impl Into<Vec<u8>>) -> Self {
        Key::Secret(secret.into())
    }

    /// Create a cipher key from key and IV bytes
    pub fn cipher(key: impl Into<Vec<u8>>, iv: impl Into<Vec<u8>>) -> Self {
        Key::Cipher {
            key: key.into(),
            iv: iv.into(),
        }
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            Key::Empty => "Empty",
            Key::Secret(_) => "Secret",
            Key::Cipher { .. } => "Cipher",
        }
    }

    /// Look up a named entry of the key material
    ///
    /// A cipher key exposes `"key"` and `"iv"`, a secret exposes `"key"`.
    pub fn entry(&self, name: &str) -> Option<&[u8]> {
        match (self, name) {
            (Key::Cipher { key, .. }, "key") => Some(key.as_slice()),
            (Key::Cipher { iv, .. }, "iv") => Some(iv.as_slice()),
            (Key::Secret(secret), "key") => Some(secret.as_slice()),
            _ => None,
        }
    }
}

// Never print key material
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Empty => write!(f, "Key::Empty"),
            Key::Secret(secret) => write!(f, "Key::Secret({} bytes)", secret.len()),
            Key::Cipher { key, iv } => write!(
                f,
                "Key::Cipher {{ key: {} bytes, iv: {} bytes }}",
                key.len(),
                iv.len()
            ),
        }
    }
}
