//! # newt - Compact Signed Tokens
//!
//! > Create, sign, parse and validate NEWT tokens.
//!
//! A NEWT token is three base64url segments joined by `.`: a JSON header, a
//! JSON claims object and a method-specific signature segment. The header's
//! `alg` field names the signing method that produced (and verifies) the
//! third segment.
//!
//! ## Quick Start
//!
//! ```rust
//! use newt::{Aes128, Key, Parser, Token};
//!
//! let key = Key::cipher(*b"0123456789abcdef", *b"0123456789abcdef");
//!
//! let mut token = Token::new(Aes128);
//! token.claims.insert("sub", "user123");
//! let signed = token.signed_string(&key)?;
//!
//! let parsed = Parser::new()
//!     .valid_methods(["AES128"])
//!     .parse(&signed, |_| Ok(key.clone()))
//!     .map_err(|err| err.into_parts().0)?;
//!
//! assert!(parsed.valid);
//! assert_eq!(parsed.claims.get("sub").and_then(|v| v.as_str()), Some("user123"));
//! # Ok::<(), newt::Error>(())
//! ```
//!
//! ## Parsing Flow
//!
//! ```text
//! token string
//!     │ split on '.'             (exactly 3 segments)
//!     ▼
//! header, claims decoded        (base64url + JSON)
//!     │ resolve `alg`            (registry lookup)
//!     ▼
//! method allowed?               (AlgorithmPolicy)
//!     │ key callback
//!     ▼
//! exp / nbf checked             (clock)
//!     │ method verify
//!     ▼
//! Token { valid: true, .. }
//! ```
//!
//! Every failure after the split returns a [`ParseError`] that still carries
//! the partially populated token, so callers can inspect the header or claims
//! of a rejected token.
//!
//! ## Signing Methods
//!
//! | `alg` | Method | Verifies signature |
//! |-------|--------|--------------------|
//! | `AES128` | AES-128 in CFB mode over the signing string | no |
//! | `HS256` | HMAC-SHA256 | yes |
//!
//! Further methods implement [`SigningMethod`] and are added to a
//! [`Registry`], either the process-wide one or one bound to a parser.
//!
//! ## Security
//!
//! ### AES128 does not authenticate
//!
//! The `AES128` method encrypts the signing string into the third segment but
//! its verification accepts any segment. A token bearing `AES128` is only as
//! trustworthy as whatever the caller checks in its key callback and claims.
//! Use `HS256` (and restrict the parser to it) when the token must be
//! tamper-evident.
//!
//! ### Method restriction
//!
//! The header chooses the method. Configure [`Parser::valid_methods`] so a
//! token cannot select a method the application did not intend to accept.
//!
//! ## Features
//!
//! - `http` (default): extract tokens from [`http::Request`] values through
//!   the `Authorization` header or an `access_token` form field.

// Core modules
pub mod error;
pub mod utils;

// Signing methods
pub mod algorithm;
pub mod keys;
pub mod registry;

// Token model
pub mod token;

// Parsing
pub mod clock;
pub mod parser;

mod limits;

// Request extraction
#[cfg(feature = "http")]
pub mod request;

// ============================================================================
// PUBLIC API
// ============================================================================

// Creating and parsing tokens
pub use parser::{KeyFunc, KeyResult, Parser, parse};
pub use token::{Claims, Header, NumberMode, Token};

// Signing methods and keys
pub use algorithm::{Aes128, AlgorithmPolicy, Hs256, SigningMethod};
pub use keys::Key;
pub use registry::{Registry, get_signing_method, register_signing_method};

// Errors
pub use error::{BoxError, Error, ParseError, Result};

// Configuration
pub use clock::TimeFunc;

#[cfg(feature = "http")]
pub use request::{extract_token, parse_from_request};
