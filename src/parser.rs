//! Token parsing and validation
//!
//! [`Parser::parse`] runs a fixed sequence of checks and stops at the first
//! failure:
//!
//! ```text
//! split into 3 segments       InvalidSegmentCount
//! decode + parse header       ContainsBearerPrefix / Malformed
//! decode + parse claims       Malformed
//! resolve `alg`               AlgUnspecified / AlgUnavailable
//! allow-list                  AlgNotAllowed
//! key callback                NoKeyFunc / KeyFunc
//! `exp`                       Expired
//! `nbf`                       NotYetValid
//! method verify               InvalidSignature
//! ```
//!
//! Apart from a wrong segment count, every failure hands back the token as far
//! as it was populated.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::algorithm::AlgorithmPolicy;
use crate::clock::{self, TimeFunc};
use crate::error::{BoxError, Error, ParseError};
use crate::keys::Key;
use crate::registry::{self, Registry};
use crate::token::{Claims, DELIMITER, Header, NumberMode, Token};
use crate::utils::base64url;

/// Result of a key resolution callback
pub type KeyResult = std::result::Result<Key, BoxError>;

/// Key resolution callback
///
/// Receives the token with header, claims and method populated (the signature
/// is not set yet) and returns the key to verify it with.
pub type KeyFunc<'a> = &'a dyn Fn(&Token) -> KeyResult;

const BEARER: &str = "bearer";

/// Token parser
///
/// The parser is configured once and can be reused (and shared across
/// threads) for any number of tokens.
#[derive(Clone)]
pub struct Parser {
    config_algorithms: AlgorithmPolicy,
    config_numbers: NumberMode,
    config_registry: Arc<Registry>,
    config_clock: TimeFunc,
}

impl Parser {
    /// Create a parser with no method restriction, float numbers, the
    /// process-wide registry and the system clock
    pub fn new() -> Self {
        Self {
            config_algorithms: AlgorithmPolicy::allow_all(),
            config_numbers: NumberMode::Float,
            config_registry: registry::global(),
            config_clock: clock::system(),
        }
    }

    /// Only accept tokens whose `alg` is in `methods`
    ///
    /// An empty list removes the restriction.
    pub fn valid_methods<I, S>(self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.algorithms(AlgorithmPolicy::allow_only(methods))
    }

    /// Configure the method policy
    pub fn algorithms(mut self, policy: AlgorithmPolicy) -> Self {
        self.config_algorithms = policy;
        self
    }

    /// Configure how claim numbers are decoded
    pub fn number_mode(mut self, mode: NumberMode) -> Self {
        self.config_numbers = mode;
        self
    }

    /// Decode claim numbers exactly (`true`) or as floats (`false`)
    pub fn use_json_number(self, exact: bool) -> Self {
        self.number_mode(if exact {
            NumberMode::Exact
        } else {
            NumberMode::Float
        })
    }

    /// Resolve methods from `registry` instead of the process-wide one
    pub fn registry(mut self, registry: Arc<Registry>) -> Self {
        self.config_registry = registry;
        self
    }

    /// Configure the time source used for `exp` and `nbf`
    pub fn clock<F>(mut self, now: F) -> Self
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        self.config_clock = Arc::new(now);
        self
    }

    /// The configured method policy
    pub fn policy(&self) -> &AlgorithmPolicy {
        &self.config_algorithms
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Parse and validate a token string
    ///
    /// `key_func` is called once, after the method has been resolved and
    /// accepted, to obtain the key for verification.
    pub fn parse<F>(&self, token: &str, key_func: F) -> std::result::Result<Token, ParseError>
    where
        F: Fn(&Token) -> KeyResult,
    {
        let key_func: KeyFunc<'_> = &key_func;
        self.parse_with(token, Some(key_func))
    }

    /// Parse and validate a token string with an optional key callback
    ///
    /// Without a callback the pipeline stops with [`Error::NoKeyFunc`] once the
    /// method has been resolved.
    #[instrument(level = "debug", skip_all)]
    pub fn parse_with(
        &self,
        token_str: &str,
        key_func: Option<KeyFunc<'_>>,
    ) -> std::result::Result<Token, ParseError> {
        let parts: Vec<&str> = token_str.split(DELIMITER).collect();
        let &[header_b64, claims_b64, signature_b64] = parts.as_slice() else {
            debug!(segments = parts.len(), "wrong number of segments");
            return Err(Error::InvalidSegmentCount.into());
        };
        debug!(segments = ?parts, "segments identified");

        let mut token = Token {
            raw: token_str.to_string(),
            ..Token::default()
        };

        // 1. Header
        token.header = match decode_header(header_b64) {
            Ok(header) => header,
            Err(DecodeFailure::Segment) if has_bearer_prefix(token_str) => {
                return reject(Error::ContainsBearerPrefix, token);
            }
            Err(_) => return reject(Error::Malformed, token),
        };

        // 2. Claims
        token.claims = match decode_claims(claims_b64, self.config_numbers) {
            Ok(claims) => claims,
            Err(_) => return reject(Error::Malformed, token),
        };

        // 3. Method
        let Some(alg) = token.header.algorithm().map(str::to_owned) else {
            return reject(Error::AlgUnspecified, token);
        };
        let Some(method) = self.config_registry.resolve(&alg) else {
            return reject(Error::AlgUnavailable, token);
        };
        token.method = Some(Arc::clone(&method));
        debug!(alg = method.alg(), "signing method resolved");

        // 4. Allow-list
        if !self.config_algorithms.is_allowed(method.alg()) {
            return reject(Error::AlgNotAllowed(method.alg().to_string()), token);
        }

        // 5. Key
        let Some(key_func) = key_func else {
            return reject(Error::NoKeyFunc, token);
        };
        let key = match key_func(&token) {
            Ok(key) => key,
            Err(err) => return reject(Error::key_func(err), token),
        };

        // 6. Time window
        let now = (self.config_clock)();
        if token.claims.expiration().is_some_and(|exp| now > exp) {
            return reject(Error::Expired, token);
        }
        if token.claims.not_before().is_some_and(|nbf| now < nbf) {
            return reject(Error::NotYetValid, token);
        }

        // 7. Verify
        token.signature = signature_b64.to_string();
        let signing_string = &token_str[..header_b64.len() + 1 + claims_b64.len()];
        if let Err(err) = method.verify(signing_string, &token.signature, &key) {
            debug!(error = %err, "signature verification failed");
            return reject(Error::InvalidSignature, token);
        }

        token.valid = true;
        debug!("token validated");
        Ok(token)
    }
}

/// Parse a token with a default [`Parser`]
pub fn parse<F>(token: &str, key_func: F) -> std::result::Result<Token, ParseError>
where
    F: Fn(&Token) -> KeyResult,
{
    Parser::new().parse(token, key_func)
}

fn reject(error: Error, token: Token) -> std::result::Result<Token, ParseError> {
    debug!(%error, "token rejected");
    Err(ParseError::new(error, Some(token)))
}

enum DecodeFailure {
    Segment,
    Json,
}

fn decode_header(segment: &str) -> std::result::Result<Header, DecodeFailure> {
    let bytes = base64url::decode_segment(segment).map_err(|_| DecodeFailure::Segment)?;
    serde_json::from_slice(&bytes).map_err(|_| DecodeFailure::Json)
}

fn decode_claims(segment: &str, mode: NumberMode) -> std::result::Result<Claims, DecodeFailure> {
    let bytes = base64url::decode_segment(segment).map_err(|_| DecodeFailure::Segment)?;
    let mut claims: Claims = serde_json::from_slice(&bytes).map_err(|_| DecodeFailure::Json)?;
    claims.apply_number_mode(mode);
    Ok(claims)
}

/// Case-insensitive check for a leading "bearer"
fn has_bearer_prefix(token_str: &str) -> bool {
    token_str
        .get(..BEARER.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(BEARER))
}
