//! Errors for newt
//!
//! Every failure in the codec and the validation pipeline has its own variant,
//! so callers can branch on the kind of failure (for example "merely expired"
//! versus "structurally broken") without looking at message text.

use std::sync::Arc;

use thiserror::Error;

use crate::token::Token;

/// Error returned by a key resolution callback
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// newt Errors
#[derive(Error, Debug, Clone)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Token contains an invalid number of segments")]
    InvalidSegmentCount,

    #[error("Token string should not contain 'bearer'")]
    ContainsBearerPrefix,

    #[error("Token is malformed")]
    Malformed,

    #[error("Segment is not valid base64url: {0}")]
    MalformedSegment(String),

    // ============================================================================
    // Method Errors
    // ============================================================================
    #[error("Signing method (alg) is unspecified")]
    AlgUnspecified,

    #[error("Signing method (alg) is unavailable")]
    AlgUnavailable,

    #[error("Signing method (alg) '{0}' is not allowed")]
    AlgNotAllowed(String),

    // ============================================================================
    // Key Errors
    // ============================================================================
    #[error("No key function was provided")]
    NoKeyFunc,

    /// The key resolution callback failed; its error is kept as-is
    #[error(transparent)]
    KeyFunc(Arc<dyn std::error::Error + Send + Sync + 'static>),

    #[error("Invalid key material: {0}")]
    KeyInit(String),

    // ============================================================================
    // Token Errors
    // ============================================================================
    #[error("Token is expired")]
    Expired,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Failed to serialize token segment: {0}")]
    Serialization(String),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("No token in request")]
    NoTokenInRequest,
}

impl Error {
    /// Wrap an error returned by a key resolution callback
    pub fn key_func(err: BoxError) -> Self {
        Error::KeyFunc(Arc::from(err))
    }

    /// The token itself could not be read (segments, encoding or JSON)
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::InvalidSegmentCount
                | Error::ContainsBearerPrefix
                | Error::Malformed
                | Error::MalformedSegment(_)
        )
    }

    /// The token was rejected by the `exp` check
    pub fn is_expired(&self) -> bool {
        matches!(self, Error::Expired)
    }

    /// The token was rejected by the `exp` or `nbf` check
    pub fn is_time_window(&self) -> bool {
        matches!(self, Error::Expired | Error::NotYetValid)
    }
}

/// Result type alias for newt operations
pub type Result<T> = std::result::Result<T, Error>;

/// A failed parse
///
/// Carries the first error the pipeline hit together with whatever part of the
/// token had been recovered by then. The token is absent only when the input
/// could not even be split into three segments.
#[derive(Error, Debug, Clone)]
#[error("{error}")]
pub struct ParseError {
    error: Error,
    token: Option<Box<Token>>,
}

impl ParseError {
    pub(crate) fn new(error: Error, token: Option<Token>) -> Self {
        Self {
            error,
            token: token.map(Box::new),
        }
    }

    /// The error that stopped the pipeline
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// The partially populated token, if one was built
    pub fn token(&self) -> Option<&Token> {
        self.token.as_deref()
    }

    /// Split into the error and the partial token
    pub fn into_parts(self) -> (Error, Option<Token>) {
        (self.error, self.token.map(|token| *token))
    }
}

impl From<Error> for ParseError {
    fn from(error: Error) -> Self {
        Self::new(error, None)
    }
}
