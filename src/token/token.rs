//! The token entity
//!
//! A `Token` is produced two ways: [`Token::new`] builds a fresh token to be
//! signed, and [`Parser::parse`](crate::Parser::parse) fills one in from an
//! incoming string. A parsed token is only trustworthy when `valid` is set.

use std::fmt;
use std::sync::Arc;

use tracing::instrument;

use crate::algorithm::SigningMethod;
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::token::header::{ALG, TOKEN_TYPE, TYP};
use crate::token::{Claims, Header};
use crate::utils::base64url;

/// Segment delimiter
pub(crate) const DELIMITER: char = '.';

/// A NEWT token
#[derive(Clone, Default)]
pub struct Token {
    /// The raw token string; set when parsing
    pub raw: String,

    /// The signing method used, or to be used
    pub method: Option<Arc<dyn SigningMethod>>,

    /// First segment
    pub header: Header,

    /// Second segment
    pub claims: Claims,

    /// Third segment; set when parsing
    pub signature: String,

    /// Set only by a fully successful parse
    pub valid: bool,
}

impl Token {
    /// Create a token to be signed with `method`
    ///
    /// The header is initialized with `typ` and `alg`; claims start empty.
    pub fn new<M>(method: M) -> Self
    where
        M: SigningMethod + 'static,
    {
        Self::with_method(Arc::new(method))
    }

    /// Create a token for an already shared method (e.g. one resolved from a
    /// registry)
    pub fn with_method(method: Arc<dyn SigningMethod>) -> Self {
        let mut header = Header::new();
        header.insert(TYP, TOKEN_TYPE);
        header.insert(ALG, method.alg());

        Self {
            method: Some(method),
            header,
            ..Self::default()
        }
    }

    /// Algorithm identifier of the bound method, falling back to the header
    pub fn alg(&self) -> Option<&str> {
        match &self.method {
            Some(method) => Some(method.alg()),
            None => self.header.algorithm(),
        }
    }

    /// Header and claims, each JSON-encoded and segment-encoded, joined with `.`
    pub fn signing_string(&self) -> Result<String> {
        let header = serde_json::to_vec(&self.header)
            .map_err(|e| Error::Serialization(format!("header: {e}")))?;
        let claims = serde_json::to_vec(&self.claims)
            .map_err(|e| Error::Serialization(format!("claims: {e}")))?;

        Ok(format!(
            "{}{DELIMITER}{}",
            base64url::encode_segment(header),
            base64url::encode_segment(claims)
        ))
    }

    /// The complete token string: signing string plus the method's segment
    ///
    /// Does not mark the token valid; only parsing does that.
    #[instrument(level = "debug", skip_all, fields(alg = self.alg()))]
    pub fn signed_string(&self, key: &Key) -> Result<String> {
        let method = self.method.as_ref().ok_or(Error::AlgUnspecified)?;
        let signing_string = self.signing_string()?;
        let signature = method.sign(&signing_string, key)?;

        tracing::debug!("token signed");
        Ok(format!("{signing_string}{DELIMITER}{signature}"))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("raw", &self.raw)
            .field("method", &self.method.as_ref().map(|method| method.alg()))
            .field("header", &self.header)
            .field("claims", &self.claims)
            .field("signature", &self.signature)
            .field("valid", &self.valid)
            .finish()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
            && self.method.as_ref().map(|method| method.alg())
                == other.method.as_ref().map(|method| method.alg())
            && self.header == other.header
            && self.claims == other.claims
            && self.signature == other.signature
            && self.valid == other.valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{Aes128, Hs256};
    use serde_json::json;

    const KEY: &[u8; 16] = b"0123456789abcdef";

    #[test]
    fn test_new_sets_header() {
        let token = Token::new(Aes128);

        assert_eq!(token.header.token_type(), Some("NEWT"));
        assert_eq!(token.header.algorithm(), Some("AES128"));
        assert_eq!(token.alg(), Some("AES128"));
        assert!(token.claims.is_empty());
        assert!(token.raw.is_empty());
        assert!(token.signature.is_empty());
        assert!(!token.valid);
    }

    #[test]
    fn test_signing_string_is_header_then_claims() {
        let mut token = Token::new(Aes128);
        token.claims.insert("foo", "bar");

        let signing_string = token.signing_string().unwrap();
        let (header, claims) = signing_string.split_once('.').unwrap();

        assert_eq!(
            base64url::decode_segment_string(header).unwrap(),
            r#"{"alg":"AES128","typ":"NEWT"}"#
        );
        assert_eq!(
            base64url::decode_segment_string(claims).unwrap(),
            r#"{"foo":"bar"}"#
        );
    }

    #[test]
    fn test_signing_string_is_canonical() {
        let mut first = Token::new(Hs256);
        first.claims.insert("b", 2);
        first.claims.insert("a", 1);

        let mut second = Token::new(Hs256);
        second.claims.insert("a", 1);
        second.claims.insert("b", 2);

        assert_eq!(
            first.signing_string().unwrap(),
            second.signing_string().unwrap()
        );
    }

    #[test]
    fn test_signed_string_has_three_segments() {
        let mut token = Token::new(Aes128);
        token.claims.insert("foo", "bar");

        let signed = token.signed_string(&Key::cipher(*KEY, *KEY)).unwrap();
        let parts: Vec<&str> = signed.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(!parts[2].is_empty());
        assert!(signed.starts_with(&token.signing_string().unwrap()));

        // signing never marks the token valid
        assert!(!token.valid);
    }

    #[test]
    fn test_signed_string_decrypts_to_signing_string() {
        let mut token = Token::new(Aes128);
        token.claims.insert("foo", "bar");
        let key = Key::cipher(*KEY, *KEY);

        let signed = token.signed_string(&key).unwrap();
        let signature = signed.rsplit('.').next().unwrap();
        let opened = Aes128.open(signature, &key).unwrap();

        assert_eq!(opened, token.signing_string().unwrap().as_bytes());
    }

    #[test]
    fn test_signed_string_key_error() {
        let token = Token::new(Aes128);
        let result = token.signed_string(&Key::cipher(b"short".to_vec(), *KEY));
        assert!(matches!(result, Err(Error::KeyInit(_))));
    }

    #[test]
    fn test_signed_string_without_method() {
        let token = Token::default();
        assert!(matches!(
            token.signed_string(&Key::Empty),
            Err(Error::AlgUnspecified)
        ));
    }

    #[test]
    fn test_extension_header_fields_are_serialized() {
        let mut token = Token::new(Hs256);
        token.header.insert("kid", "key-1");

        let signing_string = token.signing_string().unwrap();
        let header = signing_string.split('.').next().unwrap();
        let decoded: serde_json::Value =
            serde_json::from_slice(&base64url::decode_segment(header).unwrap()).unwrap();
        assert_eq!(
            decoded,
            json!({"alg": "HS256", "typ": "NEWT", "kid": "key-1"})
        );
    }
}
