#![cfg(feature = "http")]
//! Token extraction from HTTP requests
//!
//! Covers the Authorization header, query strings, urlencoded and multipart
//! form bodies, and requests that carry no token at all.

use http::Request;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use newt::*;
use serde_json::json;

fn cipher_key() -> Key {
    Key::cipher(*b"0123456789abcdef", *b"0123456789abcdef")
}

fn signed() -> String {
    let mut token = Token::new(Aes128);
    token.claims.insert("foo", "bar");
    token.signed_string(&cipher_key()).unwrap()
}

// ============================================================================
// Authorization Header
// ============================================================================

#[test]
fn test_parses_bearer_header() {
    let request = Request::builder()
        .uri("/api")
        .header(AUTHORIZATION, format!("Bearer {}", signed()))
        .body(Vec::new())
        .unwrap();

    let token = parse_from_request(&request, |_| Ok(cipher_key())).unwrap();
    assert!(token.valid);
    assert_eq!(token.claims.get("foo"), Some(&json!("bar")));
}

// ============================================================================
// Form Values
// ============================================================================

#[test]
fn test_parses_query_parameter() {
    let request = Request::builder()
        .uri(format!("/api?page=2&access_token={}", signed()))
        .body(Vec::new())
        .unwrap();

    let token = Parser::new()
        .valid_methods([Aes128::ALG])
        .parse_from_request(&request, |_| Ok(cipher_key()))
        .unwrap();
    assert!(token.valid);
}

#[test]
fn test_parses_form_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(format!("access_token={}", signed()))
        .unwrap();

    assert!(extract_token(&request).is_ok());
    let token = parse_from_request(&request, |_| Ok(cipher_key())).unwrap();
    assert!(token.valid);
}

// An oversized body is skipped but the query string is still searched
#[test]
fn test_oversized_body_falls_back_to_query() {
    let mut body = b"access_token=from.the.body&pad=".to_vec();
    body.resize(10_000_001, b'x');

    let request = Request::builder()
        .method("POST")
        .uri("/?access_token=from.query.string")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body)
        .unwrap();

    assert_eq!(extract_token(&request).unwrap(), "from.query.string");
}

#[test]
fn test_parses_multipart_form_body() {
    let body = format!(
        "--XYZ\r\n\
         Content-Disposition: form-data; name=\"note\"\r\n\
         \r\n\
         hello\r\n\
         --XYZ\r\n\
         Content-Disposition: form-data; name=\"access_token\"\r\n\
         \r\n\
         {}\r\n\
         --XYZ--\r\n",
        signed()
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
        .body(body)
        .unwrap();

    assert_eq!(extract_token(&request).unwrap(), signed());
    let token = parse_from_request(&request, |_| Ok(cipher_key())).unwrap();
    assert!(token.valid);
    assert_eq!(token.claims.get("foo"), Some(&json!("bar")));
}

// ============================================================================
// Missing or Invalid Tokens
// ============================================================================

#[test]
fn test_missing_token_is_reported_without_parsing() {
    let request = Request::builder().uri("/").body(Vec::new()).unwrap();

    let err = parse_from_request(&request, |_| Ok(cipher_key())).unwrap_err();
    assert!(matches!(err.error(), Error::NoTokenInRequest));
    assert!(err.token().is_none());
}

// Extraction errors and parse errors are reported the same way
#[test]
fn test_invalid_token_in_header_is_parse_error() {
    let request = Request::builder()
        .uri("/")
        .header(AUTHORIZATION, "Bearer a.b")
        .body(Vec::new())
        .unwrap();

    let err = parse_from_request(&request, |_| Ok(cipher_key())).unwrap_err();
    assert!(matches!(err.error(), Error::InvalidSegmentCount));
}
