//! Token extraction from HTTP requests
//!
//! Looks in two places, in order:
//!
//! 1. an `Authorization: Bearer <token>` header (scheme matched
//!    case-insensitively);
//! 2. the first `access_token` form value. Form values come from the query
//!    string and from an `application/x-www-form-urlencoded` body (`POST`,
//!    `PUT` or `PATCH`) or a `multipart/form-data` body. Urlencoded body
//!    values are seen before query values; multipart values after them.
//!
//! An empty first value counts as no token. Bodies larger than
//! [`MAX_FORM_BODY_SIZE`] are not read; the query string is still consulted.

use std::convert::Infallible;

use futures::{executor, future, stream};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request};

use crate::error::{Error, ParseError, Result};
use crate::limits::MAX_FORM_BODY_SIZE;
use crate::parser::{KeyResult, Parser};
use crate::token::Token;

const BEARER_SCHEME: &str = "bearer ";
const ACCESS_TOKEN: &str = "access_token";
const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Find the token string in a request without parsing it
pub fn extract_token<B>(request: &Request<B>) -> Result<String>
where
    B: AsRef<[u8]>,
{
    if let Some(token) = from_authorization(request) {
        return Ok(token.to_string());
    }

    form_values(request)
        .into_iter()
        .next()
        .filter(|token| !token.is_empty())
        .ok_or(Error::NoTokenInRequest)
}

/// Extract the token from a request and parse it with a default [`Parser`]
pub fn parse_from_request<B, F>(
    request: &Request<B>,
    key_func: F,
) -> std::result::Result<Token, ParseError>
where
    B: AsRef<[u8]>,
    F: Fn(&Token) -> KeyResult,
{
    Parser::new().parse_from_request(request, key_func)
}

impl Parser {
    /// Extract the token from a request and parse it
    ///
    /// Fails with [`Error::NoTokenInRequest`] (and no token) when the request
    /// carries none; the parser is not invoked in that case.
    pub fn parse_from_request<B, F>(
        &self,
        request: &Request<B>,
        key_func: F,
    ) -> std::result::Result<Token, ParseError>
    where
        B: AsRef<[u8]>,
        F: Fn(&Token) -> KeyResult,
    {
        let token = extract_token(request)?;
        self.parse(&token, key_func)
    }
}

fn from_authorization<B>(request: &Request<B>) -> Option<&str> {
    let value = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let scheme = value.get(..BEARER_SCHEME.len())?;
    if scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        Some(&value[BEARER_SCHEME.len()..])
    } else {
        tracing::debug!("authorization header is not a bearer token");
        None
    }
}

/// Every `access_token` value of the request, in lookup order
fn form_values<B>(request: &Request<B>) -> Vec<String>
where
    B: AsRef<[u8]>,
{
    let query = request
        .uri()
        .query()
        .map(|query| urlencoded_values(query.as_bytes()))
        .unwrap_or_default();

    let Some(content_type) = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return query;
    };
    let mime = content_type.split(';').next().unwrap_or_default().trim();

    let body = request.body().as_ref();
    if body.len() > MAX_FORM_BODY_SIZE {
        tracing::debug!(size = body.len(), "form body too large, skipped");
        return query;
    }

    if mime.eq_ignore_ascii_case(URLENCODED) && accepts_form_body(request.method()) {
        let mut values = urlencoded_values(body);
        values.extend(query);
        values
    } else if mime.eq_ignore_ascii_case(MULTIPART) {
        let mut values = query;
        values.extend(multipart_values(content_type, body));
        values
    } else {
        query
    }
}

fn accepts_form_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

fn urlencoded_values(encoded: &[u8]) -> Vec<String> {
    form_urlencoded::parse(encoded)
        .filter(|(name, _)| name == ACCESS_TOKEN)
        .map(|(_, value)| value.into_owned())
        .collect()
}

/// Text parts named `access_token`; file uploads are not form values
fn multipart_values(content_type: &str, body: &[u8]) -> Vec<String> {
    let boundary = match multer::parse_boundary(content_type) {
        Ok(boundary) => boundary,
        Err(err) => {
            tracing::debug!(error = %err, "multipart body without a usable boundary");
            return Vec::new();
        }
    };

    let chunks = stream::once(future::ready(Ok::<_, Infallible>(body.to_vec())));
    let mut multipart = multer::Multipart::new(chunks, boundary);

    executor::block_on(async move {
        let mut values = Vec::new();
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(err) => {
                    tracing::debug!(error = %err, "multipart body is malformed");
                    break;
                }
            };

            let wanted = field.name() == Some(ACCESS_TOKEN) && field.file_name().is_none();
            if !wanted {
                continue;
            }
            match field.text().await {
                Ok(value) => values.push(value),
                Err(err) => {
                    tracing::debug!(error = %err, "multipart field unreadable");
                    break;
                }
            }
        }
        values
    })
}
