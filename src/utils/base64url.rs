//! Base64URL segment codec per RFC 4648
//!
//! Segments are written without `=` padding because `.` already delimits the
//! fields of a token and padding would otherwise need escaping. Decoding puts
//! the padding back before handing the text to the `base64` crate, so both
//! padded and unpadded input are accepted.

use crate::error::{Error, Result};
use base64::{
    Engine,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};

/// Encode bytes to an unpadded Base64URL segment
pub fn encode_segment(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode a Base64URL segment, restoring any stripped padding first
pub fn decode_segment(input: &str) -> Result<Vec<u8>> {
    let missing = (4 - input.len() % 4) % 4;
    let mut padded = String::with_capacity(input.len() + missing);
    padded.push_str(input);
    padded.extend(std::iter::repeat_n('=', missing));

    URL_SAFE
        .decode(padded)
        .map_err(|e| Error::MalformedSegment(format!("Base64URL decode failed: {e}")))
}

/// Decode a Base64URL segment to a UTF-8 string
pub fn decode_segment_string(input: &str) -> Result<String> {
    decode_segment(input).and_then(|bytes| {
        String::from_utf8(bytes).map_err(|e| Error::MalformedSegment(format!("Invalid UTF-8: {e}")))
    })
}
