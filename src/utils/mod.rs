pub mod base64url;

pub use base64url::{decode_segment, decode_segment_string, encode_segment};
