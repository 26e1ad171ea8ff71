//! Size limit constants for input validation

/// Maximum size of a form body searched for `access_token` (10 MB)
#[cfg(feature = "http")]
pub(crate) const MAX_FORM_BODY_SIZE: usize = 10_000_000;
