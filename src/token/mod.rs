// Internal modules
mod claims;
mod header;
#[allow(clippy::module_inception)]
mod token;

// Public API exports
pub use claims::{Claims, EXPIRATION, NOT_BEFORE, NumberMode};
pub use header::{ALG, Header, TOKEN_TYPE, TYP};
pub use token::Token;

pub(crate) use token::DELIMITER;
