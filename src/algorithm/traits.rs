use crate::error::Result;
use crate::keys::Key;

/// Core trait that all token signing methods implement
///
/// A method protects the signing string (`header.claims`) of a token and
/// produces its third segment. Implement this trait and register the type
/// with a [`Registry`](crate::Registry) to add new methods.
pub trait SigningMethod: Send + Sync {
    /// The method identifier carried in the `alg` header (e.g. "AES128")
    fn alg(&self) -> &str;

    /// Produce the encoded third segment for a signing string
    ///
    /// # Arguments
    /// * `signing_string` - The header and claims segments joined with `.`
    /// * `key` - The key to sign with
    fn sign(&self, signing_string: &str, key: &Key) -> Result<String>;

    /// Verify the third segment against a signing string
    ///
    /// Returns `Ok(())` if the signature is valid.
    ///
    /// # Arguments
    /// * `signing_string` - The header and claims segments joined with `.`
    /// * `signature` - The encoded third segment
    /// * `key` - The key to verify with
    fn verify(&self, signing_string: &str, signature: &str, key: &Key) -> Result<()>;
}
