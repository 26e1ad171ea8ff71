use crate::algorithm::SigningMethod;
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::utils::base64url;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// HS256 method (HMAC with SHA-256)
///
/// Unlike [`Aes128`](crate::algorithm::aes::Aes128) this method authenticates
/// the token: changing either the header or the claims segment makes
/// verification fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hs256;

impl Hs256 {
    /// Identifier carried in the `alg` header
    pub const ALG: &'static str = "HS256";
}

impl SigningMethod for Hs256 {
    fn alg(&self) -> &str {
        Self::ALG
    }

    fn sign(&self, signing_string: &str, key: &Key) -> Result<String> {
        let mac = compute_hs256(signing_string, secret(key)?)?;
        Ok(base64url::encode_segment(mac))
    }

    fn verify(&self, signing_string: &str, signature: &str, key: &Key) -> Result<()> {
        let provided_signature =
            base64url::decode_segment(signature).map_err(|_| Error::InvalidSignature)?;
        let expected_signature = compute_hs256(signing_string, secret(key)?)?;

        if provided_signature.len() != expected_signature.len() {
            return Err(Error::InvalidSignature);
        }

        if constant_time_eq(&provided_signature, &expected_signature) {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }
}

fn secret(key: &Key) -> Result<&[u8]> {
    key.entry("key").ok_or_else(|| {
        Error::KeyInit(format!(
            "HS256 requires a secret, got {} key",
            key.key_type()
        ))
    })
}

fn compute_hs256(signing_string: &str, secret: &[u8]) -> Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret)
        .map_err(|e| Error::KeyInit(format!("HS256 key rejected: {e}")))?;
    mac.update(signing_string.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNING_STRING: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6Ik5FV1QifQ.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

    #[test]
    fn test_hs256_valid_signature() {
        let key = Key::secret(b"your-256-bit-secret".to_vec());
        let signature = Hs256.sign(SIGNING_STRING, &key).unwrap();

        assert!(Hs256.verify(SIGNING_STRING, &signature, &key).is_ok());
    }

    #[test]
    fn test_hs256_known_vector() {
        // RFC 4231 test case 2
        let key = Key::secret(b"Jefe".to_vec());
        let signature = Hs256.sign("what do ya want for nothing?", &key).unwrap();
        let bytes = base64url::decode_segment(&signature).unwrap();
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(
            hex,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hs256_invalid_signature() {
        let key = Key::secret(b"your-256-bit-secret".to_vec());

        let wrong_signature = base64url::encode_segment("wrong");
        let result = Hs256.verify(SIGNING_STRING, &wrong_signature, &key);
        assert!(matches!(result, Err(Error::InvalidSignature)));

        let result = Hs256.verify(SIGNING_STRING, "!!not base64!!", &key);
        assert!(matches!(result, Err(Error::InvalidSignature)));
    }

    #[test]
    fn test_hs256_wrong_secret() {
        let key = Key::secret(b"your-256-bit-secret".to_vec());
        let wrong_key = Key::secret(b"wrong-secret".to_vec());

        let signature = Hs256.sign(SIGNING_STRING, &key).unwrap();
        let result = Hs256.verify(SIGNING_STRING, &signature, &wrong_key);
        assert!(matches!(result, Err(Error::InvalidSignature)));
    }

    #[test]
    fn test_hs256_tampered_input() {
        let key = Key::secret(b"your-256-bit-secret".to_vec());
        let signature = Hs256.sign(SIGNING_STRING, &key).unwrap();

        let tampered = format!("{SIGNING_STRING}x");
        let result = Hs256.verify(&tampered, &signature, &key);
        assert!(matches!(result, Err(Error::InvalidSignature)));
    }

    #[test]
    fn test_hs256_cipher_key_uses_key_entry() {
        let cipher_key = Key::cipher(b"shared".to_vec(), b"ignored".to_vec());
        let secret_key = Key::secret(b"shared".to_vec());

        let signature = Hs256.sign(SIGNING_STRING, &cipher_key).unwrap();
        assert!(Hs256.verify(SIGNING_STRING, &signature, &secret_key).is_ok());
    }

    #[test]
    fn test_hs256_empty_key() {
        let result = Hs256.sign(SIGNING_STRING, &Key::Empty);
        assert!(matches!(result, Err(Error::KeyInit(_))));

        let result = Hs256.verify(SIGNING_STRING, "c2ln", &Key::Empty);
        assert!(matches!(result, Err(Error::KeyInit(_))));
    }
}
