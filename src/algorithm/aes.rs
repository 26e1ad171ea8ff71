use crate::algorithm::SigningMethod;
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::utils::base64url;

use aes::Aes128 as Aes128Cipher;
use aes::cipher::{AsyncStreamCipher, KeyIvInit};

type Aes128CfbEnc = cfb_mode::Encryptor<Aes128Cipher>;
type Aes128CfbDec = cfb_mode::Decryptor<Aes128Cipher>;

/// AES-128 in CFB mode, the default method
///
/// The key must be a [`Key::Cipher`] holding a 16 byte key and a 16 byte IV.
/// Signing encrypts the signing string; the ciphertext becomes the third
/// segment of the token.
///
/// # Security
///
/// This method provides confidentiality only. [`verify`](SigningMethod::verify)
/// accepts every signature, so a token protected by `AES128` alone can be
/// forged or tampered with without detection. Register and require a method
/// that authenticates (for example [`Hs256`](crate::algorithm::hmac::Hs256))
/// when the claims must be trusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes128;

impl Aes128 {
    /// Identifier carried in the `alg` header
    pub const ALG: &'static str = "AES128";

    /// Encrypt raw bytes with AES-128-CFB
    pub fn encrypt(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let mut buffer = plaintext.to_vec();
        Aes128CfbEnc::new_from_slices(key, iv)
            .map_err(|e| Error::KeyInit(format!("AES-128 requires a 16 byte key and IV: {e}")))?
            .encrypt(&mut buffer);
        Ok(buffer)
    }

    /// Decrypt bytes produced by [`encrypt`](Self::encrypt)
    pub fn decrypt(&self, ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let mut buffer = ciphertext.to_vec();
        Aes128CfbDec::new_from_slices(key, iv)
            .map_err(|e| Error::KeyInit(format!("AES-128 requires a 16 byte key and IV: {e}")))?
            .decrypt(&mut buffer);
        Ok(buffer)
    }

    /// Decode a third segment and decrypt it, recovering the signing string
    pub fn open(&self, signature: &str, key: &Key) -> Result<Vec<u8>> {
        let ciphertext = base64url::decode_segment(signature)?;
        let (aes_key, aes_iv) = material(key);
        self.decrypt(&ciphertext, aes_key, aes_iv)
    }
}

/// Missing entries are passed on empty so the cipher reports the bad length
fn material(key: &Key) -> (&[u8], &[u8]) {
    (
        key.entry("key").unwrap_or_default(),
        key.entry("iv").unwrap_or_default(),
    )
}

impl SigningMethod for Aes128 {
    fn alg(&self) -> &str {
        Self::ALG
    }

    fn sign(&self, signing_string: &str, key: &Key) -> Result<String> {
        let (aes_key, aes_iv) = material(key);
        let ciphertext = self.encrypt(signing_string.as_bytes(), aes_key, aes_iv)?;
        Ok(base64url::encode_segment(ciphertext))
    }

    /// Always succeeds: CFB encryption carries no authentication tag to check.
    fn verify(&self, _signing_string: &str, _signature: &str, _key: &Key) -> Result<()> {
        Ok(())
    }
}
