use std::sync::Arc;

use fernet::Fernet;
use inscription_shared::{Error, Result};

/// Symmetric cipher for e-mail addresses at rest.
///
/// Tokens are Fernet tokens, so rows written by any Fernet implementation
/// sharing the key stay readable.
#[derive(Clone)]
pub struct EmailCipher(Arc<Fernet>);

impl EmailCipher {
    pub fn new(key: &str) -> Result<Self> {
        let Some(fernet) = Fernet::new(key.trim()) else {
            inscription_shared::bail!("encryption key is not a valid Fernet key");
        };

        Ok(Self(Arc::new(fernet)))
    }

    pub fn generate_key() -> String {
        Fernet::generate_key()
    }

    pub fn encrypt(&self, email: &str) -> String {
        self.0.encrypt(email.as_bytes())
    }

    pub fn decrypt(&self, token: &str) -> Result<String> {
        let bytes = self
            .0
            .decrypt(token)
            .map_err(|_| Error::Server("unable to decrypt email".to_owned()))?;

        String::from_utf8(bytes).map_err(|e| Error::Unknown(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_then_decrypt() {
        let cipher = EmailCipher::new(&EmailCipher::generate_key()).unwrap();
        let token = cipher.encrypt("aya@gmail.com");

        assert_ne!(token, "aya@gmail.com");
        assert_eq!(cipher.decrypt(&token).unwrap(), "aya@gmail.com");
    }

    #[test]
    fn test_decrypt_with_other_key_fails() {
        let cipher = EmailCipher::new(&EmailCipher::generate_key()).unwrap();
        let other = EmailCipher::new(&EmailCipher::generate_key()).unwrap();
        let token = cipher.encrypt("aya@gmail.com");

        assert!(other.decrypt(&token).is_err());
        assert!(cipher.decrypt("aya@gmail.com").is_err());
    }

    #[test]
    fn test_invalid_key() {
        assert!(EmailCipher::new("not-a-key").is_err());
        assert!(EmailCipher::new("").is_err());
    }
}
