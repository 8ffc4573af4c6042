//! Password value object.
//!
//! Wraps Argon2 hashing and verification so the rest of the code never
//! touches raw hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Keep the hash out of debug output.
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than the
    /// configured minimum.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.len() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap an existing hash loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain-text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = Password::new("CorrectHorse9!").unwrap();

        assert!(password.verify("CorrectHorse9!"));
        assert!(!password.verify("WrongHorse9!"));
    }

    #[test]
    fn verify_from_stored_hash() {
        let original = Password::new("StoredSecret12").unwrap();
        let restored = Password::from_hash(original.as_str().to_string());

        assert!(restored.verify("StoredSecret12"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = Password::new("SamePassword1").unwrap();
        let b = Password::new("SamePassword1").unwrap();

        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(Password::new("short").is_err());
        assert!(Password::new("12345678").is_ok());
    }

    #[test]
    fn malformed_hash_never_verifies() {
        let password = Password::from_hash("not-a-phc-string".to_string());
        assert!(!password.verify("anything"));
    }
}
