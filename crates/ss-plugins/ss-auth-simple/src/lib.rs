//! # ss-auth-simple
//!
//! Argon2-based implementation of `CredentialHasher`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use ss_core::traits::CredentialHasher;

#[derive(Default)]
pub struct SimpleCredentialHasher;

impl SimpleCredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialHasher for SimpleCredentialHasher {
    /// Hashes a password into a PHC string with a fresh random salt.
    async fn hash_password(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| anyhow::anyhow!("argon2 hashing failed: {err}"))?;
        Ok(hash.to_string())
    }

    /// Verifies a password against a stored Argon2 hash. A hash that does
    /// not parse verifies as false.
    async fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
