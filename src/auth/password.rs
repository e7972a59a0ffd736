// Password hashing and verification service

use crate::auth::error::AuthError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Password service for hashing and verification
///
/// Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$digest`), so
/// verification reads its parameters from the stored hash and keeps working
/// after the configured cost changes.
#[derive(Debug, Clone)]
pub struct PasswordService {
    params: Params,
}

impl PasswordService {
    /// Create a PasswordService with the given cost
    pub fn new(cost: HashCost) -> Result<Self, AuthError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| AuthError::PasswordHash(format!("invalid argon2 parameters: {}", e)))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a stored hash
    ///
    /// Digest comparison is constant-time. A malformed hash verifies nothing.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                return false;
            }
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
pub(crate) fn fast_password_service() -> PasswordService {
    PasswordService::new(HashCost {
        memory_kib: 256,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}
