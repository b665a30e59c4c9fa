use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::warn;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::{Credential, PasswordScheme};

/// Argon2id memory cost in KiB (the scheme's standard default)
pub const MEMORY_COST_KIB: u32 = Params::DEFAULT_M_COST;

/// Argon2id iteration count
pub const TIME_COST: u32 = Params::DEFAULT_T_COST;

/// Argon2id degree of parallelism
pub const PARALLELISM: u32 = Params::DEFAULT_P_COST;

/// Decides how passwords are stored and how a presented password is checked
#[derive(Clone)]
pub struct PasswordPolicy {
    argon2: Argon2<'static>,
}

impl PasswordPolicy {
    pub fn new() -> Result<Self> {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
            .map_err(|e| AppError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a new password with a fresh random salt
    pub fn hash(&self, plaintext: &str) -> Result<Credential> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(Credential::Hashed {
            scheme: PasswordScheme::Argon2,
            digest,
        })
    }

    /// Check a presented password against a stored credential.
    ///
    /// Hashed credentials use the scheme's constant-time verifier with the
    /// parameters embedded in the digest. Legacy credentials compare exactly.
    pub fn verify(&self, plaintext: &str, stored: &Credential) -> bool {
        match stored {
            Credential::Legacy(expected) => expected == plaintext,
            Credential::Hashed {
                scheme: PasswordScheme::Argon2,
                digest,
            } => match PasswordHash::new(digest) {
                Ok(parsed) => self
                    .argon2
                    .verify_password(plaintext.as_bytes(), &parsed)
                    .is_ok(),
                Err(e) => {
                    warn!("Stored password hash is malformed: {}", e);
                    false
                }
            },
            Credential::Hashed {
                scheme: PasswordScheme::Bcrypt,
                digest,
            } => match bcrypt::verify(plaintext, digest) {
                Ok(matches) => matches,
                Err(e) => {
                    warn!("Stored bcrypt hash is malformed: {}", e);
                    false
                }
            },
        }
    }
}
