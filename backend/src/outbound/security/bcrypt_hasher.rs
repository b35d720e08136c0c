//! `PasswordHasher` adapter backed by bcrypt.
//!
//! bcrypt is CPU-bound by design, so both operations run on tokio's blocking
//! pool.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Lowest cost bcrypt accepts.
pub const BCRYPT_MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const BCRYPT_MAX_COST: u32 = 31;

/// bcrypt implementation of the `PasswordHasher` port.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] when `cost` is outside
    /// `BCRYPT_MIN_COST..=BCRYPT_MAX_COST`.
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&cost) {
            return Err(PasswordHashError::hashing(format!(
                "bcrypt cost {cost} is outside {BCRYPT_MIN_COST}..={BCRYPT_MAX_COST}"
            )));
        }
        Ok(Self { cost })
    }

    /// Configured work factor.
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

fn join_error(err: &tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::unavailable(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let plain = Zeroizing::new(password.expose().to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || {
            bcrypt::hash(plain.as_bytes(), cost)
                .map(PasswordHash::new)
                .map_err(|err| PasswordHashError::hashing(err.to_string()))
        })
        .await
        .map_err(|err| join_error(&err))?
    }

    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let plain = Zeroizing::new(candidate.to_owned());
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || {
            bcrypt::verify(plain.as_bytes(), &encoded)
                .map_err(|err| PasswordHashError::hashing(err.to_string()))
        })
        .await
        .map_err(|err| join_error(&err))?
    }
}
