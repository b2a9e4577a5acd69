//! This file defines the `PasswordHash` type which wraps a salted and hashed
//! password.

use std::fmt::Display;

use bcrypt::{BcryptError, hash, verify};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash a raw password string with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed
    /// to verify a password. Pass in [PasswordHash::DEFAULT_COST] to use the
    /// recommended cost.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password could not be hashed.
    pub fn from_raw_password(raw_password: &str, cost: u32) -> Result<Self, Error> {
        match hash(raw_password, cost) {
            Ok(password_hash) => Ok(Self(password_hash)),
            Err(e) => Err(Error::HashingError(e.to_string())),
        }
    }

    /// Create a new `PasswordHash` from an existing hash string without any
    /// validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid password
    /// hash.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`,
    /// because if an invalid hash is provided it will cause incorrect
    /// behaviour but not affect memory safety.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches the stored password.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod password_hash_tests {
    use super::PasswordHash;

    // Use the minimum cost to keep the test suite fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn verify_accepts_correct_password() {
        let hash = PasswordHash::from_raw_password("hunter2", TEST_COST).unwrap();

        assert!(hash.verify("hunter2").unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = PasswordHash::from_raw_password("hunter2", TEST_COST).unwrap();

        assert!(!hash.verify("*******").unwrap());
    }

    #[test]
    fn hashing_is_salted() {
        let first = PasswordHash::from_raw_password("hunter2", TEST_COST).unwrap();
        let second = PasswordHash::from_raw_password("hunter2", TEST_COST).unwrap();

        assert_ne!(first.as_ref(), second.as_ref());
    }
}
