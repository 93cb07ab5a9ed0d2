//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

// Minimum cost keeps unit tests fast.
const COST: u32 = if cfg!(test) { 4 } else { DEFAULT_COST };

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, COST)
}

/// Verify a password against a bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = hash_password("Admin@123").unwrap();

        assert!(verify_password("Admin@123", &hashed).unwrap());
        assert!(!verify_password("admin@123", &hashed).unwrap());
    }
}
