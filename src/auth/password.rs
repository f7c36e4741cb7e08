use bcrypt::{BcryptError, DEFAULT_COST, hash, verify};

#[derive(Debug, thiserror::Error)]
#[error("Password operation failed: {0}")]
pub struct PasswordError(#[from] BcryptError);

pub struct PasswordManager;

impl PasswordManager {
    /// Bcrypt at the library's default cost; every hash carries its own salt.
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        Ok(hash(password, DEFAULT_COST)?)
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        Ok(verify(password, hash)?)
    }
}
