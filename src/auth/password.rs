use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a password with Argon2id at the library defaults (19 MiB memory,
/// 2 iterations, 1 lane). The result is a PHC string that embeds the salt
/// and parameters, so stored hashes stay verifiable if defaults change.
pub fn hash(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| format!("Password hashing failed: {e}"))
}

/// Check a candidate password against a stored PHC-format hash. A malformed
/// stored hash is an error; a wrong password is `Ok(false)`.
pub fn verify(candidate: &str, stored: &str) -> Result<bool, String> {
    let hash = PasswordHash::new(stored).map_err(|e| format!("Stored hash is invalid: {e}"))?;
    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &hash)
        .is_ok())
}
