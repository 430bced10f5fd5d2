use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{Error as PHError, PasswordHasher, SaltString, rand_core::OsRng},
};

pub fn hash_password(password: &str) -> Result<String, PHError> {
    let salt_string = SaltString::generate(OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt_string)?
        .to_string())
}

/// `Ok(false)` on a wrong password; `Err` only if `hash` is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PHError> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PHError::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
