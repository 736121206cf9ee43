use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;

/// Checks a presented password against the stored credential
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Verifies argon2 PHC strings, e.g. `$argon2id$v=19$…`
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, password: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            tracing::warn!("Stored supplier credential is not a valid PHC string");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hash a password into a PHC string suitable for `suppliers.password_hash`
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_own_hashes() {
        let hash = hash_password("pw1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(Argon2Verifier.verify("pw1", &hash));
        assert!(!Argon2Verifier.verify("pw2", &hash));
    }

    #[test]
    fn rejects_malformed_stored_credentials() {
        assert!(!Argon2Verifier.verify("pw1", "pw1"));
        assert!(!Argon2Verifier.verify("", ""));
    }
}
