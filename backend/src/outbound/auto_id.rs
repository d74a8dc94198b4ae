//! Client-side document identifiers.
//!
//! Identifiers have the same shape as the hosted store's auto-ids: twenty
//! ASCII alphanumerics, which satisfy every [`AlumniId`] constraint.

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::domain::AlumniId;
use crate::domain::ports::AlumniRepositoryError;

/// Length of a generated identifier.
pub const AUTO_ID_LEN: usize = 20;

/// Generate a fresh random identifier.
pub fn generate_auto_id() -> Result<AlumniId, AlumniRepositoryError> {
    let raw: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTO_ID_LEN)
        .map(char::from)
        .collect();
    AlumniId::new(raw)
        .map_err(|err| AlumniRepositoryError::query(format!("generated invalid id: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_twenty_alphanumerics() {
        let id = generate_auto_id().expect("valid id");
        assert_eq!(id.as_ref().len(), AUTO_ID_LEN);
        assert!(id.as_ref().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn ids_differ_between_calls() {
        let first = generate_auto_id().expect("valid id");
        let second = generate_auto_id().expect("valid id");
        assert_ne!(first, second);
    }
}
