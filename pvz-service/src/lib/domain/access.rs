use thiserror::Error;

use crate::domain::user::models::Role;

/// Refusal produced by [`authorize`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Access denied for role {presented}")]
pub struct AccessDenied {
    pub presented: Role,
    pub required: Vec<Role>,
}

/// Decide whether a caller holding `presented` may invoke an operation open to `required`.
///
/// Pure function: no token parsing, no transport concerns.
pub fn authorize(required: &[Role], presented: Role) -> Result<(), AccessDenied> {
    if required.contains(&presented) {
        Ok(())
    } else {
        Err(AccessDenied {
            presented,
            required: required.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_listed_role() {
        assert!(authorize(&[Role::Moderator], Role::Moderator).is_ok());
        assert!(authorize(&[Role::Employee, Role::Moderator], Role::Employee).is_ok());
    }

    #[test]
    fn test_denies_unlisted_role() {
        let denied = authorize(&[Role::Moderator], Role::Employee).unwrap_err();

        assert_eq!(denied.presented, Role::Employee);
        assert_eq!(denied.required, vec![Role::Moderator]);
    }

    #[test]
    fn test_empty_requirement_denies_everyone() {
        assert!(authorize(&[], Role::Employee).is_err());
        assert!(authorize(&[], Role::Moderator).is_err());
    }
}
