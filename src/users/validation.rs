use crate::error::AppError;
use crate::users::dto::UserCandidate;

pub const MIN_PASSWORD_CHARS: usize = 8;
/// Column width of username and email.
pub const MAX_FIELD_CHARS: usize = 25;

pub(crate) const USERNAME_TAKEN: &str = "username already exists";
pub(crate) const EMAIL_TAKEN: &str = "this email already exists";

/// Which unique fields of a candidate are already held by another record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Conflicts {
    pub username: bool,
    pub email: bool,
}

/// Decides whether a write may proceed. Checks run in a fixed order and the
/// first failure wins.
pub fn validate(candidate: &UserCandidate, conflicts: Conflicts) -> Result<(), AppError> {
    if conflicts.username {
        return Err(AppError::Conflict(USERNAME_TAKEN.into()));
    }
    if conflicts.email {
        return Err(AppError::Conflict(EMAIL_TAKEN.into()));
    }
    if !candidate.email.contains('@') {
        return Err(AppError::MalformedInput("email format is not valid".into()));
    }
    if candidate.username.chars().count() > MAX_FIELD_CHARS {
        return Err(AppError::MalformedInput(format!(
            "username must be at most {MAX_FIELD_CHARS} characters"
        )));
    }
    if candidate.email.chars().count() > MAX_FIELD_CHARS {
        return Err(AppError::MalformedInput(format!(
            "email must be at most {MAX_FIELD_CHARS} characters"
        )));
    }
    if candidate.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::MalformedInput(format!(
            "password must contain at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(username: &str, email: &str, password: &str) -> UserCandidate {
        UserCandidate {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    fn message(r: Result<(), AppError>) -> String {
        r.unwrap_err().to_string()
    }

    #[test]
    fn accepts_valid_candidate() {
        let c = candidate("alice", "alice@example.com", "longenough1");
        assert!(validate(&c, Conflicts::default()).is_ok());
    }

    #[test]
    fn username_conflict_wins_over_everything() {
        let c = candidate("alice", "no-at-sign", "short");
        let err = validate(&c, Conflicts { username: true, email: true }).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), USERNAME_TAKEN);
    }

    #[test]
    fn email_conflict() {
        let c = candidate("alice", "alice@example.com", "longenough1");
        let r = validate(&c, Conflicts { username: false, email: true });
        assert_eq!(message(r), EMAIL_TAKEN);
    }

    #[test]
    fn email_needs_at_sign() {
        let c = candidate("alice", "noatsign.com", "longenough1");
        assert_eq!(message(validate(&c, Conflicts::default())), "email format is not valid");
    }

    #[test]
    fn password_length_boundary() {
        let seven = candidate("alice", "a@b.c", "short12");
        let err = validate(&seven, Conflicts::default()).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput(_)));
        assert_eq!(err.to_string(), "password must contain at least 8 characters");

        let eight = candidate("alice", "a@b.c", "short123");
        assert!(validate(&eight, Conflicts::default()).is_ok());
    }

    #[test]
    fn password_length_counts_chars_not_bytes() {
        let c = candidate("alice", "a@b.c", "ééééééé");
        assert!(validate(&c, Conflicts::default()).is_err());
        let c = candidate("alice", "a@b.c", "éééééééé");
        assert!(validate(&c, Conflicts::default()).is_ok());
    }

    #[test]
    fn overlong_fields_rejected() {
        let long = "a".repeat(26);
        let c = candidate(&long, "a@b.c", "longenough1");
        assert_eq!(
            message(validate(&c, Conflicts::default())),
            "username must be at most 25 characters"
        );

        let email = format!("{}@b.c", "a".repeat(22));
        let c = candidate("alice", &email, "longenough1");
        assert_eq!(
            message(validate(&c, Conflicts::default())),
            "email must be at most 25 characters"
        );

        let c = candidate(&"a".repeat(25), "a@b.c", "longenough1");
        assert!(validate(&c, Conflicts::default()).is_ok());
    }
}
