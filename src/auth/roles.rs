//! Role name rules applied at registration.
//!
//! Roles are free-form strings. Registration only refuses the reserved
//! administrator role and names that would not fit the stored column.

use crate::types::{AppError, Result};

/// Role given to users who register without one.
pub const DEFAULT_ROLE: &str = "student";

/// Role that cannot be claimed through public registration.
pub const RESERVED_ROLE: &str = "admin";

/// Longest accepted role name, in characters, after trimming.
pub const MAX_ROLE_NAME_LEN: usize = 32;

/// Normalizes a raw registration role name.
///
/// Missing or blank input becomes [`DEFAULT_ROLE`]; anything else is trimmed and
/// must be neither [`RESERVED_ROLE`] nor longer than [`MAX_ROLE_NAME_LEN`].
pub fn validate_role_name(raw: Option<&str>) -> Result<String> {
    let trimmed = raw.map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        return Ok(DEFAULT_ROLE.to_string());
    }

    if trimmed == RESERVED_ROLE {
        return Err(AppError::Validation(
            "Role name can not be admin".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_ROLE_NAME_LEN {
        return Err(AppError::Validation(
            "Role name can not be longer than 32 chars".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::missing(None)]
    #[case::empty(Some(""))]
    #[case::spaces(Some("   "))]
    #[case::tabs_and_newlines(Some("\t\n "))]
    fn test_blank_defaults_to_student(#[case] raw: Option<&str>) {
        assert_eq!(validate_role_name(raw).unwrap(), "student");
    }

    #[rstest]
    #[case("admin")]
    #[case("  admin ")]
    #[case("\tadmin\n")]
    fn test_admin_is_reserved(#[case] raw: &str) {
        let err = validate_role_name(Some(raw)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Role name can not be admin");
    }

    #[test]
    fn test_admin_check_is_exact() {
        assert_eq!(validate_role_name(Some("Admin")).unwrap(), "Admin");
        assert_eq!(validate_role_name(Some("admins")).unwrap(), "admins");
    }

    #[test]
    fn test_length_boundary() {
        let exactly = "a".repeat(32);
        assert_eq!(validate_role_name(Some(&exactly)).unwrap(), exactly);

        let too_long = "a".repeat(33);
        let err = validate_role_name(Some(&too_long)).unwrap_err();
        assert_eq!(err.to_string(), "Role name can not be longer than 32 chars");
    }

    #[test]
    fn test_length_is_measured_after_trimming() {
        let padded = format!("  {}  ", "b".repeat(32));
        assert_eq!(validate_role_name(Some(&padded)).unwrap(), "b".repeat(32));
    }

    #[test]
    fn test_length_counts_characters() {
        // 32 two-byte characters fit, even though they are 64 bytes.
        let wide = "é".repeat(32);
        assert_eq!(validate_role_name(Some(&wide)).unwrap(), wide);
    }

    #[test]
    fn test_valid_role_is_trimmed() {
        assert_eq!(validate_role_name(Some("  angel ")).unwrap(), "angel");
    }
}
