//! ULID-backed unique values so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("project");
/// assert!(a.starts_with("project-"));
/// assert_ne!(a, unique_str("project"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// Lowercase address on a reserved test domain.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("staff");
/// assert!(email.ends_with("@grigo.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@grigo.test", Ulid::new().to_string().to_lowercase())
}

/// Identity-provider subject for a fresh account.
pub fn unique_auth_sub() -> String {
    format!("idp|{}", Ulid::new())
}
