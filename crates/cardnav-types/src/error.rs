//! Unified error interface for cardnav.
//!
//! Every error enum in the workspace implements [`ErrorCode`] so the
//! frontend can react to failures without matching on concrete types.
//!
//! # Example
//!
//! ```
//! use cardnav_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     NotFound(String),
//!     Offline,
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound(_) => "LOOKUP_NOT_FOUND",
//!             Self::Offline => "LOOKUP_OFFLINE",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Offline)
//!     }
//! }
//!
//! let err = LookupError::Offline;
//! assert_eq!(err.code(), "LOOKUP_OFFLINE");
//! assert!(err.is_recoverable());
//! ```

/// Machine-readable error code and recoverability for cardnav errors.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**, e.g. `"AUTH_SIGN_IN_FAILED"`
/// - **Prefixed by crate concern**: `TYPES_`, `AUTH_`, `STORAGE_`, `CONFIG_`,
///   `CONTENT_`; wrapper errors report the code of the error they wrap
/// - **Stable**: codes are part of the public contract
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying (or a user action) may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code follows the conventions above.
///
/// Intended for tests that walk every variant of an error enum.
///
/// # Panics
///
/// Panics with a descriptive message if the code is empty, lacks the
/// expected prefix, or is not UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use cardnav_types::{assert_error_code, ErrorCode};
///
/// struct Timeout;
///
/// impl ErrorCode for Timeout {
///     fn code(&self) -> &'static str { "STORAGE_TIMEOUT" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Timeout, "STORAGE_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates several error codes at once.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum StoreError {
        Busy,
        Corrupt,
    }

    impl ErrorCode for StoreError {
        fn code(&self) -> &'static str {
            match self {
                Self::Busy => "STORE_BUSY",
                Self::Corrupt => "STORE_CORRUPT",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Busy)
        }
    }

    #[test]
    fn error_code_trait() {
        assert_eq!(StoreError::Busy.code(), "STORE_BUSY");
        assert!(StoreError::Busy.is_recoverable());
        assert!(!StoreError::Corrupt.is_recoverable());
    }

    #[test]
    fn assert_error_codes_all_variants() {
        assert_error_codes(&[StoreError::Busy, StoreError::Corrupt], "STORE_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn assert_error_code_wrong_prefix() {
        assert_error_code(&StoreError::Busy, "AUTH_");
    }

    #[test]
    fn upper_snake_case_rules() {
        assert!(is_upper_snake_case("NAV_MISSING"));
        assert!(is_upper_snake_case("ERROR_404"));
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("nav_missing"));
        assert!(!is_upper_snake_case("_NAV"));
        assert!(!is_upper_snake_case("NAV_"));
        assert!(!is_upper_snake_case("NAV__MISSING"));
    }
}
