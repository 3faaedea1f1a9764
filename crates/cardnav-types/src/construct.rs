//! Fallible construction for validated cardnav types.
//!
//! | Pattern | Use When |
//! |---------|----------|
//! | `new()` | Construction always succeeds |
//! | [`TryNew`] | Construction validates its input |
//! | `TryFrom<T>` | Converting from another type |
//!
//! Validated newtypes in this workspace ([`PageId`](crate::PageId),
//! [`Handle`](crate::Handle)) implement [`TryNew`] instead of exposing a
//! plain `new()`, so the fallibility is visible at the call site.
//!
//! # Example
//!
//! ```
//! use cardnav_types::{PageId, TryNew};
//!
//! assert!(PageId::try_new("home".to_string()).is_ok());
//! assert!(PageId::try_new(String::new()).is_err());
//! ```

/// Trait for fallible construction with validation.
///
/// Types implementing `TryNew` should NOT also have a plain `new()` that
/// performs the same validation.
pub trait TryNew {
    /// The error returned when validation fails.
    type Error;

    /// Arguments required for construction (a tuple for several values).
    type Args;

    /// Attempts to create a new instance.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if validation fails.
    fn try_new(args: Self::Args) -> Result<Self, Self::Error>
    where
        Self: Sized;
}
