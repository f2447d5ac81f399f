//! Field constraints mirroring the dashboard's customer form.
//!
//! Keeping these rules in sync ensures generated customers always pass the
//! dashboard's validator.
//!
//! # Validation Rules
//!
//! - Name: at least 2 characters once trimmed
//! - Description: at most 500 characters

/// Minimum trimmed length for a customer name.
pub const NAME_MIN: usize = 2;

/// Maximum length for a customer description.
pub const DESCRIPTION_MAX: usize = 500;

/// Validates a customer name against the dashboard's constraints.
///
/// # Examples
///
/// ```
/// use example_customers::is_valid_name;
///
/// assert!(is_valid_name("Ann Culhane"));
/// assert!(is_valid_name("Al"));
/// assert!(!is_valid_name(" a "));
/// assert!(!is_valid_name(""));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= NAME_MIN
}

/// Cuts a description down to [`DESCRIPTION_MAX`] characters.
#[must_use]
pub(crate) fn truncate_description(description: &str) -> String {
    description.chars().take(DESCRIPTION_MAX).collect()
}
