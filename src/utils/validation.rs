//! Centralized input limits and validation helpers.

/// Longest reference string accepted from a caller (`DoS` protection)
pub const MAX_REFERENCE_LENGTH: usize = 64;

/// Maximum number of references in a single batch (`DoS` protection)
pub const MAX_BATCH_REFERENCES: usize = 100_000;

/// Maximum number of listing rows read from one file
pub const MAX_LISTING_ROWS: usize = 1_000_000;

/// Input validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Reference too long: {0} characters exceeds maximum of {MAX_REFERENCE_LENGTH}")]
    ReferenceTooLong(usize),
    #[error("Reference contains control characters")]
    ControlCharacters,
    #[error("Too many references: {0} exceeds maximum of {MAX_BATCH_REFERENCES}")]
    TooManyReferences(usize),
    #[error("No references provided")]
    EmptyBatch,
}

/// Check a caller-supplied reference before decoding.
///
/// The decoder itself accepts any string; this guards the CLI and HTTP
/// boundaries against oversized or binary input.
///
/// # Examples
///
/// ```
/// use watch_ref::utils::validation::validate_reference;
///
/// assert!(validate_reference("116610LN").is_ok());
/// assert!(validate_reference("6542/8").is_ok());
/// assert!(validate_reference(&"9".repeat(200)).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::ReferenceTooLong` past [`MAX_REFERENCE_LENGTH`]
/// characters, or `ValidationError::ControlCharacters` if any are present.
pub fn validate_reference(reference: &str) -> Result<&str, ValidationError> {
    let len = reference.chars().count();
    if len > MAX_REFERENCE_LENGTH {
        return Err(ValidationError::ReferenceTooLong(len));
    }
    if reference.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacters);
    }
    Ok(reference)
}

/// Check if adding another reference would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new reference.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_batch_limit(count: usize) -> Option<String> {
    if count >= MAX_BATCH_REFERENCES {
        Some(format!(
            "Too many references: adding another would exceed maximum of {MAX_BATCH_REFERENCES}"
        ))
    } else {
        None
    }
}

/// Validate the size of a whole batch
///
/// # Errors
///
/// Returns `ValidationError::EmptyBatch` for zero references or
/// `ValidationError::TooManyReferences` above [`MAX_BATCH_REFERENCES`].
pub fn validate_batch_size(count: usize) -> Result<(), ValidationError> {
    match count {
        0 => Err(ValidationError::EmptyBatch),
        n if n > MAX_BATCH_REFERENCES => Err(ValidationError::TooManyReferences(n)),
        _ => Ok(()),
    }
}
