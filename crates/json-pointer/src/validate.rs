//! Well-formedness checks for pointers and paths supplied by callers.

use thiserror::Error;

use crate::types::PathStep;

const MAX_POINTER_LENGTH: usize = 1024;
const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_ESCAPE: {0:?}")]
    PointerEscape(String),
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
    #[error("PATH_TOO_LONG")]
    PathTooLong,
}

/// Check that `pointer` is empty or absolute, uses only `~0` and `~1`
/// escapes, and stays under 1024 bytes.
///
/// ```
/// use treenav_json_pointer::{validate_json_pointer, ValidationError};
///
/// assert!(validate_json_pointer("").is_ok());
/// assert!(validate_json_pointer("/a~1b/c~0").is_ok());
/// assert_eq!(validate_json_pointer("a"), Err(ValidationError::PointerInvalid));
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), ValidationError> {
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(ValidationError::PointerTooLong);
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return match pointer {
            "" => Ok(()),
            _ => Err(ValidationError::PointerInvalid),
        };
    };
    for component in rest.split('/') {
        let mut chars = component.chars();
        while let Some(c) = chars.next() {
            if c == '~' && !matches!(chars.next(), Some('0' | '1')) {
                return Err(ValidationError::PointerEscape(component.to_string()));
            }
        }
    }
    Ok(())
}

/// Reject paths deeper than 256 steps.
pub fn validate_path(path: &[PathStep]) -> Result<(), ValidationError> {
    match path.len() {
        n if n > MAX_PATH_LENGTH => Err(ValidationError::PathTooLong),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes() {
        assert!(validate_json_pointer("/~0~1").is_ok());
        assert_eq!(validate_json_pointer("/a~"), Err(ValidationError::PointerEscape("a~".into())));
        assert_eq!(validate_json_pointer("/x/~2"), Err(ValidationError::PointerEscape("~2".into())));
    }

    #[test]
    fn length_limits() {
        let long = format!("/{}", "k".repeat(MAX_POINTER_LENGTH));
        assert_eq!(validate_json_pointer(&long), Err(ValidationError::PointerTooLong));

        let deep: Vec<PathStep> = std::iter::repeat(PathStep::Index(0)).take(MAX_PATH_LENGTH + 1).collect();
        assert_eq!(validate_path(&deep), Err(ValidationError::PathTooLong));
        assert!(validate_path(&deep[1..]).is_ok());
    }
}
