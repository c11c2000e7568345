//! Input validation for user-supplied text.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value too long.
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for item captions.
pub const MAX_CAPTION_LENGTH: usize = 500;

/// Maximum allowed length for comments.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Validate an item caption. Captions are optional, so empty is fine.
pub fn validate_caption(caption: &str) -> Result<(), ValidationError> {
    let caption = caption.trim();

    if caption.chars().count() > MAX_CAPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "caption".to_string(),
            max: MAX_CAPTION_LENGTH,
            actual: caption.chars().count(),
        });
    }

    Ok(())
}

/// Validate comment text: required, bounded length.
pub fn validate_comment(text: &str) -> Result<(), ValidationError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Empty("comment".to_string()));
    }

    if text.chars().count() > MAX_COMMENT_LENGTH {
        return Err(ValidationError::TooLong {
            field: "comment".to_string(),
            max: MAX_COMMENT_LENGTH,
            actual: text.chars().count(),
        });
    }

    Ok(())
}
