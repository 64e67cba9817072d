//! Error types for template processing.

use thiserror::Error;

/// The main error type for template operations.
///
/// Missing parameters are never an error: absent map entries evaluate as
/// null in conditions and leave their bind markers untouched.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A directive comment was opened but never closed on the same line.
    #[error("Malformed directive (unterminated comment): {line}")]
    MalformedDirective { line: String },

    /// An IF directive with no condition text.
    #[error("Empty IF condition: {line}")]
    EmptyCondition { line: String },

    /// The upstream template loader failed.
    #[error("Failed to load SQL template: {0}")]
    Load(#[from] std::io::Error),
}

impl TemplateError {
    /// Create a malformed-directive error carrying the offending line.
    pub fn malformed(line: impl Into<String>) -> Self {
        Self::MalformedDirective { line: line.into() }
    }

    /// Create an empty-condition error carrying the offending line.
    pub fn empty_condition(line: impl Into<String>) -> Self {
        Self::EmptyCondition { line: line.into() }
    }

    /// True for errors raised while interpreting directives, as opposed to
    /// template-load failures.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedDirective { .. } | Self::EmptyCondition { .. }
        )
    }
}

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TemplateError::malformed("/*IF id != null");
        assert_eq!(
            err.to_string(),
            "Malformed directive (unterminated comment): /*IF id != null"
        );
    }

    #[test]
    fn test_load_errors_are_distinguishable() {
        let err = TemplateError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(!err.is_parse_error());
        assert!(TemplateError::empty_condition("/*IF*/").is_parse_error());
    }
}
