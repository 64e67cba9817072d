//! SQL template file loading.
//!
//! Deliberately dumb: a UTF-8 read that either succeeds or surfaces as
//! [`TemplateError::Load`](crate::error::TemplateError). Caching and path
//! resolution belong to the caller.

use std::fs;
use std::path::Path;

use crate::error::TemplateResult;

/// Read a SQL template file as UTF-8 text.
pub fn load(path: impl AsRef<Path>) -> TemplateResult<String> {
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load("no/such/template.sql").unwrap_err();
        assert!(matches!(err, TemplateError::Load(_)));
        assert!(!err.is_parse_error());
    }
}
