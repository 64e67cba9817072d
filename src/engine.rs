//! Template engine facade.
//!
//! Composes the conditional block processor and the bind-variable resolver.
//! Every call is a pure function of `(template, params)`: no global state,
//! nothing blocks or suspends, and concurrent calls never interact.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::TemplateResult;
use crate::loader;
use crate::params::Params;
use crate::parsed::ParsedSql;
use crate::{processor, resolver};

/// Rewrite a dynamic SQL template into executable SQL with positional `?`
/// placeholders and the ordered values to bind.
///
/// ```
/// use sqlweave::{parse, Params};
///
/// let params = Params::new().set("id", 42);
/// let parsed = parse("SELECT * FROM users WHERE id = /*id*/1", &params)?;
/// assert_eq!(parsed.sql(), "SELECT * FROM users WHERE id = ?");
/// assert_eq!(parsed.values().len(), 1);
/// # Ok::<(), sqlweave::TemplateError>(())
/// ```
pub fn parse(sql: &str, params: &Params) -> TemplateResult<ParsedSql> {
    let intermediate = processor::process(sql, params)?;
    let parsed = resolver::resolve(&intermediate, params);
    debug!(
        sql = parsed.sql(),
        bound = parsed.values().len(),
        "parsed template"
    );
    Ok(parsed)
}

/// Load a template file and parse it. Load failures stay distinguishable
/// from directive errors via [`TemplateError::is_parse_error`](crate::error::TemplateError::is_parse_error).
pub fn parse_file(path: impl AsRef<Path>, params: &Params) -> TemplateResult<ParsedSql> {
    let sql = loader::load(path)?;
    parse(&sql, params)
}

/// Like [`parse`], but a malformed directive falls back to the raw template
/// verbatim with no bindings, for callers that prefer running the original
/// SQL over failing.
pub fn parse_lenient(sql: &str, params: &Params) -> ParsedSql {
    match parse(sql, params) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(%err, "falling back to raw SQL");
            ParsedSql::raw(sql)
        }
    }
}
