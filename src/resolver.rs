//! Bind-variable resolution.
//!
//! Second stage of the engine: scans the intermediate SQL for
//! `/*name*/literal` markers and rewrites each into a positional `?`,
//! collecting the bound values in placeholder order. Five literal shapes
//! are recognized, tried in a fixed priority order; every pass rescans the
//! full text produced by the previous pass. The pass order and the
//! left-to-right order within a pass are observable in the bind list.
//!
//! Parameter values never enter the SQL text. Injection payloads in values
//! can only ever travel through the bind list.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::params::Params;
use crate::parsed::ParsedSql;
use crate::value::ParamValue;

/// Compiled marker/literal patterns, highest priority first.
pub struct Resolver {
    passes: [Regex; 5],
}

static SHARED: LazyLock<Resolver> = LazyLock::new(Resolver::new);

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            passes: [
                // 1. Quoted string literal directly after the marker.
                Regex::new(r#"/\*([A-Za-z_][\w.]*)\*/['"][^'"]*['"]"#).unwrap(),
                // 2. Numeric literal, including negatives.
                Regex::new(r"/\*([A-Za-z_][\w.]*)\*/-?[0-9.]+").unwrap(),
                // 3. Parenthesized IN-clause list.
                Regex::new(r"/\*\s*([A-Za-z_][\w.]*)\s*\*/\s*\([^)]*\)").unwrap(),
                // 4. The null keyword.
                Regex::new(r"/\*\s*([A-Za-z_][\w.]*)\s*\*/\s*(?i:null)\b").unwrap(),
                // 5. Any remaining bare token (catch-all).
                Regex::new(r"/\*\s*([A-Za-z_][\w.]*)\s*\*/[^\s,);]+").unwrap(),
            ],
        }
    }

    /// Replace resolvable markers with `?` placeholders and build the
    /// ordered bind list. Markers naming parameters absent from the map are
    /// left untouched.
    pub fn resolve(&self, sql: &str, params: &Params) -> ParsedSql {
        let mut text = sql.to_string();
        let mut names = Vec::new();
        let mut values = Vec::new();

        for (pass, pattern) in self.passes.iter().enumerate() {
            text = replace_pass(pass, pattern, &text, params, &mut names, &mut values);
        }

        ParsedSql::new(cleanup(&text), names, values)
    }
}

/// Resolve using a lazily-built shared pattern set. The patterns are
/// immutable once compiled, so this stays safe under concurrent use.
pub fn resolve(sql: &str, params: &Params) -> ParsedSql {
    SHARED.resolve(sql, params)
}

fn replace_pass(
    pass: usize,
    pattern: &Regex,
    text: &str,
    params: &Params,
    names: &mut Vec<String>,
    values: &mut Vec<ParamValue>,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in pattern.captures_iter(text) {
        let name = &caps[1];
        if !params.contains(name) {
            continue;
        }
        let Some(span) = caps.get(0) else { continue };
        trace!(name, pass, "resolved bind marker");
        out.push_str(&text[last..span.start()]);
        out.push('?');
        names.push(name.to_string());
        values.push(params.value_or_null(name).clone());
        last = span.end();
    }

    out.push_str(&text[last..]);
    out
}

/// Strip leftover block markers and normalize whitespace.
fn cleanup(text: &str) -> String {
    let stripped = text.replace("/*BEGIN*/", "").replace("/*END*/", "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ParamValue;

    #[test]
    fn test_quoted_literal() {
        let params = Params::new().set("status", "ACTIVE");
        let parsed = resolve("WHERE status = /*status*/'ACTIVE'", &params);
        assert_eq!(parsed.sql(), "WHERE status = ?");
        assert_eq!(parsed.values(), &[ParamValue::String("ACTIVE".into())]);
    }

    #[test]
    fn test_numeric_literal() {
        let params = Params::new().set("amount", 10_000.0);
        let parsed = resolve("WHERE amount > /*amount*/5000.00", &params);
        assert_eq!(parsed.sql(), "WHERE amount > ?");
        assert_eq!(parsed.values(), &[ParamValue::Float(10_000.0)]);
    }

    #[test]
    fn test_negative_numeric_literal() {
        let params = Params::new().set("delta", -3);
        let parsed = resolve("WHERE delta = /*delta*/-1", &params);
        assert_eq!(parsed.sql(), "WHERE delta = ?");
    }

    #[test]
    fn test_in_list_becomes_single_placeholder() {
        let params = Params::new().set("ids", vec![1, 2, 3]);
        let parsed = resolve("WHERE id IN /*ids*/(10, 20, 30)", &params);
        assert_eq!(parsed.sql(), "WHERE id IN ?");
        assert_eq!(
            parsed.values(),
            &[ParamValue::List(vec![
                ParamValue::Int(1),
                ParamValue::Int(2),
                ParamValue::Int(3),
            ])]
        );
    }

    #[test]
    fn test_null_literal() {
        let params = Params::new().set("deleted_at", ParamValue::Null);
        let parsed = resolve("SET deleted_at = /*deleted_at*/null", &params);
        assert_eq!(parsed.sql(), "SET deleted_at = ?");
        assert_eq!(parsed.values(), &[ParamValue::Null]);
    }

    #[test]
    fn test_bare_token_catch_all() {
        let params = Params::new().set("active", true);
        let parsed = resolve("WHERE active = /*active*/true", &params);
        assert_eq!(parsed.sql(), "WHERE active = ?");
        assert_eq!(parsed.values(), &[ParamValue::Bool(true)]);
    }

    #[test]
    fn test_unknown_marker_left_untouched() {
        let parsed = resolve("WHERE id = /*missing*/1", &Params::new());
        assert_eq!(parsed.sql(), "WHERE id = /*missing*/1");
        assert!(parsed.values().is_empty());
    }

    #[test]
    fn test_pass_priority_orders_bind_list() {
        // The numeric marker appears first in the text, but the quoted pass
        // runs first, so the string binds ahead of the number.
        let params = Params::new().set("n", 7).set("s", "x");
        let parsed = resolve("WHERE a = /*n*/1 AND b = /*s*/'y'", &params);
        assert_eq!(parsed.sql(), "WHERE a = ? AND b = ?");
        assert_eq!(parsed.names(), &["s".to_string(), "n".to_string()]);
        assert_eq!(
            parsed.values(),
            &[ParamValue::String("x".into()), ParamValue::Int(7)]
        );
    }

    #[test]
    fn test_within_pass_left_to_right_order() {
        let params = Params::new().set("a", 1).set("b", 2);
        let parsed = resolve("WHERE x = /*a*/9 AND y = /*b*/9", &params);
        assert_eq!(parsed.names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(parsed.values(), &[ParamValue::Int(1), ParamValue::Int(2)]);
    }

    #[test]
    fn test_block_remnants_stripped_and_whitespace_collapsed() {
        let parsed = resolve("SELECT *  /*BEGIN*/ FROM t /*END*/\n  WHERE 1=1", &Params::new());
        assert_eq!(parsed.sql(), "SELECT * FROM t WHERE 1=1");
    }

    #[test]
    fn test_idempotent_on_resolved_text() {
        let sql = "SELECT * FROM t WHERE id = ?";
        let parsed = resolve(sql, &Params::new().set("id", 1));
        assert_eq!(parsed.sql(), sql);
        assert!(parsed.values().is_empty());
    }
}
