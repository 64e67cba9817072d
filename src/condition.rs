//! Boolean condition evaluation for `/*IF ...*/` directives.
//!
//! The condition grammar is deliberately tiny: a single `name OP literal`
//! comparison, or comparisons joined uniformly by `AND` or by `OR`. There is
//! no precedence and no parenthesization; an expression mixing both
//! operators is out of contract (the `AND` split is checked first and wins).

use std::cmp::Ordering;

use crate::params::Params;
use crate::value::ParamValue;

/// Evaluate a condition expression against the parameter map.
///
/// A bare `name` is shorthand for `name != null`. Missing parameters read
/// as null; nothing here ever fails.
pub fn evaluate(condition: &str, params: &Params) -> bool {
    if condition.contains(" AND ") {
        return condition
            .split(" AND ")
            .all(|c| evaluate_single(c.trim(), params));
    }
    if condition.contains(" OR ") {
        return condition
            .split(" OR ")
            .any(|c| evaluate_single(c.trim(), params));
    }
    evaluate_single(condition.trim(), params)
}

fn evaluate_single(condition: &str, params: &Params) -> bool {
    let mut parts = condition.split_whitespace();
    let Some(name) = parts.next() else {
        return false;
    };
    let value = params.value_or_null(name);

    match (parts.next(), parts.next()) {
        (None, _) => !value.is_null(),
        (Some(op), Some(literal)) => compare(value, op, literal),
        (Some(_), None) => false,
    }
}

fn compare(value: &ParamValue, op: &str, literal: &str) -> bool {
    let literal = strip_quotes(literal);

    if literal.eq_ignore_ascii_case("null") {
        return match op {
            "==" | "=" => value.is_null(),
            "!=" => !value.is_null(),
            _ => false,
        };
    }

    // Numeric comparison when both sides coerce to a double; otherwise the
    // value's string representation against the literal text.
    let ord = numeric_ordering(value, literal)
        .unwrap_or_else(|| value.compare_text().as_str().cmp(literal));

    match op {
        "==" | "=" => ord == Ordering::Equal,
        "!=" => ord != Ordering::Equal,
        ">" => ord == Ordering::Greater,
        "<" => ord == Ordering::Less,
        ">=" => ord != Ordering::Less,
        "<=" => ord != Ordering::Greater,
        _ => false,
    }
}

fn numeric_ordering(value: &ParamValue, literal: &str) -> Option<Ordering> {
    let left = value.as_f64()?;
    let right: f64 = literal.parse().ok()?;
    left.partial_cmp(&right)
}

fn strip_quotes(literal: &str) -> &str {
    let bytes = literal.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &literal[1..literal.len() - 1];
        }
    }
    literal
}
