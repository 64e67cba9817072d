//! Line-oriented conditional block processing.
//!
//! First stage of the engine: walks the template line by line, evaluating
//! `/*IF ...*/` directives and tracking `/*BEGIN*/` / `/*END*/` block
//! scopes, and emits the surviving lines with bind markers still intact.
//! State lives entirely on two local stacks, so concurrent calls never
//! interact.

use tracing::trace;

use crate::condition;
use crate::error::{TemplateError, TemplateResult};
use crate::params::Params;

const BEGIN: &str = "/*BEGIN*/";
const END: &str = "/*END*/";
const IF: &str = "/*IF";

/// Resolve conditional directives, returning the intermediate SQL.
///
/// Directives are single-line; one split across lines is not recognized.
/// An `/*END*/` with no open scope is a silent no-op (tolerant parsing).
pub fn process(sql: &str, params: &Params) -> TemplateResult<String> {
    let mut output = String::new();
    // The block stack is seeded with a permanently-true sentinel for the
    // top-level scope; the sentinel itself is never popped.
    let mut block_stack = vec![true];
    let mut if_stack: Vec<bool> = Vec::new();

    for raw in sql.lines() {
        let line = raw.trim();
        check_terminated(line)?;

        if line.contains(BEGIN) {
            block_stack.push(true);
            continue;
        }
        if line.contains(END) {
            // Innermost scope first: IF results pop before blocks.
            if if_stack.pop().is_none() && block_stack.len() > 1 {
                block_stack.pop();
            }
            continue;
        }
        if let Some(pos) = line.find(IF) {
            let cond = extract_condition(line, pos)?;
            let result = condition::evaluate(cond, params);
            trace!(condition = cond, result, "evaluated IF directive");
            if_stack.push(result);
            continue;
        }
        if if_stack.iter().all(|b| *b) && block_stack.last().copied().unwrap_or(true) {
            output.push_str(line);
            output.push('\n');
        }
    }

    Ok(output)
}

fn check_terminated(line: &str) -> TemplateResult<()> {
    for marker in [BEGIN, END, IF] {
        let opening = marker.trim_end_matches("*/");
        if let Some(pos) = line.find(opening)
            && !line[pos..].contains("*/")
        {
            return Err(TemplateError::malformed(line));
        }
    }
    Ok(())
}

fn extract_condition(line: &str, start: usize) -> TemplateResult<&str> {
    let body = &line[start + IF.len()..];
    let end = body
        .find("*/")
        .ok_or_else(|| TemplateError::malformed(line))?;
    let cond = body[..end].trim();
    if cond.is_empty() {
        return Err(TemplateError::empty_condition(line));
    }
    Ok(cond)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &str) -> Vec<&str> {
        s.lines().filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn test_plain_lines_pass_through() {
        let out = process("SELECT *\nFROM users\n", &Params::new()).unwrap();
        assert_eq!(lines(&out), vec!["SELECT *", "FROM users"]);
    }

    #[test]
    fn test_true_branch_included() {
        let sql = "SELECT * FROM t\n/*IF id != null*/\nAND id = /*id*/1\n/*END*/\n";
        let out = process(sql, &Params::new().set("id", 1)).unwrap();
        assert_eq!(lines(&out), vec!["SELECT * FROM t", "AND id = /*id*/1"]);
    }

    #[test]
    fn test_false_branch_excluded() {
        let sql = "SELECT * FROM t\n/*IF id != null*/\nAND id = /*id*/1\n/*END*/\n";
        let out = process(sql, &Params::new()).unwrap();
        assert_eq!(lines(&out), vec!["SELECT * FROM t"]);
    }

    #[test]
    fn test_nested_if_requires_all_true() {
        let sql = "\
/*IF a != null*/
line a
/*IF b != null*/
line b
/*END*/
/*END*/
";
        let out = process(sql, &Params::new().set("a", 1)).unwrap();
        assert_eq!(lines(&out), vec!["line a"]);

        let out = process(sql, &Params::new().set("a", 1).set("b", 2)).unwrap();
        assert_eq!(lines(&out), vec!["line a", "line b"]);
    }

    #[test]
    fn test_begin_blocks_nest_and_interleave_with_if() {
        let sql = "\
/*BEGIN*/
WHERE 1=1
/*IF id != null*/
AND id = /*id*/1
/*END*/
/*BEGIN*/
inner
/*END*/
/*END*/
tail
";
        let out = process(sql, &Params::new().set("id", 9)).unwrap();
        assert_eq!(
            lines(&out),
            vec!["WHERE 1=1", "AND id = /*id*/1", "inner", "tail"]
        );
    }

    #[test]
    fn test_unmatched_end_is_noop() {
        let sql = "SELECT 1\n/*END*/\n/*END*/\nSELECT 2\n";
        let out = process(sql, &Params::new()).unwrap();
        assert_eq!(lines(&out), vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn test_unterminated_directive_is_malformed() {
        let err = process("/*IF id != null\n", &Params::new()).unwrap_err();
        assert!(matches!(err, TemplateError::MalformedDirective { .. }));

        let err = process("/*BEGIN\n", &Params::new()).unwrap_err();
        assert!(matches!(err, TemplateError::MalformedDirective { .. }));
    }

    #[test]
    fn test_empty_condition_is_rejected() {
        let err = process("/*IF */\n", &Params::new()).unwrap_err();
        assert!(matches!(err, TemplateError::EmptyCondition { .. }));
    }
}
