//! Expansion of `$$foreach($list$) ... $$endfor` blocks
//!
//! Like conditionals, loops cannot be nested. The loop source must be a
//! list-typed user variable; inside the body every `$list$` (or `$list`)
//! is replaced by the current element.

use crate::error::Result;
use crate::renderer::{RenderContext, RenderWarning};
use crate::rewriter::integrate_block;
use crate::types::FOREACH_FAILED_MARKER;
use regex::NoExpand;

/// Replace every loop block by its body repeated once per list element
pub fn expand_loops(
    ctx: &RenderContext<'_>,
    text: &str,
    warnings: &mut Vec<RenderWarning>,
) -> Result<String> {
    let mut result = text.to_string();
    let mut cursor = 0;

    while let Some(caps) = ctx.patterns.foreach.captures_at(&result, cursor) {
        let Some(whole) = caps.get(0) else { break };
        let (start, end) = (whole.start(), whole.end());
        let var = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        let replacement = match ctx.variables.get(var).map(|value| value.as_list()) {
            None => {
                log::warn!("{}: unknown variable {}", ctx.target.display(), var);
                warnings.push(RenderWarning::UnknownLoopVariable {
                    name: var.to_string(),
                });
                FOREACH_FAILED_MARKER.to_string()
            }
            Some(None) => {
                log::warn!("{}: variable {} is not a list", ctx.target.display(), var);
                warnings.push(RenderWarning::NotAList {
                    name: var.to_string(),
                });
                FOREACH_FAILED_MARKER.to_string()
            }
            Some(Some(items)) => {
                let placeholder = ctx.patterns.loop_variable(var)?;
                items
                    .iter()
                    .map(|item| placeholder.replace_all(body, NoExpand(item)).into_owned())
                    .collect()
            }
        };

        result = integrate_block(&result, &replacement, start, end);
        cursor = start;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::{DirectivePatterns, EscapeChar};
    use crate::host::testing::FakeHost;
    use crate::variables::{UserVariables, VariableValue};
    use std::path::Path;

    fn expand(text: &str, vars: &UserVariables) -> (String, Vec<RenderWarning>) {
        let host = FakeHost::new();
        let patterns = DirectivePatterns::new(EscapeChar::default()).unwrap();
        let ctx = RenderContext {
            patterns: &patterns,
            variables: vars,
            host: &host,
            target: Path::new("foo.h"),
        };
        let mut warnings = Vec::new();
        let output = expand_loops(&ctx, text, &mut warnings).unwrap();
        (output, warnings)
    }

    fn list(items: &[&str]) -> VariableValue {
        VariableValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_body_repeated_per_element() {
        let mut vars = UserVariables::new();
        vars.insert("headers", list(&["vector", "string", "map"]));

        let template = "$$foreach($headers$)\n#include <$headers$>\n$$endfor\nint x;";
        let (output, warnings) = expand(template, &vars);
        assert_eq!(output, "#include <vector>\n#include <string>\n#include <map>\nint x;");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_loop_variable_case_insensitive() {
        let mut vars = UserVariables::new();
        vars.insert("Names", list(&["a", "b"]));

        let template = "$$foreach($NAMES)\n[$names$|$Names]\n$$endfor\n";
        let (output, _) = expand(template, &vars);
        assert_eq!(output, "[a|a]\n[b|b]\n");
    }

    #[test]
    fn test_elements_are_literal() {
        let mut vars = UserVariables::new();
        vars.insert("items", list(&["$1", r"\n"]));

        let (output, _) = expand("$$foreach($items$)\n$items$;\n$$endfor\n", &vars);
        assert_eq!(output, "$1;\n\\n;\n");
    }

    #[test]
    fn test_empty_list_collapses_blank_line() {
        let mut vars = UserVariables::new();
        vars.insert("items", list(&[]));

        let (output, _) = expand("A\n\n$$foreach($items$)\n$items$\n$$endfor\n\nB", &vars);
        assert_eq!(output, "A\n\nB");
    }

    #[test]
    fn test_unknown_list() {
        let (output, warnings) = expand("$$foreach($nope$)\nx\n$$endfor\n", &UserVariables::new());
        assert_eq!(output, "<foreach failed>");
        assert_eq!(
            warnings,
            vec![RenderWarning::UnknownLoopVariable {
                name: "nope".to_string()
            }]
        );
    }

    #[test]
    fn test_scalar_is_not_a_list() {
        let vars = UserVariables::from_pairs(["name:x"]).unwrap();
        let (output, warnings) = expand("$$foreach($name$)\nx\n$$endfor\n", &vars);
        assert_eq!(output, "<foreach failed>");
        assert!(matches!(warnings[0], RenderWarning::NotAList { .. }));
    }

    #[test]
    fn test_consecutive_loops() {
        let mut vars = UserVariables::new();
        vars.insert("a", list(&["1", "2"]));
        vars.insert("b", list(&["3"]));

        let template = "$$foreach($a$)\n$a$\n$$endfor\n$$foreach($b$)\n$b$\n$$endfor\n";
        let (output, _) = expand(template, &vars);
        assert_eq!(output, "1\n2\n3\n");
    }
}
