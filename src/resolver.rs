//! Token resolution (`$name$`, `$name{params}$`)

use crate::error::{Result, TemplateError};
use crate::functions::{self, FunctionContext, FunctionParams};
use crate::renderer::{RenderContext, RenderWarning};
use crate::types::{Keyword, FALSE_LITERAL, TRUE_LITERAL, UNKNOWN_MARKER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Built-ins are called and variables substituted by value
    Normal,
    /// Condition text: every name becomes ` True ` or ` False `, built-ins are never called
    Boolean,
}

/// Replace every token in `text`, scanning left to right.
///
/// Substituted values are not scanned again; scanning resumes right after
/// the inserted text.
pub fn resolve_tokens(
    ctx: &RenderContext<'_>,
    text: &str,
    mode: ResolveMode,
    warnings: &mut Vec<RenderWarning>,
) -> Result<String> {
    let mut result = text.to_string();
    let mut cursor = 0;

    while let Some(caps) = ctx.patterns.token.captures_at(&result, cursor) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let start = whole.start();
        let mut end = whole.end();
        let name = name.as_str().to_string();

        let value = match mode {
            ResolveMode::Boolean => resolve_boolean(ctx, &name),
            ResolveMode::Normal => {
                if Keyword::is_keyword(&name) {
                    unknown(ctx, &name, warnings)
                } else if let Some(func) = functions::lookup(&name) {
                    let (params, consumed) = read_params(ctx, &name, &result[end..])?;
                    end += consumed;
                    let fctx = FunctionContext {
                        target: ctx.target,
                        host: ctx.host,
                    };
                    func(&fctx, &params)?
                } else if let Some(value) = ctx.variables.get(&name) {
                    value.to_string()
                } else {
                    unknown(ctx, &name, warnings)
                }
            }
        };

        result.replace_range(start..end, &value);
        cursor = start + value.len();
    }

    Ok(result)
}

fn resolve_boolean(ctx: &RenderContext<'_>, name: &str) -> String {
    let truthy = !Keyword::is_keyword(name)
        && ctx
            .variables
            .get(name)
            .map_or(false, |value| value.is_truthy());

    let literal = if truthy { TRUE_LITERAL } else { FALSE_LITERAL };
    literal.to_string()
}

fn unknown(ctx: &RenderContext<'_>, name: &str, warnings: &mut Vec<RenderWarning>) -> String {
    log::warn!("{}: unknown variable {}", ctx.target.display(), name);
    warnings.push(RenderWarning::UnknownVariable {
        name: name.to_string(),
    });
    UNKNOWN_MARKER.to_string()
}

/// Parse a `{...}` parameter object directly following a function token.
///
/// Returns the parameters and the number of bytes consumed, including an
/// escape character closing the token after the object.
fn read_params(ctx: &RenderContext<'_>, function: &str, rest: &str) -> Result<(FunctionParams, usize)> {
    let Some(block) = ctx.patterns.params.find(rest) else {
        return Ok((FunctionParams::new(), 0));
    };

    let params: FunctionParams = serde_json::from_str(block.as_str()).map_err(|e| {
        TemplateError::invalid_parameters(ctx.target.display().to_string(), function, e.to_string())
    })?;

    let mut consumed = block.end();
    if rest[consumed..].starts_with(ctx.patterns.escape.as_char()) {
        consumed += ctx.patterns.escape.as_char().len_utf8();
    }
    Ok((params, consumed))
}
