//! Expansion of `$$if(cond) ... [$$else ...] $$endif` blocks
//!
//! Blocks cannot be nested: the first `$$endif` after an `$$if` closes it,
//! so an inner block's `$$else`/`$$endif` is taken for the outer one's.

use crate::condition::evaluate_condition;
use crate::error::{Result, TemplateError};
use crate::renderer::{RenderContext, RenderWarning};
use crate::resolver::{resolve_tokens, ResolveMode};
use crate::rewriter::integrate_block;

/// Replace every conditional block by the branch its condition selects
pub fn expand_conditions(
    ctx: &RenderContext<'_>,
    text: &str,
    warnings: &mut Vec<RenderWarning>,
) -> Result<String> {
    let mut result = text.to_string();
    let mut cursor = 0;

    while let Some(caps) = ctx.patterns.condition.captures_at(&result, cursor) {
        let Some(whole) = caps.get(0) else { break };
        let (start, end) = (whole.start(), whole.end());
        let condition = caps.get(1).map_or("", |m| m.as_str());

        let resolved = resolve_tokens(ctx, condition, ResolveMode::Boolean, warnings)?;
        let selected = evaluate_condition(&resolved).map_err(|e| {
            TemplateError::condition(ctx.target.display().to_string(), condition, e.message)
        })?;
        log::debug!("Condition '{}' -> '{}' = {}", condition, resolved.trim(), selected);

        let branch = if selected { caps.get(2) } else { caps.get(3) };
        let replacement = branch.map_or("", |m| m.as_str()).to_string();

        result = integrate_block(&result, &replacement, start, end);
        cursor = start;
    }

    Ok(result)
}
