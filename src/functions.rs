//! Built-in template functions
//!
//! | name       | result                                              | parameters        |
//! |------------|-----------------------------------------------------|-------------------|
//! | `date`     | current local date                                  | `fmt` (strftime)  |
//! | `user`     | login name of the current user                      |                   |
//! | `gituser`  | `git config user.name` in the target's directory    |                   |
//! | `gitemail` | `git config user.email` in the target's directory   |                   |
//! | `filename` | file name of the target                             |                   |
//! | `filepath` | path of the target as given                         |                   |
//! | `guard`    | include guard, e.g. `SRC_H_FOO` for `src/foo.h`     | `lvl` (default 0) |

use crate::error::{Result, TemplateError};
use crate::host::Host;
use crate::types::DEFAULT_DATE_FORMAT;
use chrono::format::{Item, StrftimeItems};
use serde_json::{Map, Value};
use std::path::Path;

pub type FunctionParams = Map<String, Value>;

/// Everything a built-in may look at besides its parameters
pub struct FunctionContext<'a> {
    pub target: &'a Path,
    pub host: &'a dyn Host,
}

pub type BuiltinFn = fn(&FunctionContext<'_>, &FunctionParams) -> Result<String>;

pub const BUILTIN_NAMES: &[&str] = &[
    "date", "user", "gituser", "gitemail", "filename", "filepath", "guard",
];

/// Look up a built-in by case-insensitive name
pub fn lookup(name: &str) -> Option<BuiltinFn> {
    let func: BuiltinFn = match name.to_lowercase().as_str() {
        "date" => date,
        "user" => user,
        "gituser" => git_user,
        "gitemail" => git_email,
        "filename" => file_name,
        "filepath" => file_path,
        "guard" => guard,
        _ => return None,
    };
    Some(func)
}

pub fn is_builtin(name: &str) -> bool {
    lookup(name).is_some()
}

fn param_error(ctx: &FunctionContext<'_>, function: &str, message: impl Into<String>) -> TemplateError {
    TemplateError::invalid_parameters(ctx.target.display().to_string(), function, message)
}

fn date(ctx: &FunctionContext<'_>, params: &FunctionParams) -> Result<String> {
    let fmt = match params.get("fmt") {
        None => DEFAULT_DATE_FORMAT,
        Some(Value::String(fmt)) => fmt.as_str(),
        Some(other) => return Err(param_error(ctx, "date", format!("'fmt' must be a string, found {}", other))),
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(fmt).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(param_error(ctx, "date", format!("invalid date format '{}'", fmt)));
    }

    Ok(ctx.host.now().format_with_items(items.iter()).to_string())
}

fn user(ctx: &FunctionContext<'_>, _params: &FunctionParams) -> Result<String> {
    Ok(ctx.host.user_name().unwrap_or_else(|| {
        log::warn!("Could not determine the current user name");
        String::new()
    }))
}

fn git_config(ctx: &FunctionContext<'_>, key: &str) -> String {
    let dir = ctx.target.parent().unwrap_or(Path::new(""));
    ctx.host
        .run_command("git", &["config", key], dir)
        .map(|output| output.trim().to_string())
        .unwrap_or_default()
}

fn git_user(ctx: &FunctionContext<'_>, _params: &FunctionParams) -> Result<String> {
    Ok(git_config(ctx, "user.name"))
}

fn git_email(ctx: &FunctionContext<'_>, _params: &FunctionParams) -> Result<String> {
    Ok(git_config(ctx, "user.email"))
}

fn file_name(ctx: &FunctionContext<'_>, _params: &FunctionParams) -> Result<String> {
    Ok(ctx
        .target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default())
}

fn file_path(ctx: &FunctionContext<'_>, _params: &FunctionParams) -> Result<String> {
    Ok(ctx.target.to_string_lossy().into_owned())
}

fn guard(ctx: &FunctionContext<'_>, params: &FunctionParams) -> Result<String> {
    let lvl = match params.get("lvl") {
        None => 0,
        Some(value) => value
            .as_u64()
            .ok_or_else(|| param_error(ctx, "guard", format!("'lvl' must be a non-negative integer, found {}", value)))?
            as usize,
    };

    // Outermost ancestor first, then extension, then base name
    let mut ancestors = Vec::new();
    let mut dir = ctx.target.parent();
    for _ in 0..lvl {
        let Some(current) = dir else { break };
        if let Some(name) = current.file_name() {
            ancestors.push(sanitize_identifier(&name.to_string_lossy()));
        }
        dir = current.parent();
    }
    ancestors.reverse();

    let extension = ctx
        .target
        .extension()
        .map(|ext| sanitize_identifier(&ext.to_string_lossy()))
        .unwrap_or_default();
    let stem = ctx
        .target
        .file_stem()
        .map(|stem| sanitize_identifier(&stem.to_string_lossy()))
        .unwrap_or_default();

    Ok(ancestors
        .into_iter()
        .chain([extension, stem])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase())
}

/// Keep only characters valid in a C identifier-like name
fn sanitize_identifier(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::FakeHost;
    use serde_json::json;

    fn call(name: &str, target: &str, params: Value, host: &FakeHost) -> Result<String> {
        let ctx = FunctionContext {
            target: Path::new(target),
            host,
        };
        let params = params.as_object().cloned().unwrap_or_default();
        lookup(name).expect("builtin exists")(&ctx, &params)
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        for name in BUILTIN_NAMES {
            assert!(is_builtin(name));
            assert!(is_builtin(&name.to_uppercase()));
        }
        assert!(!is_builtin("author"));
    }

    #[test]
    fn test_guard() {
        let host = FakeHost::new();
        assert_eq!(call("guard", "foo.h", json!({}), &host).unwrap(), "H_FOO");
        assert_eq!(
            call("guard", "/work/src/foo.h", json!({"lvl": 1}), &host).unwrap(),
            "SRC_H_FOO"
        );
        assert_eq!(
            call("guard", "/work/my-lib/include/foo.hpp", json!({"lvl": 2}), &host).unwrap(),
            "MYLIB_INCLUDE_HPP_FOO"
        );
        assert_eq!(call("guard", "Makefile", json!({}), &host).unwrap(), "MAKEFILE");
        // more levels than directories
        assert_eq!(call("guard", "src/foo.h", json!({"lvl": 5}), &host).unwrap(), "SRC_H_FOO");
        assert!(call("guard", "foo.h", json!({"lvl": "one"}), &host).is_err());
    }

    #[test]
    fn test_date() {
        let host = FakeHost::new();
        assert_eq!(call("date", "a.c", json!({}), &host).unwrap(), "28 Apr 2017");
        assert_eq!(call("date", "a.c", json!({"fmt": "%Y-%m-%d"}), &host).unwrap(), "2017-04-28");
        assert!(call("date", "a.c", json!({"fmt": 3}), &host).is_err());
        assert!(call("date", "a.c", json!({"fmt": "%Q"}), &host).is_err());
    }

    #[test]
    fn test_file_functions() {
        let host = FakeHost::new();
        assert_eq!(call("filename", "/work/src/foo.h", json!({}), &host).unwrap(), "foo.h");
        assert_eq!(call("filepath", "/work/src/foo.h", json!({}), &host).unwrap(), "/work/src/foo.h");
        assert_eq!(call("user", "foo.h", json!({}), &host).unwrap(), "jdoe");
    }

    #[test]
    fn test_git_identity() {
        let host = FakeHost::new()
            .with_output("git config user.name", "Jane Doe\n")
            .with_output("git config user.email", "  jane@example.com\n");

        assert_eq!(call("gituser", "/repo/src/foo.h", json!({}), &host).unwrap(), "Jane Doe");
        assert_eq!(call("gitemail", "/repo/src/foo.h", json!({}), &host).unwrap(), "jane@example.com");
        assert_eq!(host.calls.borrow()[0].1, Path::new("/repo/src"));
    }

    #[test]
    fn test_git_failure_is_empty() {
        let host = FakeHost::new();
        assert_eq!(call("gituser", "/repo/foo.h", json!({}), &host).unwrap(), "");
    }
}
