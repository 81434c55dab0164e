//! Per-operation argument schemas and the shared extractor
//!
//! Each operation declares an ordered list of [`ArgSpec`]s; one routine
//! walks the positional call values against that schema and produces
//! validated, owned values. Any mismatch fails the whole call before any
//! provider work happens. Error messages follow Lua's own convention
//! (`bad argument #n to 'fn' (...)`) so script authors see familiar text.

use luaflow_cloud::{CallOptions, CloudError};
use mlua::{MultiValue, Table, Value};
use std::time::Duration;

/// Coarse kinds the extractor can enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A Lua string; numbers coerce, per Lua convention.
    Str,
    /// A flat sequence of strings/numbers. Nested tables are rejected
    /// outright instead of being stringified best-effort.
    StrList,
    /// The optional trailing options table.
    Opts,
}

/// One positional argument in an operation's signature.
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
}

impl ArgSpec {
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Str,
            required: true,
        }
    }

    pub const fn string_list(name: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::StrList,
            required: true,
        }
    }

    pub const fn opts() -> Self {
        Self {
            name: "opts",
            kind: ArgKind::Opts,
            required: false,
        }
    }
}

/// A validated positional argument.
#[derive(Debug, Clone)]
pub enum ArgValue {
    Str(String),
    StrList(Vec<String>),
    Opts(CallOptions),
}

/// Check the call's positional values against the schema, in order.
///
/// Returns one [`ArgValue`] per schema entry (optional entries are
/// normalized to their defaults), or the first violation found.
pub fn extract(
    fname: &str,
    spec: &[ArgSpec],
    args: MultiValue,
) -> Result<Vec<ArgValue>, CloudError> {
    let values: Vec<Value> = args.into_iter().collect();
    let nil = Value::Nil;

    let mut extracted = Vec::with_capacity(spec.len());
    for (index, arg) in spec.iter().enumerate() {
        let position = index + 1;
        let value = values.get(index).unwrap_or(&nil);

        if value.is_nil() && arg.required {
            let got = if index < values.len() { "nil" } else { "no value" };
            return Err(bad_argument(fname, position, expected_word(arg.kind), got));
        }

        let validated = match arg.kind {
            ArgKind::Str => ArgValue::Str(check_string(fname, position, value)?),
            ArgKind::StrList => ArgValue::StrList(check_string_list(fname, position, value)?),
            ArgKind::Opts => ArgValue::Opts(check_options(fname, position, value)?),
        };
        extracted.push(validated);
    }

    Ok(extracted)
}

fn expected_word(kind: ArgKind) -> &'static str {
    match kind {
        ArgKind::Str => "string",
        ArgKind::StrList | ArgKind::Opts => "table",
    }
}

fn bad_argument(fname: &str, position: usize, expected: &str, got: &str) -> CloudError {
    CloudError::InvalidArgument(format!(
        "bad argument #{position} to '{fname}' ({expected} expected, got {got})"
    ))
}

fn check_string(fname: &str, position: usize, value: &Value) -> Result<String, CloudError> {
    match value {
        Value::String(s) => Ok(s.to_string_lossy().to_string()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(bad_argument(fname, position, "string", other.type_name())),
    }
}

fn check_string_list(
    fname: &str,
    position: usize,
    value: &Value,
) -> Result<Vec<String>, CloudError> {
    let Value::Table(table) = value else {
        return Err(bad_argument(fname, position, "table", value.type_name()));
    };

    let mut items = Vec::new();
    for (element_index, element) in table.clone().sequence_values::<Value>().enumerate() {
        let element = element.map_err(|e| CloudError::InvalidArgument(e.to_string()))?;
        match element {
            Value::String(s) => items.push(s.to_string_lossy().to_string()),
            Value::Integer(i) => items.push(i.to_string()),
            Value::Number(n) => items.push(n.to_string()),
            other => {
                return Err(CloudError::InvalidArgument(format!(
                    "bad argument #{position} to '{fname}' (string expected at index {}, got {})",
                    element_index + 1,
                    other.type_name()
                )));
            }
        }
    }

    Ok(items)
}

/// Parse the trailing options table. Absence yields the defaults; a
/// non-table value in that slot is a schema violation like any other.
fn check_options(fname: &str, position: usize, value: &Value) -> Result<CallOptions, CloudError> {
    let mut options = CallOptions::default();

    let table = match value {
        Value::Nil => return Ok(options),
        Value::Table(table) => table,
        other => return Err(bad_argument(fname, position, "table", other.type_name())),
    };

    if let Some(timeout_ms) = field(fname, table, "timeoutMs")? {
        options.timeout = match timeout_ms {
            Value::Integer(ms) if ms > 0 => Duration::from_millis(ms as u64),
            Value::Number(ms) if ms > 0.0 => Duration::from_millis(ms as u64),
            other => {
                return Err(CloudError::InvalidArgument(format!(
                    "bad argument #{position} to '{fname}' (opts.timeoutMs: positive number expected, got {})",
                    other.type_name()
                )));
            }
        };
    }

    if let Some(token) = field(fname, table, "nextToken")? {
        options.next_token = match token {
            Value::String(s) => Some(s.to_string_lossy().to_string()),
            other => {
                return Err(CloudError::InvalidArgument(format!(
                    "bad argument #{position} to '{fname}' (opts.nextToken: string expected, got {})",
                    other.type_name()
                )));
            }
        };
    }

    Ok(options)
}

fn field(fname: &str, table: &Table, key: &str) -> Result<Option<Value>, CloudError> {
    let value: Value = table
        .raw_get(key)
        .map_err(|e| CloudError::InvalidArgument(format!("{fname}: {e}")))?;
    Ok(if value.is_nil() { None } else { Some(value) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use luaflow_cloud::DEFAULT_TIMEOUT;
    use mlua::Lua;

    const SPEC: &[ArgSpec] = &[
        ArgSpec::string("region"),
        ArgSpec::string("profile"),
        ArgSpec::opts(),
    ];

    fn lua_args(_lua: &Lua, values: &[Value]) -> MultiValue {
        MultiValue::from_vec(values.to_vec())
    }

    fn s(lua: &Lua, text: &str) -> Value {
        Value::String(lua.create_string(text).unwrap())
    }

    #[test]
    fn test_extract_happy_path_defaults_options() {
        let lua = Lua::new();
        let args = lua_args(&lua, &[s(&lua, "us-east-1"), s(&lua, "default")]);

        let extracted = extract("listInstances", SPEC, args).unwrap();
        assert_eq!(extracted.len(), 3);

        let ArgValue::Str(region) = &extracted[0] else {
            panic!("expected string")
        };
        assert_eq!(region, "us-east-1");

        let ArgValue::Opts(options) = &extracted[2] else {
            panic!("expected options")
        };
        assert_eq!(options.timeout, DEFAULT_TIMEOUT);
        assert_eq!(options.next_token, None);
    }

    #[test]
    fn test_extract_missing_argument() {
        let lua = Lua::new();
        let args = lua_args(&lua, &[s(&lua, "us-east-1")]);

        let err = extract("listInstances", SPEC, args).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bad argument #2 to 'listInstances'"), "{message}");
        assert!(message.contains("no value"), "{message}");
    }

    #[test]
    fn test_extract_explicit_nil_argument() {
        let lua = Lua::new();
        let args = lua_args(&lua, &[s(&lua, "us-east-1"), Value::Nil, Value::Nil]);

        let err = extract("listInstances", SPEC, args).unwrap_err();
        assert!(err.to_string().contains("got nil"), "{err}");
    }

    #[test]
    fn test_extract_wrong_type() {
        let lua = Lua::new();
        let table = Value::Table(lua.create_table().unwrap());
        let args = lua_args(&lua, &[table, s(&lua, "default")]);

        let err = extract("listInstances", SPEC, args).unwrap_err();
        assert!(
            err.to_string().contains("string expected, got table"),
            "{err}"
        );
    }

    #[test]
    fn test_extract_coerces_numbers_like_lua() {
        let lua = Lua::new();
        let args = lua_args(&lua, &[Value::Integer(42), s(&lua, "default")]);

        let extracted = extract("listInstances", SPEC, args).unwrap();
        let ArgValue::Str(region) = &extracted[0] else {
            panic!("expected string")
        };
        assert_eq!(region, "42");
    }

    #[test]
    fn test_extract_string_list_in_order() {
        let lua = Lua::new();
        let spec = &[ArgSpec::string_list("paths")];
        let paths = lua.create_table().unwrap();
        paths.raw_set(1, "/index.html").unwrap();
        paths.raw_set(2, "/assets/*").unwrap();
        paths.raw_set(3, 404).unwrap();
        let args = lua_args(&lua, &[Value::Table(paths)]);

        let extracted = extract("invalidateCachePaths", spec, args).unwrap();
        let ArgValue::StrList(items) = &extracted[0] else {
            panic!("expected list")
        };
        assert_eq!(items, &["/index.html", "/assets/*", "404"]);
    }

    #[test]
    fn test_extract_rejects_nested_table_in_list() {
        let lua = Lua::new();
        let spec = &[ArgSpec::string_list("paths")];
        let paths = lua.create_table().unwrap();
        paths.raw_set(1, "/ok").unwrap();
        paths.raw_set(2, lua.create_table().unwrap()).unwrap();
        let args = lua_args(&lua, &[Value::Table(paths)]);

        let err = extract("invalidateCachePaths", spec, args).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("at index 2"), "{message}");
        assert!(message.contains("got table"), "{message}");
    }

    #[test]
    fn test_extract_options_override_timeout_and_token() {
        let lua = Lua::new();
        let opts = lua.create_table().unwrap();
        opts.raw_set("timeoutMs", 1500).unwrap();
        opts.raw_set("nextToken", "tok-1").unwrap();
        let args = lua_args(&lua, &[s(&lua, "r"), s(&lua, "p"), Value::Table(opts)]);

        let extracted = extract("listInstances", SPEC, args).unwrap();
        let ArgValue::Opts(options) = &extracted[2] else {
            panic!("expected options")
        };
        assert_eq!(options.timeout, Duration::from_millis(1500));
        assert_eq!(options.next_token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_extract_rejects_bad_timeout() {
        let lua = Lua::new();
        let opts = lua.create_table().unwrap();
        opts.raw_set("timeoutMs", "soon").unwrap();
        let args = lua_args(&lua, &[s(&lua, "r"), s(&lua, "p"), Value::Table(opts)]);

        let err = extract("listInstances", SPEC, args).unwrap_err();
        assert!(err.to_string().contains("opts.timeoutMs"), "{err}");
    }

    #[test]
    fn test_extract_rejects_non_table_options() {
        let lua = Lua::new();
        let args = lua_args(&lua, &[s(&lua, "r"), s(&lua, "p"), Value::Boolean(true)]);

        let err = extract("listInstances", SPEC, args).unwrap_err();
        assert!(
            err.to_string().contains("table expected, got boolean"),
            "{err}"
        );
    }
}
