//! Two-slot outcome convention
//!
//! Every operation signals success and failure the same way: the first
//! return slot holds the result or the absence marker (`nil`), and on
//! failure the second slot holds the error text, sourced verbatim from
//! whatever layer failed. Callers distinguish the cases solely by the
//! first slot.

use mlua::{Lua, MultiValue, Value};

/// Success: the value alone.
pub fn ok(value: Value) -> mlua::Result<MultiValue> {
    Ok(MultiValue::from_vec(vec![value]))
}

/// Failure: `(nil, message)`. Operational failures are returned to the
/// script, never raised as Lua errors.
pub fn fail(lua: &Lua, message: impl AsRef<str>) -> mlua::Result<MultiValue> {
    let message = message.as_ref();
    tracing::warn!(error = message, "operation failed");
    Ok(MultiValue::from_vec(vec![
        Value::Nil,
        Value::String(lua.create_string(message)?),
    ]))
}
