//! Generic record/sequence marshalling
//!
//! One record builder takes `(key, Option<value>)` field lists so the
//! presence rule lives in a single place: a key is set only when the
//! source field was returned — absence of a key is the encoding for
//! "field not returned", distinct from an explicit empty value. Sequences
//! are 1-based and keep API response order.

use luaflow_cloud::{Instance, Invalidation, Page};
use mlua::{Lua, Table};
use std::collections::HashMap;

/// Build a record from a declarative field list, omitting `None` fields
/// entirely rather than setting them to nil.
pub fn record<'a>(
    lua: &Lua,
    fields: impl IntoIterator<Item = (&'a str, Option<String>)>,
) -> mlua::Result<Table> {
    let table = lua.create_table()?;
    for (key, value) in fields {
        if let Some(value) = value {
            table.raw_set(key, value)?;
        }
    }
    Ok(table)
}

/// 1-based sequence of strings in the given order.
pub fn string_seq(lua: &Lua, items: &[String]) -> mlua::Result<Table> {
    let seq = lua.create_table()?;
    for (index, item) in items.iter().enumerate() {
        seq.raw_set(index + 1, item.as_str())?;
    }
    Ok(seq)
}

/// Nested string-to-string map.
pub fn string_map(lua: &Lua, map: &HashMap<String, String>) -> mlua::Result<Table> {
    let table = lua.create_table()?;
    for (key, value) in map {
        table.raw_set(key.as_str(), value.as_str())?;
    }
    Ok(table)
}

/// One compute instance record. `tags` is always present, possibly empty.
pub fn instance(lua: &Lua, instance: &Instance) -> mlua::Result<Table> {
    let rec = record(
        lua,
        [
            ("instanceId", Some(instance.instance_id.clone())),
            ("instanceType", instance.instance_type.clone()),
            ("state", instance.state.clone()),
            ("privateIp", instance.private_ip.clone()),
            ("publicIp", instance.public_ip.clone()),
        ],
    )?;

    rec.raw_set("tags", string_map(lua, &instance.tags)?)?;
    Ok(rec)
}

/// Sequence of instance records, with the pagination marker when the
/// listing was truncated.
pub fn instance_page(lua: &Lua, page: &Page<Instance>) -> mlua::Result<Table> {
    let seq = lua.create_table()?;
    for (index, item) in page.items.iter().enumerate() {
        seq.raw_set(index + 1, instance(lua, item)?)?;
    }
    mark_truncation(&seq, page)?;
    Ok(seq)
}

/// Sequence of object keys, with the pagination marker when truncated.
pub fn key_page(lua: &Lua, page: &Page<String>) -> mlua::Result<Table> {
    let seq = string_seq(lua, &page.items)?;
    mark_truncation(&seq, page)?;
    Ok(seq)
}

/// Invalidation record; the echoed path list appears only when the batch
/// round-tripped with paths populated.
pub fn invalidation(lua: &Lua, invalidation: &Invalidation) -> mlua::Result<Table> {
    let rec = record(
        lua,
        [
            ("id", invalidation.id.clone()),
            ("status", invalidation.status.clone()),
        ],
    )?;

    if let Some(paths) = &invalidation.paths {
        rec.raw_set("paths", string_seq(lua, paths)?)?;
    }
    Ok(rec)
}

/// `nextToken` is set only on truncated listings; a complete listing
/// carries no token key at all.
fn mark_truncation<T>(seq: &Table, page: &Page<T>) -> mlua::Result<()> {
    if let Some(token) = &page.next_token {
        seq.raw_set("nextToken", token.as_str())?;
    }
    Ok(())
}
