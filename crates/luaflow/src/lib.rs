//! LuaFlow — cloud operations for sandboxed Lua scripts
//!
//! Installs an `aws` module into a Lua runtime with five operations:
//! `listInstances`, `invalidateCachePaths`, `uploadObject`, `listObjects`
//! and `downloadObject`. Scripts work with plain tables; the marshalling
//! between Lua values and typed provider requests/responses lives here.
//!
//! ```lua
//! local aws = require("aws")
//!
//! local instances, err = aws.listInstances("ap-northeast-1", "default")
//! if not instances then error(err) end
//! for _, inst in ipairs(instances) do
//!     print(inst.instanceId, inst.state, inst.tags["Name"])
//! end
//!
//! local ok, err = aws.uploadObject(
//!     "ap-northeast-1", "default", "releases", "v1/app.tar.gz", "./app.tar.gz")
//! ```
//!
//! # Outcome convention
//!
//! Every operation returns either its result, or `(nil, message)` on
//! failure — argument validation, configuration resolution, remote call
//! and local I/O failures all surface the same way. Operational failures
//! are never raised as Lua errors.
//!
//! # Pagination and deadlines
//!
//! List results carry a `nextToken` string field when the provider
//! truncated the listing; pass it back through the trailing options table
//! (`{ nextToken = ... }`) to resume. Every operation accepts
//! `{ timeoutMs = ... }` in the same table; the default deadline is 30
//! seconds.

pub mod args;
pub mod marshal;
pub mod outcome;

mod module;

pub use module::{MODULE_NAME, register};

#[cfg(feature = "aws")]
pub use module::register_aws;

pub use luaflow_cloud as cloud;
