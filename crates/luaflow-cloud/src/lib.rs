//! LuaFlow Cloud Abstraction
//!
//! This crate defines the provider seam between LuaFlow's scripting layer
//! and concrete cloud backends: the [`CloudOps`] trait (one method per
//! script-callable operation), the typed request structs built from
//! validated script arguments, and the typed response models the
//! marshaller flattens into Lua tables.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 Lua script                       │
//! │        aws.listInstances(region, profile)        │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                 luaflow                          │
//! │   argument schemas · marshalling · outcomes      │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │              luaflow-cloud                       │
//! │        trait CloudOps { ... }  +  models         │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!          ┌────────▼────────┐
//!          │ luaflow-cloud-aws│
//!          └─────────────────┘
//! ```
//!
//! Everything here is call-scoped: a request struct describes exactly one
//! provider round trip and nothing is cached across calls.

pub mod error;
pub mod model;
pub mod ops;
pub mod request;

// Re-exports
pub use error::{CloudError, Result};
pub use model::{BucketPath, Instance, Invalidation, Page};
pub use ops::CloudOps;
pub use request::{
    CallOptions, CallScope, DownloadObjectRequest, InvalidatePathsRequest, ListInstancesRequest,
    ListObjectsRequest, UploadObjectRequest, DEFAULT_TIMEOUT,
};
