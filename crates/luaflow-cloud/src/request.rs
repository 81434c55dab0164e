//! Typed request structs built from validated script arguments
//!
//! One struct per operation. The scripting layer validates positional
//! arguments against a schema first, then builds one of these; providers
//! never see raw script values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::model::BucketPath;

/// Default deadline applied to a call when the script does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Region and named profile, passed explicitly on every call.
///
/// Resolution into credentials is the provider's concern; no fallback or
/// caching happens at this level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallScope {
    pub region: String,
    pub profile: String,
}

impl CallScope {
    pub fn new(region: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            profile: profile.into(),
        }
    }
}

/// Per-call options shared by every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOptions {
    /// Deadline for the whole call, network round trip included.
    pub timeout: Duration,

    /// Continuation token for list operations; ignored by the others.
    pub next_token: Option<String>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            next_token: None,
        }
    }
}

/// Describe all compute instances visible in the scope's region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListInstancesRequest {
    pub scope: CallScope,
    pub options: CallOptions,
}

/// Invalidate a batch of edge-cache paths on one distribution.
///
/// The path list is copied into the outbound batch verbatim, in order,
/// with an explicit count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidatePathsRequest {
    pub scope: CallScope,
    pub distribution_id: String,
    pub paths: Vec<String>,
    pub options: CallOptions,
}

/// Stream a local file into an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadObjectRequest {
    pub scope: CallScope,
    pub bucket: String,
    pub key: String,
    pub source: PathBuf,
    pub options: CallOptions,
}

/// List one page of object keys under a bucket/prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListObjectsRequest {
    pub scope: CallScope,
    pub path: BucketPath,
    pub options: CallOptions,
}

/// Stream an object into a local file, truncating any existing file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadObjectRequest {
    pub scope: CallScope,
    pub bucket: String,
    pub key: String,
    pub destination: PathBuf,
    pub options: CallOptions,
}
