//! Typed response models
//!
//! Providers flatten their native API responses into these structs;
//! `Option` carries presence ("field not returned" is `None`, never an
//! empty placeholder). The scripting layer turns them into Lua tables with
//! the same omit-if-absent rule.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One page of results plus the continuation token when the listing was
/// truncated by the provider's page size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in API response order; no reordering or deduplication.
    pub items: Vec<T>,

    /// Set only when more results exist beyond this page.
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// A page that is known to be the whole result set.
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.next_token.is_some()
    }
}

/// Compute instance as flattened from a DescribeInstances reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// Always present; instances the API returns without an id are dropped.
    pub instance_id: String,
    pub instance_type: Option<String>,
    pub state: Option<String>,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    /// Always present, possibly empty. Pairs where the API omitted the key
    /// or the value are not included.
    pub tags: HashMap<String, String>,
}

/// Edge-cache invalidation as returned by the create call.
///
/// Every field is optional: the provider may acknowledge the batch without
/// echoing parts of it back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invalidation {
    pub id: Option<String>,
    pub status: Option<String>,
    /// Echoed path list, in request order, when the batch round-trips.
    pub paths: Option<Vec<String>>,
}

/// Parsed `"<bucket>:/<prefix>"` spec for object listings.
///
/// The split happens at the first `":/"`. A spec without the delimiter is
/// bucket-only with an empty prefix, as is a spec where the delimiter
/// appears at position zero (there is no empty bucket name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketPath {
    pub bucket: String,
    pub prefix: String,
}

impl BucketPath {
    pub fn parse(spec: &str) -> Self {
        match spec.split_once(":/") {
            Some((bucket, prefix)) if !bucket.is_empty() => Self {
                bucket: bucket.to_string(),
                prefix: prefix.to_string(),
            },
            _ => Self {
                bucket: spec.to_string(),
                prefix: String::new(),
            },
        }
    }
}

impl std::fmt::Display for BucketPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "{}", self.bucket)
        } else {
            write!(f, "{}:/{}", self.bucket, self.prefix)
        }
    }
}
