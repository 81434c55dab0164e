//! Cloud operation trait definition

use crate::error::Result;
use crate::model::{Instance, Invalidation, Page};
use crate::request::{
    DownloadObjectRequest, InvalidatePathsRequest, ListInstancesRequest, ListObjectsRequest,
    UploadObjectRequest,
};
use async_trait::async_trait;

/// Cloud operations exposed to the scripting layer.
///
/// One method per script-callable operation. Implementations perform
/// exactly one provider round trip per call, build their clients fresh
/// from the request's scope, and hold no state between calls. The
/// scripting layer enforces the request's deadline around every method,
/// so implementations do not need their own timeout handling.
#[async_trait]
pub trait CloudOps: Send + Sync {
    /// Flat list of instances across all reservations, one page at a time.
    async fn list_instances(&self, req: &ListInstancesRequest) -> Result<Page<Instance>>;

    /// Submit an invalidation batch for the request's path list.
    async fn invalidate_paths(&self, req: &InvalidatePathsRequest) -> Result<Invalidation>;

    /// Stream the request's source file into object storage.
    async fn upload_object(&self, req: &UploadObjectRequest) -> Result<()>;

    /// One page of object keys under the request's bucket/prefix.
    async fn list_objects(&self, req: &ListObjectsRequest) -> Result<Page<String>>;

    /// Stream an object into the request's destination file.
    async fn download_object(&self, req: &DownloadObjectRequest) -> Result<()>;
}
