//! Object storage streaming and listing

use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use luaflow_cloud::{BucketPath, CloudError, Page, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Stream a local file into an object. The file is opened before any
/// network activity, so a missing or unreadable source never reaches the
/// API; the handle is dropped on every exit path.
pub(crate) async fn upload(client: &Client, bucket: &str, key: &str, source: &Path) -> Result<()> {
    let body = ByteStream::from_path(source)
        .await
        .map_err(|e| CloudError::Io(std::io::Error::other(e)))?;

    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(body)
        .send()
        .await
        .map_err(|e| CloudError::Api(format!("{}", DisplayErrorContext(e))))?;

    Ok(())
}

/// One page of object keys under the bucket/prefix. Listings beyond the
/// page size are reported through the continuation token, never silently
/// dropped.
pub(crate) async fn list(
    client: &Client,
    path: &BucketPath,
    continuation_token: Option<String>,
) -> Result<Page<String>> {
    let resp = client
        .list_objects_v2()
        .bucket(path.bucket.as_str())
        .prefix(path.prefix.as_str())
        .set_continuation_token(continuation_token)
        .send()
        .await
        .map_err(|e| CloudError::Api(format!("{}", DisplayErrorContext(e))))?;

    let items = resp
        .contents()
        .iter()
        .filter_map(|object| object.key().map(str::to_string))
        .collect();

    Ok(Page {
        items,
        next_token: resp.next_continuation_token().map(str::to_string),
    })
}

/// Stream an object into a local file, truncating any existing file. Both
/// the response body stream and the file handle are dropped on every exit
/// path.
pub(crate) async fn download(
    client: &Client,
    bucket: &str,
    key: &str,
    destination: &Path,
) -> Result<()> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| CloudError::Api(format!("{}", DisplayErrorContext(e))))?;

    write_stream(resp.body, destination).await
}

/// Copy a response body stream into a local file in full. The file handle
/// and the stream are dropped on every exit path.
async fn write_stream(mut body: ByteStream, destination: &Path) -> Result<()> {
    let mut file = tokio::fs::File::create(destination).await?;

    while let Some(chunk) = body
        .try_next()
        .await
        .map_err(|e| CloudError::Io(std::io::Error::other(e)))?
    {
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}
