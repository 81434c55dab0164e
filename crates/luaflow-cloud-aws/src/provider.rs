//! AWS implementation of the cloud operation seam

use crate::{cloudfront, config, ec2, s3};
use async_trait::async_trait;
use luaflow_cloud::{
    CloudError, CloudOps, DownloadObjectRequest, Instance, Invalidation, InvalidatePathsRequest,
    ListInstancesRequest, ListObjectsRequest, Page, Result, UploadObjectRequest,
};

/// Stateless AWS provider.
///
/// Every call resolves the default configuration chain for its own scope
/// and builds exactly one service client; nothing is memoized between
/// calls, so concurrent runtimes never share state through this type.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsCloudOps;

impl AwsCloudOps {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CloudOps for AwsCloudOps {
    async fn list_instances(&self, req: &ListInstancesRequest) -> Result<Page<Instance>> {
        tracing::debug!(
            region = %req.scope.region,
            profile = %req.scope.profile,
            "describing compute instances"
        );

        let cfg = config::resolve(&req.scope).await;
        let client = aws_sdk_ec2::Client::new(&cfg);

        let resp = client
            .describe_instances()
            .set_next_token(req.options.next_token.clone())
            .send()
            .await
            .map_err(|e| {
                CloudError::Api(format!("{}", aws_sdk_ec2::error::DisplayErrorContext(e)))
            })?;

        Ok(Page {
            items: ec2::flatten_reservations(resp.reservations()),
            next_token: resp.next_token().map(str::to_string),
        })
    }

    async fn invalidate_paths(&self, req: &InvalidatePathsRequest) -> Result<Invalidation> {
        tracing::debug!(
            distribution = %req.distribution_id,
            paths = req.paths.len(),
            "creating edge-cache invalidation"
        );

        let cfg = config::resolve(&req.scope).await;
        let client = aws_sdk_cloudfront::Client::new(&cfg);

        let batch = cloudfront::build_batch(&req.paths, cloudfront::caller_reference())?;

        let resp = client
            .create_invalidation()
            .distribution_id(req.distribution_id.as_str())
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|e| {
                CloudError::Api(format!(
                    "{}",
                    aws_sdk_cloudfront::error::DisplayErrorContext(e)
                ))
            })?;

        Ok(cloudfront::flatten_invalidation(resp.invalidation))
    }

    async fn upload_object(&self, req: &UploadObjectRequest) -> Result<()> {
        tracing::debug!(
            bucket = %req.bucket,
            key = %req.key,
            source = %req.source.display(),
            "uploading object"
        );

        let cfg = config::resolve(&req.scope).await;
        let client = aws_sdk_s3::Client::new(&cfg);

        s3::upload(&client, &req.bucket, &req.key, &req.source).await
    }

    async fn list_objects(&self, req: &ListObjectsRequest) -> Result<Page<String>> {
        tracing::debug!(
            bucket = %req.path.bucket,
            prefix = %req.path.prefix,
            "listing objects"
        );

        let cfg = config::resolve(&req.scope).await;
        let client = aws_sdk_s3::Client::new(&cfg);

        s3::list(&client, &req.path, req.options.next_token.clone()).await
    }

    async fn download_object(&self, req: &DownloadObjectRequest) -> Result<()> {
        tracing::debug!(
            bucket = %req.bucket,
            key = %req.key,
            destination = %req.destination.display(),
            "downloading object"
        );

        let cfg = config::resolve(&req.scope).await;
        let client = aws_sdk_s3::Client::new(&cfg);

        s3::download(&client, &req.bucket, &req.key, &req.destination).await
    }
}
