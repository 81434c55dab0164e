//! AWS provider for LuaFlow
//!
//! Implements [`luaflow_cloud::CloudOps`] on top of the official AWS SDK:
//! EC2 `DescribeInstances`, CloudFront `CreateInvalidation`, and S3
//! `PutObject` / `ListObjectsV2` / `GetObject`.
//!
//! Configuration comes from the SDK's default chain with the request's
//! explicit region and shared-config profile; credential files, env
//! fallbacks and IMDS are all inherited from there. Every call resolves
//! its own configuration and builds its own service client — nothing is
//! pooled or cached across calls.

pub mod config;
pub mod provider;

mod cloudfront;
mod ec2;
mod s3;

// Re-exports
pub use provider::AwsCloudOps;
