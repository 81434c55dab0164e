//! Default-chain configuration resolution
//!
//! The region and profile are always explicit per call; everything else
//! (credential files, environment fallbacks, IMDS) is the chain's
//! business. The loader is lazy by design: a profile that does not exist
//! or cannot produce credentials surfaces as an error on the first API
//! call, through the same error path as any other remote failure.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use luaflow_cloud::CallScope;

/// Resolve the SDK's default configuration chain for exactly one call.
///
/// The returned configuration is owned by the caller and must not be
/// cached or shared across calls.
pub async fn resolve(scope: &CallScope) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(scope.region.clone()))
        .profile_name(scope.profile.as_str())
        .load()
        .await
}
