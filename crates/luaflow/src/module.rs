//! Operation dispatch
//!
//! Wires the five script-callable operations: schema check → typed
//! request → provider call under a bounded deadline → marshalling →
//! outcome. This is the only place the scripting thread blocks; every
//! provider call runs on a current-thread runtime owned by the installed
//! module.

use crate::args::{self, ArgSpec, ArgValue};
use crate::{marshal, outcome};
use luaflow_cloud::{
    BucketPath, CallScope, CloudError, CloudOps, DownloadObjectRequest, InvalidatePathsRequest,
    ListInstancesRequest, ListObjectsRequest, Result as CloudResult, UploadObjectRequest,
};
use mlua::{Lua, MultiValue, Table, Value};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Name the module is registered under in `package.loaded`.
pub const MODULE_NAME: &str = "aws";

struct Dispatcher {
    ops: Arc<dyn CloudOps>,
    runtime: Runtime,
}

impl Dispatcher {
    fn new(ops: Arc<dyn CloudOps>) -> mlua::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(mlua::Error::external)?;
        Ok(Self { ops, runtime })
    }

    /// Block the scripting thread for one provider round trip, bounded by
    /// the request's deadline. Expiry surfaces through the normal outcome
    /// path, not as a Lua error.
    fn run<T>(
        &self,
        timeout: Duration,
        fut: impl Future<Output = CloudResult<T>>,
    ) -> CloudResult<T> {
        self.runtime.block_on(async {
            match tokio::time::timeout(timeout, fut).await {
                Ok(result) => result,
                Err(_) => Err(CloudError::Timeout(format!(
                    "operation did not complete within {} ms",
                    timeout.as_millis()
                ))),
            }
        })
    }
}

/// Install the module into the runtime for the given provider and return
/// its table. The table is also inserted into `package.loaded` so scripts
/// can `require("aws")`.
///
/// Operations block the calling thread for their single provider round
/// trip; install from a synchronous host thread, not from inside an async
/// executor.
pub fn register(lua: &Lua, ops: Arc<dyn CloudOps>) -> mlua::Result<Table> {
    let dispatcher = Arc::new(Dispatcher::new(ops)?);
    let module = lua.create_table()?;

    let d = dispatcher.clone();
    module.set(
        "listInstances",
        lua.create_function(move |lua, a: MultiValue| list_instances(lua, &d, a))?,
    )?;

    let d = dispatcher.clone();
    module.set(
        "invalidateCachePaths",
        lua.create_function(move |lua, a: MultiValue| invalidate_cache_paths(lua, &d, a))?,
    )?;

    let d = dispatcher.clone();
    module.set(
        "uploadObject",
        lua.create_function(move |lua, a: MultiValue| upload_object(lua, &d, a))?,
    )?;

    let d = dispatcher.clone();
    module.set(
        "listObjects",
        lua.create_function(move |lua, a: MultiValue| list_objects(lua, &d, a))?,
    )?;

    let d = dispatcher;
    module.set(
        "downloadObject",
        lua.create_function(move |lua, a: MultiValue| download_object(lua, &d, a))?,
    )?;

    if let Ok(package) = lua.globals().get::<Table>("package") {
        let loaded: Table = package.get("loaded")?;
        loaded.set(MODULE_NAME, module.clone())?;
    }

    Ok(module)
}

/// [`register`] wired to the real AWS provider.
#[cfg(feature = "aws")]
pub fn register_aws(lua: &Lua) -> mlua::Result<Table> {
    register(lua, Arc::new(luaflow_cloud_aws::AwsCloudOps::new()))
}

fn scope(region: &str, profile: &str) -> CallScope {
    CallScope::new(region, profile)
}

fn list_instances(lua: &Lua, d: &Dispatcher, a: MultiValue) -> mlua::Result<MultiValue> {
    const SPEC: &[ArgSpec] = &[
        ArgSpec::string("region"),
        ArgSpec::string("profile"),
        ArgSpec::opts(),
    ];

    let extracted = match args::extract("listInstances", SPEC, a) {
        Ok(values) => values,
        Err(e) => return outcome::fail(lua, e.to_string()),
    };
    let [ArgValue::Str(region), ArgValue::Str(profile), ArgValue::Opts(options)] = &extracted[..]
    else {
        return outcome::fail(lua, "listInstances: argument schema mismatch");
    };

    let req = ListInstancesRequest {
        scope: scope(region, profile),
        options: options.clone(),
    };

    tracing::debug!(op = "listInstances", region = %req.scope.region, "dispatching");
    match d.run(req.options.timeout, d.ops.list_instances(&req)) {
        Ok(page) => outcome::ok(Value::Table(marshal::instance_page(lua, &page)?)),
        Err(e) => outcome::fail(lua, e.to_string()),
    }
}

fn invalidate_cache_paths(lua: &Lua, d: &Dispatcher, a: MultiValue) -> mlua::Result<MultiValue> {
    const SPEC: &[ArgSpec] = &[
        ArgSpec::string("region"),
        ArgSpec::string("profile"),
        ArgSpec::string("distributionId"),
        ArgSpec::string_list("pathList"),
        ArgSpec::opts(),
    ];

    let extracted = match args::extract("invalidateCachePaths", SPEC, a) {
        Ok(values) => values,
        Err(e) => return outcome::fail(lua, e.to_string()),
    };
    let [
        ArgValue::Str(region),
        ArgValue::Str(profile),
        ArgValue::Str(distribution_id),
        ArgValue::StrList(paths),
        ArgValue::Opts(options),
    ] = &extracted[..]
    else {
        return outcome::fail(lua, "invalidateCachePaths: argument schema mismatch");
    };

    let req = InvalidatePathsRequest {
        scope: scope(region, profile),
        distribution_id: distribution_id.clone(),
        paths: paths.clone(),
        options: options.clone(),
    };

    tracing::debug!(
        op = "invalidateCachePaths",
        distribution = %req.distribution_id,
        paths = req.paths.len(),
        "dispatching"
    );
    match d.run(req.options.timeout, d.ops.invalidate_paths(&req)) {
        Ok(result) => outcome::ok(Value::Table(marshal::invalidation(lua, &result)?)),
        Err(e) => outcome::fail(lua, e.to_string()),
    }
}

fn upload_object(lua: &Lua, d: &Dispatcher, a: MultiValue) -> mlua::Result<MultiValue> {
    const SPEC: &[ArgSpec] = &[
        ArgSpec::string("region"),
        ArgSpec::string("profile"),
        ArgSpec::string("bucket"),
        ArgSpec::string("key"),
        ArgSpec::string("localFilePath"),
        ArgSpec::opts(),
    ];

    let extracted = match args::extract("uploadObject", SPEC, a) {
        Ok(values) => values,
        Err(e) => return outcome::fail(lua, e.to_string()),
    };
    let [
        ArgValue::Str(region),
        ArgValue::Str(profile),
        ArgValue::Str(bucket),
        ArgValue::Str(key),
        ArgValue::Str(source),
        ArgValue::Opts(options),
    ] = &extracted[..]
    else {
        return outcome::fail(lua, "uploadObject: argument schema mismatch");
    };

    let req = UploadObjectRequest {
        scope: scope(region, profile),
        bucket: bucket.clone(),
        key: key.clone(),
        source: PathBuf::from(source),
        options: options.clone(),
    };

    tracing::debug!(op = "uploadObject", bucket = %req.bucket, key = %req.key, "dispatching");
    match d.run(req.options.timeout, d.ops.upload_object(&req)) {
        Ok(()) => outcome::ok(Value::Boolean(true)),
        Err(e) => outcome::fail(lua, e.to_string()),
    }
}

fn list_objects(lua: &Lua, d: &Dispatcher, a: MultiValue) -> mlua::Result<MultiValue> {
    const SPEC: &[ArgSpec] = &[
        ArgSpec::string("region"),
        ArgSpec::string("profile"),
        ArgSpec::string("bucketPathSpec"),
        ArgSpec::opts(),
    ];

    let extracted = match args::extract("listObjects", SPEC, a) {
        Ok(values) => values,
        Err(e) => return outcome::fail(lua, e.to_string()),
    };
    let [
        ArgValue::Str(region),
        ArgValue::Str(profile),
        ArgValue::Str(spec),
        ArgValue::Opts(options),
    ] = &extracted[..]
    else {
        return outcome::fail(lua, "listObjects: argument schema mismatch");
    };

    let req = ListObjectsRequest {
        scope: scope(region, profile),
        path: BucketPath::parse(spec),
        options: options.clone(),
    };

    tracing::debug!(
        op = "listObjects",
        bucket = %req.path.bucket,
        prefix = %req.path.prefix,
        "dispatching"
    );
    match d.run(req.options.timeout, d.ops.list_objects(&req)) {
        Ok(page) => outcome::ok(Value::Table(marshal::key_page(lua, &page)?)),
        Err(e) => outcome::fail(lua, e.to_string()),
    }
}

fn download_object(lua: &Lua, d: &Dispatcher, a: MultiValue) -> mlua::Result<MultiValue> {
    const SPEC: &[ArgSpec] = &[
        ArgSpec::string("region"),
        ArgSpec::string("profile"),
        ArgSpec::string("bucket"),
        ArgSpec::string("key"),
        ArgSpec::string("destinationPath"),
        ArgSpec::opts(),
    ];

    let extracted = match args::extract("downloadObject", SPEC, a) {
        Ok(values) => values,
        Err(e) => return outcome::fail(lua, e.to_string()),
    };
    let [
        ArgValue::Str(region),
        ArgValue::Str(profile),
        ArgValue::Str(bucket),
        ArgValue::Str(key),
        ArgValue::Str(destination),
        ArgValue::Opts(options),
    ] = &extracted[..]
    else {
        return outcome::fail(lua, "downloadObject: argument schema mismatch");
    };

    let req = DownloadObjectRequest {
        scope: scope(region, profile),
        bucket: bucket.clone(),
        key: key.clone(),
        destination: PathBuf::from(destination),
        options: options.clone(),
    };

    tracing::debug!(op = "downloadObject", bucket = %req.bucket, key = %req.key, "dispatching");
    match d.run(req.options.timeout, d.ops.download_object(&req)) {
        Ok(()) => outcome::ok(Value::Boolean(true)),
        Err(e) => outcome::fail(lua, e.to_string()),
    }
}
