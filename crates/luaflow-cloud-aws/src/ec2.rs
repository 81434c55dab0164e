//! DescribeInstances response flattening

use aws_sdk_ec2::types::{Reservation, Tag};
use luaflow_cloud::Instance;
use std::collections::HashMap;

/// Flatten all instances across all reservations into one list, in API
/// response order. Reservation grouping is discarded.
pub(crate) fn flatten_reservations(reservations: &[Reservation]) -> Vec<Instance> {
    let mut instances = Vec::new();

    for reservation in reservations {
        for instance in reservation.instances() {
            let Some(instance_id) = instance.instance_id() else {
                // API には常に id が付くはずだが、欠けた instance は落とす
                tracing::warn!("dropping instance without an instance id");
                continue;
            };

            instances.push(Instance {
                instance_id: instance_id.to_string(),
                instance_type: instance.instance_type().map(|t| t.as_str().to_string()),
                state: instance
                    .state()
                    .and_then(|s| s.name())
                    .map(|n| n.as_str().to_string()),
                private_ip: instance.private_ip_address().map(str::to_string),
                public_ip: instance.public_ip_address().map(str::to_string),
                tags: collect_tags(instance.tags()),
            });
        }
    }

    instances
}

/// Tag pairs where both key and value were returned; everything else is
/// dropped rather than represented with a placeholder.
fn collect_tags(tags: &[Tag]) -> HashMap<String, String> {
    tags.iter()
        .filter_map(|tag| Some((tag.key()?.to_string(), tag.value()?.to_string())))
        .collect()
}
