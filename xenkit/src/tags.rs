//! Instance tagging helper.

use xenkit_shared::VmRef;
use xenkit_shared::errors::XenkitResult;

use crate::xapi::Connection;

/// Apply a set of tags to an instance, one RPC per tag.
///
/// The first failing call propagates; tags already applied stay applied.
/// An empty set performs zero calls.
pub async fn add_vm_tags(
    connection: &Connection,
    vm: &VmRef,
    tags: &[String],
) -> XenkitResult<()> {
    for tag in tags {
        connection
            .client()
            .add_tags(connection.session(), vm, tag)
            .await?;
    }
    Ok(())
}
