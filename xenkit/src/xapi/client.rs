//! Instance-management RPC surface of the hypervisor.

use async_trait::async_trait;
use xenkit_shared::errors::XenkitResult;
use xenkit_shared::{SessionRef, VdiRef, VmRef, VmUuid};

/// Instance-management calls consumed by the import pipeline.
///
/// Mirrors the hypervisor's VM/VDI object API: every call is a short
/// metadata RPC returning result-or-error. Implementations own transport
/// and authentication; callers own sequencing. None of these calls honor
/// mid-flight cancellation.
#[async_trait]
pub trait VmApi: Send + Sync {
    /// Durable UUID for a session-scoped instance reference.
    async fn get_uuid(&self, session: &SessionRef, vm: &VmRef) -> XenkitResult<VmUuid>;

    /// Whether the object is flagged as a template (a non-bootable
    /// blueprint). Imported disk images commonly arrive with this set.
    async fn get_is_a_template(&self, session: &SessionRef, vm: &VmRef) -> XenkitResult<bool>;

    async fn set_is_a_template(
        &self,
        session: &SessionRef,
        vm: &VmRef,
        value: bool,
    ) -> XenkitResult<()>;

    async fn set_name_label(
        &self,
        session: &SessionRef,
        vm: &VmRef,
        label: &str,
    ) -> XenkitResult<()>;

    async fn set_vcpus_max(&self, session: &SessionRef, vm: &VmRef, count: u32)
    -> XenkitResult<()>;

    async fn set_vcpus_at_startup(
        &self,
        session: &SessionRef,
        vm: &VmRef,
        count: u32,
    ) -> XenkitResult<()>;

    async fn set_name_description(
        &self,
        session: &SessionRef,
        vm: &VmRef,
        description: &str,
    ) -> XenkitResult<()>;

    /// Add a single tag to the instance. Adding a tag twice is a no-op on
    /// the hypervisor side.
    async fn add_tags(&self, session: &SessionRef, vm: &VmRef, tag: &str) -> XenkitResult<()>;

    /// Force power-off. Teardown only.
    async fn hard_shutdown(&self, session: &SessionRef, vm: &VmRef) -> XenkitResult<()>;

    /// Destroy the instance object. Teardown only.
    async fn destroy(&self, session: &SessionRef, vm: &VmRef) -> XenkitResult<()>;

    /// Destroy a virtual disk image object. Teardown only.
    async fn destroy_vdi(&self, session: &SessionRef, vdi: &VdiRef) -> XenkitResult<()>;
}
