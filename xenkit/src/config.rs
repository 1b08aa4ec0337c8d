//! Import step configuration.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use xenkit_shared::SrRef;
use xenkit_shared::errors::XenkitResult;

use crate::xapi::Connection;

/// Resolves the target storage repository for an import.
///
/// Selection policy (by name, by pool default, ...) lives with the
/// pipeline that builds the configuration; the step only consumes the
/// resolved reference.
#[async_trait]
pub trait StorageResolver: Send + Sync {
    async fn resolve(&self, connection: &Connection) -> XenkitResult<SrRef>;
}

/// Static configuration for the import step (set once, never mutated).
#[derive(Clone)]
pub struct ImportConfig {
    /// Path to the packaged disk image. `None` skips the import entirely.
    pub source_path: Option<PathBuf>,
    /// Display name applied to the imported instance.
    pub vm_name: String,
    /// Description applied to the imported instance.
    pub vm_description: String,
    /// Upper bound of the CPU topology.
    pub vcpus_max: u32,
    /// CPUs online at boot. The hypervisor rejects values above
    /// `vcpus_max`, which surfaces as an ordinary mutation failure.
    pub vcpus_at_startup: u32,
    /// Tags applied after import.
    pub vm_tags: Vec<String>,
    /// Storage-repository resolution capability.
    pub storage: Arc<dyn StorageResolver>,
}

impl ImportConfig {
    /// Resolve the target storage repository on the given connection.
    pub async fn get_sr(&self, connection: &Connection) -> XenkitResult<SrRef> {
        self.storage.resolve(connection).await
    }
}

impl fmt::Debug for ImportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportConfig")
            .field("source_path", &self.source_path)
            .field("vm_name", &self.vm_name)
            .field("vm_description", &self.vm_description)
            .field("vcpus_max", &self.vcpus_max)
            .field("vcpus_at_startup", &self.vcpus_at_startup)
            .field("vm_tags", &self.vm_tags)
            .finish_non_exhaustive()
    }
}
