//! Step: import a packaged disk image and configure the resulting
//! instance.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs::File;
use xenkit_shared::errors::{XenkitError, XenkitResult};
use xenkit_shared::{SessionRef, SrRef, VmRef, VmUuid};

use crate::import::context::ImportContext;
use crate::import::teardown::TeardownGuard;
use crate::pipeline::{Step, StepAction};
use crate::tags::add_vm_tags;
use crate::upload::{UploadReply, UploadTransport};

/// Imports a packaged disk image through the hypervisor's import endpoint
/// and brings the created instance into a configured state.
///
/// The step performs a strictly ordered sequence of remote calls; the
/// first failure is reported once through the operator sink and halts the
/// pipeline. A missing source path is a skip, not a failure.
pub struct ImportInstanceStep {
    transport: Arc<dyn UploadTransport>,
    teardown: TeardownGuard,
}

impl ImportInstanceStep {
    pub fn new(transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            transport,
            teardown: TeardownGuard::disabled(),
        }
    }

    /// Destroy the imported instance during `cleanup` if a later phase
    /// failed. Off by default: a half-configured instance is left in
    /// place for inspection.
    pub fn with_teardown(mut self) -> Self {
        self.teardown = TeardownGuard::enabled();
        self
    }

    /// Access the teardown guard, e.g. to register a disk image created
    /// by an earlier step.
    pub fn teardown_mut(&mut self) -> &mut TeardownGuard {
        &mut self.teardown
    }

    async fn import(
        &mut self,
        source_path: &Path,
        ctx: &mut ImportContext,
    ) -> XenkitResult<VmUuid> {
        let sr = self.resolve_storage(ctx).await?;
        let instance = self.upload_image(source_path, &sr, ctx).await?;
        let uuid = self.resolve_uuid(&instance, ctx).await?;
        self.normalize_template(&instance, ctx).await?;
        self.configure_instance(&instance, ctx).await?;
        Ok(uuid)
    }

    async fn resolve_storage(&self, ctx: &ImportContext) -> XenkitResult<SrRef> {
        let sr = ctx
            .config
            .get_sr(&ctx.connection)
            .await
            .map_err(|e| {
                XenkitError::Resolution(format!("unable to resolve storage repository: {e}"))
            })?;
        ctx.ui.say(&format!("Storage repository reference: {sr}"));
        Ok(sr)
    }

    async fn upload_image(
        &mut self,
        source_path: &Path,
        sr: &SrRef,
        ctx: &ImportContext,
    ) -> XenkitResult<VmRef> {
        let file = File::open(source_path)
            .await
            .map_err(|source| XenkitError::SourceOpen {
                path: source_path.to_path_buf(),
                source,
            })?;

        // Ownership of the handle moves into the transport, which closes
        // it on every exit path.
        let url = import_url(ctx.connection.host(), ctx.connection.session(), sr);
        let raw = self.transport.upload(&url, file, &ctx.cancel).await?;

        if raw.is_empty() {
            return Err(XenkitError::Protocol(
                "hypervisor did not reply with an instance reference".into(),
            ));
        }

        let instance = UploadReply::instance_ref(raw);
        ctx.ui.say(&format!("Instance reference: {instance}"));
        self.teardown.record_instance(instance.clone());
        Ok(instance)
    }

    async fn resolve_uuid(
        &self,
        instance: &VmRef,
        ctx: &mut ImportContext,
    ) -> XenkitResult<VmUuid> {
        let uuid = ctx
            .connection
            .client()
            .get_uuid(ctx.connection.session(), instance)
            .await
            .map_err(|e| XenkitError::Resolution(format!("unable to get instance UUID: {e}")))?;

        // Published before template detection: on a later failure the
        // UUID is already visible to whatever inspects the context.
        ctx.instance_uuid = Some(uuid.clone());
        Ok(uuid)
    }

    async fn normalize_template(&self, instance: &VmRef, ctx: &ImportContext) -> XenkitResult<()> {
        let connection = &ctx.connection;
        let is_template = connection
            .client()
            .get_is_a_template(connection.session(), instance)
            .await
            .map_err(|e| {
                XenkitError::Resolution(format!("unable to read instance information: {e}"))
            })?;

        // Imported images commonly arrive flagged as templates, which are
        // not bootable. Never clear a flag that is already clear.
        if is_template {
            connection
                .client()
                .set_is_a_template(connection.session(), instance, false)
                .await
                .map_err(|e| {
                    XenkitError::Mutation(format!("error converting template to an instance: {e}"))
                })?;
        }
        Ok(())
    }

    async fn configure_instance(&self, instance: &VmRef, ctx: &ImportContext) -> XenkitResult<()> {
        let connection = &ctx.connection;
        let config = &ctx.config;
        let client = connection.client();
        let session = connection.session();

        client
            .set_name_label(session, instance, &config.vm_name)
            .await
            .map_err(|e| {
                XenkitError::Mutation(format!(
                    "unable to rename instance to '{}': {e}",
                    config.vm_name
                ))
            })?;

        client
            .set_vcpus_max(session, instance, config.vcpus_max)
            .await
            .map_err(|e| {
                XenkitError::Mutation(format!("error setting VCPUs max={}: {e}", config.vcpus_max))
            })?;

        client
            .set_vcpus_at_startup(session, instance, config.vcpus_at_startup)
            .await
            .map_err(|e| {
                XenkitError::Mutation(format!(
                    "error setting VCPUs at startup={}: {e}",
                    config.vcpus_at_startup
                ))
            })?;

        client
            .set_name_description(session, instance, &config.vm_description)
            .await
            .map_err(|e| XenkitError::Mutation(format!("error setting instance description: {e}")))?;

        add_vm_tags(connection, instance, &config.vm_tags)
            .await
            .map_err(|e| XenkitError::Mutation(format!("failed to add tags: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl Step<ImportContext> for ImportInstanceStep {
    async fn run(&mut self, ctx: &mut ImportContext) -> StepAction {
        ctx.ui.say("Step: Import Instance");

        let source_path: PathBuf = match &ctx.config.source_path {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => {
                tracing::info!("skipping import, no source image configured");
                return StepAction::Continue;
            }
        };

        match self.import(&source_path, ctx).await {
            Ok(uuid) => {
                self.teardown.disarm();
                ctx.ui.say(&format!("Imported instance '{uuid}'"));
                StepAction::Continue
            }
            Err(err) => {
                ctx.ui.error(&err.to_string());
                StepAction::Halt
            }
        }
    }

    async fn cleanup(&mut self, ctx: &mut ImportContext) {
        if !self.teardown.should_run() {
            return;
        }

        let connection = &ctx.connection;
        let (instance, vdi) = self.teardown.take_targets();

        if let Some(instance) = instance {
            ctx.ui.say("Destroying imported instance");
            // Power off first; destroying a running instance is rejected.
            let _ = connection
                .client()
                .hard_shutdown(connection.session(), &instance)
                .await;
            if let Err(e) = connection
                .client()
                .destroy(connection.session(), &instance)
                .await
            {
                ctx.ui.error(&format!("unable to destroy instance: {e}"));
            }
        }

        if let Some(vdi) = vdi {
            ctx.ui.say("Destroying imported disk image");
            if let Err(e) = connection
                .client()
                .destroy_vdi(connection.session(), &vdi)
                .await
            {
                ctx.ui.error(&format!("unable to destroy disk image: {e}"));
            }
        }
    }

    fn name(&self) -> &str {
        "import_instance"
    }
}

/// Import endpoint URL embedding the session token and storage target.
fn import_url(host: &str, session: &SessionRef, sr: &SrRef) -> String {
    format!("https://{host}/import?session_id={session}&sr_id={sr}")
}
