//! Shared pipeline context consumed by the import step.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use xenkit_shared::VmUuid;

use crate::config::ImportConfig;
use crate::ui::Ui;
use crate::xapi::Connection;

/// Typed dependency-injection context for the import step.
///
/// Inputs are explicit fields rather than a keyed state bag, so every
/// dependency is visible in the signature and no runtime type assertions
/// are needed. The resolved instance UUID is the step's single output
/// slot, readable by later steps and by failure-path inspection.
pub struct ImportContext {
    pub connection: Connection,
    pub config: ImportConfig,
    pub ui: Arc<dyn Ui>,
    /// Pipeline-wide cancellation signal. Only the upload transfer honors
    /// mid-flight cancellation; metadata RPCs are short and
    /// cancellation-opaque.
    pub cancel: CancellationToken,
    /// Durable identifier of the imported instance. Set as soon as UUID
    /// resolution succeeds and kept even when a later phase fails.
    pub instance_uuid: Option<VmUuid>,
}

impl ImportContext {
    pub fn new(connection: Connection, config: ImportConfig, ui: Arc<dyn Ui>) -> Self {
        Self {
            connection,
            config,
            ui,
            cancel: CancellationToken::new(),
            instance_uuid: None,
        }
    }

    /// Attach the pipeline run's cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}
