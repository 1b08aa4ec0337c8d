//! Hand-rolled mock collaborators shared across unit tests.
//!
//! Every mock records into a [`CallLog`] so tests can assert on the exact
//! order of remote calls, and can be armed to fail on one named method.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::fs::File;
use tokio_util::sync::CancellationToken;
use xenkit_shared::errors::{XenkitError, XenkitResult};
use xenkit_shared::{SessionRef, SrRef, VdiRef, VmRef, VmUuid};

use crate::config::StorageResolver;
use crate::ui::Ui;
use crate::upload::UploadTransport;
use crate::xapi::{Connection, VmApi};

/// Shared, ordered record of every remote call the mocks receive.
#[derive(Debug, Default, Clone)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Mock of the hypervisor's instance-management API.
pub struct MockVmApi {
    log: CallLog,
    uuid: String,
    is_template: bool,
    fail: Option<(&'static str, String)>,
}

impl Default for MockVmApi {
    fn default() -> Self {
        Self {
            log: CallLog::default(),
            uuid: "uuid-42".into(),
            is_template: false,
            fail: None,
        }
    }
}

impl MockVmApi {
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn template(mut self, is_template: bool) -> Self {
        self.is_template = is_template;
        self
    }

    /// Arm a single method to fail with the given detail.
    pub fn failing_on(mut self, method: &'static str, detail: &str) -> Self {
        self.fail = Some((method, detail.into()));
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    fn call(&self, name: &'static str, entry: String) -> XenkitResult<()> {
        self.log.push(entry);
        match &self.fail {
            Some((method, detail)) if *method == name => Err(XenkitError::Rpc(detail.clone())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl VmApi for MockVmApi {
    async fn get_uuid(&self, _session: &SessionRef, _vm: &VmRef) -> XenkitResult<VmUuid> {
        self.call("get_uuid", "get_uuid".into())?;
        Ok(VmUuid::new(&self.uuid))
    }

    async fn get_is_a_template(&self, _session: &SessionRef, _vm: &VmRef) -> XenkitResult<bool> {
        self.call("get_is_a_template", "get_is_a_template".into())?;
        Ok(self.is_template)
    }

    async fn set_is_a_template(
        &self,
        _session: &SessionRef,
        _vm: &VmRef,
        value: bool,
    ) -> XenkitResult<()> {
        self.call("set_is_a_template", format!("set_is_a_template={value}"))
    }

    async fn set_name_label(
        &self,
        _session: &SessionRef,
        _vm: &VmRef,
        label: &str,
    ) -> XenkitResult<()> {
        self.call("set_name_label", format!("set_name_label={label}"))
    }

    async fn set_vcpus_max(
        &self,
        _session: &SessionRef,
        _vm: &VmRef,
        count: u32,
    ) -> XenkitResult<()> {
        self.call("set_vcpus_max", format!("set_vcpus_max={count}"))
    }

    async fn set_vcpus_at_startup(
        &self,
        _session: &SessionRef,
        _vm: &VmRef,
        count: u32,
    ) -> XenkitResult<()> {
        self.call("set_vcpus_at_startup", format!("set_vcpus_at_startup={count}"))
    }

    async fn set_name_description(
        &self,
        _session: &SessionRef,
        _vm: &VmRef,
        description: &str,
    ) -> XenkitResult<()> {
        self.call(
            "set_name_description",
            format!("set_name_description={description}"),
        )
    }

    async fn add_tags(&self, _session: &SessionRef, _vm: &VmRef, tag: &str) -> XenkitResult<()> {
        self.call("add_tags", format!("add_tags={tag}"))
    }

    async fn hard_shutdown(&self, _session: &SessionRef, _vm: &VmRef) -> XenkitResult<()> {
        self.call("hard_shutdown", "hard_shutdown".into())
    }

    async fn destroy(&self, _session: &SessionRef, _vm: &VmRef) -> XenkitResult<()> {
        self.call("destroy", "destroy".into())
    }

    async fn destroy_vdi(&self, _session: &SessionRef, vdi: &VdiRef) -> XenkitResult<()> {
        self.call("destroy_vdi", format!("destroy_vdi={vdi}"))
    }
}

/// Build a connection around a default mock API.
pub fn mock_connection() -> (Connection, CallLog) {
    mock_connection_with(MockVmApi::default())
}

/// Build a connection around the given mock API, returning its call log.
pub fn mock_connection_with(api: MockVmApi) -> (Connection, CallLog) {
    let log = api.log();
    let connection = Connection::new("xen.example", SessionRef::new("sess-1"), Arc::new(api));
    (connection, log)
}

/// Mock storage resolver.
pub struct MockResolver {
    log: CallLog,
    result: Result<String, String>,
}

impl MockResolver {
    pub fn ok(sr: &str) -> Self {
        Self {
            log: CallLog::default(),
            result: Ok(sr.into()),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            log: CallLog::default(),
            result: Err(detail.into()),
        }
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }
}

#[async_trait]
impl StorageResolver for MockResolver {
    async fn resolve(&self, _connection: &Connection) -> XenkitResult<SrRef> {
        self.log.push("get_sr");
        match &self.result {
            Ok(sr) => Ok(SrRef::new(sr)),
            Err(detail) => Err(XenkitError::Rpc(detail.clone())),
        }
    }
}

/// Mock upload transport. Honors an already-cancelled token the way the
/// real transport does.
pub struct MockTransport {
    log: CallLog,
    reply: Result<String, String>,
}

impl MockTransport {
    pub fn replying(raw: &str) -> Self {
        Self {
            log: CallLog::default(),
            reply: Ok(raw.into()),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            log: CallLog::default(),
            reply: Err(detail.into()),
        }
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }
}

#[async_trait]
impl UploadTransport for MockTransport {
    async fn upload(
        &self,
        _url: &str,
        _file: File,
        cancel: &CancellationToken,
    ) -> XenkitResult<String> {
        self.log.push("upload");
        if cancel.is_cancelled() {
            return Err(XenkitError::Transport("upload cancelled".into()));
        }
        match &self.reply {
            Ok(raw) => Ok(raw.clone()),
            Err(detail) => Err(XenkitError::Transport(detail.clone())),
        }
    }
}

/// UI sink that captures everything for assertions.
#[derive(Debug, Default)]
pub struct CaptureUi {
    said: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl CaptureUi {
    pub fn said(&self) -> Vec<String> {
        self.said.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Ui for CaptureUi {
    fn say(&self, message: &str) {
        self.said.lock().unwrap().push(message.into());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.into());
    }
}
