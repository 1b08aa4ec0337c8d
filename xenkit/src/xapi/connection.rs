//! Authenticated handle to one hypervisor host.

use std::fmt;
use std::sync::Arc;

use xenkit_shared::SessionRef;

use super::VmApi;

/// An authenticated connection to the hypervisor's management API.
///
/// Owned by the pipeline and shared across steps; steps only read from
/// it. Session establishment and renewal happen elsewhere.
#[derive(Clone)]
pub struct Connection {
    host: String,
    session: SessionRef,
    client: Arc<dyn VmApi>,
}

impl Connection {
    pub fn new(host: impl Into<String>, session: SessionRef, client: Arc<dyn VmApi>) -> Self {
        Self {
            host: host.into(),
            session,
            client,
        }
    }

    /// Management endpoint address (`host` or `host:port`).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Session token for both wire-level requests and RPC calls.
    pub fn session(&self) -> &SessionRef {
        &self.session
    }

    /// Instance-management RPC surface.
    pub fn client(&self) -> &dyn VmApi {
        self.client.as_ref()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}
