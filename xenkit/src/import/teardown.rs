//! Opt-in compensating teardown for failed imports.

use xenkit_shared::{VdiRef, VmRef};

/// Records what the import created so it can be destroyed if a later
/// phase fails.
///
/// Disabled by default: a failed import leaves the partially configured
/// instance in place for inspection. Pipelines that prefer a clean
/// hypervisor opt in via [`super::ImportInstanceStep::with_teardown`].
///
/// Unlike a drop guard, destruction here needs remote calls, so the guard
/// only tracks state; the step's `cleanup` issues the RPCs.
#[derive(Debug)]
pub struct TeardownGuard {
    enabled: bool,
    armed: bool,
    instance: Option<VmRef>,
    vdi: Option<VdiRef>,
}

impl TeardownGuard {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            armed: true,
            instance: None,
            vdi: None,
        }
    }

    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::disabled()
        }
    }

    /// Register the imported instance for destruction on failure.
    pub fn record_instance(&mut self, vm: VmRef) {
        self.instance = Some(vm);
    }

    /// Register a disk image for destruction on failure. The import
    /// endpoint itself only yields an instance; a pipeline that tracked
    /// the created disk separately may register it here.
    pub fn record_vdi(&mut self, vdi: VdiRef) {
        self.vdi = Some(vdi);
    }

    /// Disarm on success; a completed import is never torn down.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn should_run(&self) -> bool {
        self.enabled && self.armed && (self.instance.is_some() || self.vdi.is_some())
    }

    /// Hand over the recorded targets, leaving the guard empty.
    pub fn take_targets(&mut self) -> (Option<VmRef>, Option<VdiRef>) {
        (self.instance.take(), self.vdi.take())
    }
}
