//! Disk-image import step for Xen-style hypervisors.
//!
//! One stage of an image-building pipeline: upload a packaged disk image
//! (XVA) to the hypervisor's management endpoint, then bring the created
//! instance into a usable, configured state.
//!
//! ## Architecture
//!
//! ```text
//! ImportInstanceStep (pipeline::Step)
//!   1. Precondition     skip when no source image is configured
//!   2. Upload           resolve SR, stream the image, parse the reply
//!   3. Resolution       exchange the raw reference for the durable UUID
//!   4. Configuration    template flag, name, CPUs, description, tags
//! ```
//!
//! The step drives a set of narrow collaborator contracts: the management
//! API ([`xapi::VmApi`]), the upload transport ([`upload::UploadTransport`]),
//! the storage resolver ([`config::StorageResolver`]) and the operator sink
//! ([`ui::Ui`]). It publishes exactly one output, the instance UUID, into
//! its [`import::ImportContext`].

pub mod config;
pub mod import;
pub mod pipeline;
pub mod tags;
pub mod ui;
pub mod upload;
pub mod xapi;

#[cfg(test)]
pub(crate) mod testutil;

pub use xenkit_shared::errors::{XenkitError, XenkitResult};
pub use xenkit_shared::{SessionRef, SrRef, VdiRef, VmRef, VmUuid};

pub use config::{ImportConfig, StorageResolver};
pub use import::{ImportContext, ImportInstanceStep, TeardownGuard};
pub use pipeline::{Step, StepAction};
pub use ui::{TracingUi, Ui};
pub use upload::{HttpUploadTransport, UploadTransport};
pub use xapi::{Connection, VmApi};
