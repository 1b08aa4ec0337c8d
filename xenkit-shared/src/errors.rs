//! Error taxonomy for the import pipeline.
//!
//! Every fatal condition maps to one variant so callers can distinguish,
//! for example, a network failure during upload (`Transport`) from a
//! well-formed-but-empty reply (`Protocol`). A skipped step is not an
//! error and has no variant here.

use std::path::PathBuf;

use thiserror::Error;

pub type XenkitResult<T> = Result<T, XenkitError>;

#[derive(Debug, Error)]
pub enum XenkitError {
    /// Local configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A storage target, instance UUID, or other remote lookup could not
    /// be determined.
    #[error("resolution failed: {0}")]
    Resolution(String),

    /// The source image could not be opened for reading.
    #[error("unable to open source image '{}': {source}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The upload transport failed: network or I/O error, or an
    /// operator-initiated cancellation.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The hypervisor accepted the upload but replied without a usable
    /// instance reference.
    #[error("protocol anomaly: {0}")]
    Protocol(String),

    /// A post-import configuration call failed. The message names the
    /// field and the attempted value.
    #[error("{0}")]
    Mutation(String),

    /// A raw management-API call failed.
    #[error("rpc call failed: {0}")]
    Rpc(String),

    /// Invariant breakage inside the pipeline itself.
    #[error("internal error: {0}")]
    Internal(String),
}
