//! Operator-facing messaging sink.

/// One-way diagnostic output toward the operator driving the build.
///
/// Distinct from the `tracing` stack: UI messages are part of the build's
/// visible surface, log records are not. Nothing is read back from the
/// sink.
pub trait Ui: Send + Sync {
    /// Informational progress message.
    fn say(&self, message: &str);

    /// Failure message. Emitting one does not terminate anything by
    /// itself; the step signals the halt separately.
    fn error(&self, message: &str);
}

/// Routes operator messages through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingUi;

impl Ui for TracingUi {
    fn say(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
