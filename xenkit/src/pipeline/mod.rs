//! Pipeline step contract.
//!
//! A build pipeline is an ordered sequence of steps run by an external
//! driver against a shared context. Steps run strictly sequentially; the
//! driver owns scheduling, and pipeline-level abort (operator cancel of
//! the whole run) is raised by the driver itself, never by a step.

use async_trait::async_trait;

/// Outcome a step reports to the pipeline driver.
///
/// A skipped step ("nothing to do") is `Continue`. There is no retry
/// outcome; retries are a driver-level concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// Proceed to the next step.
    Continue,
    /// Stop the pipeline; no further steps run.
    Halt,
}

/// Trait for steps that can be sequenced by a pipeline driver.
///
/// A step reports its own failures through the operator sink before
/// returning [`StepAction::Halt`]; `run` never panics on remote errors.
#[async_trait]
pub trait Step<Ctx: Send>: Send + Sync {
    /// Execute the step against the shared pipeline context.
    async fn run(&mut self, ctx: &mut Ctx) -> StepAction;

    /// Compensating actions after the pipeline finishes or fails.
    ///
    /// Default is a no-op. Steps that acquire remote resources may
    /// override this to release them; the driver calls it for every step
    /// that ran, in reverse order.
    async fn cleanup(&mut self, _ctx: &mut Ctx) {}

    /// Human-readable step name for logging.
    fn name(&self) -> &str;
}
