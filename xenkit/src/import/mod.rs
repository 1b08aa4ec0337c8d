//! Instance import step.
//!
//! ## Architecture
//!
//! The step runs four phases in strict sequence with early exit on the
//! first failure:
//!
//! ```text
//! 1. Precondition     skip (continue) when no source image is configured
//! 2. Upload           resolve SR, stream the image, parse the reply
//! 3. Resolution       exchange the raw reference for the durable UUID,
//!                     publish it, detect the template flag
//! 4. Configuration    template flag, name, CPU topology, description, tags
//! ```
//!
//! [`TeardownGuard`] provides opt-in compensating destruction on failure.

mod context;
mod step;
mod teardown;

pub use context::ImportContext;
pub use step::ImportInstanceStep;
pub use teardown::TeardownGuard;
