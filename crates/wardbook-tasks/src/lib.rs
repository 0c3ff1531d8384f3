//! Background job execution for Wardbook
//!
//! The web request path never does slow work inline; it hands a
//! [`Job`] to the [`JobRunner`] and gets a [`JobId`] back immediately.
//! The runner executes jobs on the tokio runtime, persists their
//! status through a [`ResultBackend`], and re-runs retryable failures
//! after a fixed delay. Callers observe progress purely by polling.
//!
//! Jobs signal how they ended through [`JobOutcome`]: success with a
//! result payload, a retryable failure, or a fatal failure. The runner
//! owns the retry decision; jobs never resubmit themselves.

mod backend;
mod error;
mod job;
mod runner;

pub use backend::{JobRecord, MemoryResultBackend, ResultBackend};
pub use error::{Result, TaskError};
pub use job::{Job, JobId, JobOutcome, JobStatus};
pub use runner::JobRunner;
