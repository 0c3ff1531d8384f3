use thiserror::Error;

use crate::job::JobId;

/// Errors raised by the job runner and result backends.
#[derive(Debug, Error)]
pub enum TaskError {
	/// No record exists for the given job handle.
	#[error("unknown job: {0}")]
	UnknownJob(JobId),
	/// The result backend failed to store or load a record.
	#[error("result backend error: {0}")]
	Backend(String),
}

pub type Result<T> = std::result::Result<T, TaskError>;
