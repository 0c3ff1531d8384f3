use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Opaque handle to a submitted job, safe to embed in a URL.
///
/// # Examples
///
/// ```
/// use wardbook_tasks::JobId;
///
/// let id = JobId::new();
/// let parsed: JobId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(uuid::Uuid);

impl JobId {
	pub fn new() -> Self {
		Self(uuid::Uuid::new_v4())
	}
}

impl Default for JobId {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for JobId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for JobId {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(uuid::Uuid::parse_str(s)?))
	}
}

/// Caller-visible lifecycle of a job.
///
/// `Pending` covers both "not started yet" and "failed, waiting for
/// its retry"; the distinction is internal to the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
	Pending,
	Running,
	Succeeded,
	Failed,
}

impl JobStatus {
	/// Absorbing states: no further transitions happen.
	pub fn is_terminal(&self) -> bool {
		matches!(self, JobStatus::Succeeded | JobStatus::Failed)
	}
}

impl fmt::Display for JobStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			JobStatus::Pending => "PENDING",
			JobStatus::Running => "RUNNING",
			JobStatus::Succeeded => "SUCCEEDED",
			JobStatus::Failed => "FAILED",
		};
		f.write_str(name)
	}
}

/// How one execution attempt ended. The runner's scheduler decides
/// re-submission from this tag; jobs never retry themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
	/// Finished; the payload is the job's result (for document builds,
	/// the output file path).
	Success(String),
	/// Failed in a way another attempt might fix (missing template,
	/// transient I/O).
	Retry(String),
	/// Failed permanently; retrying can't help.
	Fatal(String),
}

/// A unit of asynchronous work.
#[async_trait]
pub trait Job: Send + Sync {
	/// Stable name for logging.
	fn name(&self) -> &str;

	/// Execute one attempt.
	async fn run(&self) -> JobOutcome;
}
