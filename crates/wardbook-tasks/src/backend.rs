use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::job::{JobId, JobStatus};

/// Stored state of one job: status plus result or error payload.
///
/// # Examples
///
/// ```
/// use wardbook_tasks::{JobId, JobRecord, JobStatus};
///
/// let record = JobRecord::pending(JobId::new());
/// assert_eq!(record.status(), JobStatus::Pending);
/// assert!(record.result().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
	job_id: JobId,
	status: JobStatus,
	result: Option<String>,
	error: Option<String>,
	created_at: i64,
}

impl JobRecord {
	pub fn pending(job_id: JobId) -> Self {
		Self {
			job_id,
			status: JobStatus::Pending,
			result: None,
			error: None,
			created_at: chrono::Utc::now().timestamp(),
		}
	}

	pub fn job_id(&self) -> JobId {
		self.job_id
	}

	pub fn status(&self) -> JobStatus {
		self.status
	}

	pub fn result(&self) -> Option<&str> {
		self.result.as_deref()
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn created_at(&self) -> i64 {
		self.created_at
	}

	pub fn with_status(mut self, status: JobStatus) -> Self {
		self.status = status;
		self
	}

	pub fn with_result(mut self, result: String) -> Self {
		self.status = JobStatus::Succeeded;
		self.result = Some(result);
		self
	}

	pub fn with_error(mut self, status: JobStatus, error: String) -> Self {
		self.status = status;
		self.error = Some(error);
		self
	}
}

/// Persistence seam for job state. The runner writes through it on
/// every transition; the polling views read through it.
#[async_trait]
pub trait ResultBackend: Send + Sync {
	async fn store(&self, record: JobRecord) -> Result<()>;
	async fn get(&self, job_id: JobId) -> Result<Option<JobRecord>>;
	async fn delete(&self, job_id: JobId) -> Result<()>;
}

/// In-memory backend, the default for a single-process deployment and
/// for tests.
#[derive(Default)]
pub struct MemoryResultBackend {
	records: Arc<RwLock<HashMap<JobId, JobRecord>>>,
}

impl MemoryResultBackend {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl ResultBackend for MemoryResultBackend {
	async fn store(&self, record: JobRecord) -> Result<()> {
		let mut records = self.records.write().await;
		records.insert(record.job_id(), record);
		Ok(())
	}

	async fn get(&self, job_id: JobId) -> Result<Option<JobRecord>> {
		let records = self.records.read().await;
		Ok(records.get(&job_id).cloned())
	}

	async fn delete(&self, job_id: JobId) -> Result<()> {
		let mut records = self.records.write().await;
		records.remove(&job_id);
		Ok(())
	}
}
