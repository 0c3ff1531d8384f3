use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::backend::{JobRecord, ResultBackend};
use crate::error::{Result, TaskError};
use crate::job::{Job, JobId, JobOutcome, JobStatus};

const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Executes jobs on the tokio runtime with fixed-delay retry.
///
/// `submit` is fire-and-forget: it records the job as pending, spawns
/// the execution loop and returns the handle immediately. A retryable
/// failure puts the job back to pending and re-runs it after the
/// configured delay; without a retry cap it keeps trying until it
/// succeeds or fails fatally. Jobs are independent: nothing orders
/// concurrently submitted jobs against each other.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use wardbook_tasks::{Job, JobOutcome, JobRunner, JobStatus, MemoryResultBackend};
///
/// struct Noop;
///
/// #[async_trait]
/// impl Job for Noop {
///     fn name(&self) -> &str {
///         "noop"
///     }
///
///     async fn run(&self) -> JobOutcome {
///         JobOutcome::Success("done".to_string())
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let runner = JobRunner::new(Arc::new(MemoryResultBackend::new()));
/// let id = runner.submit(Arc::new(Noop)).await.unwrap();
/// runner.wait(id).await.unwrap();
/// assert_eq!(runner.status(id).await.unwrap(), JobStatus::Succeeded);
/// # });
/// ```
#[derive(Clone)]
pub struct JobRunner {
	backend: Arc<dyn ResultBackend>,
	retry_delay: Duration,
	max_retries: Option<u32>,
}

impl JobRunner {
	pub fn new(backend: Arc<dyn ResultBackend>) -> Self {
		Self {
			backend,
			retry_delay: DEFAULT_RETRY_DELAY,
			max_retries: None,
		}
	}

	/// Delay between a retryable failure and the next attempt.
	pub fn with_retry_delay(mut self, delay: Duration) -> Self {
		self.retry_delay = delay;
		self
	}

	/// Cap the number of retries; exceeding it fails the job. The
	/// default (no cap) matches an at-least-once worker runtime.
	pub fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = Some(max_retries);
		self
	}

	pub fn backend(&self) -> &Arc<dyn ResultBackend> {
		&self.backend
	}

	/// Schedule exactly one job and return its handle. No
	/// deduplication: submitting twice runs twice.
	pub async fn submit(&self, job: Arc<dyn Job>) -> Result<JobId> {
		let job_id = JobId::new();
		self.backend.store(JobRecord::pending(job_id)).await?;
		info!(job = job.name(), %job_id, "job submitted");

		let runner = self.clone();
		tokio::spawn(async move {
			if let Err(err) = runner.execute(job_id, job).await {
				error!(%job_id, %err, "job bookkeeping failed");
			}
		});
		Ok(job_id)
	}

	/// Non-blocking status poll; repeatable, never consumes the job.
	pub async fn status(&self, job_id: JobId) -> Result<JobStatus> {
		let record = self
			.backend
			.get(job_id)
			.await?
			.ok_or(TaskError::UnknownJob(job_id))?;
		Ok(record.status())
	}

	/// Raw result fetch. `None` until the job succeeds; callers are
	/// expected to check status first.
	pub async fn result(&self, job_id: JobId) -> Result<Option<String>> {
		let record = self
			.backend
			.get(job_id)
			.await?
			.ok_or(TaskError::UnknownJob(job_id))?;
		Ok(record.result().map(str::to_string))
	}

	/// Block until the job reaches a terminal state. Test helper; the
	/// web path polls instead.
	pub async fn wait(&self, job_id: JobId) -> Result<JobStatus> {
		loop {
			let status = self.status(job_id).await?;
			if status.is_terminal() {
				return Ok(status);
			}
			tokio::time::sleep(Duration::from_millis(10)).await;
		}
	}

	async fn execute(&self, job_id: JobId, job: Arc<dyn Job>) -> Result<()> {
		let mut attempts: u32 = 0;
		loop {
			self.store_status(job_id, JobStatus::Running).await?;
			match job.run().await {
				JobOutcome::Success(result) => {
					info!(job = job.name(), %job_id, "job succeeded");
					self.backend
						.store(JobRecord::pending(job_id).with_result(result))
						.await?;
					return Ok(());
				}
				JobOutcome::Retry(message) => {
					attempts += 1;
					if let Some(max) = self.max_retries {
						if attempts > max {
							warn!(job = job.name(), %job_id, %message, "retries exhausted");
							self.backend
								.store(
									JobRecord::pending(job_id)
										.with_error(JobStatus::Failed, message),
								)
								.await?;
							return Ok(());
						}
					}
					warn!(job = job.name(), %job_id, %message, attempt = attempts, "job retrying");
					self.backend
						.store(
							JobRecord::pending(job_id)
								.with_error(JobStatus::Pending, message),
						)
						.await?;
					tokio::time::sleep(self.retry_delay).await;
				}
				JobOutcome::Fatal(message) => {
					error!(job = job.name(), %job_id, %message, "job failed");
					self.backend
						.store(JobRecord::pending(job_id).with_error(JobStatus::Failed, message))
						.await?;
					return Ok(());
				}
			}
		}
	}

	async fn store_status(&self, job_id: JobId, status: JobStatus) -> Result<()> {
		let record = self
			.backend
			.get(job_id)
			.await?
			.unwrap_or_else(|| JobRecord::pending(job_id));
		self.backend.store(record.with_status(status)).await
	}
}
