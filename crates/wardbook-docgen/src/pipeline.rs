use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use wardbook_tasks::{JobId, JobRunner, JobStatus};

use crate::context::ContextSource;
use crate::error::{DocgenError, Result};
use crate::render::RenderRegistry;
use crate::task::BuildFileTask;

const DOCX_CONTENT_TYPE: &str =
	"application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const XLSX_CONTENT_TYPE: &str =
	"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A generated file ready to be served as an attachment.
#[derive(Debug, Clone)]
pub struct Download {
	pub bytes: Vec<u8>,
	pub content_type: &'static str,
	pub filename: String,
}

/// Front door of document generation.
///
/// `submit` validates the requested format against the renderer registry and
/// returns a [`JobId`] immediately; the render itself happens on the runner.
/// `status`, `result`, and `download` poll that handle.
#[derive(Clone)]
pub struct DocumentPipeline {
	registry: RenderRegistry,
	runner: JobRunner,
}

impl DocumentPipeline {
	pub fn new(registry: RenderRegistry, runner: JobRunner) -> Self {
		Self { registry, runner }
	}

	/// Schedules a document build and returns its handle.
	///
	/// An unregistered `format` is rejected here, before any work is
	/// scheduled, so the caller gets a synchronous error instead of a job
	/// that can only fail.
	pub async fn submit(
		&self,
		template: impl Into<PathBuf>,
		format: &str,
		source: Arc<dyn ContextSource>,
	) -> Result<JobId> {
		if !self.registry.contains(format) {
			return Err(DocgenError::UnknownFormat(format.to_string()));
		}
		let template = template.into();
		let task = BuildFileTask::new(&template, format, source, self.registry.clone());
		let job_id = self.runner.submit(Arc::new(task)).await?;
		info!(%job_id, template = %template.display(), format, "document build scheduled");
		Ok(job_id)
	}

	pub async fn status(&self, job_id: JobId) -> Result<JobStatus> {
		Ok(self.runner.status(job_id).await?)
	}

	/// The path of the generated file, if the job has succeeded.
	pub async fn result(&self, job_id: JobId) -> Result<Option<PathBuf>> {
		Ok(self.runner.result(job_id).await?.map(PathBuf::from))
	}

	/// Reads the generated file into memory for serving.
	///
	/// Returns [`DocgenError::ResultMissing`] when the job has not produced
	/// a file yet, or when the file has since been removed from disk.
	pub async fn download(&self, job_id: JobId) -> Result<Download> {
		let path = self
			.result(job_id)
			.await?
			.ok_or(DocgenError::ResultMissing(job_id))?;
		let bytes = match tokio::fs::read(&path).await {
			Ok(bytes) => bytes,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
				return Err(DocgenError::ResultMissing(job_id));
			}
			Err(err) => return Err(err.into()),
		};
		let extension = path
			.extension()
			.and_then(|ext| ext.to_str())
			.unwrap_or("bin");
		Ok(Download {
			bytes,
			content_type: content_type_for(extension),
			filename: format!("file.{extension}"),
		})
	}
}

fn content_type_for(extension: &str) -> &'static str {
	match extension {
		"docx" => DOCX_CONTENT_TYPE,
		"xlsx" => XLSX_CONTENT_TYPE,
		_ => "application/octet-stream",
	}
}
