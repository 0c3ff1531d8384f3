use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use wardbook_tasks::{Job, JobOutcome};

use crate::context::ContextSource;
use crate::error::DocgenError;
use crate::render::RenderRegistry;

/// One document build, runnable as a background job.
///
/// The job gathers its context, renders the template into a fresh temporary
/// file, and reports that file's path as the job result. Transient failures
/// (unreadable template, a context source that cannot reach its data) ask
/// the runner for a retry; a format with no registered renderer is fatal,
/// since submission should have rejected it already.
pub struct BuildFileTask {
	template: PathBuf,
	format: String,
	source: Arc<dyn ContextSource>,
	registry: RenderRegistry,
}

impl BuildFileTask {
	pub fn new(
		template: impl Into<PathBuf>,
		format: impl Into<String>,
		source: Arc<dyn ContextSource>,
		registry: RenderRegistry,
	) -> Self {
		Self {
			template: template.into(),
			format: format.into(),
			source,
			registry,
		}
	}
}

#[async_trait]
impl Job for BuildFileTask {
	fn name(&self) -> &str {
		"build_file"
	}

	async fn run(&self) -> JobOutcome {
		let context = match self.source.context().await {
			Ok(context) => context,
			Err(err) => return JobOutcome::Retry(format!("context not ready: {err}")),
		};

		let Some(renderer) = self.registry.get(&self.format) else {
			return JobOutcome::Fatal(DocgenError::UnknownFormat(self.format.clone()).to_string());
		};

		let out = match tempfile::Builder::new()
			.prefix("wardbook-")
			.suffix(&format!(".{}", self.format))
			.tempfile()
		{
			Ok(file) => file,
			Err(err) => return JobOutcome::Retry(format!("cannot allocate output file: {err}")),
		};

		let path = match out.into_temp_path().keep() {
			Ok(path) => path,
			Err(err) => return JobOutcome::Retry(format!("cannot keep output file: {err}")),
		};

		match renderer.render(&self.template, &context, &path) {
			Ok(()) => {
				debug!(template = %self.template.display(), out = %path.display(), "document rendered");
				JobOutcome::Success(path.display().to_string())
			}
			Err(err) => {
				let _ = std::fs::remove_file(&path);
				JobOutcome::Retry(err.to_string())
			}
		}
	}
}
