use std::path::PathBuf;

use wardbook_tasks::JobId;

/// Errors raised while submitting, rendering, or fetching generated documents.
#[derive(Debug, thiserror::Error)]
pub enum DocgenError {
	/// No renderer is registered for the requested output format.
	#[error("no renderer registered for format '{0}'")]
	UnknownFormat(String),

	/// The template file could not be opened or read.
	#[error("cannot read template '{path}': {source}")]
	Template {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The context source could not produce a render context.
	#[error("context source failed: {0}")]
	Context(String),

	/// Rendering failed after the template was opened.
	#[error("render failed: {0}")]
	Render(String),

	/// The job finished but its output file is gone, or the job never
	/// produced one.
	#[error("no generated file available for job {0}")]
	ResultMissing(JobId),

	#[error(transparent)]
	Task(#[from] wardbook_tasks::TaskError),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Zip(#[from] zip::result::ZipError),

	#[error(transparent)]
	Xml(#[from] quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, DocgenError>;
