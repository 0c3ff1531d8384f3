//! Asynchronous document generation.
//!
//! Documents are built from OOXML templates shipped with the application:
//! a Word template carries `{{ key }}` placeholders, an Excel template
//! carries header rows that generated data is appended under. Building is
//! slow enough to stay off the request path, so the pipeline schedules each
//! build on a [`JobRunner`](wardbook_tasks::JobRunner) and hands the caller
//! a job id to poll.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use wardbook_docgen::{DocumentPipeline, RenderContext, RenderRegistry, StaticContext};
//! use wardbook_tasks::{JobRunner, MemoryResultBackend};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), wardbook_docgen::DocgenError> {
//! let runner = JobRunner::new(Arc::new(MemoryResultBackend::new()));
//! let pipeline = DocumentPipeline::new(RenderRegistry::with_builtin(), runner);
//!
//! let context = RenderContext::new().with_field("surname", "Ivanov");
//! let job_id = pipeline
//! 	.submit("templates/docx/certificate.docx", "docx", Arc::new(StaticContext(context)))
//! 	.await?;
//! println!("building under job {job_id}");
//! # Ok(())
//! # }
//! ```

mod context;
mod docx;
mod error;
mod pipeline;
mod render;
mod task;
mod xlsx;

pub use context::{ContextSource, RenderContext, StaticContext};
pub use docx::DocxRenderer;
pub use error::{DocgenError, Result};
pub use pipeline::{DocumentPipeline, Download};
pub use render::{RenderRegistry, Renderer};
pub use task::BuildFileTask;
pub use xlsx::XlsxRenderer;
