//! Roster export endpoints: submit a build, poll it, download it.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use serde_json::json;
use tera::Context;
use wardbook_docgen::ContextSource;
use wardbook_domain::docs::{CurrentByDoctorsSource, CurrentRosterSource};
use wardbook_http::{Request, Response};
use wardbook_tasks::JobId;
use wardbook_urls::UrlReverser;

use crate::error::{Result, ViewError};
use crate::render::render_partial;
use crate::state::AppState;
use crate::tables::sort_params;
use crate::view::{View, GET_POST};

/// Which slice of the roster goes into the document.
#[derive(Debug, Clone, Copy)]
pub enum RosterShape {
	/// Flat list of everyone in treatment, honoring the page's
	/// doctor filter and sort order.
	Flat,
	/// Grouped under each attending doctor.
	ByDoctor,
}

/// Submits a build of the current roster and renders the progress
/// panel with the poll and download URLs baked in.
pub struct RosterExportView {
	shape: RosterShape,
	template_name: &'static str,
	format: &'static str,
	download_route: &'static str,
}

impl RosterExportView {
	pub fn docx() -> Self {
		Self {
			shape: RosterShape::Flat,
			template_name: "current.docx",
			format: "docx",
			download_route: "documents:download_docx",
		}
	}

	pub fn xlsx() -> Self {
		Self {
			shape: RosterShape::Flat,
			template_name: "current.xlsx",
			format: "xlsx",
			download_route: "documents:download_xlsx",
		}
	}

	pub fn by_doctor_docx() -> Self {
		Self {
			shape: RosterShape::ByDoctor,
			template_name: "current_by_doctors.docx",
			format: "docx",
			download_route: "documents:download_docx",
		}
	}

	fn source(&self, state: &AppState, request: &Request) -> Arc<dyn ContextSource> {
		match self.shape {
			RosterShape::Flat => {
				let (order, direction) = sort_params(request, "patient");
				let doctor = request
					.query("doctor")
					.and_then(|raw| raw.parse().ok())
					.unwrap_or(0);
				Arc::new(CurrentRosterSource::new(
					state.clinic.clone(),
					doctor,
					order,
					direction,
				))
			}
			RosterShape::ByDoctor => Arc::new(CurrentByDoctorsSource::new(state.clinic.clone())),
		}
	}
}

#[async_trait]
impl View for RosterExportView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let template = state.doc_template(self.template_name);
		let source = self.source(state, &request);
		let job_id = state.pipeline.submit(template, self.format, source).await?;

		let id_param =
			BTreeMap::from([("task_id".to_string(), job_id.to_string())]);
		let mut context = Context::new();
		context.insert("task_id", &job_id.to_string());
		context.insert(
			"status_url",
			&state.router.reverse("documents:task_status", &id_param)?,
		);
		context.insert(
			"download_url",
			&state.router.reverse(self.download_route, &id_param)?,
		);
		render_partial(state, &request, "documents/building.html", context)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		GET_POST
	}
}

fn job_id(request: &Request) -> Result<JobId> {
	request
		.param("task_id")
		.and_then(|raw| raw.parse().ok())
		.ok_or(ViewError::NotFound)
}

/// JSON poll target: `{"task_status": "PENDING" | ... }`.
pub struct TaskStatusView;

#[async_trait]
impl View for TaskStatusView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let status = state.pipeline.status(job_id(&request)?).await?;
		Ok(Response::ok().with_json(&json!({ "task_status": status })))
	}
}

/// Streams the finished file as an attachment; 404 until it exists.
pub struct DownloadView;

#[async_trait]
impl View for DownloadView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let download = state.pipeline.download(job_id(&request)?).await?;
		Ok(Response::ok().with_attachment(
			download.bytes,
			download.content_type,
			&download.filename,
		))
	}
}
