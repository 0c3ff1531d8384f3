//! Patient registry pages.

use async_trait::async_trait;
use http::Method;
use serde::Deserialize;
use tera::Context;
use wardbook_domain::patients;
use wardbook_http::{send_message, Request, Response};
use wardbook_store::Direction;

use crate::error::{Result, ViewError};
use crate::forms::PatientForm;
use crate::render::render_partial;
use crate::state::AppState;
use crate::tables::sort_params;
use crate::view::{View, GET_POST, POST};

const LIST_TEMPLATE: &str = "patients/list.html";
const TABLE_TEMPLATE: &str = "patients/table.html";
const FORM_TEMPLATE: &str = "patients/form.html";

fn list_context(state: &AppState, request: &Request, search: Option<&str>) -> Context {
	let (order, direction) = sort_params(request, "surname");
	let page_number = request
		.param("page")
		.and_then(|raw| raw.parse().ok())
		.unwrap_or(1);
	let page = patients::get_page(
		&state.clinic,
		&order,
		direction,
		page_number,
		search,
		state.per_page,
	);
	let mut context = Context::new();
	context.insert("page", &page);
	context.insert("order", &order);
	context.insert("direction", direction.as_str());
	context.insert("search", &search.unwrap_or_default());
	context
}

/// Refreshed first page of the registry, sent back after a mutation so
/// htmx can swap the listing in place.
fn refreshed_list(state: &AppState, request: &Request) -> Result<Response> {
	let mut context = Context::new();
	let page = patients::get_page(
		&state.clinic,
		"surname",
		Direction::Asc,
		1,
		None,
		state.per_page,
	);
	context.insert("page", &page);
	context.insert("order", "surname");
	context.insert("direction", "asc");
	context.insert("search", "");
	let response = render_partial(state, request, TABLE_TEMPLATE, context)?;
	Ok(send_message(response, "ok")?)
}

/// Re-renders a form with the validation message and an error toast.
pub(crate) fn form_error(
	state: &AppState,
	request: &Request,
	template: &str,
	mut context: Context,
	message: &str,
) -> Result<Response> {
	context.insert("errors", &[message]);
	let response = render_partial(state, request, template, context)?;
	Ok(send_message(response, "error")?)
}

/// `/` and `/patients/{order}/{direction}/{page}/`.
pub struct PatientListView;

#[async_trait]
impl View for PatientListView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let context = list_context(state, &request, None);
		render_partial(state, &request, LIST_TEMPLATE, context)
	}
}

#[derive(Debug, Deserialize)]
struct SearchForm {
	#[serde(default)]
	search: String,
}

/// Live-search partial: the query is prefix-matched word by word
/// against surname, name and patronymic.
pub struct PatientSearchView;

#[async_trait]
impl View for PatientSearchView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let form: SearchForm = request.form()?;
		let search = form.search.trim();
		let context = list_context(state, &request, Some(search).filter(|s| !s.is_empty()));
		render_partial(state, &request, TABLE_TEMPLATE, context)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		POST
	}
}

pub struct PatientCreateView;

#[async_trait]
impl View for PatientCreateView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		if request.method() == Method::GET {
			return render_partial(state, &request, FORM_TEMPLATE, Context::new());
		}
		let form: PatientForm = request.form()?;
		match form.into_patient() {
			Ok(patient) => {
				patients::create(
					&state.clinic,
					patient.surname,
					patient.name,
					patient.patronymic,
					patient.birthday,
				);
				refreshed_list(state, &request)
			}
			Err(ViewError::BadRequest(message)) => {
				form_error(state, &request, FORM_TEMPLATE, Context::new(), &message)
			}
			Err(err) => Err(err),
		}
	}

	fn allowed_methods(&self) -> &'static [Method] {
		GET_POST
	}
}

pub struct PatientUpdateView;

#[async_trait]
impl View for PatientUpdateView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let mut patient = patients::get_one(&state.clinic, pk)?;
		let mut context = Context::new();
		context.insert("patient", &patient);
		if request.method() == Method::GET {
			return render_partial(state, &request, FORM_TEMPLATE, context);
		}
		let form: PatientForm = request.form()?;
		match form.apply(&mut patient) {
			Ok(()) => {
				patients::update(&state.clinic, patient)?;
				refreshed_list(state, &request)
			}
			Err(ViewError::BadRequest(message)) => {
				form_error(state, &request, FORM_TEMPLATE, context, &message)
			}
			Err(err) => Err(err),
		}
	}

	fn allowed_methods(&self) -> &'static [Method] {
		GET_POST
	}
}

pub struct PatientDeleteView;

#[async_trait]
impl View for PatientDeleteView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		patients::delete(&state.clinic, pk)?;
		refreshed_list(state, &request)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		POST
	}
}

/// Card view of one patient with their certificate, if any.
pub struct PatientDetailView;

#[async_trait]
impl View for PatientDetailView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let patient = patients::get_one(&state.clinic, pk)?;
		let disability = wardbook_domain::disabilities::get_all(
			&state.clinic,
			"pk",
			Direction::Asc,
		)
		.into_iter()
		.find(|d| d.patient_id == pk);

		let mut context = Context::new();
		context.insert("patient", &patient);
		context.insert("disability", &disability);
		render_partial(state, &request, "patients/detail.html", context)
	}
}

/// Flips the active flag and hands back the updated row partial.
pub struct PatientToggleStatusView;

#[async_trait]
impl View for PatientToggleStatusView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let patient = patients::toggle_active(&state.clinic, pk)?;
		let mut context = Context::new();
		context.insert("patient", &patient);
		let response = render_partial(state, &request, "patients/row.html", context)?;
		Ok(send_message(response, "ok")?)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		POST
	}
}
