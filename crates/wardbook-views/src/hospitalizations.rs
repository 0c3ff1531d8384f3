//! Admission pages: the live roster and per-patient histories.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use tera::Context;
use wardbook_domain::{
	hospitalizations, patients, schemas, Hospitalization, HospitalizationRow,
};
use wardbook_http::{send_message, Request, Response};
use wardbook_store::Direction;
use wardbook_urls::UrlReverser;

use crate::error::{Result, ViewError};
use crate::forms::{HospitalizationForm, LeaveForm};
use crate::patients::form_error;
use crate::render::render_partial;
use crate::state::AppState;
use crate::tables::{render_table, render_table_row, sort_params};
use crate::view::{View, GET_POST, POST};

const FORM_TEMPLATE: &str = "hospitalizations/form.html";
const ROW_TEMPLATE: &str = "hospitalizations/row.html";

fn reverser(state: &AppState) -> Arc<dyn UrlReverser> {
	state.router.clone()
}

/// The doctor filter from the query string; `0` means every doctor.
fn selected_doctor(request: &Request) -> i64 {
	request
		.query("doctor")
		.and_then(|raw| raw.parse().ok())
		.unwrap_or(0)
}

fn sort_route_params(order: &str, direction: Direction) -> BTreeMap<String, String> {
	BTreeMap::from([
		("order".to_string(), order.to_string()),
		("direction".to_string(), direction.as_str().to_string()),
	])
}

/// Context shared by the create and update forms: the option lists.
fn form_context(state: &AppState) -> Context {
	let mut context = Context::new();
	context.insert("doctors", &state.clinic.doctors.all());
	context.insert("diagnoses", &state.clinic.diagnoses.all());
	context
}

/// `/current/{order}/{direction}/`: everyone still in treatment.
pub struct CurrentListView;

#[async_trait]
impl View for CurrentListView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let (order, direction) = sort_params(&request, "patient");
		let doctor = selected_doctor(&request);
		let stays =
			hospitalizations::get_all_current(&state.clinic, doctor, &order, direction);
		let rows = HospitalizationRow::from_models(&state.clinic, &stays)?;

		let mut query_params = Vec::new();
		if doctor != 0 {
			query_params.push(("doctor".to_string(), doctor.to_string()));
		}
		let schema = schemas::current_hospitalizations_table(
			sort_route_params(&order, direction),
			query_params,
			reverser(state),
		)?;

		let mut context = Context::new();
		context.insert("doctors", &state.clinic.doctors.all());
		context.insert("selected_doctor", &doctor);
		context.insert("order", &order);
		context.insert("direction", direction.as_str());
		render_table(
			state,
			&request,
			"hospitalizations/current.html",
			&schema,
			&rows,
			context,
		)
	}
}

/// `/hospitalizations/{pk}/{order}/{direction}/`: one patient's history.
pub struct HospitalizationListView;

#[async_trait]
impl View for HospitalizationListView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let patient_pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let patient = patients::get_one(&state.clinic, patient_pk)?;
		let (order, direction) = sort_params(&request, "entry_date");
		let stays =
			hospitalizations::get_all(&state.clinic, Some(patient_pk), &order, direction);
		let rows = HospitalizationRow::from_models(&state.clinic, &stays)?;

		let mut route_params = sort_route_params(&order, direction);
		route_params.insert("pk".to_string(), patient_pk.to_string());
		let schema =
			schemas::hospitalizations_table(route_params, Vec::new(), reverser(state))?;

		let mut context = Context::new();
		context.insert("patient", &patient);
		context.insert("order", &order);
		context.insert("direction", direction.as_str());
		render_table(
			state,
			&request,
			"hospitalizations/list.html",
			&schema,
			&rows,
			context,
		)
	}
}

fn stay_saved_row(
	state: &AppState,
	request: &Request,
	stay: &Hospitalization,
) -> Result<Response> {
	let (order, direction) = sort_params(request, "patient");
	let schema = schemas::current_hospitalizations_table(
		sort_route_params(&order, direction),
		Vec::new(),
		reverser(state),
	)?;
	let row = HospitalizationRow::from_model(&state.clinic, stay)?;
	let response =
		render_table_row(state, request, ROW_TEMPLATE, &schema, &row, Context::new())?;
	Ok(send_message(response, "ok")?)
}

/// `/hospitalizations/create/{pk}/`: admits the patient in the path.
pub struct HospitalizationCreateView;

#[async_trait]
impl View for HospitalizationCreateView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let patient_pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let patient = patients::get_one(&state.clinic, patient_pk)?;
		let mut context = form_context(state);
		context.insert("patient", &patient);
		if request.method() == Method::GET {
			return render_partial(state, &request, FORM_TEMPLATE, context);
		}
		let form: HospitalizationForm = request.form()?;
		let stay = match form.into_stay(patient_pk) {
			Ok(stay) => stay,
			Err(ViewError::BadRequest(message)) => {
				return form_error(state, &request, FORM_TEMPLATE, context, &message)
			}
			Err(err) => return Err(err),
		};
		match hospitalizations::create(&state.clinic, stay) {
			Ok(stay) => stay_saved_row(state, &request, &stay),
			Err(err) if err.is_validation() => {
				form_error(state, &request, FORM_TEMPLATE, context, &err.to_string())
			}
			Err(err) => Err(err.into()),
		}
	}

	fn allowed_methods(&self) -> &'static [Method] {
		GET_POST
	}
}

/// Shared by the history and roster edit routes; only the success
/// payload differs (the roster swaps its row in place).
pub struct HospitalizationUpdateView {
	inline_row: bool,
}

impl HospitalizationUpdateView {
	pub fn page() -> Self {
		Self { inline_row: false }
	}

	pub fn inline() -> Self {
		Self { inline_row: true }
	}
}

#[async_trait]
impl View for HospitalizationUpdateView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let mut stay = hospitalizations::get_one(&state.clinic, pk)?;
		let mut context = form_context(state);
		context.insert("stay", &stay);
		if request.method() == Method::GET {
			return render_partial(state, &request, FORM_TEMPLATE, context);
		}
		let form: HospitalizationForm = request.form()?;
		if let Err(err) = form.apply(&mut stay) {
			return match err {
				ViewError::BadRequest(message) => {
					form_error(state, &request, FORM_TEMPLATE, context, &message)
				}
				other => Err(other),
			};
		}
		match hospitalizations::update(&state.clinic, stay) {
			Ok(stay) if self.inline_row => stay_saved_row(state, &request, &stay),
			Ok(_) => {
				let response = Response::ok();
				Ok(send_message(response, "ok")?)
			}
			Err(err) if err.is_validation() => {
				form_error(state, &request, FORM_TEMPLATE, context, &err.to_string())
			}
			Err(err) => Err(err.into()),
		}
	}

	fn allowed_methods(&self) -> &'static [Method] {
		GET_POST
	}
}

/// Deletes a stay; htmx drops the row on the empty 200.
pub struct HospitalizationDeleteView;

#[async_trait]
impl View for HospitalizationDeleteView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		hospitalizations::delete(&state.clinic, pk)?;
		Ok(send_message(Response::ok(), "ok")?)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		POST
	}
}

/// `/current/leave/{pk}/`: discharges the patient, now by default.
pub struct HospitalizationLeaveView;

#[async_trait]
impl View for HospitalizationLeaveView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let stay = hospitalizations::get_one(&state.clinic, pk)?;
		let mut context = Context::new();
		context.insert("stay", &stay);
		if request.method() == Method::GET {
			return render_partial(state, &request, "hospitalizations/leave.html", context);
		}
		let form: LeaveForm = request.form()?;
		let leaving = match form.leaving_date() {
			Ok(leaving) => leaving,
			Err(ViewError::BadRequest(message)) => {
				return form_error(
					state,
					&request,
					"hospitalizations/leave.html",
					context,
					&message,
				)
			}
			Err(err) => return Err(err),
		};
		match hospitalizations::leave(&state.clinic, pk, leaving) {
			Ok(_) => Ok(send_message(Response::ok(), "ok")?),
			Err(err) if err.is_validation() => form_error(
				state,
				&request,
				"hospitalizations/leave.html",
				context,
				&err.to_string(),
			),
			Err(err) => Err(err.into()),
		}
	}

	fn allowed_methods(&self) -> &'static [Method] {
		GET_POST
	}
}

/// Read-only stay details for the expandable row.
pub struct HospitalizationDetailView;

#[async_trait]
impl View for HospitalizationDetailView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let stay = hospitalizations::get_one(&state.clinic, pk)?;
		let patient = patients::get_one(&state.clinic, stay.patient_id)?;
		let doctor = stay.doctor_id.and_then(|id| state.clinic.doctors.get(id).ok());
		let diagnosis =
			stay.diagnosis_id.and_then(|id| state.clinic.diagnoses.get(id).ok());

		let mut context = Context::new();
		context.insert("stay", &stay);
		context.insert("period", &stay.display());
		context.insert("patient", &patient);
		context.insert("doctor", &doctor);
		context.insert("diagnosis", &diagnosis);
		render_partial(state, &request, "hospitalizations/detail.html", context)
	}
}
