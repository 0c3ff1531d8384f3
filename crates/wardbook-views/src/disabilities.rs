//! Disability certificate pages.

use async_trait::async_trait;
use http::Method;
use serde_json::json;
use tera::Context;
use wardbook_domain::{disabilities, patients, Disability, DATE_FORMAT};
use wardbook_http::{send_message, Request, Response};

use crate::error::{Result, ViewError};
use crate::forms::{CommissionDateForm, DisabilityForm};
use crate::patients::form_error;
use crate::render::render_partial;
use crate::state::AppState;
use crate::tables::sort_params;
use crate::view::{View, GET_POST, POST};

const FORM_TEMPLATE: &str = "disabilities/form.html";

fn format_date(date: Option<chrono::NaiveDate>) -> String {
	date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
}

/// Certificate joined with the names templates show.
fn certificate_row(state: &AppState, disability: &Disability) -> Result<serde_json::Value> {
	let patient = patients::get_one(&state.clinic, disability.patient_id)?;
	let employer = state
		.clinic
		.employers
		.get(disability.employer_id)
		.map(|e| e.name)
		.unwrap_or_default();
	let position = state
		.clinic
		.positions
		.get(disability.position_id)
		.map(|p| p.name)
		.unwrap_or_default();
	let pk = disability.pk.unwrap_or_default();
	let commissions: Vec<String> = disabilities::commission_dates(&state.clinic, pk)
		.into_iter()
		.map(|c| format_date(c.date))
		.collect();
	Ok(json!({
		"pk": disability.pk,
		"patient": patient.display(),
		"employer": employer,
		"position": position,
		"start_date": format_date(disability.disability_start_date),
		"commission_dates": commissions,
	}))
}

fn form_context(state: &AppState) -> Context {
	let mut context = Context::new();
	context.insert("patients", &state.clinic.patients.all());
	context.insert("employers", &disabilities::employers(&state.clinic));
	context.insert("positions", &disabilities::positions(&state.clinic));
	context
}

/// `/disabilities/{order}/{direction}/`.
pub struct DisabilityListView;

#[async_trait]
impl View for DisabilityListView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let (order, direction) = sort_params(&request, "disability_start_date");
		let rows: Vec<serde_json::Value> =
			disabilities::get_all(&state.clinic, &order, direction)
				.iter()
				.map(|d| certificate_row(state, d))
				.collect::<Result<_>>()?;

		let mut context = Context::new();
		context.insert("certificates", &rows);
		context.insert("order", &order);
		context.insert("direction", direction.as_str());
		render_partial(state, &request, "disabilities/list.html", context)
	}
}

pub struct DisabilityCreateView;

#[async_trait]
impl View for DisabilityCreateView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		if request.method() == Method::GET {
			return render_partial(state, &request, FORM_TEMPLATE, form_context(state));
		}
		let form: DisabilityForm = request.form()?;
		let disability = match form.into_disability() {
			Ok(disability) => disability,
			Err(ViewError::BadRequest(message)) => {
				return form_error(state, &request, FORM_TEMPLATE, form_context(state), &message)
			}
			Err(err) => return Err(err),
		};
		match disabilities::create(&state.clinic, disability) {
			Ok(_) => Ok(send_message(Response::ok(), "ok")?),
			Err(err) if err.is_validation() => {
				form_error(state, &request, FORM_TEMPLATE, form_context(state), &err.to_string())
			}
			Err(err) => Err(err.into()),
		}
	}

	fn allowed_methods(&self) -> &'static [Method] {
		GET_POST
	}
}

pub struct DisabilityUpdateView;

#[async_trait]
impl View for DisabilityUpdateView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let existing = disabilities::get_one(&state.clinic, pk)?;
		let mut context = form_context(state);
		context.insert("certificate", &existing);
		if request.method() == Method::GET {
			return render_partial(state, &request, FORM_TEMPLATE, context);
		}
		let form: DisabilityForm = request.form()?;
		let mut updated = match form.into_disability() {
			Ok(disability) => disability,
			Err(ViewError::BadRequest(message)) => {
				return form_error(state, &request, FORM_TEMPLATE, context, &message)
			}
			Err(err) => return Err(err),
		};
		updated.pk = existing.pk;
		updated.time_create = existing.time_create;
		disabilities::update(&state.clinic, updated)?;
		Ok(send_message(Response::ok(), "ok")?)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		GET_POST
	}
}

/// Removing a certificate also removes its commission dates.
pub struct DisabilityDeleteView;

#[async_trait]
impl View for DisabilityDeleteView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		disabilities::delete(&state.clinic, pk)?;
		Ok(send_message(Response::ok(), "ok")?)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		POST
	}
}

/// Schedules one more commission date on a certificate.
pub struct CommissionDateCreateView;

#[async_trait]
impl View for CommissionDateCreateView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		disabilities::get_one(&state.clinic, pk)?;
		let form: CommissionDateForm = request.form()?;
		let date = form.into_commission_date(pk)?;
		disabilities::add_commission_date(&state.clinic, date)?;
		Ok(send_message(Response::ok(), "ok")?)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		POST
	}
}
