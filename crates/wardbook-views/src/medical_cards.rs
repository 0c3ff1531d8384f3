//! Medical card pages.

use std::collections::BTreeMap;

use async_trait::async_trait;
use http::Method;
use tera::Context;
use wardbook_domain::{medical_cards, schemas, MedicalCard, MedicalCardRow};
use wardbook_http::{send_message, Request, Response};
use wardbook_store::Direction;

use crate::error::{Result, ViewError};
use crate::forms::MedicalCardForm;
use crate::patients::form_error;
use crate::render::render_partial;
use crate::state::AppState;
use crate::tables::{render_table, render_table_row, sort_params};
use crate::view::{View, GET_POST, POST};

const FORM_TEMPLATE: &str = "medical_cards/form.html";
const ROW_TEMPLATE: &str = "medical_cards/row.html";

fn schema(
	state: &AppState,
	order: &str,
	direction: Direction,
) -> Result<wardbook_tables::TableSchema> {
	let route_params = BTreeMap::from([
		("order".to_string(), order.to_string()),
		("direction".to_string(), direction.as_str().to_string()),
	]);
	Ok(schemas::medical_cards_table(route_params, Vec::new(), state.router.clone())?)
}

fn form_context(state: &AppState) -> Context {
	let mut context = Context::new();
	context.insert("diagnoses", &state.clinic.diagnoses.all());
	context.insert("hospitalizations", &state.clinic.hospitalizations.all());
	context
}

fn saved_row(state: &AppState, request: &Request, card: &MedicalCard) -> Result<Response> {
	let (order, direction) = sort_params(request, "number");
	let schema = schema(state, &order, direction)?;
	let row = MedicalCardRow::from_model(&state.clinic, card)?;
	let response =
		render_table_row(state, request, ROW_TEMPLATE, &schema, &row, Context::new())?;
	Ok(send_message(response, "ok")?)
}

/// `/cards/{order}/{direction}/`.
pub struct MedicalCardListView;

#[async_trait]
impl View for MedicalCardListView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let (order, direction) = sort_params(&request, "number");
		let cards = medical_cards::get_all(&state.clinic, &order, direction);
		let rows = MedicalCardRow::from_models(&state.clinic, &cards)?;
		let schema = schema(state, &order, direction)?;

		let mut context = Context::new();
		context.insert("order", &order);
		context.insert("direction", direction.as_str());
		render_table(state, &request, "medical_cards/list.html", &schema, &rows, context)
	}
}

pub struct MedicalCardCreateView;

#[async_trait]
impl View for MedicalCardCreateView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		if request.method() == Method::GET {
			return render_partial(state, &request, FORM_TEMPLATE, form_context(state));
		}
		let form = MedicalCardForm::from_pairs(request.form()?)?;
		let card = medical_cards::create(&state.clinic, form.into_card());
		saved_row(state, &request, &card)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		GET_POST
	}
}

pub struct MedicalCardUpdateView;

#[async_trait]
impl View for MedicalCardUpdateView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let mut card = medical_cards::get_one(&state.clinic, pk)?;
		let mut context = form_context(state);
		context.insert("card", &card);
		if request.method() == Method::GET {
			return render_partial(state, &request, FORM_TEMPLATE, context);
		}
		let form = match MedicalCardForm::from_pairs(request.form()?) {
			Ok(form) => form,
			Err(ViewError::BadRequest(message)) => {
				return form_error(state, &request, FORM_TEMPLATE, context, &message)
			}
			Err(err) => return Err(err),
		};
		form.apply(&mut card);
		let card = medical_cards::update(&state.clinic, card)?;
		saved_row(state, &request, &card)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		GET_POST
	}
}

pub struct MedicalCardDeleteView;

#[async_trait]
impl View for MedicalCardDeleteView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		medical_cards::delete(&state.clinic, pk)?;
		Ok(send_message(Response::ok(), "ok")?)
	}

	fn allowed_methods(&self) -> &'static [Method] {
		POST
	}
}

/// Card details with the resolved diagnosis and stay labels.
pub struct MedicalCardDetailView;

#[async_trait]
impl View for MedicalCardDetailView {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response> {
		let pk = request.param_pk().ok_or(ViewError::NotFound)?;
		let card = medical_cards::get_one(&state.clinic, pk)?;
		let row = MedicalCardRow::from_model(&state.clinic, &card)?;

		let mut context = Context::new();
		context.insert("card", &card);
		context.insert("diagnosis", &row.diagnosis);
		context.insert("hospitalization", &row.hospitalization);
		render_partial(state, &request, "medical_cards/detail.html", context)
	}
}
