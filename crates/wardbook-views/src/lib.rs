//! Page and partial handlers behind the router.
//!
//! Each endpoint is a [`View`] bound to a named route; [`routes`]
//! declares the URL table and the bindings, [`App`] resolves and
//! dispatches. Handlers render tera templates, negotiating between
//! whole pages and htmx partials, and lean on `wardbook-domain` for
//! everything the pages actually do.

mod error;
mod forms;
mod render;
mod state;
mod tables;
mod view;

pub mod disabilities;
pub mod documents;
pub mod hospitalizations;
pub mod medical_cards;
pub mod patients;
pub mod routes;

pub use error::{Result, ViewError};
pub use forms::{
	CommissionDateForm, DisabilityForm, HospitalizationForm, LeaveForm, MedicalCardForm,
	PatientForm,
};
pub use render::{render, render_partial, RELAY_TEMPLATE};
pub use routes::{build_app, build_router};
pub use state::AppState;
pub use tables::{render_table, render_table_row, sort_params};
pub use view::{App, View};
