//! Clinic domain: entities, services and table declarations.
//!
//! Entities are plain value objects stored in
//! [`MemoryStore`](wardbook_store::MemoryStore)s aggregated by [`Clinic`].
//! Service modules mirror the application's pages: `patients`,
//! `hospitalizations`, `medical_cards`, `disabilities`. The `schemas`
//! module declares the list-page tables, `rows` flattens entities for
//! them, and `docs` feeds the document pipeline.

mod clinic;
mod converters;
mod error;
mod models;
mod rows;
mod validation;

pub mod disabilities;
pub mod docs;
pub mod hospitalizations;
pub mod medical_cards;
pub mod patients;
pub mod schemas;

pub use clinic::Clinic;
pub use converters::{DateConverter, FioConverter};
pub use error::{DomainError, Result};
pub use models::{
	CommissionDate, Diagnosis, Disability, Doctor, Employer, Hospitalization, MedicalCard,
	Patient, Position, DATETIME_FORMAT, DATE_FORMAT,
};
pub use rows::{HospitalizationRow, MedicalCardRow};
pub use validation::{check_date_range, validate_hospitalization_window};
