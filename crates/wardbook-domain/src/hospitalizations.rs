//! Hospitalization service: department roster queries, admission and
//! discharge with date-window validation.

use chrono::{NaiveDateTime, Utc};
use tracing::debug;
use wardbook_store::{Direction, Query, Record, Value};

use crate::clinic::Clinic;
use crate::error::{DomainError, Result};
use crate::models::Hospitalization;
use crate::validation;

/// All stays, optionally narrowed to one patient, ordered by
/// `order`/`direction`. Ordering by `surname` sorts on the referenced
/// patient's surname; every other order key reads the stay itself.
pub fn get_all(
	clinic: &Clinic,
	patient_pk: Option<i64>,
	order: &str,
	direction: Direction,
) -> Vec<Hospitalization> {
	let mut query = Query::new();
	if let Some(pk) = patient_pk {
		query = query.eq("patient", pk);
	}
	sort(clinic, clinic.hospitalizations.find(&query), order, direction)
}

/// Stays without a discharge date, optionally narrowed to one doctor
/// (`0` means all doctors).
pub fn get_all_current(
	clinic: &Clinic,
	selected_doctor: i64,
	order: &str,
	direction: Direction,
) -> Vec<Hospitalization> {
	let mut current: Vec<Hospitalization> = clinic
		.hospitalizations
		.all()
		.into_iter()
		.filter(Hospitalization::is_current)
		.collect();
	if selected_doctor != 0 {
		current.retain(|stay| stay.doctor_id == Some(selected_doctor));
	}
	sort(clinic, current, order, direction)
}

fn sort(
	clinic: &Clinic,
	mut stays: Vec<Hospitalization>,
	order: &str,
	direction: Direction,
) -> Vec<Hospitalization> {
	let key = |stay: &Hospitalization| -> Value {
		// "patient"/"surname" order both mean the joined patient surname.
		if order == "surname" || order == "patient" {
			clinic
				.patients
				.get(stay.patient_id)
				.map(|p| Value::from(p.surname))
				.unwrap_or(Value::Null)
		} else {
			stay.get(order)
		}
	};
	stays.sort_by(|a, b| {
		let ordering = key(a).cmp(&key(b));
		match direction {
			Direction::Asc => ordering,
			Direction::Desc => ordering.reverse(),
		}
	});
	stays
}

pub fn get_one(clinic: &Clinic, pk: i64) -> Result<Hospitalization> {
	Ok(clinic.hospitalizations.get(pk)?)
}

/// Admits a patient. The new stay's window must not overlap any of the
/// patient's existing stays.
pub fn create(clinic: &Clinic, mut stay: Hospitalization) -> Result<Hospitalization> {
	validate(clinic, &stay, None)?;
	let pk = clinic.hospitalizations.insert(stay.clone());
	stay.pk = Some(pk);
	debug!(pk, patient = stay.patient_id, "hospitalization created");
	Ok(stay)
}

/// Updates a stay; the window check skips the stay itself.
pub fn update(clinic: &Clinic, mut stay: Hospitalization) -> Result<Hospitalization> {
	validate(clinic, &stay, stay.pk)?;
	stay.touch();
	clinic.hospitalizations.update(stay.clone())?;
	Ok(stay)
}

pub fn delete(clinic: &Clinic, pk: i64) -> Result<()> {
	clinic.hospitalizations.delete(pk)?;
	debug!(pk, "hospitalization deleted");
	Ok(())
}

/// Discharges the patient: stamps the leaving date (now when `None`)
/// after validating it against the entry date.
pub fn leave(
	clinic: &Clinic,
	pk: i64,
	leaving_date: Option<NaiveDateTime>,
) -> Result<Hospitalization> {
	let mut stay = clinic.hospitalizations.get(pk)?;
	let leaving = leaving_date.unwrap_or_else(|| Utc::now().naive_utc());
	if !validation::check_date_range(stay.entry_date, Some(leaving)) {
		return Err(DomainError::Validation(
			"Discharge date can't precede the admission date".to_string(),
		));
	}
	stay.leaving_date = Some(leaving);
	stay.touch();
	clinic.hospitalizations.update(stay.clone())?;
	debug!(pk, "patient discharged");
	Ok(stay)
}

fn validate(clinic: &Clinic, stay: &Hospitalization, skip_pk: Option<i64>) -> Result<()> {
	let existing: Vec<Hospitalization> = clinic
		.hospitalizations
		.find(&Query::new().eq("patient", stay.patient_id))
		.into_iter()
		.filter(|other| skip_pk.is_none() || other.pk != skip_pk)
		.collect();
	validation::validate_hospitalization_window(
		stay.entry_date,
		stay.leaving_date,
		&existing,
		Utc::now().naive_utc(),
	)
}
