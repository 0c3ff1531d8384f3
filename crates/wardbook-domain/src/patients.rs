//! Patient registry service: search, ordering, pagination, CRUD.

use chrono::NaiveDate;
use tracing::debug;
use wardbook_store::{Direction, Page, Paginator, Query};

use crate::clinic::Clinic;
use crate::error::Result;
use crate::models::Patient;

/// Search words map positionally onto surname, name, patronymic.
const SEARCH_FIELDS: [&str; 3] = ["surname", "name", "patronymic"];

/// All patients ordered by `order`/`direction`, optionally narrowed by a
/// search query. The query is split into at most three words, each
/// prefix-matched case-insensitively against surname, name and
/// patronymic in that order.
pub fn get_all(
	clinic: &Clinic,
	order: &str,
	direction: Direction,
	search: Option<&str>,
) -> Vec<Patient> {
	let mut query = Query::new().order_by(order, direction);
	if let Some(search) = search {
		for (word, field) in search.split_whitespace().zip(SEARCH_FIELDS) {
			query = query.istartswith(field, word);
		}
	}
	clinic.patients.find(&query)
}

pub fn get_page(
	clinic: &Clinic,
	order: &str,
	direction: Direction,
	page_number: usize,
	search: Option<&str>,
	per_page: usize,
) -> Page<Patient> {
	let patients = get_all(clinic, order, direction, search);
	Paginator::new(per_page).page(patients, page_number)
}

pub fn get_one(clinic: &Clinic, pk: i64) -> Result<Patient> {
	Ok(clinic.patients.get(pk)?)
}

pub fn create(
	clinic: &Clinic,
	surname: String,
	name: String,
	patronymic: String,
	birthday: NaiveDate,
) -> Patient {
	let mut patient = Patient::new(surname, name, patronymic, birthday);
	let pk = clinic.patients.insert(patient.clone());
	patient.pk = Some(pk);
	debug!(pk, "patient created");
	patient
}

pub fn update(clinic: &Clinic, mut patient: Patient) -> Result<Patient> {
	patient.touch();
	clinic.patients.update(patient.clone())?;
	Ok(patient)
}

pub fn delete(clinic: &Clinic, pk: i64) -> Result<()> {
	clinic.patients.delete(pk)?;
	debug!(pk, "patient deleted");
	Ok(())
}

/// Flips the active flag, returning the stored record.
pub fn toggle_active(clinic: &Clinic, pk: i64) -> Result<Patient> {
	let mut patient = clinic.patients.get(pk)?;
	patient.active = !patient.active;
	patient.touch();
	clinic.patients.update(patient.clone())?;
	Ok(patient)
}
