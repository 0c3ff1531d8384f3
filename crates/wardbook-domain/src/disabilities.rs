//! Disability certificate service: certificates plus their commission
//! dates, employers and positions.

use tracing::debug;
use wardbook_store::{Direction, Query};

use crate::clinic::Clinic;
use crate::error::{DomainError, Result};
use crate::models::{CommissionDate, Disability, Employer, Position};

pub fn get_all(clinic: &Clinic, order: &str, direction: Direction) -> Vec<Disability> {
	clinic.disabilities.find(&Query::new().order_by(order, direction))
}

pub fn get_one(clinic: &Clinic, pk: i64) -> Result<Disability> {
	Ok(clinic.disabilities.get(pk)?)
}

/// Creates a certificate. Each patient may hold at most one.
pub fn create(clinic: &Clinic, mut disability: Disability) -> Result<Disability> {
	let taken = clinic
		.disabilities
		.find(&Query::new().eq("patient", disability.patient_id));
	if !taken.is_empty() {
		return Err(DomainError::Validation(
			"The patient already has a disability certificate".to_string(),
		));
	}
	clinic.patients.get(disability.patient_id)?;
	clinic.employers.get(disability.employer_id)?;
	clinic.positions.get(disability.position_id)?;
	let pk = clinic.disabilities.insert(disability.clone());
	disability.pk = Some(pk);
	debug!(pk, patient = disability.patient_id, "disability certificate created");
	Ok(disability)
}

pub fn update(clinic: &Clinic, mut disability: Disability) -> Result<Disability> {
	disability.touch();
	clinic.disabilities.update(disability.clone())?;
	Ok(disability)
}

/// Removes the certificate and its commission dates.
pub fn delete(clinic: &Clinic, pk: i64) -> Result<()> {
	clinic.disabilities.delete(pk)?;
	for date in clinic.commission_dates.find(&Query::new().eq("disability", pk)) {
		if let Some(date_pk) = date.pk {
			clinic.commission_dates.delete(date_pk)?;
		}
	}
	debug!(pk, "disability certificate deleted");
	Ok(())
}

pub fn commission_dates(clinic: &Clinic, disability_pk: i64) -> Vec<CommissionDate> {
	clinic.commission_dates.find(
		&Query::new()
			.eq("disability", disability_pk)
			.order_by("date", Direction::Asc),
	)
}

pub fn add_commission_date(clinic: &Clinic, date: CommissionDate) -> Result<CommissionDate> {
	clinic.disabilities.get(date.disability_id)?;
	let mut date = date;
	let pk = clinic.commission_dates.insert(date.clone());
	date.pk = Some(pk);
	Ok(date)
}

pub fn employers(clinic: &Clinic) -> Vec<Employer> {
	clinic.employers.find(&Query::new().order_by("name", Direction::Asc))
}

pub fn positions(clinic: &Clinic) -> Vec<Position> {
	clinic.positions.find(&Query::new().order_by("name", Direction::Asc))
}
