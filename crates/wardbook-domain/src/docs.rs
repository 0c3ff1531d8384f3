//! Context sources feeding the document pipeline.
//!
//! Each source snapshots its query parameters at submission time and
//! reads the stores when the background job runs.

use async_trait::async_trait;
use chrono::Utc;
use wardbook_docgen::{ContextSource, DocgenError, RenderContext};
use wardbook_store::Direction;

use crate::clinic::Clinic;
use crate::hospitalizations;
use crate::models::{DATE_FORMAT, DATETIME_FORMAT};

/// Row data for the current-roster spreadsheet and list document: one
/// row per patient in the department, `[patient fio, birthday, entry
/// date, doctor fio]`.
#[derive(Debug, Clone)]
pub struct CurrentRosterSource {
	clinic: Clinic,
	selected_doctor: i64,
	order: String,
	direction: Direction,
}

impl CurrentRosterSource {
	pub fn new(clinic: Clinic, selected_doctor: i64, order: impl Into<String>, direction: Direction) -> Self {
		Self { clinic, selected_doctor, order: order.into(), direction }
	}
}

#[async_trait]
impl ContextSource for CurrentRosterSource {
	async fn context(&self) -> wardbook_docgen::Result<RenderContext> {
		let stays = hospitalizations::get_all_current(
			&self.clinic,
			self.selected_doctor,
			&self.order,
			self.direction,
		);
		let mut rows = Vec::with_capacity(stays.len());
		for stay in stays {
			let patient = self
				.clinic
				.patients
				.get(stay.patient_id)
				.map_err(|err| DocgenError::Context(err.to_string()))?;
			let doctor_fio = match stay.doctor_id {
				Some(pk) => self
					.clinic
					.doctors
					.get(pk)
					.map(|d| d.fio())
					.unwrap_or_default(),
				None => String::new(),
			};
			rows.push(vec![
				patient.fio(),
				patient.birthday.format(DATE_FORMAT).to_string(),
				stay.entry_date.format(DATE_FORMAT).to_string(),
				doctor_fio,
			]);
		}
		Ok(RenderContext::new()
			.with_field("date", Utc::now().naive_utc().format(DATE_FORMAT).to_string())
			.with_rows(rows))
	}
}

/// Field data for the roster-by-doctor document: one multi-line block
/// per doctor, patients ordered by surname under each.
#[derive(Debug, Clone)]
pub struct CurrentByDoctorsSource {
	clinic: Clinic,
}

impl CurrentByDoctorsSource {
	pub fn new(clinic: Clinic) -> Self {
		Self { clinic }
	}
}

#[async_trait]
impl ContextSource for CurrentByDoctorsSource {
	async fn context(&self) -> wardbook_docgen::Result<RenderContext> {
		let stays =
			hospitalizations::get_all_current(&self.clinic, 0, "surname", Direction::Asc);

		// Doctors in surname order, unassigned stays last.
		let mut doctors = self.clinic.doctors.all();
		doctors.sort_by(|a, b| a.last_name.cmp(&b.last_name));

		let mut lines = Vec::new();
		for doctor in &doctors {
			let assigned: Vec<String> = stays
				.iter()
				.filter(|stay| stay.doctor_id == doctor.pk)
				.map(|stay| describe(&self.clinic, stay))
				.collect::<wardbook_docgen::Result<_>>()?;
			if assigned.is_empty() {
				continue;
			}
			lines.push(doctor.fio());
			lines.extend(assigned);
		}
		let unassigned: Vec<String> = stays
			.iter()
			.filter(|stay| stay.doctor_id.is_none())
			.map(|stay| describe(&self.clinic, stay))
			.collect::<wardbook_docgen::Result<_>>()?;
		if !unassigned.is_empty() {
			lines.push("No attending doctor".to_string());
			lines.extend(unassigned);
		}

		Ok(RenderContext::new()
			.with_field("date", Utc::now().naive_utc().format(DATE_FORMAT).to_string())
			.with_field("roster", lines.join("\n")))
	}
}

fn describe(
	clinic: &Clinic,
	stay: &crate::models::Hospitalization,
) -> wardbook_docgen::Result<String> {
	let patient = clinic
		.patients
		.get(stay.patient_id)
		.map_err(|err| DocgenError::Context(err.to_string()))?;
	Ok(format!("  {}, {}", patient.fio(), stay.entry_date.format(DATETIME_FORMAT)))
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;
	use crate::models::{Doctor, Hospitalization};
	use crate::patients;

	fn clinic_with_roster() -> Clinic {
		let clinic = Clinic::new();
		patients::create(
			&clinic,
			"Ivanov".into(),
			"Ivan".into(),
			"Ivanovich".into(),
			NaiveDate::from_ymd_opt(1980, 5, 1).unwrap(),
		);
		patients::create(
			&clinic,
			"Petrov".into(),
			"Pyotr".into(),
			"".into(),
			NaiveDate::from_ymd_opt(1975, 1, 2).unwrap(),
		);
		let doctor = clinic.doctors.insert(Doctor::new("Smirnov", "Oleg", "Petrovich"));

		let entry = |day: u32| {
			NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(9, 0, 0).unwrap()
		};
		let mut first = Hospitalization::new(1, entry(1));
		first.doctor_id = Some(doctor);
		clinic.hospitalizations.insert(first);
		clinic.hospitalizations.insert(Hospitalization::new(2, entry(2)));
		clinic
	}

	#[tokio::test]
	async fn roster_rows_carry_fio_and_formatted_dates() {
		let source =
			CurrentRosterSource::new(clinic_with_roster(), 0, "surname", Direction::Asc);
		let context = source.context().await.unwrap();
		assert_eq!(context.rows().len(), 2);
		assert_eq!(
			context.rows()[0],
			vec![
				"Ivanov Ivan Ivanovich".to_string(),
				"01.05.1980".to_string(),
				"01.03.2024".to_string(),
				"Smirnov Oleg Petrovich".to_string(),
			]
		);
	}

	#[tokio::test]
	async fn doctor_filter_narrows_roster_rows() {
		let source = CurrentRosterSource::new(clinic_with_roster(), 1, "surname", Direction::Asc);
		let context = source.context().await.unwrap();
		assert_eq!(context.rows().len(), 1);
	}

	#[tokio::test]
	async fn by_doctors_groups_and_reports_unassigned() {
		let source = CurrentByDoctorsSource::new(clinic_with_roster());
		let context = source.context().await.unwrap();
		let roster = context.fields().get("roster").unwrap();
		let smirnov = roster.find("Smirnov Oleg Petrovich").unwrap();
		let ivanov = roster.find("Ivanov Ivan Ivanovich").unwrap();
		assert!(smirnov < ivanov, "{roster}");
		assert!(roster.contains("No attending doctor"), "{roster}");
		assert!(roster.contains("Petrov Pyotr"), "{roster}");
	}
}
