//! Demo data so a fresh instance has something to show.

use chrono::NaiveDate;
use wardbook_domain::{patients, Clinic, Diagnosis, Doctor, Employer, Hospitalization, Position};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn seed(clinic: &Clinic) {
	let doctor = Doctor::new("Petrova", "Elena", "Sergeevna");
	let doctor_pk = clinic.doctors.insert(doctor);
	clinic.doctors.insert(Doctor::new("Smirnov", "Oleg", "Pavlovich"));

	let diagnosis_pk = clinic
		.diagnoses
		.insert(Diagnosis::new("Paranoid schizophrenia", "F20.0"));

	clinic.employers.insert(Employer::new("City transport depot"));
	clinic.positions.insert(Position::new("Dispatcher"));

	let ivanov = patients::create(
		clinic,
		"Ivanov".to_string(),
		"Ivan".to_string(),
		"Ivanovich".to_string(),
		date(1975, 3, 12),
	);
	patients::create(
		clinic,
		"Sidorova".to_string(),
		"Maria".to_string(),
		"Petrovna".to_string(),
		date(1983, 11, 2),
	);

	if let Some(pk) = ivanov.pk {
		let mut stay = Hospitalization::new(
			pk,
			date(2024, 2, 1).and_hms_opt(10, 30, 0).unwrap_or_default(),
		);
		stay.number = "2024-17".to_string();
		stay.doctor_id = Some(doctor_pk);
		stay.diagnosis_id = Some(diagnosis_pk);
		clinic.hospitalizations.insert(stay);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn seed_populates_the_stores() {
		let clinic = Clinic::new();
		seed(&clinic);
		assert_eq!(clinic.patients.len(), 2);
		assert_eq!(clinic.doctors.len(), 2);
		assert_eq!(clinic.hospitalizations.len(), 1);
	}
}
