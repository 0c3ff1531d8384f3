use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use wardbook_store::{Record, Value};

pub const DATE_FORMAT: &str = "%d.%m.%Y";
pub const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

fn now() -> NaiveDateTime {
	Utc::now().naive_utc()
}

/// A registered patient. `display()` is the short form used in table
/// cells and option lists; `fio()` is the full form used in documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
	pub pk: Option<i64>,
	pub name: String,
	pub surname: String,
	pub patronymic: String,
	pub birthday: NaiveDate,
	pub time_create: NaiveDateTime,
	pub time_update: NaiveDateTime,
	pub active: bool,
}

impl Patient {
	pub fn new(
		surname: impl Into<String>,
		name: impl Into<String>,
		patronymic: impl Into<String>,
		birthday: NaiveDate,
	) -> Self {
		let stamp = now();
		Self {
			pk: None,
			name: name.into(),
			surname: surname.into(),
			patronymic: patronymic.into(),
			birthday,
			time_create: stamp,
			time_update: stamp,
			active: true,
		}
	}

	pub fn display(&self) -> String {
		format!("{}, {}", self.surname, self.name)
	}

	pub fn fio(&self) -> String {
		format!("{} {} {}", self.surname, self.name, self.patronymic)
			.trim_end()
			.to_string()
	}

	pub fn touch(&mut self) {
		self.time_update = now();
	}
}

impl Record for Patient {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn set_pk(&mut self, pk: i64) {
		self.pk = Some(pk);
	}

	fn get(&self, field: &str) -> Value {
		match field {
			"pk" => self.pk.into(),
			"name" => self.name.clone().into(),
			"surname" => self.surname.clone().into(),
			"patronymic" => self.patronymic.clone().into(),
			"birthday" => self.birthday.into(),
			"time_create" => self.time_create.into(),
			"active" => self.active.into(),
			_ => Value::Null,
		}
	}
}

/// An attending doctor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doctor {
	pub pk: Option<i64>,
	pub first_name: String,
	pub last_name: String,
	pub patronymic: String,
}

impl Doctor {
	pub fn new(
		last_name: impl Into<String>,
		first_name: impl Into<String>,
		patronymic: impl Into<String>,
	) -> Self {
		Self {
			pk: None,
			first_name: first_name.into(),
			last_name: last_name.into(),
			patronymic: patronymic.into(),
		}
	}

	pub fn fio(&self) -> String {
		format!("{} {} {}", self.last_name, self.first_name, self.patronymic)
			.trim_end()
			.to_string()
	}
}

impl Record for Doctor {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn set_pk(&mut self, pk: i64) {
		self.pk = Some(pk);
	}

	fn get(&self, field: &str) -> Value {
		match field {
			"pk" => self.pk.into(),
			"first_name" => self.first_name.clone().into(),
			"last_name" => self.last_name.clone().into(),
			"patronymic" => self.patronymic.clone().into(),
			_ => Value::Null,
		}
	}
}

/// A catalogued diagnosis with its ICD-10 code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
	pub pk: Option<i64>,
	pub diagnosis: String,
	pub icd_code: String,
}

impl Diagnosis {
	pub fn new(diagnosis: impl Into<String>, icd_code: impl Into<String>) -> Self {
		Self { pk: None, diagnosis: diagnosis.into(), icd_code: icd_code.into() }
	}
}

impl Record for Diagnosis {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn set_pk(&mut self, pk: i64) {
		self.pk = Some(pk);
	}

	fn get(&self, field: &str) -> Value {
		match field {
			"pk" => self.pk.into(),
			"diagnosis" => self.diagnosis.clone().into(),
			"icd_code" => self.icd_code.clone().into(),
			_ => Value::Null,
		}
	}
}

/// One stay in the department. A missing `leaving_date` means the patient
/// is still in treatment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hospitalization {
	pub pk: Option<i64>,
	pub entry_date: NaiveDateTime,
	pub leaving_date: Option<NaiveDateTime>,
	pub involuntary: bool,
	pub notes: String,
	pub number: String,
	pub patient_id: i64,
	pub doctor_id: Option<i64>,
	pub diagnosis_id: Option<i64>,
	pub custom_diagnosis: String,
	pub time_create: NaiveDateTime,
	pub time_update: NaiveDateTime,
}

impl Hospitalization {
	pub fn new(patient_id: i64, entry_date: NaiveDateTime) -> Self {
		let stamp = now();
		Self {
			pk: None,
			entry_date,
			leaving_date: None,
			involuntary: false,
			notes: String::new(),
			number: String::new(),
			patient_id,
			doctor_id: None,
			diagnosis_id: None,
			custom_diagnosis: String::new(),
			time_create: stamp,
			time_update: stamp,
		}
	}

	pub fn is_current(&self) -> bool {
		self.leaving_date.is_none()
	}

	/// `"01.02.2024 - 15.02.2024"`, or the still-in-treatment phrase when
	/// the stay is open.
	pub fn display(&self) -> String {
		match self.leaving_date {
			Some(leaving) => format!(
				"{} - {}",
				self.entry_date.format(DATE_FORMAT),
				leaving.format(DATE_FORMAT)
			),
			None => format!("{} - still in treatment", self.entry_date.format(DATE_FORMAT)),
		}
	}

	pub fn touch(&mut self) {
		self.time_update = now();
	}
}

impl Record for Hospitalization {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn set_pk(&mut self, pk: i64) {
		self.pk = Some(pk);
	}

	fn get(&self, field: &str) -> Value {
		match field {
			"pk" => self.pk.into(),
			"entry_date" => self.entry_date.into(),
			"leaving_date" => self.leaving_date.into(),
			"involuntary" => self.involuntary.into(),
			"notes" => self.notes.clone().into(),
			"number" => self.number.clone().into(),
			"patient" => self.patient_id.into(),
			"doctor" => self.doctor_id.into(),
			"diagnosis" => self.diagnosis_id.into(),
			"custom_diagnosis" => self.custom_diagnosis.clone().into(),
			"time_create" => self.time_create.into(),
			_ => Value::Null,
		}
	}
}

/// A medical card, optionally tied to one hospitalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicalCard {
	pub pk: Option<i64>,
	pub number: String,
	pub diagnosis_ids: Vec<i64>,
	pub custom_diagnosis: String,
	pub hospitalization_id: Option<i64>,
}

impl MedicalCard {
	pub fn new(number: impl Into<String>) -> Self {
		Self {
			pk: None,
			number: number.into(),
			diagnosis_ids: Vec::new(),
			custom_diagnosis: String::new(),
			hospitalization_id: None,
		}
	}
}

impl Record for MedicalCard {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn set_pk(&mut self, pk: i64) {
		self.pk = Some(pk);
	}

	fn get(&self, field: &str) -> Value {
		match field {
			"pk" => self.pk.into(),
			"number" => self.number.clone().into(),
			"custom_diagnosis" => self.custom_diagnosis.clone().into(),
			"hospitalization" => self.hospitalization_id.into(),
			_ => Value::Null,
		}
	}
}

/// A workplace referenced by disability certificates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employer {
	pub pk: Option<i64>,
	pub name: String,
	pub time_create: NaiveDateTime,
	pub time_update: NaiveDateTime,
}

impl Employer {
	pub fn new(name: impl Into<String>) -> Self {
		let stamp = now();
		Self { pk: None, name: name.into(), time_create: stamp, time_update: stamp }
	}
}

impl Record for Employer {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn set_pk(&mut self, pk: i64) {
		self.pk = Some(pk);
	}

	fn get(&self, field: &str) -> Value {
		match field {
			"pk" => self.pk.into(),
			"name" => self.name.clone().into(),
			_ => Value::Null,
		}
	}
}

/// A job position referenced by disability certificates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
	pub pk: Option<i64>,
	pub name: String,
	pub time_create: NaiveDateTime,
	pub time_update: NaiveDateTime,
}

impl Position {
	pub fn new(name: impl Into<String>) -> Self {
		let stamp = now();
		Self { pk: None, name: name.into(), time_create: stamp, time_update: stamp }
	}
}

impl Record for Position {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn set_pk(&mut self, pk: i64) {
		self.pk = Some(pk);
	}

	fn get(&self, field: &str) -> Value {
		match field {
			"pk" => self.pk.into(),
			"name" => self.name.clone().into(),
			_ => Value::Null,
		}
	}
}

/// A sick-leave certificate: one patient, their employer and position,
/// and the certificate start date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disability {
	pub pk: Option<i64>,
	pub employer_id: i64,
	pub position_id: i64,
	pub disability_start_date: Option<NaiveDate>,
	pub patient_id: i64,
	pub time_create: NaiveDateTime,
	pub time_update: NaiveDateTime,
}

impl Disability {
	pub fn new(patient_id: i64, employer_id: i64, position_id: i64) -> Self {
		let stamp = now();
		Self {
			pk: None,
			employer_id,
			position_id,
			disability_start_date: None,
			patient_id,
			time_create: stamp,
			time_update: stamp,
		}
	}

	pub fn touch(&mut self) {
		self.time_update = now();
	}
}

impl Record for Disability {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn set_pk(&mut self, pk: i64) {
		self.pk = Some(pk);
	}

	fn get(&self, field: &str) -> Value {
		match field {
			"pk" => self.pk.into(),
			"employer" => self.employer_id.into(),
			"position" => self.position_id.into(),
			"disability_start_date" => self.disability_start_date.into(),
			"patient" => self.patient_id.into(),
			_ => Value::Null,
		}
	}
}

/// A medical commission date scheduled for one disability certificate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionDate {
	pub pk: Option<i64>,
	pub date: Option<NaiveDate>,
	pub disability_id: i64,
	pub time_create: NaiveDateTime,
	pub time_update: NaiveDateTime,
}

impl CommissionDate {
	pub fn new(disability_id: i64, date: Option<NaiveDate>) -> Self {
		let stamp = now();
		Self { pk: None, date, disability_id, time_create: stamp, time_update: stamp }
	}
}

impl Record for CommissionDate {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn set_pk(&mut self, pk: i64) {
		self.pk = Some(pk);
	}

	fn get(&self, field: &str) -> Value {
		match field {
			"pk" => self.pk.into(),
			"date" => self.date.into(),
			"disability" => self.disability_id.into(),
			_ => Value::Null,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn patient_display_is_surname_comma_name() {
		let patient = Patient::new("Ivanov", "Ivan", "Ivanovich", date(1980, 5, 1));
		assert_eq!(patient.display(), "Ivanov, Ivan");
		assert_eq!(patient.fio(), "Ivanov Ivan Ivanovich");
	}

	#[test]
	fn fio_without_patronymic_has_no_trailing_space() {
		let patient = Patient::new("Ivanov", "Ivan", "", date(1980, 5, 1));
		assert_eq!(patient.fio(), "Ivanov Ivan");
	}

	#[test]
	fn open_hospitalization_displays_in_treatment() {
		let entry = date(2024, 2, 1).and_hms_opt(10, 0, 0).unwrap();
		let mut stay = Hospitalization::new(1, entry);
		assert_eq!(stay.display(), "01.02.2024 - still in treatment");

		stay.leaving_date = Some(date(2024, 2, 15).and_hms_opt(12, 0, 0).unwrap());
		assert_eq!(stay.display(), "01.02.2024 - 15.02.2024");
	}

	#[test]
	fn unknown_field_reads_null() {
		let patient = Patient::new("Ivanov", "Ivan", "", date(1980, 5, 1));
		assert!(patient.get("shoe_size").is_null());
	}
}
