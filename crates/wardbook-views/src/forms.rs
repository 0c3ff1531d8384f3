//! Typed form payloads parsed from urlencoded request bodies.
//!
//! Dates arrive in the HTML input formats (`2024-02-01` and
//! `2024-02-01T12:30`); empty strings mean "not given". Checkbox fields
//! are present only when checked.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use wardbook_domain::{CommissionDate, Disability, Hospitalization, MedicalCard, Patient};

use crate::error::{Result, ViewError};

const FORM_DATE: &str = "%Y-%m-%d";

fn parse_date(raw: &str) -> Result<NaiveDate> {
	NaiveDate::parse_from_str(raw.trim(), FORM_DATE)
		.map_err(|_| ViewError::BadRequest(format!("not a date: {raw}")))
}

fn parse_datetime(raw: &str) -> Result<NaiveDateTime> {
	let raw = raw.trim();
	NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
		.or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
		.map_err(|_| ViewError::BadRequest(format!("not a date and time: {raw}")))
}

fn given(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct PatientForm {
	pub surname: String,
	pub name: String,
	#[serde(default)]
	pub patronymic: String,
	pub birthday: String,
}

impl PatientForm {
	pub fn into_patient(self) -> Result<Patient> {
		let birthday = parse_date(&self.birthday)?;
		Ok(Patient::new(self.surname, self.name, self.patronymic, birthday))
	}

	pub fn apply(self, patient: &mut Patient) -> Result<()> {
		patient.birthday = parse_date(&self.birthday)?;
		patient.surname = self.surname;
		patient.name = self.name;
		patient.patronymic = self.patronymic;
		Ok(())
	}
}

#[derive(Debug, Deserialize)]
pub struct HospitalizationForm {
	pub entry_date: String,
	#[serde(default)]
	pub leaving_date: Option<String>,
	#[serde(default)]
	pub involuntary: Option<String>,
	#[serde(default)]
	pub notes: String,
	#[serde(default)]
	pub number: String,
	#[serde(default)]
	pub doctor: Option<String>,
	#[serde(default)]
	pub diagnosis: Option<String>,
	#[serde(default)]
	pub custom_diagnosis: String,
}

impl HospitalizationForm {
	pub fn into_stay(self, patient_id: i64) -> Result<Hospitalization> {
		let mut stay = Hospitalization::new(patient_id, parse_datetime(&self.entry_date)?);
		self.fill(&mut stay)?;
		Ok(stay)
	}

	pub fn apply(self, stay: &mut Hospitalization) -> Result<()> {
		stay.entry_date = parse_datetime(&self.entry_date)?;
		self.fill(stay)
	}

	fn fill(self, stay: &mut Hospitalization) -> Result<()> {
		stay.leaving_date = match given(&self.leaving_date) {
			Some(raw) => Some(parse_datetime(raw)?),
			None => None,
		};
		stay.involuntary = self.involuntary.is_some();
		stay.doctor_id = parse_opt_pk(&self.doctor)?;
		stay.diagnosis_id = parse_opt_pk(&self.diagnosis)?;
		stay.notes = self.notes;
		stay.number = self.number;
		stay.custom_diagnosis = self.custom_diagnosis;
		Ok(())
	}
}

fn parse_opt_pk(value: &Option<String>) -> Result<Option<i64>> {
	match given(value) {
		None => Ok(None),
		Some("0") => Ok(None),
		Some(raw) => raw
			.parse()
			.map(Some)
			.map_err(|_| ViewError::BadRequest(format!("not a key: {raw}"))),
	}
}

#[derive(Debug, Deserialize)]
pub struct LeaveForm {
	#[serde(default)]
	pub leaving_date: Option<String>,
}

impl LeaveForm {
	pub fn leaving_date(&self) -> Result<Option<NaiveDateTime>> {
		match given(&self.leaving_date) {
			Some(raw) => Ok(Some(parse_datetime(raw)?)),
			None => Ok(None),
		}
	}
}

#[derive(Debug)]
pub struct MedicalCardForm {
	pub number: String,
	pub diagnoses: Vec<i64>,
	pub custom_diagnosis: String,
	pub hospitalization: Option<i64>,
}

impl MedicalCardForm {
	/// Multi-select fields repeat their key, so the body is read as raw
	/// pairs instead of a flat struct.
	pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self> {
		let mut form = MedicalCardForm {
			number: String::new(),
			diagnoses: Vec::new(),
			custom_diagnosis: String::new(),
			hospitalization: None,
		};
		for (key, value) in pairs {
			match key.as_str() {
				"number" => form.number = value,
				"custom_diagnosis" => form.custom_diagnosis = value,
				"diagnoses" => {
					let pk = value
						.parse()
						.map_err(|_| ViewError::BadRequest(format!("not a key: {value}")))?;
					form.diagnoses.push(pk);
				}
				"hospitalization" => {
					form.hospitalization = parse_opt_pk(&Some(value))?;
				}
				_ => {}
			}
		}
		Ok(form)
	}

	pub fn into_card(self) -> MedicalCard {
		let mut card = MedicalCard::new(self.number);
		card.diagnosis_ids = self.diagnoses;
		card.custom_diagnosis = self.custom_diagnosis;
		card.hospitalization_id = self.hospitalization;
		card
	}

	pub fn apply(self, card: &mut MedicalCard) {
		card.number = self.number;
		card.diagnosis_ids = self.diagnoses;
		card.custom_diagnosis = self.custom_diagnosis;
		card.hospitalization_id = self.hospitalization;
	}
}

#[derive(Debug, Deserialize)]
pub struct DisabilityForm {
	pub patient: String,
	pub employer: String,
	pub position: String,
	#[serde(default)]
	pub disability_start_date: Option<String>,
}

impl DisabilityForm {
	pub fn into_disability(self) -> Result<Disability> {
		let patient = parse_pk(&self.patient)?;
		let employer = parse_pk(&self.employer)?;
		let position = parse_pk(&self.position)?;
		let mut disability = Disability::new(patient, employer, position);
		disability.disability_start_date = match given(&self.disability_start_date) {
			Some(raw) => Some(parse_date(raw)?),
			None => None,
		};
		Ok(disability)
	}
}

fn parse_pk(raw: &str) -> Result<i64> {
	raw.trim()
		.parse()
		.map_err(|_| ViewError::BadRequest(format!("not a key: {raw}")))
}

#[derive(Debug, Deserialize)]
pub struct CommissionDateForm {
	#[serde(default)]
	pub date: Option<String>,
}

impl CommissionDateForm {
	pub fn into_commission_date(self, disability_id: i64) -> Result<CommissionDate> {
		let date = match given(&self.date) {
			Some(raw) => Some(parse_date(raw)?),
			None => None,
		};
		Ok(CommissionDate::new(disability_id, date))
	}
}
