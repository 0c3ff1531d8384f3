//! Flattened view-models for table rendering.
//!
//! Table cells hold strings; these rows join referenced entities into
//! display values up front so the table engine never touches the stores.

use wardbook_tables::TableRow;

use crate::clinic::Clinic;
use crate::error::Result;
use crate::models::{Hospitalization, MedicalCard, DATETIME_FORMAT};

/// One hospitalization flattened for the list and roster tables.
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalizationRow {
	pub pk: Option<i64>,
	pub patient: String,
	pub entry_date: String,
	pub leaving_date: String,
	pub notes: String,
}

impl HospitalizationRow {
	pub fn from_model(clinic: &Clinic, stay: &Hospitalization) -> Result<Self> {
		let patient = clinic.patients.get(stay.patient_id)?;
		Ok(Self {
			pk: stay.pk,
			patient: patient.display(),
			entry_date: stay.entry_date.format(DATETIME_FORMAT).to_string(),
			leaving_date: stay
				.leaving_date
				.map(|d| d.format(DATETIME_FORMAT).to_string())
				.unwrap_or_default(),
			notes: stay.notes.clone(),
		})
	}

	pub fn from_models(clinic: &Clinic, stays: &[Hospitalization]) -> Result<Vec<Self>> {
		stays.iter().map(|stay| Self::from_model(clinic, stay)).collect()
	}
}

impl TableRow for HospitalizationRow {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn attr(&self, name: &str) -> Option<String> {
		match name {
			"patient" => Some(self.patient.clone()),
			"entry_date" => Some(self.entry_date.clone()),
			"leaving_date" => Some(self.leaving_date.clone()),
			"notes" => Some(self.notes.clone()),
			_ => None,
		}
	}
}

/// One medical card flattened for the cards table.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalCardRow {
	pub pk: Option<i64>,
	pub number: String,
	pub hospitalization: String,
	pub diagnosis: String,
}

impl MedicalCardRow {
	pub fn from_model(clinic: &Clinic, card: &MedicalCard) -> Result<Self> {
		let hospitalization = match card.hospitalization_id {
			Some(pk) => clinic.hospitalizations.get(pk)?.display(),
			None => String::new(),
		};
		let mut codes: Vec<String> = Vec::new();
		for pk in &card.diagnosis_ids {
			codes.push(clinic.diagnoses.get(*pk)?.icd_code);
		}
		if !card.custom_diagnosis.is_empty() {
			codes.push(card.custom_diagnosis.clone());
		}
		Ok(Self {
			pk: card.pk,
			number: card.number.clone(),
			hospitalization,
			diagnosis: codes.join(", "),
		})
	}

	pub fn from_models(clinic: &Clinic, cards: &[MedicalCard]) -> Result<Vec<Self>> {
		cards.iter().map(|card| Self::from_model(clinic, card)).collect()
	}
}

impl TableRow for MedicalCardRow {
	fn pk(&self) -> Option<i64> {
		self.pk
	}

	fn attr(&self, name: &str) -> Option<String> {
		match name {
			"number" => Some(self.number.clone()),
			"hospitalization" => Some(self.hospitalization.clone()),
			"diagnosis" => Some(self.diagnosis.clone()),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;
	use crate::patients;

	#[test]
	fn hospitalization_row_joins_patient_display() {
		let clinic = Clinic::new();
		patients::create(
			&clinic,
			"Ivanov".into(),
			"Ivan".into(),
			"".into(),
			NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
		);
		let entry = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
		let stay = Hospitalization::new(1, entry);
		let pk = clinic.hospitalizations.insert(stay.clone());

		let stored = clinic.hospitalizations.get(pk).unwrap();
		let row = HospitalizationRow::from_model(&clinic, &stored).unwrap();
		assert_eq!(row.patient, "Ivanov, Ivan");
		assert_eq!(row.entry_date, "01.02.2024 09:30");
		assert_eq!(row.leaving_date, "");
	}

	#[test]
	fn card_row_collects_icd_codes_and_custom_diagnosis() {
		let clinic = Clinic::new();
		let d1 = clinic.diagnoses.insert(crate::models::Diagnosis::new("Flu", "J10"));
		let d2 = clinic.diagnoses.insert(crate::models::Diagnosis::new("Angina", "J03"));
		let mut card = MedicalCard::new("A-17");
		card.diagnosis_ids = vec![d1, d2];
		card.custom_diagnosis = "observation".to_string();
		let pk = clinic.medical_cards.insert(card);

		let stored = clinic.medical_cards.get(pk).unwrap();
		let row = MedicalCardRow::from_model(&clinic, &stored).unwrap();
		assert_eq!(row.diagnosis, "J10, J03, observation");
		assert_eq!(row.hospitalization, "");
	}
}
