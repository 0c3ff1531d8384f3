use wardbook_store::MemoryStore;

use crate::models::{
	CommissionDate, Diagnosis, Disability, Doctor, Employer, Hospitalization, MedicalCard,
	Patient, Position,
};

/// The clinic's stores, one per entity. Cloning shares the underlying
/// rows, so one `Clinic` value can be handed to every handler.
#[derive(Debug, Clone, Default)]
pub struct Clinic {
	pub patients: MemoryStore<Patient>,
	pub doctors: MemoryStore<Doctor>,
	pub diagnoses: MemoryStore<Diagnosis>,
	pub hospitalizations: MemoryStore<Hospitalization>,
	pub medical_cards: MemoryStore<MedicalCard>,
	pub employers: MemoryStore<Employer>,
	pub positions: MemoryStore<Position>,
	pub disabilities: MemoryStore<Disability>,
	pub commission_dates: MemoryStore<CommissionDate>,
}

impl Clinic {
	pub fn new() -> Self {
		Self::default()
	}
}
