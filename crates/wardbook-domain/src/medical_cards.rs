//! Medical card service.

use tracing::debug;
use wardbook_store::{Direction, Query};

use crate::clinic::Clinic;
use crate::error::Result;
use crate::models::MedicalCard;

pub fn get_all(clinic: &Clinic, order: &str, direction: Direction) -> Vec<MedicalCard> {
	clinic.medical_cards.find(&Query::new().order_by(order, direction))
}

pub fn get_one(clinic: &Clinic, pk: i64) -> Result<MedicalCard> {
	Ok(clinic.medical_cards.get(pk)?)
}

pub fn create(clinic: &Clinic, mut card: MedicalCard) -> MedicalCard {
	let pk = clinic.medical_cards.insert(card.clone());
	card.pk = Some(pk);
	debug!(pk, number = %card.number, "medical card created");
	card
}

pub fn update(clinic: &Clinic, card: MedicalCard) -> Result<MedicalCard> {
	clinic.medical_cards.update(card.clone())?;
	Ok(card)
}

pub fn delete(clinic: &Clinic, pk: i64) -> Result<()> {
	clinic.medical_cards.delete(pk)?;
	debug!(pk, "medical card deleted");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cards_order_by_number() {
		let clinic = Clinic::new();
		create(&clinic, MedicalCard::new("B-2"));
		create(&clinic, MedicalCard::new("A-1"));
		let numbers: Vec<String> = get_all(&clinic, "number", Direction::Asc)
			.into_iter()
			.map(|c| c.number)
			.collect();
		assert_eq!(numbers, vec!["A-1", "B-2"]);
	}
}
