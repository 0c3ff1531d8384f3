use chrono::NaiveDateTime;

use crate::error::{DomainError, Result};
use crate::models::{Hospitalization, DATETIME_FORMAT};

/// True when the discharge date, if set, comes strictly after entry.
pub fn check_date_range(entry: NaiveDateTime, leaving: Option<NaiveDateTime>) -> bool {
	match leaving {
		Some(leaving) => entry < leaving,
		None => true,
	}
}

/// Closed-interval intersection check.
fn intervals_intersect(
	a: (NaiveDateTime, NaiveDateTime),
	b: (NaiveDateTime, NaiveDateTime),
) -> bool {
	(a.0 <= b.0 && b.0 <= a.1) || (b.0 <= a.0 && a.0 <= b.1)
}

fn fill_date(date: Option<NaiveDateTime>, now: NaiveDateTime) -> NaiveDateTime {
	date.unwrap_or(now)
}

/// Rejects a stay whose window is inverted or overlaps any of the
/// patient's existing stays. Open stays are closed at `now` for the
/// comparison only.
pub fn validate_hospitalization_window(
	entry: NaiveDateTime,
	leaving: Option<NaiveDateTime>,
	existing: &[Hospitalization],
	now: NaiveDateTime,
) -> Result<()> {
	if !check_date_range(entry, leaving) {
		return Err(DomainError::Validation(
			"Admission date can't be later than the discharge date".to_string(),
		));
	}

	let window = (entry, fill_date(leaving, now));
	for stay in existing {
		let other = (stay.entry_date, fill_date(stay.leaving_date, now));
		if intervals_intersect(other, window) {
			return Err(DomainError::Validation(format!(
				"The patient already has a hospitalization from {} to {}",
				other.0.format(DATETIME_FORMAT),
				other.1.format(DATETIME_FORMAT),
			)));
		}
	}
	Ok(())
}
