use chrono::NaiveDateTime;
use wardbook_tables::{ConvertError, Converter};

use crate::models::DATE_FORMAT;

/// Trims a `"Surname, Name"` cell down to the surname.
#[derive(Debug, Clone, Copy, Default)]
pub struct FioConverter;

impl Converter for FioConverter {
	fn convert(&self, value: &str) -> Result<String, ConvertError> {
		Ok(value.split(',').next().unwrap_or(value).trim().to_string())
	}
}

/// Reformats an ISO datetime cell (`2024-02-01 10:00:00`) as `01.02.2024`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateConverter;

impl Converter for DateConverter {
	fn convert(&self, value: &str) -> Result<String, ConvertError> {
		if value.is_empty() {
			return Ok(String::new());
		}
		let parsed = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
			.map_err(|err| ConvertError::new(format!("bad datetime '{value}': {err}")))?;
		Ok(parsed.format(DATE_FORMAT).to_string())
	}
}
