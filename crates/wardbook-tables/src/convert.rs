use std::fmt;

/// Failure of a single value conversion, carrying a message the view
/// layer can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
	message: String,
}

impl ConvertError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

impl fmt::Display for ConvertError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)
	}
}

impl std::error::Error for ConvertError {}

/// Transforms a raw cell value into its display form.
///
/// Converters declared on a [`crate::Field`] run in declaration order;
/// the output of one feeds the next. They only affect display, never
/// the underlying row.
pub trait Converter: Send + Sync {
	fn convert(&self, value: &str) -> Result<String, ConvertError>;
}

/// Apply a converter chain in order, stopping at the first failure.
pub(crate) fn apply_chain(
	converters: &[std::sync::Arc<dyn Converter>],
	value: String,
) -> Result<String, ConvertError> {
	let mut value = value;
	for converter in converters {
		value = converter.convert(&value)?;
	}
	Ok(value)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;

	struct Upper;

	impl Converter for Upper {
		fn convert(&self, value: &str) -> Result<String, ConvertError> {
			Ok(value.to_uppercase())
		}
	}

	struct Reject;

	impl Converter for Reject {
		fn convert(&self, _value: &str) -> Result<String, ConvertError> {
			Err(ConvertError::new("no"))
		}
	}

	#[test]
	fn chain_runs_in_order() {
		let chain: Vec<Arc<dyn Converter>> = vec![Arc::new(Upper)];
		assert_eq!(apply_chain(&chain, "abc".to_string()).unwrap(), "ABC");
	}

	#[test]
	fn chain_stops_at_failure() {
		let chain: Vec<Arc<dyn Converter>> = vec![Arc::new(Reject), Arc::new(Upper)];
		assert_eq!(
			apply_chain(&chain, "abc".to_string()).unwrap_err(),
			ConvertError::new("no")
		);
	}
}
