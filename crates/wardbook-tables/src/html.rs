use std::collections::BTreeMap;

use crate::error::{Result, TableError};

/// A non-empty set of HTML attributes attached to a header or body
/// cell, with the rendered `key="value"` form precomputed.
///
/// # Examples
///
/// ```
/// use wardbook_tables::HtmlAttributes;
///
/// let attrs = HtmlAttributes::new([("class", "align-middle"), ("style", "width: 30%")]).unwrap();
/// assert_eq!(attrs.raw(), r#"class="align-middle" style="width: 30%""#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlAttributes {
	attrs: BTreeMap<String, String>,
	raw: String,
}

impl HtmlAttributes {
	/// Build from key/value pairs. An empty set is rejected: a field
	/// that wants no attributes simply declares none.
	pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
	where
		K: Into<String>,
		V: Into<String>,
	{
		let attrs: BTreeMap<String, String> = pairs
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect();
		if attrs.is_empty() {
			return Err(TableError::Config(
				"HTML attributes can't be empty".to_string(),
			));
		}
		let raw = attrs
			.iter()
			.map(|(k, v)| format!("{}=\"{}\"", k, v))
			.collect::<Vec<_>>()
			.join(" ");
		Ok(Self { attrs, raw })
	}

	pub fn attrs(&self) -> &BTreeMap<String, String> {
		&self.attrs
	}

	/// The precomputed `key="value" key="value"` rendering.
	pub fn raw(&self) -> &str {
		&self.raw
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_attrs_rejected() {
		let err = HtmlAttributes::new(Vec::<(String, String)>::new()).unwrap_err();
		assert!(matches!(err, TableError::Config(_)));
	}

	#[test]
	fn raw_is_stable_key_order() {
		let attrs = HtmlAttributes::new([("style", "width: 20%"), ("class", "ps-2")]).unwrap();
		assert_eq!(attrs.raw(), r#"class="ps-2" style="width: 20%""#);
	}
}
