use serde::Serialize;

use crate::error::{Result, TableError};

const BUTTON_TEMPLATE: &str = "tables/button.html";
const INLINE_BUTTON_TEMPLATE: &str = "tables/inline_button.html";
const CONFIRM_BUTTON_TEMPLATE: &str = "tables/button_with_confirm.html";
const DEFAULT_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this?";

/// A row action declared on a buttons field.
///
/// The spec is shared by every row of the table; [`ButtonSpec::bind`]
/// clones it into an independent per-row [`BoundButton`] carrying the
/// row's primary key and resolved URL.
///
/// # Examples
///
/// ```
/// use wardbook_tables::ButtonSpec;
///
/// let spec = ButtonSpec::delete("Delete", "patients:delete").unwrap();
/// assert!(spec.confirm_message().is_some());
///
/// let bound = spec.bind(7, "/patients/7/delete/".to_string());
/// assert_eq!(bound.pk, 7);
/// ```
#[derive(Debug, Clone)]
pub struct ButtonSpec {
	label: String,
	view_name: String,
	template: String,
	confirm_message: Option<String>,
}

impl ButtonSpec {
	/// A plain action button.
	pub fn new(label: impl Into<String>, view_name: impl Into<String>) -> Result<Self> {
		Self::build(label.into(), view_name.into(), BUTTON_TEMPLATE, None)
	}

	/// An update button rendered inline in the row it edits.
	pub fn update_inline(label: impl Into<String>, view_name: impl Into<String>) -> Result<Self> {
		Self::build(label.into(), view_name.into(), INLINE_BUTTON_TEMPLATE, None)
	}

	/// A delete button guarded by a confirmation prompt.
	pub fn delete(label: impl Into<String>, view_name: impl Into<String>) -> Result<Self> {
		Self::build(
			label.into(),
			view_name.into(),
			CONFIRM_BUTTON_TEMPLATE,
			Some(DEFAULT_CONFIRM_MESSAGE.to_string()),
		)
	}

	fn build(
		label: String,
		view_name: String,
		template: &str,
		confirm_message: Option<String>,
	) -> Result<Self> {
		if label.is_empty() {
			return Err(TableError::Config("button label can't be empty".to_string()));
		}
		if view_name.is_empty() {
			return Err(TableError::Config(
				"button view name can't be empty".to_string(),
			));
		}
		Ok(Self {
			label,
			view_name,
			template: template.to_string(),
			confirm_message,
		})
	}

	/// Override the confirmation prompt.
	pub fn with_confirm_message(mut self, message: impl Into<String>) -> Self {
		self.confirm_message = Some(message.into());
		self
	}

	/// Override the render template.
	pub fn with_template(mut self, template: impl Into<String>) -> Self {
		self.template = template.into();
		self
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn view_name(&self) -> &str {
		&self.view_name
	}

	pub fn template(&self) -> &str {
		&self.template
	}

	pub fn confirm_message(&self) -> Option<&str> {
		self.confirm_message.as_deref()
	}

	/// Clone this shared spec into a row-bound instance.
	pub fn bind(&self, pk: i64, url: String) -> BoundButton {
		BoundButton {
			pk,
			label: self.label.clone(),
			url,
			template: self.template.clone(),
			confirm_message: self.confirm_message.clone(),
		}
	}
}

/// A per-row copy of a [`ButtonSpec`], bound to a primary key and a
/// resolved URL. This is what the templates see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundButton {
	pub pk: i64,
	pub label: String,
	pub url: String,
	pub template: String,
	pub confirm_message: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_label_rejected() {
		assert!(ButtonSpec::new("", "patients:update").is_err());
	}

	#[test]
	fn empty_view_name_rejected() {
		assert!(ButtonSpec::new("Update", "").is_err());
	}

	#[test]
	fn bound_buttons_are_independent() {
		let spec = ButtonSpec::new("Update", "patients:update").unwrap();
		let first = spec.bind(1, "/patients/1/update/".to_string());
		let second = spec.bind(2, "/patients/2/update/".to_string());
		assert_eq!(first.pk, 1);
		assert_eq!(second.pk, 2);
		assert_ne!(first.url, second.url);
	}

	#[test]
	fn delete_carries_default_confirm() {
		let spec = ButtonSpec::delete("Delete", "patients:delete").unwrap();
		assert_eq!(
			spec.confirm_message(),
			Some("Are you sure you want to delete this?")
		);
		let overridden = spec.with_confirm_message("Remove the record?");
		assert_eq!(overridden.confirm_message(), Some("Remove the record?"));
	}
}
