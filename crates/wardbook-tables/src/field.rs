use std::sync::Arc;

use crate::button::ButtonSpec;
use crate::convert::Converter;
use crate::error::{Result, TableError};
use crate::html::HtmlAttributes;

/// Declarative description of one table column.
///
/// One struct covers every column shape: shared attributes (name,
/// label, visibility, header/body HTML attribute sets) plus capability
/// options. A field with `sort_view` renders sortable header links, a
/// field with `link_view` renders its body values as links, and a
/// field with buttons renders row actions instead of a value.
///
/// Construction goes through [`FieldBuilder`], which validates the
/// combination eagerly; a misdeclared field never reaches render time.
///
/// # Examples
///
/// ```
/// use wardbook_tables::{ButtonSpec, Field};
///
/// let entry_date = Field::text("entry_date")
///     .verbose_name("Admission date")
///     .sort_view("hospitalizations:list")
///     .build()
///     .unwrap();
/// assert!(entry_date.sort_view().is_some());
///
/// let actions = Field::buttons(
///     "actions",
///     vec![ButtonSpec::new("Edit", "hospitalizations:update").unwrap()],
/// )
/// .verbose_name("Actions")
/// .build()
/// .unwrap();
/// assert!(actions.is_buttons());
/// ```
#[derive(Clone)]
pub struct Field {
	name: String,
	verbose_name: String,
	visible: bool,
	attrs_th: Option<HtmlAttributes>,
	attrs_td: Option<HtmlAttributes>,
	converters: Vec<Arc<dyn Converter>>,
	default: Option<String>,
	sort_view: Option<String>,
	link_view: Option<String>,
	buttons: Vec<ButtonSpec>,
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("verbose_name", &self.verbose_name)
			.field("visible", &self.visible)
			.field("sort_view", &self.sort_view)
			.field("link_view", &self.link_view)
			.field("buttons", &self.buttons.len())
			.finish_non_exhaustive()
	}
}

impl Field {
	/// Start declaring a text column bound to the row attribute `name`.
	pub fn text(name: impl Into<String>) -> FieldBuilder {
		FieldBuilder {
			name: name.into(),
			verbose_name: String::new(),
			visible: true,
			attrs_th: None,
			attrs_td: None,
			converters: Vec::new(),
			default: None,
			sort_view: None,
			link_view: None,
			buttons: None,
		}
	}

	/// Start declaring a buttons column carrying the given row actions.
	pub fn buttons(name: impl Into<String>, buttons: Vec<ButtonSpec>) -> FieldBuilder {
		FieldBuilder {
			name: name.into(),
			verbose_name: String::new(),
			visible: true,
			attrs_th: None,
			attrs_td: None,
			converters: Vec::new(),
			default: None,
			sort_view: None,
			link_view: None,
			buttons: Some(buttons),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn verbose_name(&self) -> &str {
		&self.verbose_name
	}

	pub fn visible(&self) -> bool {
		self.visible
	}

	pub fn attrs_th(&self) -> Option<&HtmlAttributes> {
		self.attrs_th.as_ref()
	}

	pub fn attrs_td(&self) -> Option<&HtmlAttributes> {
		self.attrs_td.as_ref()
	}

	pub fn converters(&self) -> &[Arc<dyn Converter>] {
		&self.converters
	}

	/// Display substitute for empty values, if declared.
	pub fn default(&self) -> Option<&str> {
		self.default.as_deref()
	}

	/// View name used to build header sort URLs.
	pub fn sort_view(&self) -> Option<&str> {
		self.sort_view.as_deref()
	}

	/// View name used to link body values to a detail page.
	pub fn link_view(&self) -> Option<&str> {
		self.link_view.as_deref()
	}

	pub fn button_specs(&self) -> &[ButtonSpec] {
		&self.buttons
	}

	pub fn is_buttons(&self) -> bool {
		!self.buttons.is_empty()
	}
}

/// Builder for [`Field`]; validation happens in [`FieldBuilder::build`].
pub struct FieldBuilder {
	name: String,
	verbose_name: String,
	visible: bool,
	attrs_th: Option<HtmlAttributes>,
	attrs_td: Option<HtmlAttributes>,
	converters: Vec<Arc<dyn Converter>>,
	default: Option<String>,
	sort_view: Option<String>,
	link_view: Option<String>,
	buttons: Option<Vec<ButtonSpec>>,
}

impl FieldBuilder {
	pub fn verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
		self.verbose_name = verbose_name.into();
		self
	}

	pub fn visible(mut self, visible: bool) -> Self {
		self.visible = visible;
		self
	}

	pub fn attrs_th(mut self, attrs: HtmlAttributes) -> Self {
		self.attrs_th = Some(attrs);
		self
	}

	pub fn attrs_td(mut self, attrs: HtmlAttributes) -> Self {
		self.attrs_td = Some(attrs);
		self
	}

	pub fn converter(mut self, converter: Arc<dyn Converter>) -> Self {
		self.converters.push(converter);
		self
	}

	pub fn default(mut self, default: impl Into<String>) -> Self {
		self.default = Some(default.into());
		self
	}

	pub fn sort_view(mut self, view_name: impl Into<String>) -> Self {
		self.sort_view = Some(view_name.into());
		self
	}

	pub fn link_view(mut self, view_name: impl Into<String>) -> Self {
		self.link_view = Some(view_name.into());
		self
	}

	pub fn build(self) -> Result<Field> {
		if self.name.is_empty() {
			return Err(TableError::Config("field name can't be empty".to_string()));
		}
		if let Some(buttons) = &self.buttons {
			if buttons.is_empty() {
				return Err(TableError::Config(format!(
					"buttons field \"{}\" needs at least one button",
					self.name
				)));
			}
			if self.sort_view.is_some()
				|| self.link_view.is_some()
				|| self.default.is_some()
				|| !self.converters.is_empty()
			{
				return Err(TableError::Config(format!(
					"buttons field \"{}\" can't declare sorting, links, defaults or converters",
					self.name
				)));
			}
		}
		Ok(Field {
			name: self.name,
			verbose_name: self.verbose_name,
			visible: self.visible,
			attrs_th: self.attrs_th,
			attrs_td: self.attrs_td,
			converters: self.converters,
			default: self.default,
			sort_view: self.sort_view,
			link_view: self.link_view,
			buttons: self.buttons.unwrap_or_default(),
		})
	}
}
