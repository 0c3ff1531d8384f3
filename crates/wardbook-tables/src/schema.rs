use std::collections::BTreeMap;
use std::sync::Arc;

use wardbook_urls::UrlReverser;

use crate::builder::{BuilderRegistry, CellContext, CellKind};
use crate::cell::{Cell, Table};
use crate::convert;
use crate::error::{Result, TableError};
use crate::field::Field;

/// A read-only row the schema can pull attribute values out of.
///
/// Attribute names match the declared [`Field`] names; a row that
/// lacks an attribute a field declares fails the build with a typed
/// error instead of rendering a hole.
pub trait TableRow {
	fn pk(&self) -> Option<i64>;
	fn attr(&self, name: &str) -> Option<String>;
}

/// Per-request orchestrator: an ordered field list plus the request's
/// sort/routing state, producing one [`Table`] per [`make_table`] call.
///
/// No state crosses requests; a schema is constructed with the current
/// parameters, used once and dropped.
///
/// [`make_table`]: TableSchema::make_table
pub struct TableSchema {
	view_name: String,
	route_params: BTreeMap<String, String>,
	query_params: Vec<(String, String)>,
	fields: Vec<Field>,
	registry: BuilderRegistry,
	reverser: Arc<dyn UrlReverser>,
}

impl TableSchema {
	/// Create a schema for the given view. The view name anchors sort
	/// URL generation and can't be empty.
	pub fn new(view_name: impl Into<String>, reverser: Arc<dyn UrlReverser>) -> Result<Self> {
		let view_name = view_name.into();
		if view_name.is_empty() {
			return Err(TableError::Config("view name can't be empty".to_string()));
		}
		Ok(Self {
			view_name,
			route_params: BTreeMap::new(),
			query_params: Vec::new(),
			fields: Vec::new(),
			registry: BuilderRegistry::with_defaults(),
			reverser,
		})
	}

	/// Routing parameters of the current request (sort order and
	/// direction live here).
	pub fn with_route_params(mut self, params: BTreeMap<String, String>) -> Self {
		self.route_params = params;
		self
	}

	/// Non-routing query parameters carried verbatim into sort URLs.
	pub fn with_query_params(mut self, params: Vec<(String, String)>) -> Self {
		self.query_params = params;
		self
	}

	/// Append a field; declaration order is column order.
	pub fn with_field(mut self, field: Field) -> Self {
		self.fields.push(field);
		self
	}

	/// Swap in a custom builder registry.
	pub fn with_registry(mut self, registry: BuilderRegistry) -> Self {
		self.registry = registry;
		self
	}

	pub fn view_name(&self) -> &str {
		&self.view_name
	}

	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	/// Build the full table: one header cell per field, then one body
	/// row per input row, in input order.
	pub fn make_table<'r, I, R>(&self, rows: I) -> Result<Table>
	where
		I: IntoIterator<Item = &'r R>,
		R: TableRow + 'r,
	{
		let mut table = Table::new();
		for field in &self.fields {
			let cell = self.create_cell(CellKind::Header, field, None, None)?;
			table.add_cell_to_header(cell)?;
		}
		for row in rows {
			table.add_body_row(self.build_row(row)?)?;
		}
		Ok(table)
	}

	/// Build the cells for a single row, used when only one row needs
	/// re-rendering after an in-place edit.
	pub fn get_body_row(&self, row: &dyn TableRow) -> Result<Vec<Cell>> {
		self.build_row(row)
	}

	fn build_row(&self, row: &dyn TableRow) -> Result<Vec<Cell>> {
		let pk = row.pk();
		let mut cells = Vec::with_capacity(self.fields.len());
		for field in &self.fields {
			let cell = if field.is_buttons() {
				self.create_cell(CellKind::Buttons, field, pk, None)?
			} else {
				let raw = row
					.attr(field.name())
					.ok_or_else(|| TableError::MissingAttribute {
						field: field.name().to_string(),
					})?;
				let value =
					convert::apply_chain(field.converters(), raw).map_err(|e| {
						TableError::Convert {
							value: field.name().to_string(),
							message: e.message().to_string(),
						}
					})?;
				self.create_cell(CellKind::Body, field, pk, Some(value))?
			};
			cells.push(cell);
		}
		Ok(cells)
	}

	fn create_cell(
		&self,
		kind: CellKind,
		field: &Field,
		pk: Option<i64>,
		value: Option<String>,
	) -> Result<Cell> {
		let ctx = CellContext {
			field,
			view_name: &self.view_name,
			route_params: &self.route_params,
			query_params: &self.query_params,
			reverser: self.reverser.as_ref(),
			pk,
			value,
		};
		self.registry.create(kind, &ctx)
	}
}
