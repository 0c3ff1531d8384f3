use serde::Serialize;

use crate::button::BoundButton;
use crate::error::{Result, TableError};

/// One rendered header unit, carrying the sort URLs when the field is
/// sortable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
	/// Display label: the verbose name, or the title-cased attribute
	/// name when no verbose name was declared.
	pub name: String,
	/// The attribute name the sort URLs order by.
	pub sorting_field: String,
	pub attrs: Option<String>,
	pub asc_sorting_url: Option<String>,
	pub desc_sorting_url: Option<String>,
	pub visible: bool,
}

/// One rendered body unit for a field of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyCell {
	pub pk: Option<i64>,
	/// Display value, after converters and default substitution.
	pub value: String,
	/// Resolved link target for link-typed fields.
	pub url: Option<String>,
	pub attrs: Option<String>,
	pub visible: bool,
}

/// The row-actions unit: every button bound to this row's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonsCell {
	pub pk: i64,
	pub buttons: Vec<BoundButton>,
	pub attrs: Option<String>,
	pub visible: bool,
}

/// Any rendered cell. The tag shows up in serialized form so templates
/// can dispatch on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
	Header(HeaderCell),
	Body(BodyCell),
	Buttons(ButtonsCell),
}

/// Ordered header cells plus ordered body rows, built incrementally by
/// the schema. Row order follows the query result order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
	header: Vec<HeaderCell>,
	body_rows: Vec<Vec<Cell>>,
}

impl Table {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn header(&self) -> &[HeaderCell] {
		&self.header
	}

	pub fn body_rows(&self) -> &[Vec<Cell>] {
		&self.body_rows
	}

	/// Append one cell to the header row. Only header cells belong
	/// there; anything else is a schema bug.
	pub fn add_cell_to_header(&mut self, cell: Cell) -> Result<()> {
		match cell {
			Cell::Header(header) => {
				self.header.push(header);
				Ok(())
			}
			other => Err(TableError::Config(format!(
				"expected a header cell, got {:?}",
				kind_of(&other)
			))),
		}
	}

	/// Append one body row. Header cells never belong in the body.
	pub fn add_body_row(&mut self, row: Vec<Cell>) -> Result<()> {
		if row.iter().any(|cell| matches!(cell, Cell::Header(_))) {
			return Err(TableError::Config(
				"a body row can't contain header cells".to_string(),
			));
		}
		self.body_rows.push(row);
		Ok(())
	}
}

fn kind_of(cell: &Cell) -> &'static str {
	match cell {
		Cell::Header(_) => "header",
		Cell::Body(_) => "body",
		Cell::Buttons(_) => "buttons",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn body_cell() -> Cell {
		Cell::Body(BodyCell {
			pk: Some(1),
			value: "Ivanov".to_string(),
			url: None,
			attrs: None,
			visible: true,
		})
	}

	fn header_cell() -> Cell {
		Cell::Header(HeaderCell {
			name: "Surname".to_string(),
			sorting_field: "surname".to_string(),
			attrs: None,
			asc_sorting_url: None,
			desc_sorting_url: None,
			visible: true,
		})
	}

	#[test]
	fn header_rejects_body_cells() {
		let mut table = Table::new();
		assert!(table.add_cell_to_header(body_cell()).is_err());
		assert!(table.add_cell_to_header(header_cell()).is_ok());
		assert_eq!(table.header().len(), 1);
	}

	#[test]
	fn body_rejects_header_cells() {
		let mut table = Table::new();
		assert!(table.add_body_row(vec![header_cell()]).is_err());
		assert!(table.add_body_row(vec![body_cell()]).is_ok());
		assert_eq!(table.body_rows().len(), 1);
	}

	#[test]
	fn serializes_with_kind_tag() {
		let json = serde_json::to_value(body_cell()).unwrap();
		assert_eq!(json["kind"], "body");
		assert_eq!(json["value"], "Ivanov");
	}
}
