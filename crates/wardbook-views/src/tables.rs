//! Glue between table schemas and templates.

use tera::Context;
use wardbook_http::{Request, Response};
use wardbook_store::Direction;
use wardbook_tables::{TableRow, TableSchema};

use crate::error::Result;
use crate::render::render_partial;
use crate::state::AppState;

/// Current sort order taken from the path, with a fallback for routes
/// that have no sort segments.
pub fn sort_params(request: &Request, default_order: &str) -> (String, Direction) {
	let order = request.param("order").unwrap_or(default_order).to_string();
	let direction = Direction::parse(request.param("direction").unwrap_or("asc"));
	(order, direction)
}

/// Builds the table and renders the listing template around it.
pub fn render_table<R: TableRow>(
	state: &AppState,
	request: &Request,
	template: &str,
	schema: &TableSchema,
	rows: &[R],
	mut context: Context,
) -> Result<Response> {
	let table = schema.make_table(rows.iter())?;
	context.insert("table", &table);
	render_partial(state, request, template, context)
}

/// Renders a single body row, for in-place swaps after an inline edit.
pub fn render_table_row<R: TableRow>(
	state: &AppState,
	request: &Request,
	template: &str,
	schema: &TableSchema,
	row: &R,
	mut context: Context,
) -> Result<Response> {
	let cells = schema.get_body_row(row)?;
	context.insert("row", &cells);
	render_partial(state, request, template, context)
}
