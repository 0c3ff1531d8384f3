//! Table schema declarations, one constructor per list page.
//!
//! Each constructor is called per request with the current routing
//! parameters (sort order and direction live there) and the query
//! parameters to carry through sort URLs.

use std::collections::BTreeMap;
use std::sync::Arc;

use wardbook_tables::{ButtonSpec, Field, HtmlAttributes, TableSchema};
use wardbook_urls::UrlReverser;

use crate::converters::FioConverter;
use crate::error::Result;

fn th_width(width: &str) -> Result<HtmlAttributes> {
	Ok(HtmlAttributes::new([("style", format!("width: {width}"))])?)
}

fn td_center() -> Result<HtmlAttributes> {
	Ok(HtmlAttributes::new([("class", "align-middle text-center")])?)
}

fn td_start() -> Result<HtmlAttributes> {
	Ok(HtmlAttributes::new([("class", "align-middle ps-2")])?)
}

/// Per-patient hospitalization history table.
pub fn hospitalizations_table(
	route_params: BTreeMap<String, String>,
	query_params: Vec<(String, String)>,
	reverser: Arc<dyn UrlReverser>,
) -> Result<TableSchema> {
	let schema = TableSchema::new("hospitalizations:list", reverser)?
		.with_route_params(route_params)
		.with_query_params(query_params)
		.with_field(
			Field::text("entry_date")
				.verbose_name("Admission date")
				.sort_view("hospitalizations:list")
				.attrs_th(th_width("20%")?)
				.attrs_td(td_center()?)
				.build()?,
		)
		.with_field(
			Field::text("leaving_date")
				.verbose_name("Discharge date")
				.sort_view("hospitalizations:list")
				.default("still in treatment")
				.attrs_th(th_width("20%")?)
				.attrs_td(td_center()?)
				.build()?,
		)
		.with_field(
			Field::text("notes")
				.verbose_name("Notes")
				.attrs_th(th_width("30%")?)
				.attrs_td(td_start()?)
				.build()?,
		)
		.with_field(
			Field::buttons(
				"actions",
				vec![
					ButtonSpec::update_inline("Edit", "hospitalizations:update")?,
					ButtonSpec::delete("Delete", "hospitalizations:delete")?,
				],
			)
			.verbose_name("Actions")
			.attrs_th(th_width("20%")?)
			.attrs_td(td_center()?)
			.build()?,
		);
	Ok(schema)
}

/// Currently-admitted roster table.
pub fn current_hospitalizations_table(
	route_params: BTreeMap<String, String>,
	query_params: Vec<(String, String)>,
	reverser: Arc<dyn UrlReverser>,
) -> Result<TableSchema> {
	let schema = TableSchema::new("hospitalizations:current", reverser)?
		.with_route_params(route_params)
		.with_query_params(query_params)
		.with_field(
			Field::text("patient")
				.verbose_name("Full name")
				.sort_view("hospitalizations:current")
				.link_view("hospitalizations:list")
				.converter(Arc::new(FioConverter))
				.attrs_th(th_width("30%")?)
				.attrs_td(td_start()?)
				.build()?,
		)
		.with_field(
			Field::text("entry_date")
				.verbose_name("Admission date")
				.sort_view("hospitalizations:current")
				.attrs_th(th_width("20%")?)
				.attrs_td(td_center()?)
				.build()?,
		)
		.with_field(
			Field::text("notes")
				.verbose_name("Notes")
				.attrs_th(th_width("20%")?)
				.attrs_td(td_center()?)
				.build()?,
		)
		.with_field(
			Field::buttons(
				"actions",
				vec![
					ButtonSpec::new("Discharge", "hospitalizations:leave")?,
					ButtonSpec::new("Edit", "hospitalizations:update_current")?,
					ButtonSpec::delete("Delete", "hospitalizations:delete_current")?,
				],
			)
			.verbose_name("Actions")
			.attrs_td(td_center()?)
			.build()?,
		);
	Ok(schema)
}

/// Medical cards table.
pub fn medical_cards_table(
	route_params: BTreeMap<String, String>,
	query_params: Vec<(String, String)>,
	reverser: Arc<dyn UrlReverser>,
) -> Result<TableSchema> {
	let schema = TableSchema::new("medical_cards:list", reverser)?
		.with_route_params(route_params)
		.with_query_params(query_params)
		.with_field(
			Field::text("number")
				.verbose_name("No.")
				.attrs_th(th_width("10%")?)
				.attrs_td(td_center()?)
				.build()?,
		)
		.with_field(
			Field::text("diagnosis")
				.verbose_name("Diagnosis")
				.attrs_th(th_width("30%")?)
				.attrs_td(td_center()?)
				.build()?,
		)
		.with_field(
			Field::text("hospitalization")
				.verbose_name("Hospitalization")
				.attrs_th(th_width("30%")?)
				.attrs_td(td_center()?)
				.build()?,
		)
		.with_field(
			Field::buttons(
				"actions",
				vec![
					ButtonSpec::update_inline("Edit", "medical_cards:update")?,
					ButtonSpec::delete("Delete", "medical_cards:delete")?,
				],
			)
			.verbose_name("Actions")
			.attrs_th(th_width("30%")?)
			.attrs_td(td_center()?)
			.build()?,
		);
	Ok(schema)
}
