
use std::sync::Arc;

use fixtures::{route_params, router, sample_rows, PatientRow};
use rstest::*;
use wardbook_tables::{
	ButtonSpec, Cell, ConvertError, Converter, Field, TableError, TableSchema,
};
use wardbook_urls::Router;

fn patients_schema(router: Arc<Router>) -> TableSchema {
	TableSchema::new("patients:list", router)
		.unwrap()
		.with_field(
			Field::text("surname")
				.verbose_name("Surname")
				.sort_view("patients:list")
				.link_view("patients:detail")
				.build()
				.unwrap(),
		)
		.with_field(Field::text("name").build().unwrap())
		.with_field(
			Field::text("notes")
				.verbose_name("Notes")
				.default("no notes")
				.build()
				.unwrap(),
		)
}

#[rstest]
fn table_shape_matches_fields_and_rows(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = patients_schema(router);
	let table = schema.make_table(&sample_rows).unwrap();

	assert_eq!(table.header().len(), 3);
	assert_eq!(table.body_rows().len(), 3);
	for row in table.body_rows() {
		assert_eq!(row.len(), 3);
	}
}

#[rstest]
fn rows_keep_input_order(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = patients_schema(router);
	let table = schema.make_table(&sample_rows).unwrap();

	let surnames: Vec<&str> = table
		.body_rows()
		.iter()
		.map(|row| match &row[0] {
			Cell::Body(cell) => cell.value.as_str(),
			other => panic!("expected body cell, got {:?}", other),
		})
		.collect();
	assert_eq!(surnames, vec!["Ivanov", "Petrov", "Sidorova"]);
}

#[rstest]
fn empty_queryset_builds_empty_valid_table(router: Arc<Router>) {
	let schema = patients_schema(router);
	let rows: Vec<PatientRow> = Vec::new();
	let table = schema.make_table(&rows).unwrap();

	assert_eq!(table.header().len(), 3);
	assert!(table.body_rows().is_empty());
}

#[rstest]
fn sortable_header_carries_both_directions(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = patients_schema(router)
		.with_route_params(route_params(&[("order", "name"), ("direction", "desc")]));
	let table = schema.make_table(&sample_rows).unwrap();

	let header = &table.header()[0];
	assert_eq!(
		header.asc_sorting_url.as_deref(),
		Some("/patients/surname/asc/")
	);
	assert_eq!(
		header.desc_sorting_url.as_deref(),
		Some("/patients/surname/desc/")
	);
	// The non-sortable column has no URLs at all.
	assert!(table.header()[1].asc_sorting_url.is_none());
}

#[rstest]
fn sort_url_generation_is_idempotent(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = patients_schema(router.clone())
		.with_route_params(route_params(&[("order", "surname"), ("direction", "asc")]));
	let first = schema.make_table(&sample_rows).unwrap();
	let second = schema.make_table(&sample_rows).unwrap();

	assert_eq!(
		first.header()[0].asc_sorting_url,
		second.header()[0].asc_sorting_url
	);

	// Toggling the direction twice returns to the original URL.
	let toggled = patients_schema(router)
		.with_route_params(route_params(&[("order", "surname"), ("direction", "desc")]));
	let toggled_table = toggled.make_table(&sample_rows).unwrap();
	assert_eq!(
		first.header()[0].asc_sorting_url,
		toggled_table.header()[0].asc_sorting_url
	);
}

#[rstest]
fn query_params_appended_verbatim(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = patients_schema(router).with_query_params(vec![
		("q".to_string(), "iva".to_string()),
		("page".to_string(), "2".to_string()),
	]);
	let table = schema.make_table(&sample_rows).unwrap();

	assert_eq!(
		table.header()[0].asc_sorting_url.as_deref(),
		Some("/patients/surname/asc/?q=iva&page=2")
	);
}

#[rstest]
fn header_label_falls_back_to_title_case(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = patients_schema(router);
	let table = schema.make_table(&sample_rows).unwrap();

	// "name" has no verbose label declared.
	assert_eq!(table.header()[1].name, "Name");
	assert_eq!(table.header()[0].name, "Surname");
}

#[rstest]
fn link_field_resolves_row_url(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = patients_schema(router);
	let table = schema.make_table(&sample_rows).unwrap();

	match &table.body_rows()[1][0] {
		Cell::Body(cell) => assert_eq!(cell.url.as_deref(), Some("/patients/2/")),
		other => panic!("expected body cell, got {:?}", other),
	}
}

#[rstest]
fn empty_value_shows_default_without_mutating_row(
	router: Arc<Router>,
	sample_rows: Vec<PatientRow>,
) {
	let schema = patients_schema(router);
	let table = schema.make_table(&sample_rows).unwrap();

	match &table.body_rows()[1][2] {
		Cell::Body(cell) => assert_eq!(cell.value, "no notes"),
		other => panic!("expected body cell, got {:?}", other),
	}
	// Display only: the underlying row is untouched.
	assert!(sample_rows[1].notes.is_empty());
}

#[rstest]
fn buttons_bound_to_each_row_pk(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = TableSchema::new("patients:list", router)
		.unwrap()
		.with_field(Field::text("surname").build().unwrap())
		.with_field(
			Field::buttons(
				"actions",
				vec![
					ButtonSpec::new("Edit", "patients:update").unwrap(),
					ButtonSpec::delete("Delete", "patients:delete").unwrap(),
				],
			)
			.verbose_name("Actions")
			.build()
			.unwrap(),
		);
	let table = schema.make_table(&sample_rows).unwrap();

	match &table.body_rows()[2][1] {
		Cell::Buttons(cell) => {
			assert_eq!(cell.pk, 3);
			assert_eq!(cell.buttons.len(), 2);
			assert_eq!(cell.buttons[0].url, "/patients/3/update/");
			assert_eq!(cell.buttons[1].url, "/patients/3/delete/");
			assert!(cell.buttons[1].confirm_message.is_some());
		}
		other => panic!("expected buttons cell, got {:?}", other),
	}
}

#[rstest]
fn buttons_without_pk_fail(router: Arc<Router>) {
	let schema = TableSchema::new("patients:list", router)
		.unwrap()
		.with_field(
			Field::buttons(
				"actions",
				vec![ButtonSpec::new("Edit", "patients:update").unwrap()],
			)
			.build()
			.unwrap(),
		);
	let rows = vec![PatientRow {
		pk: None,
		surname: "Ivanov".to_string(),
		name: "Ivan".to_string(),
		notes: String::new(),
	}];

	let err = schema.make_table(&rows).unwrap_err();
	assert!(matches!(err, TableError::MissingPk { field } if field == "actions"));
}

#[rstest]
fn missing_row_attribute_fails(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = TableSchema::new("patients:list", router)
		.unwrap()
		.with_field(Field::text("birthday").build().unwrap());

	let err = schema.make_table(&sample_rows).unwrap_err();
	assert!(matches!(err, TableError::MissingAttribute { field } if field == "birthday"));
}

#[rstest]
fn get_body_row_matches_make_table_row(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = patients_schema(router);
	let table = schema.make_table(&sample_rows).unwrap();
	let single = schema.get_body_row(&sample_rows[0]).unwrap();

	assert_eq!(&table.body_rows()[0], &single);
}

struct SurnameOnly;

impl Converter for SurnameOnly {
	fn convert(&self, value: &str) -> Result<String, ConvertError> {
		Ok(value.split(',').next().unwrap_or(value).trim().to_string())
	}
}

#[rstest]
fn converters_apply_in_declaration_order(router: Arc<Router>) {
	let schema = TableSchema::new("patients:list", router)
		.unwrap()
		.with_field(
			Field::text("surname")
				.converter(Arc::new(SurnameOnly))
				.build()
				.unwrap(),
		);
	let rows = vec![PatientRow {
		pk: Some(1),
		surname: "Ivanov, Ivan".to_string(),
		name: String::new(),
		notes: String::new(),
	}];
	let table = schema.make_table(&rows).unwrap();

	match &table.body_rows()[0][0] {
		Cell::Body(cell) => assert_eq!(cell.value, "Ivanov"),
		other => panic!("expected body cell, got {:?}", other),
	}
}

#[rstest]
fn unknown_sort_view_is_an_error(router: Arc<Router>, sample_rows: Vec<PatientRow>) {
	let schema = TableSchema::new("patients:list", router)
		.unwrap()
		.with_field(
			Field::text("surname")
				.sort_view("patients:gone")
				.build()
				.unwrap(),
		);

	assert!(matches!(
		schema.make_table(&sample_rows).unwrap_err(),
		TableError::Reverse(_)
	));
}

#[rstest]
fn empty_view_name_rejected(router: Arc<Router>) {
	assert!(matches!(
		TableSchema::new("", router).err(),
		Some(TableError::Config(_))
	));
}
