//! Declarative table rendering for Wardbook
//!
//! A schema declares an ordered list of [`Field`]s; feeding it a query
//! result produces a render-agnostic [`Table`] of header, body and
//! button cells, with sort-link URLs resolved through the routing
//! layer. Cell construction is dispatched through a typed
//! [`BuilderRegistry`] keyed by [`CellKind`], so new cell kinds plug in
//! without touching the schema orchestrator.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//! use wardbook_tables::{Field, TableRow, TableSchema};
//! use wardbook_urls::Router;
//!
//! struct PatientRow {
//!     pk: i64,
//!     surname: String,
//! }
//!
//! impl TableRow for PatientRow {
//!     fn pk(&self) -> Option<i64> {
//!         Some(self.pk)
//!     }
//!
//!     fn attr(&self, name: &str) -> Option<String> {
//!         match name {
//!             "surname" => Some(self.surname.clone()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let router = Arc::new(
//!     Router::builder()
//!         .route("patients:list", "/patients/{order}/{direction}/")
//!         .unwrap()
//!         .build(),
//! );
//!
//! let schema = TableSchema::new("patients:list", router)
//!     .unwrap()
//!     .with_field(
//!         Field::text("surname")
//!             .verbose_name("Surname")
//!             .sort_view("patients:list")
//!             .build()
//!             .unwrap(),
//!     );
//!
//! let rows = vec![PatientRow { pk: 1, surname: "Ivanov".to_string() }];
//! let table = schema.make_table(&rows).unwrap();
//! assert_eq!(table.header().len(), 1);
//! assert_eq!(table.body_rows().len(), 1);
//! ```

mod builder;
mod button;
mod cell;
mod convert;
mod error;
mod field;
mod html;
mod schema;

pub use builder::{
	BodyCellBuilder, BuilderRegistry, ButtonsCellBuilder, CellBuilder, CellContext, CellKind,
	HeaderCellBuilder,
};
pub use button::{BoundButton, ButtonSpec};
pub use cell::{BodyCell, ButtonsCell, Cell, HeaderCell, Table};
pub use convert::{ConvertError, Converter};
pub use error::{Result, TableError};
pub use field::{Field, FieldBuilder};
pub use html::HtmlAttributes;
pub use schema::{TableRow, TableSchema};
