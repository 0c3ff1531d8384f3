use thiserror::Error;

use crate::builder::CellKind;

/// Errors raised by schema construction and table building.
///
/// Configuration errors (`Config`, `MissingBuilder`) mean the schema
/// itself is wrong and are never recoverable at render time. The
/// data-shaped variants (`MissingAttribute`, `MissingPk`, `Convert`)
/// are typed failures for the calling view to turn into a user-visible
/// message.
#[derive(Debug, Error)]
pub enum TableError {
	/// Malformed schema, field or button declaration.
	#[error("table configuration error: {0}")]
	Config(String),
	/// The builder registry has no builder for the requested cell kind.
	#[error("no cell builder registered for kind \"{0}\"")]
	MissingBuilder(CellKind),
	/// The row has no attribute matching a declared field.
	#[error("row has no attribute \"{field}\"")]
	MissingAttribute { field: String },
	/// A row-bound cell (link or buttons) needs a primary key the row
	/// does not carry.
	#[error("row has no primary key for field \"{field}\"")]
	MissingPk { field: String },
	/// A value converter rejected a cell value.
	#[error("failed to convert value \"{value}\": {message}")]
	Convert { value: String, message: String },
	/// Sort or link URL resolution failed.
	#[error(transparent)]
	Reverse(#[from] wardbook_urls::UrlError),
}

pub type Result<T> = std::result::Result<T, TableError>;
