/// Errors raised by domain services.
///
/// `Validation` carries a user-facing message; the view layer renders it
/// next to the offending form field. The other variants wrap collaborator
/// failures unchanged.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
	#[error("{0}")]
	Validation(String),

	#[error(transparent)]
	Store(#[from] wardbook_store::StoreError),

	#[error(transparent)]
	Table(#[from] wardbook_tables::TableError),
}

impl DomainError {
	pub fn is_validation(&self) -> bool {
		matches!(self, DomainError::Validation(_))
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, DomainError::Store(wardbook_store::StoreError::NotFound(_)))
	}
}

pub type Result<T> = std::result::Result<T, DomainError>;
