/// Errors raised by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	#[error("no record with pk {0}")]
	NotFound(i64),

	#[error("record has no pk; insert it first")]
	Unsaved,
}

pub type Result<T> = std::result::Result<T, StoreError>;
