use wardbook_docgen::DocgenError;
use wardbook_domain::DomainError;
use wardbook_http::{HttpError, Response};
use wardbook_tables::TableError;
use wardbook_urls::UrlError;

pub type Result<T> = std::result::Result<T, ViewError>;

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
	#[error("not found")]
	NotFound,
	#[error("method not allowed")]
	MethodNotAllowed,
	#[error("bad request: {0}")]
	BadRequest(String),
	#[error(transparent)]
	Domain(#[from] DomainError),
	#[error(transparent)]
	Docgen(#[from] DocgenError),
	#[error(transparent)]
	Table(#[from] TableError),
	#[error(transparent)]
	Http(#[from] HttpError),
	#[error(transparent)]
	Url(#[from] UrlError),
	#[error("template error: {0}")]
	Template(#[from] tera::Error),
}

impl ViewError {
	/// Maps the error onto an HTTP response.
	///
	/// Missing records and missing job results become 404s. Validation
	/// failures that were not intercepted by a form re-render, and
	/// malformed input, become 400s. Everything else is a 500.
	pub fn into_response(self) -> Response {
		match &self {
			ViewError::NotFound => Response::not_found(),
			ViewError::MethodNotAllowed => Response::method_not_allowed(),
			ViewError::BadRequest(message) => {
				Response::bad_request().with_html(message.clone())
			}
			ViewError::Domain(err) if err.is_not_found() => Response::not_found(),
			ViewError::Domain(err) if err.is_validation() => {
				Response::bad_request().with_html(err.to_string())
			}
			ViewError::Docgen(DocgenError::ResultMissing(_)) => Response::not_found(),
			ViewError::Docgen(DocgenError::Task(
				wardbook_tasks::TaskError::UnknownJob(_),
			)) => Response::not_found(),
			ViewError::Docgen(DocgenError::UnknownFormat(_)) => {
				Response::bad_request().with_html(self.to_string())
			}
			ViewError::Http(_) => Response::bad_request().with_html(self.to_string()),
			_ => {
				tracing::error!(error = %self, "handler failed");
				Response::internal_error()
			}
		}
	}
}
