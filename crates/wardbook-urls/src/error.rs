use thiserror::Error;

/// Errors raised during route registration and URL reversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
	/// No route is registered under the requested name.
	#[error("unknown route name: {0}")]
	UnknownRoute(String),
	/// A route with the same name was registered twice.
	#[error("duplicate route name: {0}")]
	DuplicateRoute(String),
	/// The pattern contains a placeholder the caller did not supply.
	#[error("missing parameter \"{param}\" for route \"{route}\"")]
	MissingParam { route: String, param: String },
	/// The pattern itself is malformed (unterminated or empty placeholder).
	#[error("invalid pattern \"{0}\"")]
	InvalidPattern(String),
}

pub type Result<T> = std::result::Result<T, UrlError>;
