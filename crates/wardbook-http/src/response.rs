use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::Serialize;

/// An owned response: status, headers and a byte body.
#[derive(Debug, Clone)]
pub struct Response {
	status: StatusCode,
	headers: HeaderMap,
	body: Bytes,
}

impl Response {
	pub fn new(status: StatusCode) -> Self {
		Self { status, headers: HeaderMap::new(), body: Bytes::new() }
	}

	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	pub fn bad_request() -> Self {
		Self::new(StatusCode::BAD_REQUEST)
	}

	pub fn method_not_allowed() -> Self {
		Self::new(StatusCode::METHOD_NOT_ALLOWED)
	}

	pub fn internal_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	pub fn redirect(location: &str) -> Self {
		Self::new(StatusCode::SEE_OTHER).with_header("location", location)
	}

	pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
		if let Ok(value) = value.parse() {
			self.headers.insert(name, value);
		}
		self
	}

	pub fn with_html(mut self, html: impl Into<String>) -> Self {
		self.body = Bytes::from(html.into());
		self.with_header("content-type", "text/html; charset=utf-8")
	}

	pub fn with_json<T: Serialize>(mut self, value: &T) -> Self {
		// Serialization of handler-built values does not fail.
		self.body = Bytes::from(serde_json::to_vec(value).unwrap_or_default());
		self.with_header("content-type", "application/json")
	}

	/// A file download: content type plus an attachment disposition.
	pub fn with_attachment(mut self, bytes: Vec<u8>, content_type: &str, filename: &str) -> Self {
		self.body = Bytes::from(bytes);
		if let Ok(value) = content_type.parse() {
			self.headers.insert("content-type", value);
		}
		self.with_header(
			"content-disposition",
			&format!("attachment; filename={filename}"),
		)
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	pub fn headers_mut(&mut self) -> &mut HeaderMap {
		&mut self.headers
	}

	pub fn body(&self) -> &Bytes {
		&self.body
	}

	pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
		(self.status, self.headers, self.body)
	}
}
