use std::collections::BTreeMap;

use bytes::Bytes;
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;

use crate::error::Result;

/// An owned view of one incoming request, detached from the transport.
///
/// The server layer translates hyper requests into this; handlers never
/// see hyper types. `params` holds path parameters captured by the
/// router during dispatch.
#[derive(Debug, Clone)]
pub struct Request {
	method: Method,
	path: String,
	query: Vec<(String, String)>,
	headers: HeaderMap,
	body: Bytes,
	params: BTreeMap<String, String>,
}

impl Request {
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			headers: HeaderMap::new(),
			body: Bytes::new(),
			params: BTreeMap::new(),
		}
	}

	pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
		self.query = query;
		self
	}

	/// Parse and attach the query pairs from a raw query string.
	pub fn with_raw_query(mut self, raw: &str) -> Self {
		self.query = serde_urlencoded::from_str(raw).unwrap_or_default();
		self
	}

	pub fn with_headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
		if let Ok(value) = value.parse() {
			self.headers.insert(name, value);
		}
		self
	}

	pub fn with_body(mut self, body: Bytes) -> Self {
		self.body = body;
		self
	}

	pub fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
		self.params = params;
		self
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	pub fn body(&self) -> &Bytes {
		&self.body
	}

	pub fn query_pairs(&self) -> &[(String, String)] {
		&self.query
	}

	/// First query value under `name`, if any.
	pub fn query(&self, name: &str) -> Option<&str> {
		self.query
			.iter()
			.find(|(k, _)| k == name)
			.map(|(_, v)| v.as_str())
	}

	pub fn params(&self) -> &BTreeMap<String, String> {
		&self.params
	}

	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Path parameter parsed as a primary key.
	pub fn param_pk(&self) -> Option<i64> {
		self.param("pk").and_then(|raw| raw.parse().ok())
	}

	/// Deserialize the urlencoded body into a form value.
	pub fn form<T: DeserializeOwned>(&self) -> Result<T> {
		Ok(serde_urlencoded::from_bytes(&self.body)?)
	}
}

#[cfg(test)]
mod tests {
	use serde::Deserialize;

	use super::*;

	#[test]
	fn query_lookup_returns_first_value() {
		let request = Request::new(Method::GET, "/patients/").with_raw_query("q=iva&page=2");
		assert_eq!(request.query("q"), Some("iva"));
		assert_eq!(request.query("page"), Some("2"));
		assert_eq!(request.query("missing"), None);
	}

	#[test]
	fn form_parses_urlencoded_body() {
		#[derive(Deserialize)]
		struct Form {
			surname: String,
			name: String,
		}

		let request = Request::new(Method::POST, "/patients/create/")
			.with_body(Bytes::from_static(b"surname=Ivanov&name=Ivan"));
		let form: Form = request.form().unwrap();
		assert_eq!(form.surname, "Ivanov");
		assert_eq!(form.name, "Ivan");
	}

	#[test]
	fn pk_param_parses_to_int() {
		let request = Request::new(Method::GET, "/patients/7/")
			.with_params(BTreeMap::from([("pk".to_string(), "7".to_string())]));
		assert_eq!(request.param_pk(), Some(7));
	}
}
