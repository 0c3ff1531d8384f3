//! htmx request negotiation and trigger-event headers.
//!
//! A partial-capable client announces itself with `HX-Request`; handlers
//! answer with a bare partial instead of the full page. Out-of-band
//! notifications travel back through the `HX-Trigger` family of headers,
//! which hold either a comma-joined event list or a JSON object and have
//! to be merged, not overwritten, when a response sets several.

use serde_json::{Map, Value};

use crate::error::{HttpError, Result};
use crate::request::Request;
use crate::response::Response;

/// Which moment of the htmx swap lifecycle fires the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerKind {
	#[default]
	Receive,
	Settle,
	Swap,
}

impl TriggerKind {
	pub fn header(self) -> &'static str {
		match self {
			TriggerKind::Receive => "HX-Trigger",
			TriggerKind::Settle => "HX-Trigger-After-Settle",
			TriggerKind::Swap => "HX-Trigger-After-Swap",
		}
	}
}

/// An event to fire client-side: a bare name or names with payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
	Name(String),
	Detailed(Map<String, Value>),
}

impl Trigger {
	pub fn name(name: impl Into<String>) -> Self {
		Trigger::Name(name.into())
	}

	fn is_empty(&self) -> bool {
		match self {
			Trigger::Name(name) => name.trim().is_empty(),
			Trigger::Detailed(map) => map.is_empty(),
		}
	}
}

/// Read-only htmx view over a request's `HX-*` headers.
#[derive(Debug, Clone, Copy)]
pub struct Htmx<'a> {
	request: &'a Request,
}

impl<'a> Htmx<'a> {
	pub fn new(request: &'a Request) -> Self {
		Self { request }
	}

	fn header(&self, name: &str) -> Option<&str> {
		self.request
			.headers()
			.get(name)
			.and_then(|value| value.to_str().ok())
	}

	/// True when the request came from htmx itself.
	pub fn is_htmx(&self) -> bool {
		self.header("HX-Request") == Some("true")
	}

	pub fn boosted(&self) -> bool {
		self.header("HX-Boosted") == Some("true")
	}

	pub fn history_restore_request(&self) -> bool {
		self.header("HX-History-Restore-Request") == Some("true")
	}

	pub fn current_url(&self) -> Option<&str> {
		self.header("HX-Current-URL")
	}

	pub fn prompt(&self) -> Option<&str> {
		self.header("HX-Prompt")
	}

	pub fn target(&self) -> Option<&str> {
		self.header("HX-Target")
	}

	pub fn trigger(&self) -> Option<&str> {
		self.header("HX-Trigger")
	}

	pub fn trigger_name(&self) -> Option<&str> {
		self.header("HX-Trigger-Name")
	}
}

/// Merge a trigger event into the response's trigger header.
///
/// The header may already hold a comma-joined name list or a JSON
/// object; the result keeps everything already queued. Two name lists
/// stay a list, any object involvement promotes the whole header to an
/// object (names become keys with empty payloads).
pub fn set_trigger(mut response: Response, trigger: Trigger, kind: TriggerKind) -> Result<Response> {
	if trigger.is_empty() {
		return Err(HttpError::EmptyTrigger);
	}
	let header = kind.header();

	let merged = match response.headers().get(header) {
		None => encode(&trigger),
		Some(existing) => {
			let raw = existing.to_str().unwrap_or_default();
			let existing: Value = serde_json::from_str(raw)
				.map_err(|source| HttpError::InvalidTriggerHeader { header, source })?;
			merge(existing, trigger)
		}
	};

	let value = serde_json::to_string(&merged)
		.map_err(|source| HttpError::InvalidTriggerHeader { header, source })?;
	if let Ok(value) = value.parse() {
		response.headers_mut().insert(header, value);
	}
	Ok(response)
}

fn encode(trigger: &Trigger) -> Value {
	match trigger {
		Trigger::Name(name) => Value::String(name.trim().to_string()),
		Trigger::Detailed(map) => Value::Object(map.clone()),
	}
}

fn merge(existing: Value, trigger: Trigger) -> Value {
	match (existing, trigger) {
		(Value::String(old), Trigger::Name(new)) => {
			if old.is_empty() {
				Value::String(new)
			} else {
				Value::String(format!("{old}, {new}"))
			}
		}
		(Value::Object(mut old), Trigger::Name(new)) => {
			for name in new.split(", ") {
				old.insert(name.to_string(), Value::Object(Map::new()));
			}
			Value::Object(old)
		}
		(Value::Object(mut old), Trigger::Detailed(new)) => {
			old.extend(new);
			Value::Object(old)
		}
		(Value::String(old), Trigger::Detailed(mut new)) => {
			for name in old.split(", ").filter(|n| !n.is_empty()) {
				if !new.contains_key(name) {
					new.insert(name.to_string(), Value::Object(Map::new()));
				}
			}
			Value::Object(new)
		}
		(other, trigger) => {
			// Non-string, non-object header contents are replaced.
			let _ = other;
			encode(&trigger)
		}
	}
}

/// Queue a user-visible toast: `"ok"` fires `successMessage`, `"error"`
/// fires `errorMessage`; anything else passes through as an event name.
pub fn send_message(response: Response, message: &str) -> Result<Response> {
	let names: Vec<&str> = message
		.trim()
		.split(", ")
		.map(|name| match name {
			"ok" => "successMessage",
			"error" => "errorMessage",
			other => other,
		})
		.collect();
	set_trigger(response, Trigger::name(names.join(", ")), TriggerKind::Receive)
}

#[cfg(test)]
mod tests {
	use http::Method;

	use super::*;

	fn htmx_request() -> Request {
		Request::new(Method::GET, "/patients/").with_header("HX-Request", "true")
	}

	#[test]
	fn plain_request_is_not_htmx() {
		let request = Request::new(Method::GET, "/patients/");
		assert!(!Htmx::new(&request).is_htmx());
		assert!(Htmx::new(&htmx_request()).is_htmx());
	}

	#[test]
	fn hx_headers_are_exposed() {
		let request = htmx_request()
			.with_header("HX-Target", "patients-table")
			.with_header("HX-Trigger-Name", "search");
		let htmx = Htmx::new(&request);
		assert_eq!(htmx.target(), Some("patients-table"));
		assert_eq!(htmx.trigger_name(), Some("search"));
	}

	#[test]
	fn ok_message_maps_to_success_event() {
		let response = send_message(Response::ok(), "ok").unwrap();
		assert_eq!(response.headers()["HX-Trigger"], "\"successMessage\"");
	}

	#[test]
	fn second_name_joins_the_list() {
		let response = send_message(Response::ok(), "ok").unwrap();
		let response = send_message(response, "error").unwrap();
		assert_eq!(
			response.headers()["HX-Trigger"],
			"\"successMessage, errorMessage\""
		);
	}

	#[test]
	fn object_merge_keeps_existing_keys() {
		let mut payload = Map::new();
		payload.insert("showToast".to_string(), Value::String("saved".to_string()));
		let response =
			set_trigger(Response::ok(), Trigger::Detailed(payload), TriggerKind::Receive)
				.unwrap();
		let response = send_message(response, "ok").unwrap();

		let raw = response.headers()["HX-Trigger"].to_str().unwrap();
		let value: Value = serde_json::from_str(raw).unwrap();
		assert_eq!(value["showToast"], "saved");
		assert!(value.get("successMessage").is_some());
	}

	#[test]
	fn name_list_promotes_to_object_when_payload_arrives() {
		let response = send_message(Response::ok(), "ok").unwrap();
		let mut payload = Map::new();
		payload.insert("showToast".to_string(), Value::String("saved".to_string()));
		let response =
			set_trigger(response, Trigger::Detailed(payload), TriggerKind::Receive).unwrap();

		let raw = response.headers()["HX-Trigger"].to_str().unwrap();
		let value: Value = serde_json::from_str(raw).unwrap();
		assert!(value.get("successMessage").is_some());
		assert_eq!(value["showToast"], "saved");
	}

	#[test]
	fn empty_trigger_is_rejected() {
		let err = set_trigger(Response::ok(), Trigger::name("  "), TriggerKind::Receive)
			.unwrap_err();
		assert!(matches!(err, HttpError::EmptyTrigger));
	}

	#[test]
	fn settle_and_swap_use_their_own_headers() {
		let response =
			set_trigger(Response::ok(), Trigger::name("refresh"), TriggerKind::Settle).unwrap();
		assert!(response.headers().contains_key("HX-Trigger-After-Settle"));
		assert!(!response.headers().contains_key("HX-Trigger"));
	}
}
