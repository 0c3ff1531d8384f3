//! Framework-neutral request/response types plus htmx negotiation.
//!
//! Handlers work against the owned [`Request`] and [`Response`] here
//! rather than hyper's generic bodies, which keeps the view layer
//! synchronous-friendly and easy to test. The [`htmx`] module reads the
//! `HX-*` request headers and merges trigger events into responses.

mod error;
pub mod htmx;
mod request;
mod response;

pub use error::{HttpError, Result};
pub use htmx::{send_message, set_trigger, Htmx, Trigger, TriggerKind};
pub use request::Request;
pub use response::Response;
