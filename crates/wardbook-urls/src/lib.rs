//! Named route table and URL reverse resolution
//!
//! Routes are registered once at startup under a stable name and a
//! pattern with `{param}` placeholders. [`Router::reverse`] rebuilds a
//! concrete URL from a route name and parameter map;
//! [`Router::resolve`] runs the other direction and
//! matches an incoming path back to a route, capturing its parameters.

mod error;
mod route;
mod router;

pub use error::{Result, UrlError};
pub use route::Route;
pub use router::{Router, UrlReverser};
