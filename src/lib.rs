//! # Wardbook
//!
//! Clinic record keeping for a small inpatient department: a patient
//! registry, admission and discharge tracking, medical cards,
//! disability certificates, and asynchronous DOCX/XLSX roster exports.
//!
//! The facade re-exports the member crates under short module names:
//!
//! - [`urls`]: named routes, reversing and resolution
//! - [`tables`]: declarative table schemas rendered to cells
//! - [`store`]: in-memory record stores, querying and pagination
//! - [`domain`]: clinic entities and the services behind each page
//! - [`tasks`]: the background job runner and result backend
//! - [`docgen`]: the document build pipeline over OOXML templates
//! - [`http`]: owned request/response types and htmx negotiation
//! - [`views`]: the URL table and the handlers behind it
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use wardbook::docgen::{DocumentPipeline, RenderRegistry};
//! use wardbook::domain::Clinic;
//! use wardbook::tasks::{JobRunner, MemoryResultBackend};
//! use wardbook::views::{build_app, build_router, AppState};
//!
//! let clinic = Clinic::new();
//! let runner = JobRunner::new(Arc::new(MemoryResultBackend::new()));
//! let pipeline = DocumentPipeline::new(RenderRegistry::with_builtin(), runner);
//! let router = Arc::new(build_router().unwrap());
//!
//! let state = AppState {
//! 	clinic,
//! 	pipeline,
//! 	router,
//! 	tera: Arc::new(tera::Tera::default()),
//! 	per_page: 10,
//! 	media_root: "media".into(),
//! };
//! let app = build_app(state);
//! assert!(app.state().router.route("patients:index").is_some());
//! ```

pub use wardbook_docgen as docgen;
pub use wardbook_domain as domain;
pub use wardbook_http as http;
pub use wardbook_store as store;
pub use wardbook_tables as tables;
pub use wardbook_tasks as tasks;
pub use wardbook_urls as urls;
pub use wardbook_views as views;
