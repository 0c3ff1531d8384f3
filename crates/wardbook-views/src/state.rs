use std::path::PathBuf;
use std::sync::Arc;

use tera::Tera;
use wardbook_docgen::DocumentPipeline;
use wardbook_domain::Clinic;
use wardbook_urls::Router;

/// Everything a handler needs, shared across the accept loop.
#[derive(Clone)]
pub struct AppState {
	pub clinic: Clinic,
	pub pipeline: DocumentPipeline,
	pub router: Arc<Router>,
	pub tera: Arc<Tera>,
	pub per_page: usize,
	pub media_root: PathBuf,
}

impl AppState {
	/// Absolute path of a document template under the media root.
	pub fn doc_template(&self, name: &str) -> PathBuf {
		self.media_root.join(name)
	}
}
