use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::context::RenderContext;
use crate::docx::DocxRenderer;
use crate::error::Result;
use crate::xlsx::XlsxRenderer;

/// Renders one template file into one output file.
///
/// Renderers are synchronous; they run on the blocking side of a background
/// job, never on a request path.
pub trait Renderer: Send + Sync {
	/// Fill `template` with `context` and write the result to `out`.
	fn render(&self, template: &Path, context: &RenderContext, out: &Path) -> Result<()>;
}

/// Maps output format tags (`"docx"`, `"xlsx"`) to renderers.
///
/// The registry is built once at startup and shared immutably; handlers can
/// check [`contains`](Self::contains) before scheduling work so an unknown
/// format is rejected synchronously.
#[derive(Clone, Default)]
pub struct RenderRegistry {
	renderers: HashMap<String, Arc<dyn Renderer>>,
}

impl RenderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry with the built-in OOXML renderers registered under
	/// `"docx"` and `"xlsx"`.
	pub fn with_builtin() -> Self {
		let mut registry = Self::new();
		registry.register("docx", Arc::new(DocxRenderer));
		registry.register("xlsx", Arc::new(XlsxRenderer));
		registry
	}

	pub fn register(&mut self, format: impl Into<String>, renderer: Arc<dyn Renderer>) {
		self.renderers.insert(format.into(), renderer);
	}

	pub fn contains(&self, format: &str) -> bool {
		self.renderers.contains_key(format)
	}

	pub fn get(&self, format: &str) -> Option<Arc<dyn Renderer>> {
		self.renderers.get(format).cloned()
	}
}

impl std::fmt::Debug for RenderRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut formats: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
		formats.sort_unstable();
		f.debug_struct("RenderRegistry").field("formats", &formats).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_registry_knows_ooxml_formats() {
		let registry = RenderRegistry::with_builtin();
		assert!(registry.contains("docx"));
		assert!(registry.contains("xlsx"));
		assert!(!registry.contains("pdf"));
	}

	#[test]
	fn custom_renderer_replaces_builtin() {
		struct Noop;
		impl Renderer for Noop {
			fn render(&self, _: &Path, _: &RenderContext, _: &Path) -> Result<()> {
				Ok(())
			}
		}

		let mut registry = RenderRegistry::with_builtin();
		registry.register("docx", Arc::new(Noop));
		assert!(registry.get("docx").is_some());
	}
}
