use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::context::RenderContext;
use crate::error::{DocgenError, Result};
use crate::render::Renderer;

const DOCUMENT_PART: &str = "word/document.xml";

/// Word renderer: rewrites the template archive, substituting `{{ key }}`
/// placeholders inside `word/document.xml`. All other archive entries are
/// copied through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl Renderer for DocxRenderer {
	fn render(&self, template: &Path, context: &RenderContext, out: &Path) -> Result<()> {
		let file = File::open(template).map_err(|source| DocgenError::Template {
			path: template.to_path_buf(),
			source,
		})?;
		let mut archive = ZipArchive::new(file)?;
		let mut writer = ZipWriter::new(File::create(out)?);
		let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

		for index in 0..archive.len() {
			let mut entry = archive.by_index(index)?;
			let name = entry.name().to_string();
			let mut contents = Vec::with_capacity(entry.size() as usize);
			entry.read_to_end(&mut contents)?;

			if name == DOCUMENT_PART {
				let document = String::from_utf8(contents).map_err(|err| {
					DocgenError::Render(format!("{DOCUMENT_PART} is not valid UTF-8: {err}"))
				})?;
				contents = substitute(&document, context).into_bytes();
			}

			writer.start_file(name, options)?;
			writer.write_all(&contents)?;
		}

		writer.finish()?;
		Ok(())
	}
}

fn substitute(document: &str, context: &RenderContext) -> String {
	let mut rendered = document.to_string();
	for (key, value) in context.fields() {
		let escaped = escape_xml(value);
		rendered = rendered.replace(&format!("{{{{ {key} }}}}"), &escaped);
		rendered = rendered.replace(&format!("{{{{{key}}}}}"), &escaped);
	}
	rendered
}

fn escape_xml(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&apos;"),
			other => escaped.push(other),
		}
	}
	escaped
}
