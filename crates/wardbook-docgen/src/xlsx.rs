use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::context::RenderContext;
use crate::error::{DocgenError, Result};
use crate::render::Renderer;

const SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Excel renderer: appends the context rows to the first worksheet of the
/// template workbook, after whatever rows the template already holds.
/// Appended cells carry inline strings, so no shared-string table is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRenderer;

impl Renderer for XlsxRenderer {
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

			if name == SHEET_PART {
				contents = append_rows(&contents, context.rows())?;
			}

			writer.start_file(name, options)?;
			writer.write_all(&contents)?;
		}

		writer.finish()?;
		Ok(())
	}
}

/// Streams the worksheet XML through, remembering the highest row index, and
/// emits the new rows just before `</sheetData>`.
fn append_rows(sheet: &[u8], rows: &[Vec<String>]) -> Result<Vec<u8>> {
	let mut reader = Reader::from_reader(sheet);
	let mut writer = Writer::new(Cursor::new(Vec::new()));
	let mut buf = Vec::new();
	let mut row_count: u32 = 0;
	let mut max_row: u32 = 0;

	loop {
		match reader.read_event_into(&mut buf)? {
			Event::Eof => break,
			Event::Start(start) if start.local_name().as_ref() == b"row" => {
				row_count += 1;
				max_row = max_row.max(row_index(&start)?.unwrap_or(row_count));
				writer.write_event(Event::Start(start))?;
			}
			Event::Empty(empty) if empty.local_name().as_ref() == b"row" => {
				row_count += 1;
				max_row = max_row.max(row_index(&empty)?.unwrap_or(row_count));
				writer.write_event(Event::Empty(empty))?;
			}
			Event::Empty(empty) if empty.local_name().as_ref() == b"sheetData" => {
				// Self-closing sheetData in an empty template.
				writer.write_event(Event::Start(BytesStart::new("sheetData")))?;
				write_rows(&mut writer, rows, 1)?;
				writer.write_event(Event::End(BytesEnd::new("sheetData")))?;
			}
			Event::End(end) if end.local_name().as_ref() == b"sheetData" => {
				write_rows(&mut writer, rows, max_row.max(row_count) + 1)?;
				writer.write_event(Event::End(end))?;
			}
			other => writer.write_event(other)?,
		}
		buf.clear();
	}

	Ok(writer.into_inner().into_inner())
}

fn row_index(row: &BytesStart<'_>) -> Result<Option<u32>> {
	let Some(attr) = row.try_get_attribute("r").map_err(quick_xml::Error::from)? else {
		return Ok(None);
	};
	let value = attr.unescape_value()?;
	value
		.parse::<u32>()
		.map(Some)
		.map_err(|err| DocgenError::Render(format!("bad row reference '{value}': {err}")))
}

fn write_rows<W: Write>(writer: &mut Writer<W>, rows: &[Vec<String>], first_row: u32) -> Result<()> {
	for (offset, row) in rows.iter().enumerate() {
		let row_number = first_row + offset as u32;
		let reference = row_number.to_string();
		let mut row_el = BytesStart::new("row");
		row_el.push_attribute(("r", reference.as_str()));
		writer.write_event(Event::Start(row_el))?;

		for (column, value) in row.iter().enumerate() {
			let cell_ref = format!("{}{row_number}", column_letter(column as u32));
			let mut cell = BytesStart::new("c");
			cell.push_attribute(("r", cell_ref.as_str()));
			cell.push_attribute(("t", "inlineStr"));
			writer.write_event(Event::Start(cell))?;
			writer.write_event(Event::Start(BytesStart::new("is")))?;
			writer.write_event(Event::Start(BytesStart::new("t")))?;
			writer.write_event(Event::Text(BytesText::new(value)))?;
			writer.write_event(Event::End(BytesEnd::new("t")))?;
			writer.write_event(Event::End(BytesEnd::new("is")))?;
			writer.write_event(Event::End(BytesEnd::new("c")))?;
		}

		writer.write_event(Event::End(BytesEnd::new("row")))?;
	}
	Ok(())
}

/// Spreadsheet column letters for a zero-based index: 0 -> A, 25 -> Z, 26 -> AA.
fn column_letter(mut index: u32) -> String {
	let mut letters = Vec::new();
	loop {
		letters.push(char::from(b'A' + (index % 26) as u8));
		if index < 26 {
			break;
		}
		index = index / 26 - 1;
	}
	letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn column_letters_roll_over_at_z() {
		assert_eq!(column_letter(0), "A");
		assert_eq!(column_letter(25), "Z");
		assert_eq!(column_letter(26), "AA");
		assert_eq!(column_letter(27), "AB");
	}

	#[test]
	fn rows_land_after_existing_template_rows() {
		let sheet = br#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData></worksheet>"#;
		let rows = vec![vec!["Ivanov".to_string(), "2024-01-01".to_string()]];
		let rewritten = append_rows(sheet, &rows).unwrap();
		let text = String::from_utf8(rewritten).unwrap();
		assert!(text.contains(r#"<row r="2">"#), "{text}");
		assert!(text.contains(r#"<c r="A2" t="inlineStr"><is><t>Ivanov</t></is></c>"#), "{text}");
		assert!(text.contains(r#"<c r="B2" t="inlineStr"><is><t>2024-01-01</t></is></c>"#), "{text}");
	}

	#[test]
	fn self_closing_sheet_data_is_expanded() {
		let sheet = br#"<worksheet><sheetData/></worksheet>"#;
		let rows = vec![vec!["x".to_string()]];
		let text = String::from_utf8(append_rows(sheet, &rows).unwrap()).unwrap();
		assert!(text.contains(r#"<sheetData><row r="1">"#), "{text}");
		assert!(text.contains("</sheetData>"), "{text}");
	}

	#[test]
	fn appended_rows_preserve_input_order() {
		let sheet = br#"<worksheet><sheetData></sheetData></worksheet>"#;
		let rows = vec![
			vec!["Ivanov".to_string(), "2024-01-01".to_string()],
			vec!["Petrov".to_string(), "2024-01-02".to_string()],
		];
		let text = String::from_utf8(append_rows(sheet, &rows).unwrap()).unwrap();
		let ivanov = text.find("Ivanov").unwrap();
		let petrov = text.find("Petrov").unwrap();
		assert!(ivanov < petrov);
		assert!(text.contains(r#"<row r="1">"#), "{text}");
		assert!(text.contains(r#"<row r="2">"#), "{text}");
	}

	#[test]
	fn cell_text_is_escaped() {
		let sheet = br#"<worksheet><sheetData></sheetData></worksheet>"#;
		let rows = vec![vec!["a < b".to_string()]];
		let text = String::from_utf8(append_rows(sheet, &rows).unwrap()).unwrap();
		assert!(text.contains("a &lt; b"), "{text}");
	}
}
