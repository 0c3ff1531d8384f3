use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rstest::{fixture, rstest};
use wardbook_docgen::{
	ContextSource, DocgenError, DocumentPipeline, RenderContext, RenderRegistry, StaticContext,
};
use wardbook_tasks::{JobRunner, JobStatus, MemoryResultBackend};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
	let mut writer = ZipWriter::new(std::fs::File::create(path).unwrap());
	for (name, contents) in entries {
		writer.start_file(*name, SimpleFileOptions::default()).unwrap();
		writer.write_all(contents.as_bytes()).unwrap();
	}
	writer.finish().unwrap();
}

fn docx_template(dir: &Path) -> PathBuf {
	let path = dir.join("certificate.docx");
	write_zip(
		&path,
		&[
			(
				"[Content_Types].xml",
				r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#,
			),
			(
				"word/document.xml",
				r#"<w:document><w:body><w:p><w:t>{{ surname }}, {{ name }}</w:t></w:p></w:body></w:document>"#,
			),
		],
	);
	path
}

fn xlsx_template(dir: &Path) -> PathBuf {
	let path = dir.join("report.xlsx");
	write_zip(
		&path,
		&[
			(
				"[Content_Types].xml",
				r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#,
			),
			("xl/workbook.xml", r#"<workbook><sheets><sheet name="Sheet1" sheetId="1"/></sheets></workbook>"#),
			(
				"xl/worksheets/sheet1.xml",
				r#"<worksheet><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>Surname</t></is></c><c r="B1" t="inlineStr"><is><t>Entry date</t></is></c></row></sheetData></worksheet>"#,
			),
		],
	);
	path
}

fn read_entry(path: &Path, name: &str) -> String {
	let mut archive = ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
	let mut entry = archive.by_name(name).unwrap();
	let mut contents = String::new();
	entry.read_to_string(&mut contents).unwrap();
	contents
}

#[fixture]
fn runner() -> JobRunner {
	JobRunner::new(Arc::new(MemoryResultBackend::new()))
		.with_retry_delay(Duration::from_millis(10))
}

#[rstest]
#[tokio::test]
async fn docx_build_substitutes_placeholders(runner: JobRunner) {
	let dir = tempfile::tempdir().unwrap();
	let template = docx_template(dir.path());
	let pipeline = DocumentPipeline::new(RenderRegistry::with_builtin(), runner.clone());

	let context = RenderContext::new()
		.with_field("surname", "Ivanov")
		.with_field("name", "Ivan");
	let job_id = pipeline
		.submit(&template, "docx", Arc::new(StaticContext(context)))
		.await
		.unwrap();

	assert_eq!(runner.wait(job_id).await.unwrap(), JobStatus::Succeeded);

	let out = pipeline.result(job_id).await.unwrap().unwrap();
	let document = read_entry(&out, "word/document.xml");
	assert!(document.contains("Ivanov, Ivan"), "{document}");
	assert!(!document.contains("{{"), "{document}");
}

#[rstest]
#[tokio::test]
async fn xlsx_build_appends_rows_below_template_header(runner: JobRunner) {
	let dir = tempfile::tempdir().unwrap();
	let template = xlsx_template(dir.path());
	let pipeline = DocumentPipeline::new(RenderRegistry::with_builtin(), runner.clone());

	let context = RenderContext::new().with_rows(vec![
		vec!["Ivanov".to_string(), "2024-01-01".to_string()],
		vec!["Petrov".to_string(), "2024-01-02".to_string()],
	]);
	let job_id = pipeline
		.submit(&template, "xlsx", Arc::new(StaticContext(context)))
		.await
		.unwrap();

	assert_eq!(runner.wait(job_id).await.unwrap(), JobStatus::Succeeded);

	let out = pipeline.result(job_id).await.unwrap().unwrap();
	let sheet = read_entry(&out, "xl/worksheets/sheet1.xml");
	assert!(sheet.contains("Surname"), "{sheet}");
	assert!(sheet.contains(r#"<row r="2">"#), "{sheet}");
	assert!(sheet.contains(r#"<row r="3">"#), "{sheet}");
	let ivanov = sheet.find("Ivanov").unwrap();
	let petrov = sheet.find("Petrov").unwrap();
	assert!(ivanov < petrov, "appended rows out of order: {sheet}");
}

#[rstest]
#[tokio::test]
async fn unknown_format_is_rejected_before_scheduling(runner: JobRunner) {
	let pipeline = DocumentPipeline::new(RenderRegistry::with_builtin(), runner);
	let source = Arc::new(StaticContext(RenderContext::new()));

	let err = pipeline.submit("whatever.pdf", "pdf", source).await.unwrap_err();
	assert!(matches!(err, DocgenError::UnknownFormat(format) if format == "pdf"));
}

#[rstest]
#[tokio::test]
async fn download_serves_attachment_with_office_content_type(runner: JobRunner) {
	let dir = tempfile::tempdir().unwrap();
	let template = docx_template(dir.path());
	let pipeline = DocumentPipeline::new(RenderRegistry::with_builtin(), runner.clone());

	let context = RenderContext::new().with_field("surname", "Sidorova").with_field("name", "Anna");
	let job_id = pipeline
		.submit(&template, "docx", Arc::new(StaticContext(context)))
		.await
		.unwrap();
	runner.wait(job_id).await.unwrap();

	let download = pipeline.download(job_id).await.unwrap();
	assert_eq!(download.filename, "file.docx");
	assert_eq!(
		download.content_type,
		"application/vnd.openxmlformats-officedocument.wordprocessingml.document"
	);
	assert!(!download.bytes.is_empty());
}

#[rstest]
#[tokio::test]
async fn download_before_completion_reports_missing_result(runner: JobRunner) {
	struct NeverReady;

	#[async_trait]
	impl ContextSource for NeverReady {
		async fn context(&self) -> wardbook_docgen::Result<RenderContext> {
			tokio::time::sleep(Duration::from_secs(60)).await;
			Ok(RenderContext::new())
		}
	}

	let pipeline = DocumentPipeline::new(RenderRegistry::with_builtin(), runner);
	let job_id = pipeline
		.submit("never-built.docx", "docx", Arc::new(NeverReady))
		.await
		.unwrap();

	let err = pipeline.download(job_id).await.unwrap_err();
	assert!(matches!(err, DocgenError::ResultMissing(id) if id == job_id));
}

#[rstest]
#[tokio::test]
async fn missing_template_exhausts_retries_and_fails(runner: JobRunner) {
	let runner = runner.with_max_retries(2);
	let pipeline = DocumentPipeline::new(RenderRegistry::with_builtin(), runner.clone());
	let source = Arc::new(StaticContext(RenderContext::new()));

	let job_id = pipeline.submit("no-such-template.docx", "docx", source).await.unwrap();
	assert_eq!(runner.wait(job_id).await.unwrap(), JobStatus::Failed);
	assert!(pipeline.result(job_id).await.unwrap().is_none());
}
