//! End-to-end request flows through the router, handlers and templates.

use std::sync::Arc;

use http::{Method, StatusCode};
use rstest::{fixture, rstest};
use wardbook::docgen::{DocumentPipeline, RenderRegistry};
use wardbook::domain::{patients, Clinic, Doctor, Hospitalization};
use wardbook::http::Request;
use wardbook::tasks::{JobRunner, MemoryResultBackend};
use wardbook::views::{build_app, build_router, App, AppState};

use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded_clinic() -> Clinic {
	let clinic = Clinic::new();
	clinic.doctors.insert(Doctor::new("Petrova", "Elena", "Sergeevna"));
	let anna = patients::create(
		&clinic,
		"Ivanova".to_string(),
		"Anna".to_string(),
		"Petrovna".to_string(),
		date(1980, 5, 17),
	);
	patients::create(
		&clinic,
		"Sidorov".to_string(),
		"Pavel".to_string(),
		String::new(),
		date(1975, 1, 3),
	);
	let stay = Hospitalization::new(
		anna.pk.unwrap(),
		date(2024, 2, 1).and_hms_opt(10, 0, 0).unwrap(),
	);
	clinic.hospitalizations.insert(stay);
	clinic
}

#[fixture]
fn app() -> App {
	let clinic = seeded_clinic();
	let runner = JobRunner::new(Arc::new(MemoryResultBackend::new()));
	let pipeline = DocumentPipeline::new(RenderRegistry::with_builtin(), runner);
	let tera = tera::Tera::new("templates/**/*.html").unwrap();
	let state = AppState {
		clinic,
		pipeline,
		router: Arc::new(build_router().unwrap()),
		tera: Arc::new(tera),
		per_page: 10,
		media_root: "media".into(),
	};
	build_app(state)
}

fn htmx(request: Request) -> Request {
	request.with_header("HX-Request", "true")
}

fn body_text(response: &wardbook::http::Response) -> String {
	String::from_utf8_lossy(response.body()).into_owned()
}

#[rstest]
#[tokio::test]
async fn index_renders_the_registry(app: App) {
	let response = app.handle(Request::new(Method::GET, "/")).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_text(&response);
	assert!(body.contains("Ivanova"));
	assert!(body.contains("Sidorov"));
	assert!(body.contains("navbar"));
}

#[rstest]
#[tokio::test]
async fn htmx_request_gets_the_bare_partial(app: App) {
	let response = app.handle(htmx(Request::new(Method::GET, "/"))).await;
	let body = body_text(&response);
	assert!(body.contains("Ivanova"));
	assert!(!body.contains("navbar"));
}

#[rstest]
#[tokio::test]
async fn creating_a_patient_fires_the_success_trigger(app: App) {
	let request = htmx(Request::new(Method::POST, "/patients/create/"))
		.with_body("surname=Novak&name=Irina&patronymic=&birthday=1990-12-01".into());
	let response = app.handle(request).await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.headers()["HX-Trigger"], "\"successMessage\"");
	assert_eq!(app.state().clinic.patients.len(), 3);
}

#[rstest]
#[tokio::test]
async fn invalid_birthday_rerenders_the_form_with_an_error(app: App) {
	let request = htmx(Request::new(Method::POST, "/patients/create/"))
		.with_body("surname=Novak&name=Irina&birthday=not-a-date".into());
	let response = app.handle(request).await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.headers()["HX-Trigger"], "\"errorMessage\"");
	assert!(body_text(&response).contains("not a date"));
	assert_eq!(app.state().clinic.patients.len(), 2);
}

#[rstest]
#[tokio::test]
async fn search_narrows_the_table(app: App) {
	let request = htmx(Request::new(Method::POST, "/patients/search/"))
		.with_body("search=iva".into());
	let body = body_text(&app.handle(request).await);
	assert!(body.contains("Ivanova"));
	assert!(!body.contains("Sidorov"));
}

#[rstest]
#[tokio::test]
async fn current_roster_renders_sort_links(app: App) {
	let response = app
		.handle(htmx(Request::new(Method::GET, "/current/patient/asc/")))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_text(&response);
	assert!(body.contains("Ivanova"));
	assert!(body.contains("href=\"/current/patient/desc/\""));
	assert!(body.contains("href=\"/current/entry_date/asc/\""));
	// Router-built URLs go into attributes verbatim, not entity-escaped.
	assert!(!body.contains("&#x2F;current"), "{body}");
}

#[rstest]
#[tokio::test]
async fn overlapping_admission_is_rejected_with_the_form_error(app: App) {
	let request = htmx(Request::new(Method::POST, "/hospitalizations/create/1/"))
		.with_body("entry_date=2024-02-10T09:00".into());
	let response = app.handle(request).await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.headers()["HX-Trigger"], "\"errorMessage\"");
	assert!(body_text(&response).contains("already has a hospitalization"));
}

#[rstest]
#[tokio::test]
async fn discharge_then_readmission_is_allowed(app: App) {
	let leave = htmx(Request::new(Method::POST, "/current/leave/1/"))
		.with_body("leaving_date=2024-02-15T12:00".into());
	assert_eq!(app.handle(leave).await.status(), StatusCode::OK);

	let readmit = htmx(Request::new(Method::POST, "/hospitalizations/create/1/"))
		.with_body("entry_date=2024-03-01T09:00".into());
	let response = app.handle(readmit).await;
	assert_eq!(response.headers()["HX-Trigger"], "\"successMessage\"");
	assert_eq!(app.state().clinic.hospitalizations.len(), 2);
}

#[rstest]
#[tokio::test]
async fn unknown_path_is_404_and_wrong_method_is_405(app: App) {
	let missing = app.handle(Request::new(Method::GET, "/nowhere/")).await;
	assert_eq!(missing.status(), StatusCode::NOT_FOUND);

	let wrong = app
		.handle(Request::new(Method::GET, "/patients/delete/1/"))
		.await;
	assert_eq!(wrong.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[rstest]
#[tokio::test]
async fn unknown_task_polls_and_downloads_as_404(app: App) {
	let id = wardbook::tasks::JobId::new();
	let status = app
		.handle(Request::new(Method::GET, format!("/documents/status/{id}/")))
		.await;
	assert_eq!(status.status(), StatusCode::NOT_FOUND);

	let download = app
		.handle(Request::new(
			Method::GET,
			format!("/documents/download/docx/{id}/"),
		))
		.await;
	assert_eq!(download.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn task_status_polls_as_json(app: App) {
	use wardbook::docgen::StaticContext;

	// Submit through the pipeline directly; the export views need a
	// DOCX template on disk, the status route does not.
	let missing_template = std::env::temp_dir().join("wardbook-missing.docx");
	let job_id = app
		.state()
		.pipeline
		.submit(
			missing_template,
			"docx",
			Arc::new(StaticContext(Default::default())),
		)
		.await
		.unwrap();

	let response = app
		.handle(Request::new(
			Method::GET,
			format!("/documents/status/{job_id}/"),
		))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
	assert!(body.get("task_status").is_some());
}
