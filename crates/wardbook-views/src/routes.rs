//! The URL table and its handler bindings.

use std::sync::Arc;

use wardbook_urls::{Result as UrlResult, Router};

use crate::disabilities::{
	CommissionDateCreateView, DisabilityCreateView, DisabilityDeleteView, DisabilityListView,
	DisabilityUpdateView,
};
use crate::documents::{DownloadView, RosterExportView, TaskStatusView};
use crate::hospitalizations::{
	CurrentListView, HospitalizationCreateView, HospitalizationDeleteView,
	HospitalizationDetailView, HospitalizationLeaveView, HospitalizationListView,
	HospitalizationUpdateView,
};
use crate::medical_cards::{
	MedicalCardCreateView, MedicalCardDeleteView, MedicalCardDetailView, MedicalCardListView,
	MedicalCardUpdateView,
};
use crate::patients::{
	PatientCreateView, PatientDeleteView, PatientDetailView, PatientListView,
	PatientSearchView, PatientToggleStatusView, PatientUpdateView,
};
use crate::state::AppState;
use crate::view::App;

/// Every route in the application.
///
/// Literal segments are registered before parameterized ones that
/// could shadow them; resolution takes the first match.
pub fn build_router() -> UrlResult<Router> {
	let router = Router::builder()
		// Patient registry.
		.route("patients:index", "/")?
		.route("patients:search", "/patients/search/")?
		.route("patients:create", "/patients/create/")?
		.route("patients:update", "/patients/update/{pk}/")?
		.route("patients:delete", "/patients/delete/{pk}/")?
		.route("patients:toggle_status", "/patients/status/{pk}/")?
		.route("patients:list", "/patients/{order}/{direction}/{page}/")?
		.route("patients:detail", "/patients/{pk}/")?
		// Admissions. Literal `/current/...` routes precede the
		// sorted roster pattern that would otherwise swallow them.
		.route("documents:create_current_docx", "/current/export/docx/")?
		.route("documents:create_current_xlsx", "/current/export/xlsx/")?
		.route(
			"documents:create_current_by_doctor_docx",
			"/current/export/by-doctor/docx/",
		)?
		.route("hospitalizations:update_current", "/current/update/{pk}/")?
		.route("hospitalizations:delete_current", "/current/delete/{pk}/")?
		.route("hospitalizations:leave", "/current/leave/{pk}/")?
		.route("hospitalizations:current", "/current/{order}/{direction}/")?
		.route("hospitalizations:create", "/hospitalizations/create/{pk}/")?
		.route("hospitalizations:update", "/hospitalizations/update/{pk}/")?
		.route("hospitalizations:delete", "/hospitalizations/delete/{pk}/")?
		.route("hospitalizations:detail", "/hospitalizations/detail/{pk}/")?
		.route(
			"hospitalizations:list",
			"/hospitalizations/{pk}/{order}/{direction}/",
		)?
		// Documents.
		.route("documents:task_status", "/documents/status/{task_id}/")?
		.route("documents:download_docx", "/documents/download/docx/{task_id}/")?
		.route("documents:download_xlsx", "/documents/download/xlsx/{task_id}/")?
		// Medical cards.
		.route("medical_cards:create", "/cards/create/")?
		.route("medical_cards:update", "/cards/update/{pk}/")?
		.route("medical_cards:delete", "/cards/delete/{pk}/")?
		.route("medical_cards:detail", "/cards/detail/{pk}/")?
		.route("medical_cards:list", "/cards/{order}/{direction}/")?
		// Disability certificates.
		.route("disabilities:create", "/disabilities/create/")?
		.route("disabilities:update", "/disabilities/update/{pk}/")?
		.route("disabilities:delete", "/disabilities/delete/{pk}/")?
		.route(
			"disabilities:add_commission",
			"/disabilities/commission/{pk}/",
		)?
		.route("disabilities:list", "/disabilities/{order}/{direction}/")?
		.build();
	Ok(router)
}

/// Binds every view to its route.
pub fn build_app(state: AppState) -> App {
	App::new(state)
		.bind("patients:index", Arc::new(PatientListView))
		.bind("patients:list", Arc::new(PatientListView))
		.bind("patients:search", Arc::new(PatientSearchView))
		.bind("patients:create", Arc::new(PatientCreateView))
		.bind("patients:update", Arc::new(PatientUpdateView))
		.bind("patients:delete", Arc::new(PatientDeleteView))
		.bind("patients:toggle_status", Arc::new(PatientToggleStatusView))
		.bind("patients:detail", Arc::new(PatientDetailView))
		.bind("hospitalizations:current", Arc::new(CurrentListView))
		.bind("hospitalizations:list", Arc::new(HospitalizationListView))
		.bind("hospitalizations:create", Arc::new(HospitalizationCreateView))
		.bind(
			"hospitalizations:update",
			Arc::new(HospitalizationUpdateView::page()),
		)
		.bind(
			"hospitalizations:update_current",
			Arc::new(HospitalizationUpdateView::inline()),
		)
		.bind("hospitalizations:delete", Arc::new(HospitalizationDeleteView))
		.bind(
			"hospitalizations:delete_current",
			Arc::new(HospitalizationDeleteView),
		)
		.bind("hospitalizations:leave", Arc::new(HospitalizationLeaveView))
		.bind("hospitalizations:detail", Arc::new(HospitalizationDetailView))
		.bind("documents:create_current_docx", Arc::new(RosterExportView::docx()))
		.bind("documents:create_current_xlsx", Arc::new(RosterExportView::xlsx()))
		.bind(
			"documents:create_current_by_doctor_docx",
			Arc::new(RosterExportView::by_doctor_docx()),
		)
		.bind("documents:task_status", Arc::new(TaskStatusView))
		.bind("documents:download_docx", Arc::new(DownloadView))
		.bind("documents:download_xlsx", Arc::new(DownloadView))
		.bind("medical_cards:list", Arc::new(MedicalCardListView))
		.bind("medical_cards:create", Arc::new(MedicalCardCreateView))
		.bind("medical_cards:update", Arc::new(MedicalCardUpdateView))
		.bind("medical_cards:delete", Arc::new(MedicalCardDeleteView))
		.bind("medical_cards:detail", Arc::new(MedicalCardDetailView))
		.bind("disabilities:list", Arc::new(DisabilityListView))
		.bind("disabilities:create", Arc::new(DisabilityCreateView))
		.bind("disabilities:update", Arc::new(DisabilityUpdateView))
		.bind("disabilities:delete", Arc::new(DisabilityDeleteView))
		.bind("disabilities:add_commission", Arc::new(CommissionDateCreateView))
}
