use std::sync::Arc;

use tera::Tera;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wardbook_docgen::{DocumentPipeline, RenderRegistry};
use wardbook_domain::Clinic;
use wardbook_tasks::{JobRunner, MemoryResultBackend};
use wardbook_views::{build_app, build_router, AppState};

mod seed;
mod serve;
mod settings;

use serve::HttpServer;
use settings::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let settings = Settings::from_env();
	info!(?settings, "starting");

	let clinic = Clinic::new();
	seed::seed(&clinic);

	let runner = JobRunner::new(Arc::new(MemoryResultBackend::new()))
		.with_retry_delay(settings.retry_delay);
	let pipeline = DocumentPipeline::new(RenderRegistry::with_builtin(), runner);

	let tera = Tera::new(&settings.template_glob())?;
	let router = Arc::new(build_router()?);

	let state = AppState {
		clinic,
		pipeline,
		router,
		tera: Arc::new(tera),
		per_page: settings.per_page,
		media_root: settings.media_root.clone(),
	};

	HttpServer::new(build_app(state)).listen(settings.addr).await?;
	Ok(())
}
