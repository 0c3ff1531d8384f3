use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Deployment knobs, all read from the environment with local-friendly
/// defaults.
#[derive(Debug, Clone)]
pub struct Settings {
	/// `WARDBOOK_ADDR`, e.g. `127.0.0.1:8000`.
	pub addr: SocketAddr,
	/// `WARDBOOK_TEMPLATES`: tera template glob root.
	pub templates_root: PathBuf,
	/// `WARDBOOK_MEDIA`: where the document templates live.
	pub media_root: PathBuf,
	/// `WARDBOOK_PER_PAGE`: patients per registry page.
	pub per_page: usize,
	/// `WARDBOOK_RETRY_DELAY_SECS`: delay between document build retries.
	pub retry_delay: Duration,
}

impl Settings {
	pub fn from_env() -> Self {
		Self {
			addr: env_parsed("WARDBOOK_ADDR", SocketAddr::from(([127, 0, 0, 1], 8000))),
			templates_root: env::var("WARDBOOK_TEMPLATES")
				.map(PathBuf::from)
				.unwrap_or_else(|_| PathBuf::from("templates")),
			media_root: env::var("WARDBOOK_MEDIA")
				.map(PathBuf::from)
				.unwrap_or_else(|_| PathBuf::from("media")),
			per_page: env_parsed("WARDBOOK_PER_PAGE", 10),
			retry_delay: Duration::from_secs(env_parsed("WARDBOOK_RETRY_DELAY_SECS", 5)),
		}
	}

	pub fn template_glob(&self) -> String {
		format!("{}/**/*.html", self.templates_root.display())
	}
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
	env::var(key)
		.ok()
		.and_then(|raw| raw.parse().ok())
		.unwrap_or(default)
}
