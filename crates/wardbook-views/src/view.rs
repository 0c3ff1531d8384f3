//! The view trait and the app-level dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use tracing::debug;
use wardbook_http::{Request, Response};

use crate::error::{Result, ViewError};
use crate::state::AppState;

/// One handler behind a named route.
#[async_trait]
pub trait View: Send + Sync {
	async fn dispatch(&self, state: &AppState, request: Request) -> Result<Response>;

	fn allowed_methods(&self) -> &'static [Method] {
		const GET: &[Method] = &[Method::GET];
		GET
	}
}

/// Resolves paths against the router and dispatches to the bound view.
pub struct App {
	state: AppState,
	views: HashMap<String, Arc<dyn View>>,
}

impl App {
	pub fn new(state: AppState) -> Self {
		Self { state, views: HashMap::new() }
	}

	pub fn state(&self) -> &AppState {
		&self.state
	}

	/// Binds a view to a route name already registered on the router.
	pub fn bind(mut self, name: &str, view: Arc<dyn View>) -> Self {
		self.views.insert(name.to_string(), view);
		self
	}

	/// Routes one request end to end; errors become responses here.
	pub async fn handle(&self, request: Request) -> Response {
		match self.try_handle(request).await {
			Ok(response) => response,
			Err(err) => err.into_response(),
		}
	}

	async fn try_handle(&self, request: Request) -> Result<Response> {
		let (route, params) = self
			.state
			.router
			.resolve(request.path())
			.ok_or(ViewError::NotFound)?;
		let view = self.views.get(route.name()).ok_or(ViewError::NotFound)?;
		if !view.allowed_methods().contains(request.method()) {
			return Err(ViewError::MethodNotAllowed);
		}
		debug!(route = route.name(), path = request.path(), "dispatch");
		view.dispatch(&self.state, request.with_params(params)).await
	}
}

pub(crate) const GET_POST: &[Method] = &[Method::GET, Method::POST];
pub(crate) const POST: &[Method] = &[Method::POST];
