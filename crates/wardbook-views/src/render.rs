//! Template rendering with htmx partial negotiation.

use tera::Context;
use wardbook_http::{Htmx, Request, Response};

use crate::error::Result;
use crate::state::AppState;

/// Template that wraps a partial into the full page layout.
pub const RELAY_TEMPLATE: &str = "htmx/relay.html";

/// Renders `template` with `context` into a 200 HTML response.
pub fn render(state: &AppState, template: &str, context: &Context) -> Result<Response> {
	let html = state.tera.render(template, context)?;
	Ok(Response::ok().with_html(html))
}

/// Renders a partial for htmx requests, or the full page around it.
///
/// An htmx request swaps the fragment in place, so it gets the bare
/// template. A direct navigation to the same URL must still produce a
/// complete page, so the rendered fragment is wrapped into the relay
/// layout.
pub fn render_partial(
	state: &AppState,
	request: &Request,
	template: &str,
	mut context: Context,
) -> Result<Response> {
	if Htmx::new(request).is_htmx() {
		render(state, template, &context)
	} else {
		let fragment = state.tera.render(template, &context)?;
		context.insert("partial", &fragment);
		render(state, RELAY_TEMPLATE, &context)
	}
}
