use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, UrlError};
use crate::route::Route;

/// Reverse resolution seam used by the table engine and the views.
///
/// The table engine only ever needs "route name + params -> URL", so it
/// depends on this trait rather than on the concrete [`Router`].
pub trait UrlReverser: Send + Sync {
	fn reverse(&self, name: &str, params: &BTreeMap<String, String>) -> Result<String>;
}

/// Immutable route table built at startup.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use wardbook_urls::{Router, UrlReverser};
///
/// let router = Router::builder()
///     .route("patients:detail", "/patients/{pk}/")
///     .unwrap()
///     .build();
///
/// let mut params = BTreeMap::new();
/// params.insert("pk".to_string(), "7".to_string());
/// assert_eq!(router.reverse("patients:detail", &params).unwrap(), "/patients/7/");
///
/// let (route, captured) = router.resolve("/patients/7/").unwrap();
/// assert_eq!(route.name(), "patients:detail");
/// assert_eq!(captured["pk"], "7");
/// ```
#[derive(Debug, Default)]
pub struct Router {
	by_name: HashMap<String, Route>,
	ordered: Vec<Route>,
}

#[derive(Debug, Default)]
pub struct RouterBuilder {
	routes: Vec<Route>,
}

impl RouterBuilder {
	/// Register a named route. Duplicate names are a configuration
	/// error and fail eagerly.
	pub fn route(mut self, name: &str, pattern: &str) -> Result<Self> {
		if self.routes.iter().any(|r| r.name() == name) {
			return Err(UrlError::DuplicateRoute(name.to_string()));
		}
		self.routes.push(Route::new(name, pattern)?);
		Ok(self)
	}

	pub fn build(self) -> Router {
		let by_name = self
			.routes
			.iter()
			.map(|r| (r.name().to_string(), r.clone()))
			.collect();
		Router {
			by_name,
			ordered: self.routes,
		}
	}
}

impl Router {
	pub fn builder() -> RouterBuilder {
		RouterBuilder::default()
	}

	pub fn route(&self, name: &str) -> Option<&Route> {
		self.by_name.get(name)
	}

	/// Match an incoming path against the route table, first match wins.
	/// Returns the route and the captured path parameters.
	pub fn resolve(&self, path: &str) -> Option<(&Route, BTreeMap<String, String>)> {
		self.ordered
			.iter()
			.find_map(|route| match_pattern(route.pattern(), path).map(|params| (route, params)))
	}
}

impl UrlReverser for Router {
	/// Substitute placeholders in a single left-to-right pass.
	///
	/// Missing parameters fail instead of leaving `{name}` in the URL;
	/// a half-reversed URL is always a caller bug.
	fn reverse(&self, name: &str, params: &BTreeMap<String, String>) -> Result<String> {
		let route = self
			.by_name
			.get(name)
			.ok_or_else(|| UrlError::UnknownRoute(name.to_string()))?;

		let pattern = route.pattern();
		let mut url = String::with_capacity(pattern.len());
		let mut rest = pattern;
		while let Some(open) = rest.find('{') {
			url.push_str(&rest[..open]);
			// Pattern validity is guaranteed by Route::new.
			let close = rest[open..].find('}').unwrap_or(rest.len() - open) + open;
			let param = &rest[open + 1..close];
			let value = params.get(param).ok_or_else(|| UrlError::MissingParam {
				route: name.to_string(),
				param: param.to_string(),
			})?;
			url.push_str(value);
			rest = &rest[close + 1..];
		}
		url.push_str(rest);
		Ok(url)
	}
}

/// Match a concrete path against a `{param}` pattern segment by segment.
fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
	let pattern_segments: Vec<&str> = pattern.trim_matches('/').split('/').collect();
	let path_segments: Vec<&str> = path.split('?').next()?.trim_matches('/').split('/').collect();
	if pattern_segments.len() != path_segments.len() {
		return None;
	}
	let mut params = BTreeMap::new();
	for (pat, seg) in pattern_segments.iter().zip(&path_segments) {
		if let Some(name) = pat.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
			if seg.is_empty() {
				return None;
			}
			params.insert(name.to_string(), seg.to_string());
		} else if pat != seg {
			return None;
		}
	}
	Some(params)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_router() -> Router {
		Router::builder()
			.route("patients:list", "/patients/{order}/{direction}/")
			.unwrap()
			.route("patients:detail", "/patients/{pk}/")
			.unwrap()
			.route("home", "/")
			.unwrap()
			.build()
	}

	fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[test]
	fn reverse_substitutes_all_params() {
		let router = sample_router();
		let url = router
			.reverse("patients:list", &params(&[("order", "surname"), ("direction", "asc")]))
			.unwrap();
		assert_eq!(url, "/patients/surname/asc/");
	}

	#[test]
	fn reverse_is_idempotent() {
		let router = sample_router();
		let p = params(&[("order", "surname"), ("direction", "asc")]);
		let first = router.reverse("patients:list", &p).unwrap();
		let second = router.reverse("patients:list", &p).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn reverse_unknown_route_fails() {
		let router = sample_router();
		assert_eq!(
			router.reverse("nope", &BTreeMap::new()).unwrap_err(),
			UrlError::UnknownRoute("nope".to_string())
		);
	}

	#[test]
	fn reverse_missing_param_fails() {
		let router = sample_router();
		let err = router
			.reverse("patients:list", &params(&[("order", "surname")]))
			.unwrap_err();
		assert_eq!(
			err,
			UrlError::MissingParam {
				route: "patients:list".to_string(),
				param: "direction".to_string(),
			}
		);
	}

	#[test]
	fn resolve_captures_params() {
		let router = sample_router();
		let (route, captured) = router.resolve("/patients/surname/desc/").unwrap();
		assert_eq!(route.name(), "patients:list");
		assert_eq!(captured["order"], "surname");
		assert_eq!(captured["direction"], "desc");
	}

	#[test]
	fn resolve_ignores_query_string() {
		let router = sample_router();
		let (route, _) = router.resolve("/patients/3/?q=iva").unwrap();
		assert_eq!(route.name(), "patients:detail");
	}

	#[test]
	fn resolve_root() {
		let router = sample_router();
		let (route, captured) = router.resolve("/").unwrap();
		assert_eq!(route.name(), "home");
		assert!(captured.is_empty());
	}

	#[test]
	fn resolve_miss_returns_none() {
		let router = sample_router();
		assert!(router.resolve("/unknown/path/here/x/").is_none());
	}

	#[test]
	fn duplicate_route_name_rejected() {
		let err = Router::builder()
			.route("home", "/")
			.unwrap()
			.route("home", "/other/")
			.unwrap_err();
		assert_eq!(err, UrlError::DuplicateRoute("home".to_string()));
	}
}
