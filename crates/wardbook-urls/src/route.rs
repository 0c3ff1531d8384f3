use crate::error::{Result, UrlError};

/// A single named route with a `{param}` pattern.
///
/// # Examples
///
/// ```
/// use wardbook_urls::Route;
///
/// let route = Route::new("patients:detail", "/patients/{pk}/").unwrap();
/// assert_eq!(route.name(), "patients:detail");
/// assert_eq!(route.param_names(), &["pk".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct Route {
	name: String,
	pattern: String,
	param_names: Vec<String>,
}

impl Route {
	/// Create a route, validating the placeholder syntax eagerly.
	pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
		let name = name.into();
		let pattern = pattern.into();
		let param_names = extract_param_names(&pattern)?;
		Ok(Self {
			name,
			pattern,
			param_names,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Placeholder names in the order they appear in the pattern.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}
}

/// Extract `{param}` names from a pattern, rejecting malformed braces.
fn extract_param_names(pattern: &str) -> Result<Vec<String>> {
	let mut names = Vec::new();
	let mut rest = pattern;
	while let Some(open) = rest.find('{') {
		let Some(close) = rest[open..].find('}') else {
			return Err(UrlError::InvalidPattern(pattern.to_string()));
		};
		let name = &rest[open + 1..open + close];
		if name.is_empty() || name.contains('{') {
			return Err(UrlError::InvalidPattern(pattern.to_string()));
		}
		names.push(name.to_string());
		rest = &rest[open + close + 1..];
	}
	if rest.contains('}') {
		return Err(UrlError::InvalidPattern(pattern.to_string()));
	}
	Ok(names)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_params_in_order() {
		let route = Route::new("h:list", "/patients/{pk}/hospitalizations/{order}/{direction}/")
			.unwrap();
		assert_eq!(route.param_names(), &["pk", "order", "direction"]);
	}

	#[test]
	fn rejects_unterminated_placeholder() {
		assert_eq!(
			Route::new("bad", "/x/{pk/").unwrap_err(),
			UrlError::InvalidPattern("/x/{pk/".to_string())
		);
	}

	#[test]
	fn rejects_stray_closing_brace() {
		assert!(Route::new("bad", "/x/pk}/").is_err());
	}
}
