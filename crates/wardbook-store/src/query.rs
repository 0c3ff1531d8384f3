use crate::value::Value;

/// Sort direction for an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
	#[default]
	Asc,
	Desc,
}

impl Direction {
	/// Parses the wire form used in sort URLs. Anything other than
	/// `"desc"` is ascending.
	pub fn parse(raw: &str) -> Self {
		if raw.eq_ignore_ascii_case("desc") {
			Direction::Desc
		} else {
			Direction::Asc
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Direction::Asc => "asc",
			Direction::Desc => "desc",
		}
	}
}

/// A single predicate over one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
	/// Field equals the value exactly.
	Eq(String, Value),
	/// String field starts with the prefix, case-insensitively.
	IStartsWith(String, String),
}

impl Filter {
	pub fn matches(&self, value: &Value) -> bool {
		match self {
			Filter::Eq(_, expected) => value == expected,
			Filter::IStartsWith(_, prefix) => match value {
				Value::Str(s) => {
					s.len() >= prefix.len()
						&& s.chars()
							.zip(prefix.chars())
							.all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
				}
				_ => false,
			},
		}
	}

	pub fn field(&self) -> &str {
		match self {
			Filter::Eq(field, _) | Filter::IStartsWith(field, _) => field,
		}
	}
}

/// A filtered, optionally ordered selection over a store.
///
/// Filters combine with AND. Ordering is stable: records that compare equal
/// keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct Query {
	pub(crate) filters: Vec<Filter>,
	pub(crate) order: Option<(String, Direction)>,
}

impl Query {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn filter(mut self, filter: Filter) -> Self {
		self.filters.push(filter);
		self
	}

	pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.filter(Filter::Eq(field.into(), value.into()))
	}

	pub fn istartswith(self, field: impl Into<String>, prefix: impl Into<String>) -> Self {
		self.filter(Filter::IStartsWith(field.into(), prefix.into()))
	}

	pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
		self.order = Some((field.into(), direction));
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn istartswith_ignores_case() {
		let filter = Filter::IStartsWith("surname".to_string(), "iva".to_string());
		assert!(filter.matches(&Value::from("Ivanov")));
		assert!(filter.matches(&Value::from("IVANOVA")));
		assert!(!filter.matches(&Value::from("Petrov")));
	}

	#[test]
	fn istartswith_rejects_non_strings() {
		let filter = Filter::IStartsWith("pk".to_string(), "1".to_string());
		assert!(!filter.matches(&Value::Int(1)));
	}

	#[test]
	fn direction_parse_defaults_to_asc() {
		assert_eq!(Direction::parse("desc"), Direction::Desc);
		assert_eq!(Direction::parse("DESC"), Direction::Desc);
		assert_eq!(Direction::parse("asc"), Direction::Asc);
		assert_eq!(Direction::parse("sideways"), Direction::Asc);
	}
}
