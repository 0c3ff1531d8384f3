use std::collections::{BTreeMap, HashMap};
use std::fmt;

use wardbook_urls::UrlReverser;

use crate::cell::{BodyCell, ButtonsCell, Cell, HeaderCell};
use crate::error::{Result, TableError};
use crate::field::Field;

/// The closed set of cell kinds the registry dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
	Header,
	Body,
	Buttons,
}

impl fmt::Display for CellKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			CellKind::Header => "header_cell",
			CellKind::Body => "body_cell",
			CellKind::Buttons => "buttons_cell",
		};
		f.write_str(name)
	}
}

/// Everything a builder needs to produce one cell: the field
/// declaration, the row data and the request's routing state.
pub struct CellContext<'a> {
	pub field: &'a Field,
	pub view_name: &'a str,
	/// Routing parameters of the current request (may carry `order`
	/// and `direction`).
	pub route_params: &'a BTreeMap<String, String>,
	/// Non-routing query parameters, passed through to sort URLs
	/// verbatim.
	pub query_params: &'a [(String, String)],
	pub reverser: &'a dyn UrlReverser,
	/// The row's primary key; `None` for header cells and rows without
	/// an id.
	pub pk: Option<i64>,
	/// The (already converted) display value; `None` for header and
	/// buttons cells.
	pub value: Option<String>,
}

/// One cell constructor. Builders are pure: same context in, same cell
/// out, no shared state.
pub trait CellBuilder: Send + Sync {
	fn build(&self, ctx: &CellContext<'_>) -> Result<Cell>;
}

/// Registry mapping a [`CellKind`] to its builder.
///
/// The schema orchestrator only knows kinds; adding a new cell kind
/// means registering a builder here, not editing the schema. A kind
/// without a builder is a fatal configuration error.
///
/// # Examples
///
/// ```
/// use wardbook_tables::{BuilderRegistry, CellKind};
///
/// let registry = BuilderRegistry::with_defaults();
/// assert!(registry.contains(CellKind::Header));
/// ```
pub struct BuilderRegistry {
	builders: HashMap<CellKind, Box<dyn CellBuilder>>,
}

impl BuilderRegistry {
	/// An empty registry, for schemas that replace every builder.
	pub fn new() -> Self {
		Self {
			builders: HashMap::new(),
		}
	}

	/// The standard header/body/buttons builders.
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		registry.register(CellKind::Header, Box::new(HeaderCellBuilder));
		registry.register(CellKind::Body, Box::new(BodyCellBuilder));
		registry.register(CellKind::Buttons, Box::new(ButtonsCellBuilder));
		registry
	}

	pub fn register(&mut self, kind: CellKind, builder: Box<dyn CellBuilder>) {
		self.builders.insert(kind, builder);
	}

	pub fn contains(&self, kind: CellKind) -> bool {
		self.builders.contains_key(&kind)
	}

	/// Dispatch to the builder for `kind`.
	pub fn create(&self, kind: CellKind, ctx: &CellContext<'_>) -> Result<Cell> {
		let builder = self
			.builders
			.get(&kind)
			.ok_or(TableError::MissingBuilder(kind))?;
		builder.build(ctx)
	}
}

impl Default for BuilderRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}

/// Builds header cells, resolving ascending/descending sort URLs for
/// sortable fields.
pub struct HeaderCellBuilder;

impl HeaderCellBuilder {
	/// Re-resolve the current view with `order` set to this field and
	/// `direction` set to the requested value, carrying every other
	/// routing parameter unchanged and appending the query string
	/// verbatim.
	fn sorting_url(ctx: &CellContext<'_>, view_name: &str, direction: &str) -> Result<String> {
		let mut params = ctx.route_params.clone();
		params.remove("order");
		params.remove("direction");
		params.insert("order".to_string(), ctx.field.name().to_string());
		params.insert("direction".to_string(), direction.to_string());

		let mut url = ctx.reverser.reverse(view_name, &params)?;
		if !ctx.query_params.is_empty() {
			let raw = ctx
				.query_params
				.iter()
				.map(|(k, v)| format!("{}={}", k, v))
				.collect::<Vec<_>>()
				.join("&");
			url.push('?');
			url.push_str(&raw);
		}
		Ok(url)
	}
}

impl CellBuilder for HeaderCellBuilder {
	fn build(&self, ctx: &CellContext<'_>) -> Result<Cell> {
		let field = ctx.field;
		let (asc, desc) = match field.sort_view() {
			Some(view_name) => (
				Some(Self::sorting_url(ctx, view_name, "asc")?),
				Some(Self::sorting_url(ctx, view_name, "desc")?),
			),
			None => (None, None),
		};
		let name = if field.verbose_name().is_empty() {
			title_case(field.name())
		} else {
			field.verbose_name().to_string()
		};
		Ok(Cell::Header(HeaderCell {
			name,
			sorting_field: field.name().to_string(),
			attrs: field.attrs_th().map(|a| a.raw().to_string()),
			asc_sorting_url: asc,
			desc_sorting_url: desc,
			visible: field.visible(),
		}))
	}
}

/// Builds body cells: resolves link URLs for link-typed fields and
/// substitutes the display default for empty values.
///
/// Link URLs carry the current routing parameters plus the row's pk, so
/// a link target whose pattern includes the sort segments resolves too.
pub struct BodyCellBuilder;

impl CellBuilder for BodyCellBuilder {
	fn build(&self, ctx: &CellContext<'_>) -> Result<Cell> {
		let field = ctx.field;
		let url = match field.link_view() {
			Some(view_name) => {
				let pk = ctx.pk.ok_or_else(|| TableError::MissingPk {
					field: field.name().to_string(),
				})?;
				let mut params = ctx.route_params.clone();
				params.insert("pk".to_string(), pk.to_string());
				Some(ctx.reverser.reverse(view_name, &params)?)
			}
			None => None,
		};
		let mut value = ctx.value.clone().unwrap_or_default();
		if value.is_empty() {
			if let Some(default) = field.default() {
				value = default.to_string();
			}
		}
		Ok(Cell::Body(BodyCell {
			pk: ctx.pk,
			value,
			url,
			attrs: field.attrs_td().map(|a| a.raw().to_string()),
			visible: field.visible(),
		}))
	}
}

/// Builds buttons cells by binding every declared button to the row's
/// primary key.
pub struct ButtonsCellBuilder;

impl CellBuilder for ButtonsCellBuilder {
	fn build(&self, ctx: &CellContext<'_>) -> Result<Cell> {
		let field = ctx.field;
		let specs = field.button_specs();
		if specs.is_empty() {
			return Err(TableError::Config(format!(
				"buttons field \"{}\" has no buttons",
				field.name()
			)));
		}
		let pk = ctx.pk.ok_or_else(|| TableError::MissingPk {
			field: field.name().to_string(),
		})?;
		let mut params = BTreeMap::new();
		params.insert("pk".to_string(), pk.to_string());
		let mut buttons = Vec::with_capacity(specs.len());
		for spec in specs {
			let url = ctx.reverser.reverse(spec.view_name(), &params)?;
			buttons.push(spec.bind(pk, url));
		}
		Ok(Cell::Buttons(ButtonsCell {
			pk,
			buttons,
			attrs: field.attrs_td().map(|a| a.raw().to_string()),
			visible: field.visible(),
		}))
	}
}

/// Python-style title casing: the first letter of every alphabetic run
/// is uppercased ("entry_date" -> "Entry_Date").
fn title_case(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	let mut at_word_start = true;
	for ch in name.chars() {
		if ch.is_alphabetic() {
			if at_word_start {
				out.extend(ch.to_uppercase());
			} else {
				out.extend(ch.to_lowercase());
			}
			at_word_start = false;
		} else {
			out.push(ch);
			at_word_start = true;
		}
	}
	out
}
