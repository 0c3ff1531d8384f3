use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Data handed to a [`Renderer`](crate::render::Renderer).
///
/// `fields` are scalar substitutions for `{{ key }}` placeholders; `rows`
/// are tabular contents appended to spreadsheet templates, one inner vector
/// per row, in iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderContext {
	fields: BTreeMap<String, String>,
	rows: Vec<Vec<String>>,
}

impl RenderContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.fields.insert(key.into(), value.into());
		self
	}

	pub fn with_rows(mut self, rows: Vec<Vec<String>>) -> Self {
		self.rows = rows;
		self
	}

	pub fn insert_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.fields.insert(key.into(), value.into());
	}

	pub fn push_row(&mut self, row: Vec<String>) {
		self.rows.push(row);
	}

	pub fn fields(&self) -> &BTreeMap<String, String> {
		&self.fields
	}

	pub fn rows(&self) -> &[Vec<String>] {
		&self.rows
	}
}

/// Produces the [`RenderContext`] for one document build.
///
/// Sources typically read the entity the document describes from a store,
/// so context production is async. It runs inside the background job, after
/// submission has already returned a handle to the caller.
#[async_trait]
pub trait ContextSource: Send + Sync {
	async fn context(&self) -> Result<RenderContext>;
}

/// A fixed, pre-built context. Useful for tests and one-shot renders.
#[derive(Debug, Clone, Default)]
pub struct StaticContext(pub RenderContext);

#[async_trait]
impl ContextSource for StaticContext {
	async fn context(&self) -> Result<RenderContext> {
		Ok(self.0.clone())
	}
}
