//! In-memory record storage.
//!
//! Entities implement [`Record`], exposing a pk slot and field access by
//! name; a [`MemoryStore`] holds them behind a shared lock and answers
//! [`Query`] selections with stable ordering. [`Paginator`] slices result
//! sets for list pages.

mod error;
mod page;
mod query;
mod store;
mod value;

pub use error::{Result, StoreError};
pub use page::{Page, Paginator};
pub use query::{Direction, Filter, Query};
pub use store::{MemoryStore, Record};
pub use value::Value;
