use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Result, StoreError};
use crate::query::{Direction, Query};
use crate::value::Value;

/// A storable entity: a primary key slot plus field access by name.
///
/// `get` drives both query filtering and table rendering; a name the record
/// does not know returns [`Value::Null`].
pub trait Record: Clone + Send + Sync + 'static {
	fn pk(&self) -> Option<i64>;
	fn set_pk(&mut self, pk: i64);
	fn get(&self, field: &str) -> Value;
}

/// Thread-safe in-memory table of records with auto-assigned primary keys.
///
/// Cheap to clone; clones share the same underlying rows.
#[derive(Debug)]
pub struct MemoryStore<T> {
	inner: Arc<RwLock<Inner<T>>>,
}

impl<T> Default for MemoryStore<T> {
	fn default() -> Self {
		Self { inner: Arc::new(RwLock::new(Inner::default())) }
	}
}

#[derive(Debug)]
struct Inner<T> {
	rows: Vec<T>,
	next_pk: i64,
}

impl<T> Default for Inner<T> {
	fn default() -> Self {
		Self { rows: Vec::new(), next_pk: 1 }
	}
}

impl<T> Clone for MemoryStore<T> {
	fn clone(&self) -> Self {
		Self { inner: Arc::clone(&self.inner) }
	}
}

impl<T: Record> MemoryStore<T> {
	pub fn new() -> Self {
		Self { inner: Arc::new(RwLock::new(Inner::default())) }
	}

	/// Stores a new record, assigning it the next free pk. Any pk already
	/// on the record is overwritten.
	pub fn insert(&self, mut record: T) -> i64 {
		let mut inner = self.inner.write();
		let pk = inner.next_pk;
		inner.next_pk += 1;
		record.set_pk(pk);
		inner.rows.push(record);
		pk
	}

	/// Replaces the stored record with the same pk.
	pub fn update(&self, record: T) -> Result<()> {
		let pk = record.pk().ok_or(StoreError::Unsaved)?;
		let mut inner = self.inner.write();
		let slot = inner
			.rows
			.iter_mut()
			.find(|row| row.pk() == Some(pk))
			.ok_or(StoreError::NotFound(pk))?;
		*slot = record;
		Ok(())
	}

	pub fn delete(&self, pk: i64) -> Result<()> {
		let mut inner = self.inner.write();
		let index = inner
			.rows
			.iter()
			.position(|row| row.pk() == Some(pk))
			.ok_or(StoreError::NotFound(pk))?;
		inner.rows.remove(index);
		Ok(())
	}

	pub fn get(&self, pk: i64) -> Result<T> {
		self.inner
			.read()
			.rows
			.iter()
			.find(|row| row.pk() == Some(pk))
			.cloned()
			.ok_or(StoreError::NotFound(pk))
	}

	pub fn len(&self) -> usize {
		self.inner.read().rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.read().rows.is_empty()
	}

	/// Runs a query: filters with AND, then a stable sort if the query
	/// orders. Unordered queries return rows in insertion order.
	pub fn find(&self, query: &Query) -> Vec<T> {
		let inner = self.inner.read();
		let mut selected: Vec<T> = inner
			.rows
			.iter()
			.filter(|row| query.filters.iter().all(|f| f.matches(&row.get(f.field()))))
			.cloned()
			.collect();
		drop(inner);

		if let Some((field, direction)) = &query.order {
			selected.sort_by(|a, b| {
				let ordering = a.get(field).cmp(&b.get(field));
				match direction {
					Direction::Asc => ordering,
					Direction::Desc => ordering.reverse(),
				}
			});
		}
		selected
	}

	pub fn all(&self) -> Vec<T> {
		self.find(&Query::new())
	}
}

#[cfg(test)]
mod tests {
	use rstest::{fixture, rstest};

	use super::*;
	use crate::query::Filter;

	#[derive(Debug, Clone, PartialEq)]
	struct Person {
		pk: Option<i64>,
		surname: String,
		age: i64,
	}

	impl Person {
		fn new(surname: &str, age: i64) -> Self {
			Self { pk: None, surname: surname.to_string(), age }
		}
	}

	impl Record for Person {
		fn pk(&self) -> Option<i64> {
			self.pk
		}

		fn set_pk(&mut self, pk: i64) {
			self.pk = Some(pk);
		}

		fn get(&self, field: &str) -> Value {
			match field {
				"pk" => self.pk.into(),
				"surname" => Value::from(self.surname.clone()),
				"age" => Value::Int(self.age),
				_ => Value::Null,
			}
		}
	}

	#[fixture]
	fn store() -> MemoryStore<Person> {
		let store = MemoryStore::new();
		store.insert(Person::new("Petrov", 40));
		store.insert(Person::new("Ivanov", 35));
		store.insert(Person::new("Sidorova", 28));
		store
	}

	#[rstest]
	fn insert_assigns_sequential_pks(store: MemoryStore<Person>) {
		let pks: Vec<Option<i64>> = store.all().iter().map(Person::pk).collect();
		assert_eq!(pks, vec![Some(1), Some(2), Some(3)]);
	}

	#[rstest]
	fn pks_are_not_reused_after_delete(store: MemoryStore<Person>) {
		store.delete(3).unwrap();
		let pk = store.insert(Person::new("Kuznetsov", 50));
		assert_eq!(pk, 4);
	}

	#[rstest]
	fn update_replaces_matching_row(store: MemoryStore<Person>) {
		let mut person = store.get(2).unwrap();
		person.age = 36;
		store.update(person).unwrap();
		assert_eq!(store.get(2).unwrap().age, 36);
	}

	#[rstest]
	fn update_of_unsaved_record_is_rejected(store: MemoryStore<Person>) {
		let err = store.update(Person::new("Nobody", 1)).unwrap_err();
		assert_eq!(err, StoreError::Unsaved);
	}

	#[rstest]
	fn missing_pk_reports_not_found(store: MemoryStore<Person>) {
		assert_eq!(store.get(99).unwrap_err(), StoreError::NotFound(99));
		assert_eq!(store.delete(99).unwrap_err(), StoreError::NotFound(99));
	}

	#[rstest]
	fn descending_sort_reverses_ascending_order(store: MemoryStore<Person>) {
		let asc: Vec<String> = store
			.find(&Query::new().order_by("surname", Direction::Asc))
			.into_iter()
			.map(|p| p.surname)
			.collect();
		let desc: Vec<String> = store
			.find(&Query::new().order_by("surname", Direction::Desc))
			.into_iter()
			.map(|p| p.surname)
			.collect();
		assert_eq!(asc, vec!["Ivanov", "Petrov", "Sidorova"]);
		assert_eq!(desc, asc.iter().rev().cloned().collect::<Vec<_>>());
	}

	#[rstest]
	fn filters_combine_with_and(store: MemoryStore<Person>) {
		store.insert(Person::new("Ivanova", 35));
		let query = Query::new()
			.istartswith("surname", "iva")
			.filter(Filter::Eq("age".to_string(), Value::Int(35)));
		let found = store.find(&query);
		assert_eq!(found.len(), 2);
		assert!(found.iter().all(|p| p.age == 35));
	}

	#[rstest]
	fn unordered_query_keeps_insertion_order(store: MemoryStore<Person>) {
		let surnames: Vec<String> = store.all().into_iter().map(|p| p.surname).collect();
		assert_eq!(surnames, vec!["Petrov", "Ivanov", "Sidorova"]);
	}
}
