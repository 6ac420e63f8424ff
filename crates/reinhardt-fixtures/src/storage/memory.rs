//! In-memory storage adapter.

use std::collections::HashSet;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

use super::{FixtureStorage, JoinRow};
use crate::error::{FixtureError, FixtureResult};
use crate::fixtures::Record;

/// A stored row: column → value.
pub type Row = IndexMap<String, Value>;

/// Keeps fixture rows in memory, grouped by table.
///
/// Useful for exercising fixture definitions and relationship wiring without
/// a database. Share it through an `Arc` to inspect rows after loading.
///
/// # Example
///
/// ```
/// use reinhardt_fixtures::storage::MemoryStorage;
///
/// let storage = MemoryStorage::new();
/// assert_eq!(storage.row_count("users"), 0);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
	tables: RwLock<IndexMap<String, Vec<Row>>>,
	truncations: RwLock<Vec<String>>,
	failing_tables: RwLock<HashSet<String>>,
}

impl MemoryStorage {
	/// Creates an empty storage.
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes every later insert into or truncate of `table` fail.
	pub fn fail_on(&self, table: impl Into<String>) {
		self.failing_tables.write().insert(table.into());
	}

	/// Clears a failure set with [`fail_on`](Self::fail_on).
	pub fn recover(&self, table: &str) {
		self.failing_tables.write().remove(table);
	}

	/// Returns a copy of the rows currently in `table`.
	pub fn rows(&self, table: &str) -> Vec<Row> {
		self.tables.read().get(table).cloned().unwrap_or_default()
	}

	/// Returns the number of rows currently in `table`.
	pub fn row_count(&self, table: &str) -> usize {
		self.tables.read().get(table).map(Vec::len).unwrap_or(0)
	}

	/// Returns the total number of rows across all tables.
	pub fn total_rows(&self) -> usize {
		self.tables.read().values().map(Vec::len).sum()
	}

	/// Returns the tables truncated so far, in call order.
	pub fn truncations(&self) -> Vec<String> {
		self.truncations.read().clone()
	}

	fn check(&self, table: &str, operation: &str) -> FixtureResult<()> {
		if self.failing_tables.read().contains(table) {
			return Err(FixtureError::Storage(format!(
				"{} failed for table '{}'",
				operation, table
			)));
		}
		Ok(())
	}

	fn push_row(&self, table: &str, row: Row) {
		self.tables
			.write()
			.entry(table.to_string())
			.or_default()
			.push(row);
	}
}

#[async_trait]
impl FixtureStorage for MemoryStorage {
	async fn insert_record(&self, table: &str, record: &Record) -> FixtureResult<()> {
		self.check(table, "insert")?;
		self.push_row(table, record.fields.clone());
		Ok(())
	}

	async fn insert_join_row(&self, join_table: &str, row: &JoinRow) -> FixtureResult<()> {
		self.check(join_table, "insert")?;
		let row = row
			.iter()
			.map(|(column, key)| (column.clone(), Value::from(*key)))
			.collect();
		self.push_row(join_table, row);
		Ok(())
	}

	async fn truncate(&self, table: &str) -> FixtureResult<()> {
		self.check(table, "truncate")?;
		self.tables.write().shift_remove(table);
		self.truncations.write().push(table.to_string());
		Ok(())
	}
}
