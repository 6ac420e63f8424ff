//! In-memory index of loaded fixture records.

use indexmap::{IndexMap, IndexSet};

use super::Record;

/// Record name → record, for one table.
pub type TableRecords = IndexMap<String, Record>;

/// Everything loaded in the current cycle, addressable by table and record
/// name, plus the tables that need truncating on teardown.
///
/// Lookups never fail: an unknown table or record is simply `None`.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
	records: IndexMap<String, TableRecords>,
	tracked: IndexSet<String>,
}

impl FixtureStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the record `record` of `table`.
	pub fn get(&self, table: &str, record: &str) -> Option<&Record> {
		self.records.get(table)?.get(record)
	}

	/// Returns every record loaded into `table`.
	pub fn table(&self, table: &str) -> Option<&TableRecords> {
		self.records.get(table)
	}

	/// Returns true if `table` has a record named `record`.
	pub fn contains(&self, table: &str, record: &str) -> bool {
		self.get(table, record).is_some()
	}

	/// Returns the names of the tables holding loaded records.
	pub fn tables(&self) -> impl Iterator<Item = &str> {
		self.records.keys().map(String::as_str)
	}

	/// Returns the tables written to since the last teardown, in the order
	/// they were first written.
	pub fn tracked_tables(&self) -> impl Iterator<Item = &str> {
		self.tracked.iter().map(String::as_str)
	}

	/// Returns true if `table` is tracked for teardown.
	pub fn is_tracked(&self, table: &str) -> bool {
		self.tracked.contains(table)
	}

	/// Returns the total number of loaded records.
	pub fn len(&self) -> usize {
		self.records.values().map(IndexMap::len).sum()
	}

	/// Returns true if no records are loaded.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Stores a record, replacing any earlier one with the same table and name.
	pub(crate) fn insert(&mut self, record: Record) {
		self.records
			.entry(record.table.clone())
			.or_default()
			.insert(record.name.clone(), record);
	}

	/// Marks `table` for teardown. Returns false if it was already tracked.
	pub(crate) fn track(&mut self, table: &str) -> bool {
		if self.tracked.contains(table) {
			return false;
		}
		self.tracked.insert(table.to_string())
	}

	/// Drops the loaded records but keeps the tracked tables.
	pub(crate) fn clear_records(&mut self) {
		self.records.clear();
	}

	/// Drops records and tracked tables.
	pub(crate) fn clear_all(&mut self) {
		self.records.clear();
		self.tracked.clear();
	}
}
