//! Storage adapters that persist fixture records.
//!
//! The loader never talks to a database directly. It hands resolved records
//! and join rows to a [`FixtureStorage`] and asks it to truncate tables on
//! teardown.
//!
//! Two adapters ship with the crate:
//!
//! - [`MemoryStorage`] keeps rows in memory, for tests of fixture definitions
//! - [`DatabaseStorage`] writes through a sqlx `AnyPool` (feature `database`)

use async_trait::async_trait;

use crate::error::FixtureResult;
use crate::fixtures::Record;

#[cfg(feature = "database")]
mod database;
mod memory;

#[cfg(feature = "database")]
pub use database::{DatabaseStorage, SqlDialect};
pub use memory::MemoryStorage;

/// One join-table row: column name → key, in column order.
pub type JoinRow = [(String, i64)];

/// Persistence backend used by the fixture loader.
///
/// Implementations report every failure as
/// [`FixtureError::Storage`](crate::error::FixtureError::Storage); the loader
/// propagates it unchanged and does not retry.
#[async_trait]
pub trait FixtureStorage: Send + Sync {
	/// Inserts a resolved record into `table`.
	///
	/// `record.fields` already contains the primary key and every resolved
	/// foreign key.
	async fn insert_record(&self, table: &str, record: &Record) -> FixtureResult<()>;

	/// Inserts one row into a many-to-many join table.
	async fn insert_join_row(&self, join_table: &str, row: &JoinRow) -> FixtureResult<()>;

	/// Removes every row from `table`.
	async fn truncate(&self, table: &str) -> FixtureResult<()>;
}

#[async_trait]
impl<S: FixtureStorage + ?Sized> FixtureStorage for std::sync::Arc<S> {
	async fn insert_record(&self, table: &str, record: &Record) -> FixtureResult<()> {
		(**self).insert_record(table, record).await
	}

	async fn insert_join_row(&self, join_table: &str, row: &JoinRow) -> FixtureResult<()> {
		(**self).insert_join_row(join_table, row).await
	}

	async fn truncate(&self, table: &str) -> FixtureResult<()> {
		(**self).truncate(table).await
	}
}
