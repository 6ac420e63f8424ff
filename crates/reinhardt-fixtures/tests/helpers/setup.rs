//! Shared schema, fixture paths and storage setup.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use reinhardt_fixtures::prelude::*;
#[cfg(feature = "database")]
use sqlx::{AnyPool, any::AnyPoolOptions};

/// Directory holding the `users`, `roles` and `games` fixtures.
pub fn data_dir() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data")
}

/// Schema for the bundled fixtures: users own many roles, games belong to a user.
pub fn schema() -> Arc<StaticSchema> {
	Arc::new(
		StaticSchema::new()
			.with_relation(
				"User",
				"roles",
				Relation::many_to_many("role_user", "user_id", "role_id"),
			)
			.with_relation("Game", "user", Relation::single_owner("user_id")),
	)
}

/// A loader over the bundled fixtures writing to `storage`.
pub fn memory_loader(storage: Arc<MemoryStorage>) -> FixtureLoader {
	FixtureLoader::new(FixtureConfig::new(data_dir()), storage, schema())
}

#[cfg(feature = "database")]
/// An in-memory SQLite pool with tables matching the bundled fixtures.
pub async fn sqlite_pool() -> Arc<AnyPool> {
	sqlx::any::install_default_drivers();
	// Each in-memory SQLite connection is a separate database.
	let pool = AnyPoolOptions::new()
		.max_connections(1)
		.connect("sqlite::memory:")
		.await
		.unwrap();

	for ddl in [
		"CREATE TABLE users (id INTEGER PRIMARY KEY, first_name TEXT NOT NULL, last_name TEXT NOT NULL, email TEXT)",
		"CREATE TABLE roles (id INTEGER PRIMARY KEY, name TEXT NOT NULL, description TEXT)",
		"CREATE TABLE role_user (user_id INTEGER NOT NULL, role_id INTEGER NOT NULL)",
		"CREATE TABLE games (id INTEGER PRIMARY KEY, title TEXT NOT NULL, user_id INTEGER)",
	] {
		sqlx::query(ddl).execute(&pool).await.unwrap();
	}

	Arc::new(pool)
}

#[cfg(feature = "database")]
/// Counts the rows of `table`.
pub async fn count_rows(pool: &AnyPool, table: &str) -> i64 {
	sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
		.fetch_one(pool)
		.await
		.unwrap()
}
