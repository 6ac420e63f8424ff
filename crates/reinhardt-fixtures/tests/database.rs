//! End-to-end loading into SQLite through `DatabaseStorage`.

#![cfg(feature = "database")]

mod helpers;

use std::sync::Arc;

use helpers::setup::{count_rows, data_dir, schema, sqlite_pool};
use reinhardt_fixtures::prelude::*;
use rstest::rstest;
use sqlx::Row as _;

async fn sqlite_loader() -> (FixtureLoader, Arc<sqlx::AnyPool>) {
	let pool = sqlite_pool().await;
	let storage = DatabaseStorage::from_pool(pool.clone(), SqlDialect::Sqlite);
	let loader = FixtureLoader::new(FixtureConfig::new(data_dir()), Arc::new(storage), schema());
	(loader, pool)
}

#[rstest]
#[tokio::test]
async fn test_load_writes_rows_with_generated_keys() {
	// Arrange
	let (mut loader, pool) = sqlite_loader().await;

	// Act
	loader.load_all().await.unwrap();

	// Assert
	let row = sqlx::query("SELECT id, last_name FROM users WHERE first_name = 'Travis'")
		.fetch_one(&*pool)
		.await
		.unwrap();
	assert_eq!(row.get::<i64, _>("id"), generate_key("Travis"));
	assert_eq!(row.get::<String, _>("last_name"), "Bennett");

	let owner: i64 = sqlx::query_scalar("SELECT user_id FROM games WHERE title = 'Diablo 3'")
		.fetch_one(&*pool)
		.await
		.unwrap();
	assert_eq!(owner, generate_key("Travis"));

	let pairs: i64 = sqlx::query_scalar(&format!(
		"SELECT COUNT(*) FROM role_user WHERE user_id = {} AND role_id = {}",
		generate_key("Travis"),
		generate_key("root")
	))
	.fetch_one(&*pool)
	.await
	.unwrap();
	assert_eq!(pairs, 1);
	assert_eq!(count_rows(&pool, "role_user").await, 3);
}

#[rstest]
#[tokio::test]
async fn test_down_empties_every_tracked_table() {
	let (mut loader, pool) = sqlite_loader().await;
	loader.load_all().await.unwrap();

	loader.down().await.unwrap();
	loader.down().await.unwrap();

	for table in ["users", "roles", "games", "role_user"] {
		assert_eq!(count_rows(&pool, table).await, 0, "{} not emptied", table);
	}
}

#[rstest]
#[tokio::test]
async fn test_reload_after_down() {
	let (mut loader, pool) = sqlite_loader().await;

	loader.load(&["roles"]).await.unwrap();
	loader.down().await.unwrap();
	loader.load(&["roles"]).await.unwrap();

	assert_eq!(count_rows(&pool, "roles").await, 2);
}

#[rstest]
#[tokio::test]
async fn test_duplicate_load_surfaces_storage_error() {
	let (mut loader, _pool) = sqlite_loader().await;
	loader.load(&["roles"]).await.unwrap();

	let result = loader.load(&["roles"]).await;

	assert!(matches!(result, Err(FixtureError::Storage(_))));
	assert!(loader.store().is_tracked("roles"));
	loader.down().await.unwrap();
}
