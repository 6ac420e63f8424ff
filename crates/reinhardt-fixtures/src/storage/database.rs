//! Database storage adapter backed by sqlx's `Any` driver.
//!
//! Statements are built with sea-query and rendered for the dialect implied
//! by the connection URL. SQLite has no `TRUNCATE`, so tables are emptied
//! with `DELETE FROM` there.

use std::sync::Arc;

use async_trait::async_trait;
use sea_query::{
	Alias, Expr, MysqlQueryBuilder, PostgresQueryBuilder, Query, SqliteQueryBuilder, Table,
};
use serde_json::Value;
use sqlx::AnyPool;

use super::{FixtureStorage, JoinRow};
use crate::error::{FixtureError, FixtureResult};
use crate::fixtures::Record;

/// SQL dialect used to render statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
	/// SQLite.
	Sqlite,
	/// PostgreSQL.
	Postgres,
	/// MySQL / MariaDB.
	MySql,
}

impl SqlDialect {
	/// Determines the dialect from a database URL scheme.
	///
	/// # Example
	///
	/// ```
	/// use reinhardt_fixtures::storage::SqlDialect;
	///
	/// assert_eq!(SqlDialect::from_url("sqlite::memory:"), Some(SqlDialect::Sqlite));
	/// assert_eq!(SqlDialect::from_url("postgres://localhost/app"), Some(SqlDialect::Postgres));
	/// assert_eq!(SqlDialect::from_url("redis://localhost"), None);
	/// ```
	pub fn from_url(url: &str) -> Option<Self> {
		let scheme = url.split(':').next()?.to_ascii_lowercase();
		match scheme.as_str() {
			"sqlite" => Some(Self::Sqlite),
			"postgres" | "postgresql" => Some(Self::Postgres),
			"mysql" | "mariadb" => Some(Self::MySql),
			_ => None,
		}
	}

	/// Renders an `INSERT` of `columns` into `table`.
	pub fn insert_sql(&self, table: &str, columns: &[(String, Value)]) -> FixtureResult<String> {
		let mut stmt = Query::insert();
		stmt.into_table(Alias::new(table.to_string()))
			.columns(columns.iter().map(|(column, _)| Alias::new(column.clone())));
		stmt.values(
			columns
				.iter()
				.map(|(_, value)| json_to_expr(value))
				.collect::<Vec<Expr>>(),
		)
		.map_err(|e| {
			FixtureError::Storage(format!("Failed to build insert for '{}': {}", table, e))
		})?;

		Ok(match self {
			Self::Sqlite => stmt.to_string(SqliteQueryBuilder),
			Self::Postgres => stmt.to_string(PostgresQueryBuilder),
			Self::MySql => stmt.to_string(MysqlQueryBuilder),
		})
	}

	/// Renders a statement that removes every row of `table`.
	pub fn truncate_sql(&self, table: &str) -> String {
		match self {
			Self::Sqlite => Query::delete()
				.from_table(Alias::new(table.to_string()))
				.to_owned()
				.to_string(SqliteQueryBuilder),
			Self::Postgres => Table::truncate()
				.table(Alias::new(table.to_string()))
				.to_owned()
				.to_string(PostgresQueryBuilder),
			Self::MySql => Table::truncate()
				.table(Alias::new(table.to_string()))
				.to_owned()
				.to_string(MysqlQueryBuilder),
		}
	}
}

/// Converts a fixture value to an inlined SQL literal.
///
/// Arrays and objects are stored as their JSON text.
fn json_to_expr(value: &Value) -> Expr {
	match value {
		Value::Null => Expr::val(Option::<String>::None),
		Value::Bool(b) => Expr::val(*b),
		Value::Number(n) => {
			if let Some(i) = n.as_i64() {
				Expr::val(i)
			} else if let Some(f) = n.as_f64() {
				Expr::val(f)
			} else {
				Expr::val(n.to_string())
			}
		}
		Value::String(s) => Expr::val(s.clone()),
		Value::Array(_) | Value::Object(_) => Expr::val(value.to_string()),
	}
}

/// Writes fixtures through a sqlx connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use reinhardt_fixtures::storage::DatabaseStorage;
///
/// # async fn example() {
/// let storage = DatabaseStorage::connect("sqlite::memory:").await.unwrap();
/// # }
/// # tokio::runtime::Runtime::new().unwrap().block_on(example());
/// ```
#[derive(Clone)]
pub struct DatabaseStorage {
	pool: Arc<AnyPool>,
	dialect: SqlDialect,
}

impl DatabaseStorage {
	/// Connects to `database_url`, inferring the dialect from its scheme.
	pub async fn connect(database_url: &str) -> FixtureResult<Self> {
		let dialect = SqlDialect::from_url(database_url).ok_or_else(|| {
			FixtureError::Config(format!("Unsupported database URL: {}", database_url))
		})?;

		sqlx::any::install_default_drivers();
		let pool = AnyPool::connect(database_url)
			.await
			.map_err(|e| FixtureError::Storage(format!("Database connection error: {}", e)))?;

		Ok(Self {
			pool: Arc::new(pool),
			dialect,
		})
	}

	/// Wraps an existing pool.
	pub fn from_pool(pool: Arc<AnyPool>, dialect: SqlDialect) -> Self {
		Self { pool, dialect }
	}

	/// Returns the dialect statements are rendered in.
	pub fn dialect(&self) -> SqlDialect {
		self.dialect
	}

	/// Returns the underlying pool.
	pub fn pool(&self) -> &AnyPool {
		&self.pool
	}

	async fn execute(&self, sql: &str) -> FixtureResult<()> {
		tracing::debug!(sql = %sql, "executing fixture statement");
		sqlx::query(sql)
			.execute(&*self.pool)
			.await
			.map_err(|e| FixtureError::Storage(format!("{}: {}", sql, e)))?;
		Ok(())
	}
}

#[async_trait]
impl FixtureStorage for DatabaseStorage {
	async fn insert_record(&self, table: &str, record: &Record) -> FixtureResult<()> {
		let columns: Vec<(String, Value)> = record
			.fields
			.iter()
			.map(|(column, value)| (column.clone(), value.clone()))
			.collect();
		let sql = self.dialect.insert_sql(table, &columns)?;
		self.execute(&sql).await
	}

	async fn insert_join_row(&self, join_table: &str, row: &JoinRow) -> FixtureResult<()> {
		let columns: Vec<(String, Value)> = row
			.iter()
			.map(|(column, key)| (column.clone(), Value::from(*key)))
			.collect();
		let sql = self.dialect.insert_sql(join_table, &columns)?;
		self.execute(&sql).await
	}

	async fn truncate(&self, table: &str) -> FixtureResult<()> {
		let sql = self.dialect.truncate_sql(table);
		self.execute(&sql).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use sqlx::any::AnyPoolOptions;

	#[fixture]
	async fn sqlite_storage() -> DatabaseStorage {
		sqlx::any::install_default_drivers();
		// One connection: every in-memory SQLite connection is its own database.
		let pool = AnyPoolOptions::new()
			.max_connections(1)
			.connect("sqlite::memory:")
			.await
			.unwrap();
		sqlx::query("CREATE TABLE users (id INTEGER PRIMARY KEY, first_name TEXT, active BOOLEAN)")
			.execute(&pool)
			.await
			.unwrap();
		sqlx::query("CREATE TABLE role_user (user_id INTEGER, role_id INTEGER)")
			.execute(&pool)
			.await
			.unwrap();
		DatabaseStorage::from_pool(Arc::new(pool), SqlDialect::Sqlite)
	}

	fn user(name: &str, key: i64) -> Record {
		Record {
			table: "users".to_string(),
			name: name.to_string(),
			primary_key: "id".to_string(),
			key,
			fields: [
				("first_name".to_string(), json!(name)),
				("active".to_string(), json!(true)),
				("id".to_string(), json!(key)),
			]
			.into_iter()
			.collect(),
		}
	}

	async fn count(storage: &DatabaseStorage, table: &str) -> i64 {
		sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
			.fetch_one(storage.pool())
			.await
			.unwrap()
	}

	#[rstest]
	#[case("sqlite::memory:", Some(SqlDialect::Sqlite))]
	#[case("sqlite://fixtures.db", Some(SqlDialect::Sqlite))]
	#[case("postgresql://localhost/test", Some(SqlDialect::Postgres))]
	#[case("mysql://localhost/test", Some(SqlDialect::MySql))]
	#[case("mongodb://localhost", None)]
	fn test_dialect_from_url(#[case] url: &str, #[case] expected: Option<SqlDialect>) {
		assert_eq!(SqlDialect::from_url(url), expected);
	}

	#[rstest]
	fn test_truncate_sql_per_dialect() {
		assert_eq!(SqlDialect::Sqlite.truncate_sql("users"), r#"DELETE FROM "users""#);
		assert_eq!(
			SqlDialect::Postgres.truncate_sql("users"),
			r#"TRUNCATE TABLE "users""#
		);
		assert_eq!(SqlDialect::MySql.truncate_sql("users"), "TRUNCATE TABLE `users`");
	}

	#[rstest]
	fn test_insert_sql_renders_columns_and_values() {
		let sql = SqlDialect::Postgres
			.insert_sql(
				"users",
				&[
					("id".to_string(), json!(7)),
					("first_name".to_string(), json!("Travis")),
				],
			)
			.unwrap();
		assert_eq!(
			sql,
			r#"INSERT INTO "users" ("id", "first_name") VALUES (7, 'Travis')"#
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_insert_record_and_truncate(#[future] sqlite_storage: DatabaseStorage) {
		let storage = sqlite_storage.await;

		storage.insert_record("users", &user("Travis", 1)).await.unwrap();
		storage.insert_record("users", &user("Kelt", 2)).await.unwrap();
		assert_eq!(count(&storage, "users").await, 2);

		storage.truncate("users").await.unwrap();
		assert_eq!(count(&storage, "users").await, 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_insert_join_row(#[future] sqlite_storage: DatabaseStorage) {
		let storage = sqlite_storage.await;
		let row = [("user_id".to_string(), 10), ("role_id".to_string(), 20)];

		storage.insert_join_row("role_user", &row).await.unwrap();

		let role_id: i64 = sqlx::query_scalar("SELECT role_id FROM role_user WHERE user_id = 10")
			.fetch_one(storage.pool())
			.await
			.unwrap();
		assert_eq!(role_id, 20);
	}

	#[rstest]
	#[tokio::test]
	async fn test_constraint_violation_is_storage_error(
		#[future] sqlite_storage: DatabaseStorage,
	) {
		let storage = sqlite_storage.await;

		storage.insert_record("users", &user("Travis", 1)).await.unwrap();
		let result = storage.insert_record("users", &user("Travis", 1)).await;
		assert!(matches!(result, Err(FixtureError::Storage(_))));
	}

	#[rstest]
	#[tokio::test]
	async fn test_missing_table_is_storage_error(#[future] sqlite_storage: DatabaseStorage) {
		let storage = sqlite_storage.await;
		let result = storage.truncate("no_such_table").await;
		assert!(matches!(result, Err(FixtureError::Storage(_))));
	}
}
