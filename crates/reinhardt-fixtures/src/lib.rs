//! Named test fixtures with deterministic keys for the Reinhardt framework.
//!
//! Fixture records are identified by name rather than by primary key. The key
//! of a record is derived from its name, so records in one file can refer to
//! records in another by name, in any load order:
//!
//! `tests/fixtures/users.json`:
//!
//! ```json
//! { "Travis": { "first_name": "Travis", "roles": "endUser, root" } }
//! ```
//!
//! `tests/fixtures/roles.json`:
//!
//! ```json
//! { "root": { "name": "root" }, "endUser": { "name": "endUser" } }
//! ```
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use reinhardt_fixtures::prelude::*;
//!
//! # async fn example() -> FixtureResult<()> {
//! let schema = StaticSchema::new().with_relation(
//!     "User",
//!     "roles",
//!     Relation::many_to_many("role_user", "user_id", "role_id"),
//! );
//! let storage = DatabaseStorage::connect("sqlite://fixtures.db").await?;
//!
//! let mut loader = FixtureLoader::new(
//!     FixtureConfig::default(),
//!     Arc::new(storage),
//!     Arc::new(schema),
//! );
//! loader.up().await?;
//!
//! let travis = loader.get("users", "Travis").expect("defined in users.json");
//! assert_eq!(travis.key(), generate_key("Travis"));
//!
//! loader.down().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `json` - JSON fixture files (enabled by default)
//! - `yaml` - YAML fixture files
//! - `database` - [`DatabaseStorage`](storage::DatabaseStorage) over sqlx (enabled by default)
//! - `full` - All features enabled

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod fixtures;
pub mod key;
pub mod naming;
pub mod prelude;
pub mod schema;
pub mod storage;

pub use config::FixtureConfig;
pub use error::{FixtureError, FixtureResult};
pub use fixtures::{FixtureLoader, FixtureStore, LoadOptions, Record, ResolverOptions};
pub use key::generate_key;
pub use schema::{Relation, SchemaRegistry, StaticSchema};
pub use storage::{FixtureStorage, MemoryStorage};
