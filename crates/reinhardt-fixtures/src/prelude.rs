//! Convenience re-exports for common usage.
//!
//! ```
//! use reinhardt_fixtures::prelude::*;
//!
//! assert_eq!(generate_key("Travis"), 1950325866);
//! ```

// Error types
pub use crate::error::{FixtureError, FixtureResult};

// Configuration
pub use crate::config::FixtureConfig;

// Fixture types
pub use crate::fixtures::{
	FixtureDefinition, FixtureFormat, FixtureLoader, FixtureParser, FixtureStore, LoadOptions,
	Record, ResolverOptions,
};

// Keys and schema
pub use crate::key::generate_key;
pub use crate::schema::{Relation, SchemaRegistry, StaticSchema};

// Storage
#[cfg(feature = "database")]
pub use crate::storage::{DatabaseStorage, SqlDialect};
pub use crate::storage::{FixtureStorage, MemoryStorage};
