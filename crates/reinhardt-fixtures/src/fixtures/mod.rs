//! Fixture definitions, parsing, relationship resolution and loading.
//!
//! A fixture file is named after its table (`users.json`, `roles.yaml`) and
//! maps record names to field maps:
//!
//! ```json
//! {
//!   "Travis": { "first_name": "Travis", "roles": "endUser, root" },
//!   "Kelt":   { "first_name": "Kelt",   "roles": "endUser" }
//! }
//! ```
//!
//! - [`FixtureParser`] reads a file into a [`FixtureDefinition`]
//! - [`RelationshipResolver`] turns each field map into a [`Record`]
//! - [`FixtureLoader`] drives both and keeps the [`FixtureStore`]

mod format;
mod loader;
mod parser;
mod resolver;
mod store;

pub use format::{FieldMap, FixtureDefinition, FixtureFormat, Record};
pub use loader::{FixtureLoader, FixtureSource, LoadOptions};
pub use parser::FixtureParser;
pub use resolver::{Reference, RelationshipResolver, ResolvedRecord, ResolverOptions};
pub use store::{FixtureStore, TableRecords};
