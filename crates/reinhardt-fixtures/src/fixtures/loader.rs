//! Fixture loading and teardown.
//!
//! [`FixtureLoader`] discovers one fixture file per table in the configured
//! directory, builds every record through the [`RelationshipResolver`], and
//! remembers which tables it wrote to so [`FixtureLoader::down`] can empty
//! them again.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexSet;

use super::{
	FixtureFormat, FixtureParser, FixtureStore, Record, Reference, RelationshipResolver,
	ResolverOptions,
};
use crate::config::FixtureConfig;
use crate::error::{FixtureError, FixtureResult};
use crate::naming::entity_name;
use crate::schema::SchemaRegistry;
use crate::storage::FixtureStorage;

/// Options for fixture loading.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
	/// Field resolution options.
	pub resolver: ResolverOptions,

	/// Fail the load when a relationship names a record that no loaded
	/// fixture defines.
	///
	/// A target counts as defined when any loaded table has a record of that
	/// name. Relations do not say which table they point at, so a reference
	/// to `root` is satisfied by a `users.root` as well as a `roles.root`.
	pub strict_references: bool,
}

impl LoadOptions {
	/// Creates default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets resolver options.
	pub fn with_resolver(mut self, resolver: ResolverOptions) -> Self {
		self.resolver = resolver;
		self
	}

	/// Sets strict reference checking.
	pub fn with_strict_references(mut self, strict: bool) -> Self {
		self.strict_references = strict;
		self
	}
}

/// A fixture file found in the fixture directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSource {
	/// Table the file populates.
	pub table: String,
	/// Path of the file.
	pub path: PathBuf,
}

/// Loads fixtures into storage and tears them down again.
///
/// All collaborators are supplied up front; each test can own a fresh
/// loader.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use reinhardt_fixtures::prelude::*;
///
/// # async fn example() -> FixtureResult<()> {
/// let schema = StaticSchema::new().with_relation(
///     "User",
///     "roles",
///     Relation::many_to_many("role_user", "user_id", "role_id"),
/// );
/// let mut loader = FixtureLoader::new(
///     FixtureConfig::new("tests/fixtures"),
///     Arc::new(MemoryStorage::new()),
///     Arc::new(schema),
/// );
///
/// loader.load(&["users", "roles"]).await?;
/// let travis = loader.get("users", "Travis").expect("fixture defined");
/// assert_eq!(travis.key(), generate_key("Travis"));
///
/// loader.down().await?;
/// # Ok(())
/// # }
/// ```
pub struct FixtureLoader {
	config: FixtureConfig,
	storage: Arc<dyn FixtureStorage>,
	schema: Arc<dyn SchemaRegistry>,
	options: LoadOptions,
	parser: FixtureParser,
	store: FixtureStore,
}

impl FixtureLoader {
	/// Creates a loader with default options.
	pub fn new(
		config: FixtureConfig,
		storage: Arc<dyn FixtureStorage>,
		schema: Arc<dyn SchemaRegistry>,
	) -> Self {
		Self::with_options(config, storage, schema, LoadOptions::default())
	}

	/// Creates a loader with custom options.
	pub fn with_options(
		config: FixtureConfig,
		storage: Arc<dyn FixtureStorage>,
		schema: Arc<dyn SchemaRegistry>,
		options: LoadOptions,
	) -> Self {
		Self {
			config,
			storage,
			schema,
			options,
			parser: FixtureParser::new(),
			store: FixtureStore::new(),
		}
	}

	/// Returns the configuration.
	pub fn config(&self) -> &FixtureConfig {
		&self.config
	}

	/// Returns the load options.
	pub fn options(&self) -> &LoadOptions {
		&self.options
	}

	/// Returns the records loaded by the last load.
	pub fn store(&self) -> &FixtureStore {
		&self.store
	}

	/// Returns the loaded record `record` of `table`, if any.
	pub fn get(&self, table: &str, record: &str) -> Option<&Record> {
		self.store.get(table, record)
	}

	/// Loads the tables named in the configuration (all when none are named).
	pub async fn up(&mut self) -> FixtureResult<&FixtureStore> {
		let selection = self.config.fixtures.clone();
		self.load(&selection).await
	}

	/// Loads every fixture in the configured directory.
	pub async fn load_all(&mut self) -> FixtureResult<&FixtureStore> {
		self.load::<&str>(&[]).await
	}

	/// Loads the fixtures whose table name is in `selection`, or all of them
	/// when `selection` is empty.
	///
	/// Each call replaces the previously loaded records. Tables written to
	/// stay tracked until [`down`](Self::down).
	///
	/// # Errors
	///
	/// Returns [`FixtureError::InvalidFixtureLocation`] before anything is
	/// written if the fixture directory cannot be read. Parse, relation and
	/// storage errors abort the load at the failing record; rows already
	/// written stay in place and their tables stay tracked.
	pub async fn load<T: AsRef<str>>(&mut self, selection: &[T]) -> FixtureResult<&FixtureStore> {
		let sources = self.discover()?;
		let selected: IndexSet<String> = selection
			.iter()
			.map(|name| name.as_ref().to_lowercase())
			.collect();

		for name in &selected {
			if !sources.iter().any(|source| &source.table == name) {
				tracing::warn!(
					table = %name,
					location = %self.config.location.display(),
					"Selected fixture has no source file"
				);
			}
		}

		self.store.clear_records();
		let resolver = RelationshipResolver::new(self.schema.as_ref(), &self.options.resolver);
		let mut references: Vec<Reference> = Vec::new();

		for source in sources {
			if !selected.is_empty() && !selected.contains(&source.table) {
				continue;
			}

			let definition = self.parser.parse_file(&source.path)?;
			let entity = entity_name(&definition.table);
			self.store.track(&definition.table);

			for (name, fields) in definition.iter() {
				let resolved = resolver
					.build_record(
						self.storage.as_ref(),
						&mut self.store,
						&definition.table,
						&entity,
						name,
						fields,
					)
					.await?;
				references.extend(resolved.references);
				self.store.insert(resolved.record);
			}

			tracing::info!(
				table = %definition.table,
				entity = %entity,
				count = definition.len(),
				"Loaded fixture table"
			);
		}

		if self.options.strict_references {
			self.check_references(&references)?;
		}

		tracing::info!(count = self.store.len(), "Fixtures loaded");
		Ok(&self.store)
	}

	/// Truncates every tracked table, in the order it was first written,
	/// then forgets the loaded records.
	///
	/// Does nothing when nothing is tracked, so it is safe to call repeatedly.
	/// If a truncate fails the error is returned and the tracking state is
	/// kept, so teardown can be retried.
	pub async fn down(&mut self) -> FixtureResult<()> {
		let tables: Vec<String> = self.store.tracked_tables().map(str::to_string).collect();

		for table in &tables {
			self.storage.truncate(table).await?;
			tracing::debug!(table = %table, "Truncated fixture table");
		}

		if !tables.is_empty() {
			tracing::info!(count = tables.len(), "Fixture tables truncated");
		}

		self.store.clear_all();
		Ok(())
	}

	/// Lists the fixture files in the configured directory.
	///
	/// Files with an unrecognised extension are skipped; subdirectories are
	/// not searched. Sources are returned sorted by path. When several files
	/// map to the same table (`users.json` and `Users.json`), only the first
	/// is kept and the others are skipped with a warning.
	pub fn discover(&self) -> FixtureResult<Vec<FixtureSource>> {
		let location = &self.config.location;
		let invalid = |reason: &str| {
			FixtureError::InvalidFixtureLocation(format!("{}: {}", location.display(), reason))
		};

		if !location.is_dir() {
			return Err(invalid("not a readable directory"));
		}

		let entries = std::fs::read_dir(location).map_err(|e| invalid(&e.to_string()))?;
		let mut sources = Vec::new();

		for entry in entries {
			let path = entry.map_err(|e| invalid(&e.to_string()))?.path();
			if !path.is_file() {
				continue;
			}

			match FixtureFormat::from_path(&path) {
				Some(format) if format.is_enabled() => {}
				Some(format) => {
					tracing::warn!(
						path = %path.display(),
						format = %format,
						"Skipping fixture file whose format is not enabled"
					);
					continue;
				}
				None => {
					tracing::debug!(path = %path.display(), "Skipping non-fixture file");
					continue;
				}
			}

			if let Some(table) = FixtureParser::table_name(&path) {
				sources.push(FixtureSource { table, path });
			}
		}

		sources.sort_by(|a, b| a.path.cmp(&b.path));

		// One source per table: the first path wins.
		let mut seen = HashSet::new();
		sources.retain(|source| {
			if seen.insert(source.table.clone()) {
				return true;
			}
			tracing::warn!(
				table = %source.table,
				path = %source.path.display(),
				"Skipping duplicate fixture source for table"
			);
			false
		});

		Ok(sources)
	}

	/// Verifies every referenced record name was defined by some loaded table.
	fn check_references(&self, references: &[Reference]) -> FixtureResult<()> {
		let defined: HashSet<&str> = self
			.store
			.tables()
			.filter_map(|table| self.store.table(table))
			.flat_map(|records| records.keys().map(String::as_str))
			.collect();

		match references
			.iter()
			.find(|reference| !defined.contains(reference.target.as_str()))
		{
			Some(dangling) => Err(FixtureError::DanglingReference {
				table: dangling.table.clone(),
				record: dangling.record.clone(),
				field: dangling.field.clone(),
				target: dangling.target.clone(),
			}),
			None => Ok(()),
		}
	}
}

impl std::fmt::Debug for FixtureLoader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FixtureLoader")
			.field("config", &self.config)
			.field("options", &self.options)
			.field("store", &self.store)
			.finish_non_exhaustive()
	}
}
