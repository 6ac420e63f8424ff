//! Schema capabilities consulted while resolving fixture fields.
//!
//! A fixture field is a relationship only if the owning entity declares one
//! under the field's camelCase name. Everything else is a literal column.

use std::collections::HashMap;

/// Default primary-key column.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// A relationship declared by an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
	/// Belongs-to: the owning record stores the target's key in one column.
	SingleOwner {
		/// Column on the owning record holding the target key.
		foreign_key: String,
	},

	/// Join-table relationship with one row per pair of records.
	ManyToMany {
		/// Name of the join table.
		join_table: String,
		/// Join-table column holding the owning record's key.
		foreign_key: String,
		/// Join-table column holding the related record's key.
		other_key: String,
	},

	/// A relation kind the fixture engine does not populate.
	///
	/// Fields mapped to this capability are skipped with a warning.
	Unsupported(String),
}

impl Relation {
	/// Creates a belongs-to relation.
	pub fn single_owner(foreign_key: impl Into<String>) -> Self {
		Self::SingleOwner {
			foreign_key: foreign_key.into(),
		}
	}

	/// Creates a many-to-many relation.
	pub fn many_to_many(
		join_table: impl Into<String>,
		foreign_key: impl Into<String>,
		other_key: impl Into<String>,
	) -> Self {
		Self::ManyToMany {
			join_table: join_table.into(),
			foreign_key: foreign_key.into(),
			other_key: other_key.into(),
		}
	}
}

/// Reports the relationship capabilities of entities.
pub trait SchemaRegistry: Send + Sync {
	/// Returns the relation `entity` declares under the camelCase `relation`
	/// name, or `None` if the field is a plain column.
	fn relation(&self, entity: &str, relation: &str) -> Option<Relation>;

	/// Returns the primary-key column of `entity`.
	fn primary_key(&self, _entity: &str) -> &str {
		DEFAULT_PRIMARY_KEY
	}
}

/// Map-backed [`SchemaRegistry`].
///
/// # Example
///
/// ```
/// use reinhardt_fixtures::schema::{Relation, SchemaRegistry, StaticSchema};
///
/// let schema = StaticSchema::new()
///     .with_relation("User", "roles", Relation::many_to_many("role_user", "user_id", "role_id"))
///     .with_relation("Game", "user", Relation::single_owner("user_id"));
///
/// assert!(schema.relation("User", "roles").is_some());
/// assert!(schema.relation("User", "first_name").is_none());
/// assert_eq!(schema.primary_key("User"), "id");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
	relations: HashMap<(String, String), Relation>,
	primary_keys: HashMap<String, String>,
}

impl StaticSchema {
	/// Creates an empty schema where every field is a plain column.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a relation on `entity` under the camelCase name `relation`.
	pub fn with_relation(
		mut self,
		entity: impl Into<String>,
		relation: impl Into<String>,
		kind: Relation,
	) -> Self {
		self.relations.insert((entity.into(), relation.into()), kind);
		self
	}

	/// Overrides the primary-key column of `entity`.
	pub fn with_primary_key(
		mut self,
		entity: impl Into<String>,
		column: impl Into<String>,
	) -> Self {
		self.primary_keys.insert(entity.into(), column.into());
		self
	}
}

impl SchemaRegistry for StaticSchema {
	fn relation(&self, entity: &str, relation: &str) -> Option<Relation> {
		self.relations
			.get(&(entity.to_string(), relation.to_string()))
			.cloned()
	}

	fn primary_key(&self, entity: &str) -> &str {
		self.primary_keys
			.get(entity)
			.map(String::as_str)
			.unwrap_or(DEFAULT_PRIMARY_KEY)
	}
}
