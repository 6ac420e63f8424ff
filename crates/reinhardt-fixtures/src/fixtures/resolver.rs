//! Relationship resolution for fixture records.
//!
//! Each field of a fixture record is either a literal column or, when the
//! owning entity's schema declares a relation under the field's camelCase
//! name, a reference to other records *by name*. Because keys are derived
//! from names (see [`generate_key`]), references resolve without the target
//! record existing yet.

use indexmap::IndexMap;
use serde_json::Value;

use super::{FieldMap, FixtureStore, Record};
use crate::error::{FixtureError, FixtureResult};
use crate::key::generate_key;
use crate::naming::relation_name;
use crate::schema::{Relation, SchemaRegistry};
use crate::storage::FixtureStorage;

/// Options controlling how fields are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverOptions {
	/// Column suffix that marks a plain column as a foreign key by
	/// convention (e.g. `"_id"`).
	///
	/// Only consulted for fields the schema does not declare as a relation.
	/// A string value in such a column is replaced by the key of the record
	/// it names.
	pub foreign_key_suffix: Option<String>,
}

impl ResolverOptions {
	/// Creates default options: schema-declared relations only.
	pub fn new() -> Self {
		Self::default()
	}

	/// Enables suffix-based foreign keys.
	pub fn with_foreign_key_suffix(mut self, suffix: impl Into<String>) -> Self {
		self.foreign_key_suffix = Some(suffix.into());
		self
	}
}

/// A relationship target referenced by name while building a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
	/// Table of the referencing record.
	pub table: String,
	/// Referencing record name.
	pub record: String,
	/// Field holding the reference.
	pub field: String,
	/// Name of the referenced record.
	pub target: String,
}

/// A built record and the names it points at.
#[derive(Debug, Clone)]
pub struct ResolvedRecord {
	/// The record as handed to storage.
	pub record: Record,
	/// Relationship targets found in the record's fields.
	pub references: Vec<Reference>,
}

/// Turns fixture field maps into stored records.
pub struct RelationshipResolver<'a> {
	schema: &'a dyn SchemaRegistry,
	options: &'a ResolverOptions,
}

/// Identifies the record being built, for error messages and references.
struct Target<'r> {
	table: &'r str,
	record: &'r str,
}

impl<'a> RelationshipResolver<'a> {
	/// Creates a resolver over `schema`.
	pub fn new(schema: &'a dyn SchemaRegistry, options: &'a ResolverOptions) -> Self {
		Self { schema, options }
	}

	/// Builds and stores one record.
	///
	/// Literal fields are copied, single-owner relations become foreign-key
	/// columns, and many-to-many relations insert one join row per target
	/// (tracking the join table in `store`). The primary key is set last and
	/// the record is inserted through `storage`.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::InvalidRelationValue`] when a relation field
	/// does not hold record names, and propagates any storage error.
	pub async fn build_record(
		&self,
		storage: &dyn FixtureStorage,
		store: &mut FixtureStore,
		table: &str,
		entity: &str,
		record_name: &str,
		fields: &FieldMap,
	) -> FixtureResult<ResolvedRecord> {
		let target = Target {
			table,
			record: record_name,
		};
		let mut columns: IndexMap<String, Value> = IndexMap::with_capacity(fields.len() + 1);
		let mut references = Vec::new();

		for (field, value) in fields {
			let relation = self.schema.relation(entity, &relation_name(field));

			match relation {
				None => {
					let value = self.convention_value(field, value);
					columns.insert(field.clone(), value);
				}
				Some(Relation::SingleOwner { foreign_key }) => {
					let resolved = match value {
						Value::Null => Value::Null,
						Value::String(name) => {
							references.push(target.reference(field, name));
							Value::from(generate_key(name))
						}
						_ => {
							return Err(target.invalid(field, "expected a record name"));
						}
					};
					columns.insert(foreign_key, resolved);
				}
				Some(Relation::ManyToMany {
					join_table,
					foreign_key,
					other_key,
				}) => {
					store.track(&join_table);
					let names = split_names(value).ok_or_else(|| {
						target.invalid(field, "expected a comma-separated list of record names")
					})?;

					let own_key = generate_key(record_name);
					for name in names {
						let row = [
							(foreign_key.clone(), own_key),
							(other_key.clone(), generate_key(&name)),
						];
						storage.insert_join_row(&join_table, &row).await?;
						references.push(target.reference(field, &name));
					}
				}
				Some(Relation::Unsupported(kind)) => {
					tracing::warn!(
						table = %table,
						record = %record_name,
						field = %field,
						kind = %kind,
						"Skipping field mapped to an unsupported relation kind"
					);
				}
			}
		}

		let key = generate_key(record_name);
		let primary_key = self.schema.primary_key(entity).to_string();
		columns.insert(primary_key.clone(), Value::from(key));

		let record = Record {
			table: table.to_string(),
			name: record_name.to_string(),
			primary_key,
			key,
			fields: columns,
		};
		storage.insert_record(table, &record).await?;

		Ok(ResolvedRecord { record, references })
	}

	/// Applies suffix-based foreign keys to a plain column.
	fn convention_value(&self, field: &str, value: &Value) -> Value {
		match (&self.options.foreign_key_suffix, value) {
			(Some(suffix), Value::String(name)) if field.ends_with(suffix.as_str()) => {
				Value::from(generate_key(name))
			}
			_ => value.clone(),
		}
	}
}

impl Target<'_> {
	fn reference(&self, field: &str, target: &str) -> Reference {
		Reference {
			table: self.table.to_string(),
			record: self.record.to_string(),
			field: field.to_string(),
			target: target.to_string(),
		}
	}

	fn invalid(&self, field: &str, message: &str) -> FixtureError {
		FixtureError::InvalidRelationValue {
			table: self.table.to_string(),
			record: self.record.to_string(),
			field: field.to_string(),
			message: message.to_string(),
		}
	}
}

/// Splits a many-to-many field value into record names.
///
/// Accepts `"a, b"`, `"a,b"` and `["a", "b"]`. Empty entries are dropped.
fn split_names(value: &Value) -> Option<Vec<String>> {
	match value {
		Value::String(list) => Some(
			list.split(',')
				.map(str::trim)
				.filter(|name| !name.is_empty())
				.map(str::to_string)
				.collect(),
		),
		Value::Array(items) => items
			.iter()
			.map(|item| item.as_str().map(|name| name.trim().to_string()))
			.filter(|name| !matches!(name, Some(n) if n.is_empty()))
			.collect(),
		Value::Null => Some(Vec::new()),
		_ => None,
	}
}
