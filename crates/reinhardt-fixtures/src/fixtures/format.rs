//! Fixture format definitions.
//!
//! A fixture source describes one table as an ordered mapping from record
//! name to field map:
//!
//! ```json
//! {
//!   "Travis": {
//!     "first_name": "Travis",
//!     "last_name": "Bennett",
//!     "roles": "endUser, root"
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Field name → literal value or relation reference.
pub type FieldMap = IndexMap<String, Value>;

/// Parsed contents of one fixture source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixtureDefinition {
	/// Table the records are inserted into.
	pub table: String,

	/// Record name → field map, in declaration order.
	pub records: IndexMap<String, FieldMap>,

	/// Optional source file path.
	pub source: Option<String>,
}

impl FixtureDefinition {
	/// Creates an empty definition for `table`.
	pub fn new(table: impl Into<String>) -> Self {
		Self {
			table: table.into(),
			records: IndexMap::new(),
			source: None,
		}
	}

	/// Adds a record, replacing any earlier record with the same name.
	pub fn with_record(mut self, name: impl Into<String>, fields: FieldMap) -> Self {
		self.records.insert(name.into(), fields);
		self
	}

	/// Sets the source file path.
	pub fn with_source(mut self, source: impl Into<String>) -> Self {
		self.source = Some(source.into());
		self
	}

	/// Returns the number of records.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Returns true if there are no records.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Returns an iterator over `(record name, field map)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldMap)> {
		self.records.iter()
	}
}

/// A fixture record after relationship resolution.
///
/// `fields` holds exactly what was handed to storage: literal columns,
/// resolved foreign keys, and the generated primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
	/// Table the record was inserted into.
	pub table: String,

	/// Record name within its fixture source.
	pub name: String,

	/// Primary-key column.
	pub primary_key: String,

	/// Generated primary key.
	pub key: i64,

	/// Column values as written.
	pub fields: IndexMap<String, Value>,
}

impl Record {
	/// Returns the generated primary key.
	pub fn key(&self) -> i64 {
		self.key
	}

	/// Returns the value of `column`, if set.
	pub fn get(&self, column: &str) -> Option<&Value> {
		self.fields.get(column)
	}

	/// Returns the value of `column` as a string slice.
	pub fn get_str(&self, column: &str) -> Option<&str> {
		self.get(column).and_then(Value::as_str)
	}

	/// Returns the value of `column` as an integer.
	pub fn get_i64(&self, column: &str) -> Option<i64> {
		self.get(column).and_then(Value::as_i64)
	}
}

/// Supported fixture file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FixtureFormat {
	/// JSON format (default).
	#[default]
	Json,

	/// YAML format (requires `yaml` feature).
	Yaml,
}

impl FixtureFormat {
	/// Determines the fixture format from a file extension.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_fixtures::fixtures::FixtureFormat;
	/// assert_eq!(FixtureFormat::from_extension("json"), Some(FixtureFormat::Json));
	/// assert_eq!(FixtureFormat::from_extension("yml"), Some(FixtureFormat::Yaml));
	/// assert_eq!(FixtureFormat::from_extension("php"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext.to_lowercase().as_str() {
			"json" => Some(Self::Json),
			"yaml" | "yml" => Some(Self::Yaml),
			_ => None,
		}
	}

	/// Determines the fixture format from a file path.
	pub fn from_path(path: &Path) -> Option<Self> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
	}

	/// Returns true if sources in this format can be parsed with the
	/// enabled features.
	pub fn is_enabled(&self) -> bool {
		match self {
			Self::Json => true,
			Self::Yaml => cfg!(feature = "yaml"),
		}
	}
}

impl std::fmt::Display for FixtureFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json => write!(f, "JSON"),
			Self::Yaml => write!(f, "YAML"),
		}
	}
}
