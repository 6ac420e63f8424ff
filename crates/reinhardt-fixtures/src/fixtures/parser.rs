//! Fixture parsing functionality.
//!
//! This module turns fixture files in JSON and YAML formats into
//! [`FixtureDefinition`]s.

use std::path::Path;

use serde_json::Value;

use super::{FieldMap, FixtureDefinition, FixtureFormat};
use crate::error::{FixtureError, FixtureResult};

/// Parser for fixture files.
///
/// Supports both JSON and YAML formats (YAML requires the `yaml` feature).
#[derive(Debug, Default)]
pub struct FixtureParser;

impl FixtureParser {
	/// Creates a new fixture parser.
	pub fn new() -> Self {
		Self
	}

	/// Returns the table a fixture file populates: its lowercased file stem.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_fixtures::fixtures::FixtureParser;
	/// # use std::path::Path;
	/// assert_eq!(FixtureParser::table_name(Path::new("fixtures/Users.json")), Some("users".to_string()));
	/// ```
	pub fn table_name(path: &Path) -> Option<String> {
		path.file_stem()
			.and_then(|stem| stem.to_str())
			.map(str::to_lowercase)
	}

	/// Parses a fixture file from the given path.
	///
	/// The format is detected from the file extension and the table name
	/// from the file stem.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The file extension is not recognized
	/// - The file cannot be read
	/// - The file content is not a mapping of record names to field maps
	pub fn parse_file(&self, path: &Path) -> FixtureResult<FixtureDefinition> {
		let format = FixtureFormat::from_path(path).ok_or_else(|| {
			FixtureError::UnsupportedExtension(
				path.extension()
					.and_then(|e| e.to_str())
					.unwrap_or("(none)")
					.to_string(),
			)
		})?;

		let table = Self::table_name(path).ok_or_else(|| {
			FixtureError::ParseError(format!("Invalid fixture file name: {}", path.display()))
		})?;

		let content = std::fs::read_to_string(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				FixtureError::FileNotFound(path.display().to_string())
			} else {
				FixtureError::IoError(e)
			}
		})?;

		let definition = self
			.parse_string(&content, format, &table)
			.map_err(|e| match e {
				FixtureError::ParseError(message) => {
					FixtureError::ParseError(format!("{}: {}", path.display(), message))
				}
				other => other,
			})?;

		Ok(definition.with_source(path.display().to_string()))
	}

	/// Parses fixture content for `table`.
	pub fn parse_string(
		&self,
		content: &str,
		format: FixtureFormat,
		table: &str,
	) -> FixtureResult<FixtureDefinition> {
		let value = match format {
			FixtureFormat::Json => serde_json::from_str::<Value>(content)?,
			FixtureFormat::Yaml => self.parse_yaml(content)?,
		};

		self.build_definition(value, table)
	}

	#[cfg(feature = "yaml")]
	fn parse_yaml(&self, content: &str) -> FixtureResult<Value> {
		Ok(serde_yaml::from_str::<Value>(content)?)
	}

	#[cfg(not(feature = "yaml"))]
	fn parse_yaml(&self, _content: &str) -> FixtureResult<Value> {
		Err(FixtureError::UnsupportedExtension(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}

	/// Validates the parsed document shape and builds the definition.
	fn build_definition(&self, value: Value, table: &str) -> FixtureResult<FixtureDefinition> {
		let mut definition = FixtureDefinition::new(table);

		let records = match value {
			Value::Object(records) => records,
			// An empty YAML document parses to null.
			Value::Null => return Ok(definition),
			_ => {
				return Err(FixtureError::ParseError(
					"Expected a mapping of record names to fields".to_string(),
				));
			}
		};

		for (name, fields) in records {
			let fields: FieldMap = match fields {
				Value::Object(map) => map.into_iter().collect(),
				Value::Null => FieldMap::new(),
				_ => {
					return Err(FixtureError::ParseError(format!(
						"Fields of record '{}' must be a mapping",
						name
					)));
				}
			};
			definition.records.insert(name, fields);
		}

		Ok(definition)
	}
}
