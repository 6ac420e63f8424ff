//! Error types for fixture loading.
//!
//! Every fallible operation in this crate returns [`FixtureResult`]. Storage
//! adapters report their own failures through [`FixtureError::Storage`],
//! which the loader propagates without retrying.

use thiserror::Error;

/// Errors that can occur while loading or tearing down fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// The fixture directory is missing, not a directory, or unreadable.
	#[error("Invalid fixture location: {0}")]
	InvalidFixtureLocation(String),

	/// Error parsing a fixture source.
	#[error("Parse error: {0}")]
	ParseError(String),

	/// Fixture file not found.
	#[error("Fixture file not found: {0}")]
	FileNotFound(String),

	/// Unsupported file extension.
	#[error("Unsupported file extension: {0}")]
	UnsupportedExtension(String),

	/// A relationship field carried a value that cannot name a target record.
	#[error("Invalid relation value for {table}.{record}.{field}: {message}")]
	InvalidRelationValue {
		/// Table the record belongs to.
		table: String,
		/// Record name within the table.
		record: String,
		/// Field holding the relation.
		field: String,
		/// What was wrong with the value.
		message: String,
	},

	/// A relationship names a record that no loaded fixture defines.
	///
	/// Only raised when strict reference checking is enabled.
	#[error("Dangling reference from {table}.{record}.{field} to '{target}'")]
	DanglingReference {
		/// Table the referencing record belongs to.
		table: String,
		/// Referencing record name.
		record: String,
		/// Field holding the relation.
		field: String,
		/// Target record name that was never defined.
		target: String,
	},

	/// The storage adapter failed to insert or truncate.
	#[error("Storage error: {0}")]
	Storage(String),

	/// Fixture configuration could not be read.
	#[error("Configuration error: {0}")]
	Config(String),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	/// JSON deserialization error.
	#[error("JSON error: {0}")]
	JsonError(#[from] serde_json::Error),

	/// YAML deserialization error (when yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;
