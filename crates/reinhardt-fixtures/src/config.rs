//! Fixture loader configuration.
//!
//! ```toml
//! location = "tests/fixtures"
//! fixtures = ["users", "roles"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, FixtureResult};

/// Environment variable naming the fixture directory.
pub const LOCATION_ENV: &str = "REINHARDT_FIXTURES_LOCATION";

/// Environment variable listing the default fixture selection, comma separated.
pub const SELECTION_ENV: &str = "REINHARDT_FIXTURES";

/// Default fixture directory, relative to the crate under test.
pub const DEFAULT_LOCATION: &str = "tests/fixtures";

/// Where fixtures live and which ones to load by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureConfig {
	/// Directory holding one fixture file per table.
	pub location: PathBuf,

	/// Tables loaded by [`FixtureLoader::up`](crate::fixtures::FixtureLoader::up).
	/// Empty means every table in `location`.
	#[serde(default)]
	pub fixtures: Vec<String>,
}

impl Default for FixtureConfig {
	fn default() -> Self {
		Self::new(DEFAULT_LOCATION)
	}
}

impl FixtureConfig {
	/// Creates a configuration loading every fixture in `location`.
	pub fn new(location: impl AsRef<Path>) -> Self {
		Self {
			location: location.as_ref().to_path_buf(),
			fixtures: Vec::new(),
		}
	}

	/// Restricts the default selection to `fixtures`.
	pub fn with_fixtures<I, S>(mut self, fixtures: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fixtures = fixtures.into_iter().map(Into::into).collect();
		self
	}

	/// Parses a TOML document.
	///
	/// # Example
	///
	/// ```
	/// use reinhardt_fixtures::config::FixtureConfig;
	///
	/// let config = FixtureConfig::from_toml_str(r#"location = "fixtures""#).unwrap();
	/// assert_eq!(config.location.to_str(), Some("fixtures"));
	/// assert!(config.fixtures.is_empty());
	/// ```
	pub fn from_toml_str(content: &str) -> FixtureResult<Self> {
		toml::from_str(content).map_err(|e| FixtureError::Config(e.to_string()))
	}

	/// Reads a TOML file.
	pub fn from_toml_file(path: impl AsRef<Path>) -> FixtureResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| {
			FixtureError::Config(format!("Failed to read {}: {}", path.display(), e))
		})?;
		Self::from_toml_str(&content)
	}

	/// Builds a configuration from [`LOCATION_ENV`] and [`SELECTION_ENV`].
	pub fn from_env() -> FixtureResult<Self> {
		let location = std::env::var(LOCATION_ENV)
			.map_err(|_| FixtureError::Config(format!("{} is not set", LOCATION_ENV)))?;

		let fixtures = std::env::var(SELECTION_ENV)
			.map(|list| {
				list.split(',')
					.map(str::trim)
					.filter(|name| !name.is_empty())
					.map(str::to_string)
					.collect()
			})
			.unwrap_or_default();

		Ok(Self {
			location: PathBuf::from(location),
			fixtures,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	fn test_default_location() {
		let config = FixtureConfig::default();
		assert_eq!(config.location, PathBuf::from(DEFAULT_LOCATION));
		assert!(config.fixtures.is_empty());
	}

	#[rstest]
	fn test_from_toml_with_selection() {
		let config = FixtureConfig::from_toml_str(
			r#"
location = "/srv/fixtures"
fixtures = ["users", "roles"]
"#,
		)
		.unwrap();

		assert_eq!(config.location, PathBuf::from("/srv/fixtures"));
		assert_eq!(config.fixtures, vec!["users", "roles"]);
	}

	#[rstest]
	fn test_from_toml_missing_location() {
		let result = FixtureConfig::from_toml_str(r#"fixtures = ["users"]"#);
		assert!(matches!(result, Err(FixtureError::Config(_))));
	}

	#[rstest]
	fn test_from_toml_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("fixtures.toml");
		std::fs::write(&path, "location = \"data\"\n").unwrap();

		let config = FixtureConfig::from_toml_file(&path).unwrap();
		assert_eq!(config.location, PathBuf::from("data"));
	}

	#[rstest]
	#[serial(fixture_env)]
	fn test_from_env() {
		// SAFETY: serialized with every other test touching these variables.
		unsafe {
			std::env::set_var(LOCATION_ENV, "/tmp/fixtures");
			std::env::set_var(SELECTION_ENV, "users, roles,");
		}

		let config = FixtureConfig::from_env().unwrap();
		assert_eq!(config.location, PathBuf::from("/tmp/fixtures"));
		assert_eq!(config.fixtures, vec!["users", "roles"]);

		unsafe {
			std::env::remove_var(LOCATION_ENV);
			std::env::remove_var(SELECTION_ENV);
		}
	}

	#[rstest]
	#[serial(fixture_env)]
	fn test_from_env_requires_location() {
		unsafe {
			std::env::remove_var(LOCATION_ENV);
		}

		let result = FixtureConfig::from_env();
		assert!(matches!(result, Err(FixtureError::Config(_))));
	}
}
