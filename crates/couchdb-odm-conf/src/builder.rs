//! Layered configuration loading

use crate::configuration::Configuration;
use crate::error::Result;
use crate::sources::{ConfigSource, EnvSource, TomlFileSource};
use serde_json::{Map, Value};
use std::path::Path;

/// Merges configuration sources into a [`Configuration`]
///
/// Sources are applied from lowest to highest priority; a setting from a higher priority
/// source replaces the whole value of a lower one. Unset settings keep their defaults.
///
/// # Examples
///
/// ```
/// use couchdb_odm_conf::ConfigurationBuilder;
/// use couchdb_odm_conf::sources::EnvSource;
///
/// let config = ConfigurationBuilder::new()
///     .add_source(EnvSource::new().with_vars([("COUCHDB_ODM_PROXY_NAMESPACE", "ProxyNS")]))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.proxy_namespace(), "ProxyNS");
/// ```
#[derive(Default)]
pub struct ConfigurationBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigurationBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// A TOML file layered under the process environment
	pub fn from_file_and_env(path: impl AsRef<Path>) -> Self {
		Self::new()
			.add_source(TomlFileSource::new(path.as_ref()))
			.add_source(EnvSource::new())
	}

	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	pub fn build(mut self) -> Result<Configuration> {
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = Map::new();
		for source in &self.sources {
			let values = source.load()?;
			tracing::debug!(
				source = %source.description(),
				settings = values.len(),
				"Loaded configuration source"
			);
			merged.extend(values);
		}

		Ok(serde_json::from_value(Value::Object(merged))?)
	}
}
