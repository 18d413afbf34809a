//! Configuration sources
//!
//! A source yields a flat map of setting names to JSON values. Sources are merged by
//! [`ConfigurationBuilder`](crate::ConfigurationBuilder) in priority order.

use crate::error::SourceError;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Prefix of environment variables read by [`EnvSource`]
pub const ENV_PREFIX: &str = "COUCHDB_ODM_";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// TOML file configuration source
///
/// A missing file yields no settings.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_conf::sources::TomlFileSource;
	///
	/// let source = TomlFileSource::new("couchdb-odm.toml");
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let table: toml::Table = toml::from_str(&content)?;

		match serde_json::to_value(table)? {
			Value::Object(map) => Ok(map.into_iter().collect()),
			_ => Err(SourceError::InvalidSource(format!(
				"{}: expected a table at the root",
				self.path.display()
			))),
		}
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variable configuration source
///
/// Reads variables starting with [`ENV_PREFIX`]. `COUCHDB_ODM_PROXY_NAMESPACE` sets
/// `proxy_namespace`, and so on. Values that parse as booleans or integers are typed.
pub struct EnvSource {
	prefix: String,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	/// Create a source over the process environment
	pub fn new() -> Self {
		Self {
			prefix: ENV_PREFIX.to_string(),
			vars: None,
		}
	}

	/// Use a different variable prefix
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	/// Read from the given variables instead of the process environment
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_conf::sources::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new().with_vars([
	///     ("COUCHDB_ODM_AUTO_GENERATE_PROXY_CLASSES", "true"),
	///     ("HOME", "/root"),
	/// ]);
	/// let values = source.load().unwrap();
	///
	/// assert_eq!(values["auto_generate_proxy_classes"], true);
	/// assert!(!values.contains_key("home"));
	/// ```
	pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.vars = Some(
			vars.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		);
		self
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let vars: Box<dyn Iterator<Item = (String, String)> + '_> = match &self.vars {
			Some(vars) => Box::new(vars.iter().cloned()),
			None => Box::new(std::env::vars()),
		};

		let mut config = IndexMap::new();
		for (key, value) in vars {
			let Some(name) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			if name.is_empty() {
				continue;
			}
			config.insert(name.to_lowercase(), parse_env_value(value));
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

fn parse_env_value(value: String) -> Value {
	match value.trim().to_lowercase().as_str() {
		"true" | "yes" | "on" => return Value::Bool(true),
		"false" | "no" | "off" => return Value::Bool(false),
		_ => {}
	}

	if let Ok(num) = value.trim().parse::<i64>() {
		Value::Number(num.into())
	} else {
		Value::String(value)
	}
}
