//! The `Configuration` settings container

use crate::error::{ConfigError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Default namespace of generated proxy types
pub const DEFAULT_PROXY_NAMESPACE: &str = "MyCouchDBProxyNS";

/// Default path through which generated proxies reach the runtime crate
pub const DEFAULT_PROXY_RUNTIME_PATH: &str = "::couchdb_odm_proxy";

/// Handler name used by [`Configuration::enable_lucene`]
pub const DEFAULT_LUCENE_HANDLER: &str = "_fti";

/// A design document registered with the mapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
	/// Type implementing the design document
	pub class_name: String,
	/// Options handed to the design document
	#[serde(default)]
	pub options: Value,
}

impl DesignDocument {
	pub fn new(class_name: impl Into<String>, options: Value) -> Self {
		Self {
			class_name: class_name.into(),
			options,
		}
	}
}

/// Mapper configuration
///
/// Every setting has a default, so a configuration built from an empty source is usable.
///
/// # Examples
///
/// ```
/// use couchdb_odm_conf::Configuration;
///
/// let mut config = Configuration::default();
/// assert_eq!(config.proxy_namespace(), "MyCouchDBProxyNS");
/// assert!(!config.auto_generate_proxy_classes());
///
/// config.set_proxy_namespace("ProxyNS");
/// config.set_auto_generate_proxy_classes(true);
/// assert_eq!(config.proxy_namespace(), "ProxyNS");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
	proxy_dir: Option<PathBuf>,
	proxy_namespace: String,
	auto_generate_proxy_classes: bool,
	proxy_runtime_path: String,
	uuid_generation_buffer_size: usize,
	write_type_metadata: bool,
	validate_type_metadata: bool,
	all_or_nothing_flush: bool,
	lucene_handler_name: Option<String>,
	document_namespaces: IndexMap<String, String>,
	design_documents: IndexMap<String, DesignDocument>,
}

impl Default for Configuration {
	fn default() -> Self {
		let mut design_documents = IndexMap::new();
		design_documents.insert(
			"doctrine_associations".to_string(),
			DesignDocument::new("DoctrineAssociations", Value::Object(Default::default())),
		);
		design_documents.insert(
			"doctrine_repositories".to_string(),
			DesignDocument::new("DoctrineRepository", Value::Object(Default::default())),
		);

		Self {
			proxy_dir: None,
			proxy_namespace: DEFAULT_PROXY_NAMESPACE.to_string(),
			auto_generate_proxy_classes: false,
			proxy_runtime_path: DEFAULT_PROXY_RUNTIME_PATH.to_string(),
			uuid_generation_buffer_size: 20,
			write_type_metadata: true,
			validate_type_metadata: true,
			all_or_nothing_flush: true,
			lucene_handler_name: None,
			document_namespaces: IndexMap::new(),
			design_documents,
		}
	}
}

impl Configuration {
	/// Directory holding generated proxy files
	///
	/// Falls back to the system temporary directory when unset.
	pub fn proxy_dir(&self) -> PathBuf {
		self.proxy_dir.clone().unwrap_or_else(std::env::temp_dir)
	}

	pub fn set_proxy_dir(&mut self, dir: impl AsRef<Path>) {
		self.proxy_dir = Some(dir.as_ref().to_path_buf());
	}

	pub fn proxy_namespace(&self) -> &str {
		&self.proxy_namespace
	}

	pub fn set_proxy_namespace(&mut self, namespace: impl Into<String>) {
		self.proxy_namespace = namespace.into();
	}

	pub fn auto_generate_proxy_classes(&self) -> bool {
		self.auto_generate_proxy_classes
	}

	pub fn set_auto_generate_proxy_classes(&mut self, enabled: bool) {
		self.auto_generate_proxy_classes = enabled;
	}

	/// Path generated proxies use to reach the runtime crate
	pub fn proxy_runtime_path(&self) -> &str {
		&self.proxy_runtime_path
	}

	pub fn set_proxy_runtime_path(&mut self, path: impl Into<String>) {
		self.proxy_runtime_path = path.into();
	}

	/// Number of UUIDs fetched from the server per request
	pub fn uuid_generation_buffer_size(&self) -> usize {
		self.uuid_generation_buffer_size
	}

	pub fn set_uuid_generation_buffer_size(&mut self, size: usize) {
		self.uuid_generation_buffer_size = size;
	}

	/// Whether type metadata is written into stored documents
	pub fn write_type_metadata(&self) -> bool {
		self.write_type_metadata
	}

	pub fn set_write_type_metadata(&mut self, enabled: bool) {
		self.write_type_metadata = enabled;
	}

	/// Whether type metadata of stored documents is validated on read
	pub fn validate_type_metadata(&self) -> bool {
		self.validate_type_metadata
	}

	pub fn set_validate_type_metadata(&mut self, enabled: bool) {
		self.validate_type_metadata = enabled;
	}

	pub fn all_or_nothing_flush(&self) -> bool {
		self.all_or_nothing_flush
	}

	pub fn set_all_or_nothing_flush(&mut self, enabled: bool) {
		self.all_or_nothing_flush = enabled;
	}

	/// Register a namespace under an alias
	pub fn add_document_namespace(&mut self, alias: impl Into<String>, namespace: impl Into<String>) {
		self.document_namespaces
			.insert(alias.into(), namespace.into());
	}

	/// Resolve a namespace alias
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_conf::{ConfigError, Configuration};
	///
	/// let mut config = Configuration::default();
	/// config.add_document_namespace("blog", "\\App\\Blog\\");
	///
	/// assert_eq!(config.document_namespace("blog").unwrap(), "App\\Blog");
	/// assert!(matches!(
	///     config.document_namespace("shop"),
	///     Err(ConfigError::UnknownDocumentNamespace(_))
	/// ));
	/// ```
	pub fn document_namespace(&self, alias: &str) -> Result<&str> {
		self.document_namespaces
			.get(alias)
			.map(|namespace| namespace.trim_matches('\\'))
			.ok_or_else(|| ConfigError::UnknownDocumentNamespace(alias.to_string()))
	}

	/// Replace the whole alias map
	pub fn set_document_namespaces(&mut self, namespaces: IndexMap<String, String>) {
		self.document_namespaces = namespaces;
	}

	/// Register a design document
	pub fn add_design_document(
		&mut self,
		name: impl Into<String>,
		class_name: impl Into<String>,
		options: Value,
	) {
		self.design_documents
			.insert(name.into(), DesignDocument::new(class_name, options));
	}

	/// Names of the registered design documents, in registration order
	pub fn design_document_names(&self) -> Vec<&str> {
		self.design_documents.keys().map(String::as_str).collect()
	}

	pub fn design_document(&self, name: &str) -> Option<&DesignDocument> {
		self.design_documents.get(name)
	}

	/// Set the full-text search handler name
	pub fn set_lucene_handler_name(&mut self, handler: Option<String>) {
		self.lucene_handler_name = handler;
	}

	/// Enable full-text search with the default handler name
	pub fn enable_lucene(&mut self) {
		self.lucene_handler_name = Some(DEFAULT_LUCENE_HANDLER.to_string());
	}

	/// Full-text search handler name
	///
	/// Fails when full-text search has not been configured.
	pub fn lucene_handler_name(&self) -> Result<&str> {
		self.lucene_handler_name
			.as_deref()
			.filter(|name| !name.is_empty())
			.ok_or(ConfigError::LuceneNotConfigured)
	}
}
