//! Proxy errors

use couchdb_odm_codegen::GenerateError;
use std::path::PathBuf;

/// Result type for proxy operations
pub type Result<T> = std::result::Result<T, ProxyError>;

/// Errors raised while creating, generating or hydrating proxies
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
	/// The factory was built with an unusable setting
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// The generated file of a proxy type is absent and auto-generation is disabled
	#[error("Proxy artifact for `{type_name}` is missing at {path}; run the proxy generation step")]
	MissingArtifact { type_name: String, path: PathBuf },

	/// The type is a mapping base and is never proxied
	#[error("Type `{0}` is a mapped superclass and cannot be proxied")]
	UnsupportedMapping(String),

	/// A generated file exists but cannot be used
	#[error("Invalid proxy artifact {path}: {reason}")]
	InvalidArtifact { path: PathBuf, reason: String },

	/// A serialized proxy was restored as a different document type
	#[error("Serialized proxy of `{found}` cannot be restored as `{expected}`")]
	ProxyTypeMismatch { expected: String, found: String },

	#[error("Proxy generation failed: {0}")]
	Generate(#[from] GenerateError),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Document `{0}` not found")]
	DocumentNotFound(String),

	#[error("Type `{type_name}` has no field `{field}`")]
	UnknownField { type_name: String, field: String },

	/// Failure reported by a document manager
	#[error("Document manager error: {0}")]
	Manager(String),
}

impl ProxyError {
	/// Error for a field name a document type does not declare
	pub fn unknown_field(type_name: &str, field: &str) -> Self {
		Self::UnknownField {
			type_name: type_name.to_string(),
			field: field.to_string(),
		}
	}
}
