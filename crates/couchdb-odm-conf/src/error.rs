//! Configuration errors

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid source: {0}")]
	InvalidSource(String),
}

/// Error type for configuration lookups and loading
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Unknown document namespace alias `{0}`")]
	UnknownDocumentNamespace(String),

	#[error("Lucene handler is not configured")]
	LuceneNotConfigured,

	#[error("Configuration source error: {0}")]
	Source(#[from] SourceError),

	#[error("Invalid configuration: {0}")]
	Invalid(#[from] serde_json::Error),
}
