//! # couchdb-odm conf
//!
//! Settings of the document mapper: proxy generation, type metadata handling, document
//! namespaces, design documents and full-text search.
//!
//! Settings can be set programmatically or loaded from a TOML file and `COUCHDB_ODM_*`
//! environment variables:
//!
//! ```rust,no_run
//! use couchdb_odm_conf::ConfigurationBuilder;
//!
//! let config = ConfigurationBuilder::from_file_and_env("couchdb-odm.toml").build().unwrap();
//! println!("proxies live in {}", config.proxy_dir().display());
//! ```

pub mod builder;
pub mod configuration;
pub mod error;
pub mod sources;

pub use builder::ConfigurationBuilder;
pub use configuration::{
	Configuration, DEFAULT_LUCENE_HANDLER, DEFAULT_PROXY_NAMESPACE, DEFAULT_PROXY_RUNTIME_PATH,
	DesignDocument,
};
pub use error::{ConfigError, Result, SourceError};
pub use sources::{ConfigSource, ENV_PREFIX, EnvSource, TomlFileSource};
