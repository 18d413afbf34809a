//! # couchdb-odm
//!
//! Object-document mapper for CouchDB-style document stores.
//!
//! This crate re-exports the workspace crates behind feature flags:
//!
//! - `conf` - [`Configuration`] and its layered TOML / environment sources
//! - `proxy` - lazy-loading document proxies: [`ProxyFactory`], [`Proxy`], generated
//!   wrappers implementing [`ProxyClass`], and the `codegen` module used from `build.rs`
//! - `test` - testing utilities (in-memory document manager, fixtures, test logging)
//! - `full` (default) - `conf` and `proxy`
//!
//! ## Lazy references
//!
//! ```rust,ignore
//! use couchdb_odm::prelude::*;
//! use std::sync::Arc;
//!
//! let mut config = Configuration::default();
//! config.set_proxy_dir("target/proxies");
//! config.set_proxy_namespace("ProxyNS");
//!
//! let factory = ProxyFactory::from_configuration(manager, Arc::new(ProxyRegistry::new()), &config)?;
//! let mut user = factory.get_proxy_class::<DocUserProxy>("user/42")?;
//!
//! assert!(!user.is_initialized());
//! println!("{}", user.name()?); // hydrates through the manager
//! assert!(user.is_initialized());
//! ```
//!
//! ## Ahead-of-time proxy generation
//!
//! Proxies are Rust source generated from class descriptors, either at build time
//! (`codegen::ProxyGenerator` from `build.rs`, then `include!`) or with the
//! `generate-proxies` command before deployment.

#[cfg(feature = "conf")]
pub use couchdb_odm_conf as conf;

#[cfg(feature = "proxy")]
pub use couchdb_odm_codegen as codegen;

#[cfg(feature = "proxy")]
pub use couchdb_odm_proxy as proxy;

#[cfg(feature = "test")]
pub use couchdb_odm_test as test;

// Re-export configuration
#[cfg(feature = "conf")]
pub use couchdb_odm_conf::{ConfigError, Configuration, ConfigurationBuilder, DesignDocument};

// Re-export proxy types
#[cfg(feature = "proxy")]
pub use couchdb_odm_proxy::{
	ClassDescriptor, Document, DocumentManager, Hydratable, Proxy, ProxyClass, ProxyError,
	ProxyFactory, ProxyRegistry, SleepState,
};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "conf")]
	pub use crate::{Configuration, ConfigurationBuilder};

	#[cfg(feature = "proxy")]
	pub use crate::{
		ClassDescriptor, Document, DocumentManager, Hydratable, Proxy, ProxyClass, ProxyError,
		ProxyFactory, ProxyRegistry,
	};
}
