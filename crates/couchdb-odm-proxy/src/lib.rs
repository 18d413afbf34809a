//! # couchdb-odm proxy
//!
//! Lazy-loading stand-ins for documents that have not been read yet.
//!
//! A [`ProxyFactory`] hands out [`Proxy`] handles for a mapped type and an identifier. The
//! handle holds the [`DocumentManager`] until the first access, which asks the manager to
//! populate the document exactly once. Generated wrappers (see `couchdb-odm-codegen`) expose the
//! real type's methods on top of the handle and implement [`ProxyClass`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use couchdb_odm_proxy::{ProxyFactory, ProxyRegistry};
//! use std::sync::Arc;
//!
//! let factory = ProxyFactory::new(manager, Arc::new(ProxyRegistry::new()), "proxies", "ProxyNS", true)?;
//! let mut user = factory.get_proxy::<User>("user/42")?;
//! assert!(!user.is_initialized());
//!
//! // Reads the document through the manager.
//! println!("{}", user.get()?.name());
//! ```

pub mod artifact;
pub mod document;
pub mod error;
pub mod factory;
pub mod lazy;
pub mod registry;

pub use couchdb_odm_codegen as codegen;
pub use couchdb_odm_codegen::{ClassDescriptor, ProxyGenerator};

pub use artifact::ArtifactStore;
pub use document::{Document, DocumentManager, Hydratable};
pub use error::{ProxyError, Result};
pub use factory::ProxyFactory;
pub use lazy::{Proxy, ProxyClass, SleepState};
pub use registry::{ProxyRegistry, ProxyTypeHandle};
pub use serde_json::Value;
