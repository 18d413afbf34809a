//! # couchdb-odm test
//!
//! Testing utilities for couchdb-odm.
//!
//! - [`InMemoryDocumentManager`]: a document manager over an in-memory store that records
//!   every refresh, with hooks to observe or fail hydration
//! - [`fixtures`]: rstest fixtures for proxy directories, registries and managers
//! - [`logging::init_test_logging`]: `tracing` output in tests
//!
//! ```rust
//! use couchdb_odm_test::InMemoryDocumentManager;
//! use serde_json::json;
//!
//! let manager = InMemoryDocumentManager::new().with_document("user/42", json!({ "name": "Ada" }));
//! assert_eq!(manager.refresh_count(), 0);
//! ```

pub mod fixtures;
pub mod logging;
pub mod manager;

pub use manager::{InMemoryDocumentManager, RefreshProbe, RefreshRecord};
