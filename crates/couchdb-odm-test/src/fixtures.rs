//! rstest fixtures shared by the proxy tests

use crate::manager::InMemoryDocumentManager;
use couchdb_odm_proxy::ProxyRegistry;
use rstest::*;
use std::sync::Arc;
use tempfile::TempDir;

/// Empty directory for generated proxy files
#[fixture]
pub fn proxy_dir() -> TempDir {
	TempDir::new().expect("failed to create proxy directory")
}

/// A registry with no activated types
#[fixture]
pub fn registry() -> Arc<ProxyRegistry> {
	Arc::new(ProxyRegistry::new())
}

/// A manager with nothing stored
#[fixture]
pub fn manager() -> Arc<InMemoryDocumentManager> {
	Arc::new(InMemoryDocumentManager::new())
}
