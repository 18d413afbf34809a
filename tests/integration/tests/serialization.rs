//! Serializing proxies and restoring them later

use couchdb_odm::proxy::{DocumentManager, Proxy, ProxyClass, ProxyError, SleepState};
use couchdb_odm::test::InMemoryDocumentManager;
use couchdb_odm::test::fixtures::proxy_dir;
use couchdb_odm_integration_tests::models::{Article, User};
use couchdb_odm_integration_tests::proxies::{BlogArticleProxy, DocUserProxy};
use couchdb_odm_integration_tests::{factory, seeded_manager};
use rstest::*;
use std::sync::Arc;
use tempfile::TempDir;

#[fixture]
fn manager() -> Arc<InMemoryDocumentManager> {
	Arc::new(seeded_manager())
}

fn round_trip(state: &SleepState) -> SleepState {
	let json = serde_json::to_string(state).unwrap();
	serde_json::from_str(&json).unwrap()
}

#[rstest]
fn test_uninitialized_proxy_round_trip(manager: Arc<InMemoryDocumentManager>, proxy_dir: TempDir) {
	// Arrange
	let factory = factory(Arc::clone(&manager), proxy_dir.path(), true);
	let user: DocUserProxy = factory.get_proxy_class("user/42").unwrap();

	// Act
	let mut restored = DocUserProxy::wakeup(round_trip(&user.sleep_state())).unwrap();

	// Assert
	assert_eq!(restored.identifier(), "user/42");
	assert!(!restored.is_initialized());

	// Without a manager the restored proxy keeps its defaults.
	assert_eq!(restored.name().unwrap(), "");
	assert!(!restored.is_initialized());
	assert_eq!(manager.refresh_count(), 0);

	let live: Arc<dyn DocumentManager> = manager.clone();
	restored.proxy_mut().bind_manager(live);
	assert_eq!(restored.name().unwrap(), "Ada");
	assert!(restored.is_initialized());
	assert_eq!(manager.refresh_count(), 1);
}

#[rstest]
fn test_hook_free_type_lists_every_field(manager: Arc<InMemoryDocumentManager>, proxy_dir: TempDir) {
	let factory = factory(manager, proxy_dir.path(), true);
	let mut user: DocUserProxy = factory.get_proxy_class("user/42").unwrap();

	assert_eq!(
		user.sleep(),
		vec!["__isInitialized__", "name", "email", "tags", "visits"]
	);

	user.name().unwrap();
	let state = user.sleep_state();
	assert!(state.initialized);
	assert_eq!(
		state.fields.keys().collect::<Vec<_>>(),
		vec!["name", "email", "tags", "visits"]
	);
}

#[rstest]
fn test_serialization_hook_limits_fields(
	manager: Arc<InMemoryDocumentManager>,
	proxy_dir: TempDir,
) {
	// Arrange
	let factory = factory(Arc::clone(&manager), proxy_dir.path(), true);
	let mut article: BlogArticleProxy = factory.get_proxy_class("article/7").unwrap();
	let title = article.title().unwrap();

	// Act
	let state = round_trip(&article.sleep_state());
	let mut restored = BlogArticleProxy::wakeup(state.clone()).unwrap();

	// Assert
	assert_eq!(article.sleep(), vec!["__isInitialized__", "title", "author"]);
	assert!(state.initialized);
	assert!(!state.fields.contains_key("body"));
	assert!(restored.is_initialized());
	assert_eq!(restored.title().unwrap(), title);
	assert_eq!(restored.word_count().unwrap(), 0);
	assert_eq!(manager.refresh_count(), 1);
}

#[rstest]
fn test_plain_handle_serde(manager: Arc<InMemoryDocumentManager>, proxy_dir: TempDir) {
	// Arrange
	let factory = factory(Arc::clone(&manager), proxy_dir.path(), true);
	let pending = factory.get_proxy::<User>("user/42").unwrap();
	let mut loaded = factory.get_proxy::<User>("user/42").unwrap();
	loaded.load().unwrap();

	// Act
	let pending_json = serde_json::to_value(&pending).unwrap();
	let loaded_json = serde_json::to_value(&loaded).unwrap();
	let restored: Proxy<User> = serde_json::from_value(loaded_json.clone()).unwrap();

	// Assert
	assert_eq!(pending_json["__isInitialized__"], false);
	assert!(pending_json.get("fields").is_none());
	assert_eq!(loaded_json["fields"]["tags"][0], "math");
	assert_eq!(restored.proxy_type_name(), "ProxyNS\\__CG__\\Doc\\User");
	assert!(!restored.has_manager());
	assert_eq!(restored.document(), loaded.document());
}

#[rstest]
fn test_empty_hook_falls_back_to_every_field(
	manager: Arc<InMemoryDocumentManager>,
	proxy_dir: TempDir,
) {
	// Arrange
	let factory = factory(manager, proxy_dir.path(), true);
	let article: BlogArticleProxy = factory.get_proxy_class("article/7").unwrap();
	let handle = factory.get_proxy::<Article>("article/7").unwrap();

	// Act
	let wrapper_names = article.sleep();
	let handle_names = handle.sleep_names();

	// Assert
	assert_eq!(
		wrapper_names,
		vec!["__isInitialized__", "title", "body", "author", "published_at"]
	);
	assert_eq!(wrapper_names, handle_names);
}

#[rstest]
fn test_state_of_another_type_is_not_restored(
	manager: Arc<InMemoryDocumentManager>,
	proxy_dir: TempDir,
) {
	let factory = factory(manager, proxy_dir.path(), true);
	let article: BlogArticleProxy = factory.get_proxy_class("article/7").unwrap();

	let result = DocUserProxy::wakeup(round_trip(&article.sleep_state()));

	assert!(matches!(
		result,
		Err(ProxyError::ProxyTypeMismatch { expected, .. }) if expected == "Doc\\User"
	));
}
