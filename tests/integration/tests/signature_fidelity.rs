//! Forwarded methods behave exactly like the real methods on a loaded document

use couchdb_odm::proxy::{ProxyClass, ProxyFactory};
use couchdb_odm::test::InMemoryDocumentManager;
use couchdb_odm::test::fixtures::proxy_dir;
use couchdb_odm_integration_tests::models::{Article, EXCERPT_LENGTH, User};
use couchdb_odm_integration_tests::proxies::{BlogArticleProxy, DocUserProxy};
use couchdb_odm_integration_tests::{factory, seeded_manager};
use rstest::*;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;

struct Loaded {
	factory: ProxyFactory,
	_proxy_dir: TempDir,
}

impl Loaded {
	fn user_proxy(&self) -> DocUserProxy {
		self.factory.get_proxy_class("user/42").unwrap()
	}

	/// A directly loaded user
	fn user(&self) -> User {
		self.factory
			.get_proxy::<User>("user/42")
			.unwrap()
			.into_document()
			.unwrap()
	}

	fn article_proxy(&self) -> BlogArticleProxy {
		self.factory.get_proxy_class("article/7").unwrap()
	}

	fn article(&self) -> Article {
		self.factory
			.get_proxy::<Article>("article/7")
			.unwrap()
			.into_document()
			.unwrap()
	}
}

#[fixture]
fn loaded(proxy_dir: TempDir) -> Loaded {
	let manager: Arc<InMemoryDocumentManager> = Arc::new(seeded_manager());
	Loaded {
		factory: factory(manager, proxy_dir.path(), true),
		_proxy_dir: proxy_dir,
	}
}

#[rstest]
#[case(Some(1))]
#[case(Some(3))]
#[case(None)]
fn test_typed_array_reference_and_default_parameters(loaded: Loaded, #[case] limit: Option<usize>) {
	// Arrange
	let real = loaded.user();
	let mut proxy = loaded.user_proxy();
	let extra = vec![json!(1), json!("two"), Value::Null];
	let mut real_log = vec!["start".to_string()];
	let mut proxy_log = vec!["start".to_string()];

	// Act
	let expected = real.summarize(
		"> ".to_string(),
		extra.clone(),
		&mut real_log,
		limit.unwrap_or(2),
	);
	let actual = proxy
		.summarize("> ".to_string(), extra, &mut proxy_log, limit)
		.unwrap();

	// Assert
	assert_eq!(actual, expected);
	assert_eq!(proxy_log, real_log);
}

#[rstest]
#[case(None, None, "Hello".to_string(), false)]
#[case(Some("Hi".to_string()), None, "Hi".to_string(), false)]
#[case(None, Some(true), "Hello".to_string(), true)]
fn test_literal_defaults(
	loaded: Loaded,
	#[case] greeting: Option<String>,
	#[case] shout: Option<bool>,
	#[case] real_greeting: String,
	#[case] real_shout: bool,
) {
	let real = loaded.user();
	let mut proxy = loaded.user_proxy();

	assert_eq!(
		proxy.greet(greeting, shout).unwrap(),
		real.greet(real_greeting, real_shout)
	);
}

#[rstest]
#[case(json!("new"))]
#[case(json!(5))]
#[case(json!({ "kind": "label" }))]
fn test_untyped_parameter(loaded: Loaded, #[case] tag: Value) {
	let mut real = loaded.user();
	let mut proxy = loaded.user_proxy();

	assert_eq!(proxy.tag(tag.clone()).unwrap(), real.tag(tag.clone()));
	assert_eq!(proxy.merge_tags(None).unwrap(), real.merge_tags(Vec::new()));
}

#[rstest]
fn test_mutations_reach_the_document(loaded: Loaded) {
	// Arrange
	let mut proxy = loaded.user_proxy();

	// Act
	proxy.rename("Grace".to_string()).unwrap();
	*proxy.visits_mut().unwrap() += 1;

	// Assert
	assert_eq!(proxy.name().unwrap(), "Grace");
	assert_eq!(proxy.proxy().document().revision(), 5);
	assert_eq!(
		proxy
			.merge_tags(Some(vec!["extra".to_string()]))
			.unwrap()
			.last()
			.map(String::as_str),
		Some("extra")
	);
}

#[rstest]
fn test_float_null_and_expression_defaults(loaded: Loaded) {
	// Arrange
	let mut real = loaded.article();
	let mut proxy = loaded.article_proxy();

	// Act & Assert
	assert_eq!(
		proxy.reading_minutes(None).unwrap(),
		real.reading_minutes(200.0)
	);
	assert_eq!(
		proxy.reading_minutes(Some(60.0)).unwrap(),
		real.reading_minutes(60.0)
	);
	assert_eq!(
		proxy.excerpt(None).unwrap(),
		real.excerpt(EXCERPT_LENGTH)
	);
	assert_eq!(proxy.excerpt(Some(3)).unwrap(), "The");

	assert_eq!(proxy.publish(None).unwrap(), real.publish(None));
	assert_eq!(
		proxy
			.publish(Some(Some("2024-05-01".to_string())))
			.unwrap(),
		real.publish(Some("2024-05-01".to_string()))
	);
	assert_eq!(proxy.proxy().document().published_at(), Some("2024-05-01"));
	assert_eq!(proxy.word_count().unwrap(), real.word_count());
}

#[rstest]
fn test_static_members_stay_on_the_real_type(loaded: Loaded) {
	let mut proxy = loaded.user_proxy();

	// Constructors, associated functions, private and final methods are not forwarded;
	// they remain reachable on the real type.
	assert_eq!(User::collection(), "users");
	assert_eq!(User::new("Grace").name(), "Grace");
	assert_eq!(proxy.name().unwrap(), "Ada");
	assert_eq!(proxy.proxy().document().revision(), 4);
}
