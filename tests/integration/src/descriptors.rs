//! Class descriptors of the test models
//!
//! Shared with `build.rs`, which generates the proxies from them.

use couchdb_odm_codegen::{ClassDescriptor, DefaultValue, MethodSignature, Parameter, Receiver};

/// Namespace the test proxies are generated under
pub const PROXY_NAMESPACE: &str = "ProxyNS";

/// Path generated proxies use to reach the runtime
pub const RUNTIME_PATH: &str = "::couchdb_odm::proxy";

/// `Doc\User`: a type without a serialization hook
pub fn user() -> ClassDescriptor {
	ClassDescriptor::new("Doc\\User", "crate::models::User")
		.field("name")
		.field("email")
		.field("tags")
		.field("visits")
		.method(MethodSignature::new("new", Receiver::Static).constructor())
		.method(MethodSignature::new("collection", Receiver::Static).returns("&'static str"))
		.method(MethodSignature::new("name", Receiver::Ref).returns_ref("str"))
		.method(MethodSignature::new("email", Receiver::Ref).returns("Option<String>"))
		.method(
			MethodSignature::new("rename", Receiver::Mut)
				.parameter(Parameter::named("name", "String")),
		)
		.method(
			MethodSignature::new("greet", Receiver::Ref)
				.parameter(
					Parameter::named("greeting", "String")
						.default_value(DefaultValue::Str("Hello".to_string())),
				)
				.parameter(
					Parameter::named("shout", "bool").default_value(DefaultValue::Bool(false)),
				)
				.returns("String"),
		)
		.method(
			MethodSignature::new("summarize", Receiver::Ref)
				.parameter(Parameter::named("prefix", "String"))
				.parameter(Parameter::array("extra"))
				.parameter(Parameter::named("log", "Vec<String>").by_reference())
				.parameter(Parameter::named("limit", "usize").default_value(DefaultValue::Int(2)))
				.returns("String"),
		)
		.method(
			MethodSignature::new("tag", Receiver::Mut)
				.parameter(Parameter::untyped("tag"))
				.returns("usize"),
		)
		.method(
			MethodSignature::new("merge_tags", Receiver::Ref)
				.parameter(
					Parameter::named("extra", "Vec<String>")
						.default_value(DefaultValue::EmptyArray),
				)
				.returns("Vec<String>"),
		)
		.method(MethodSignature::new("visits_mut", Receiver::Mut).returns_ref("u32"))
		.method(MethodSignature::new("normalized_email", Receiver::Ref).private())
		.method(
			MethodSignature::new("revision", Receiver::Ref)
				.final_()
				.returns("u32"),
		)
}

/// `Blog\Article`: a type with a serialization hook
pub fn article() -> ClassDescriptor {
	ClassDescriptor::new("Blog\\Article", "crate::models::Article")
		.field("title")
		.field("body")
		.field("author")
		.field("published_at")
		.method(MethodSignature::new("title", Receiver::Ref).returns("String"))
		.method(MethodSignature::new("word_count", Receiver::Ref).returns("usize"))
		.method(
			MethodSignature::new("reading_minutes", Receiver::Ref)
				.parameter(
					Parameter::named("words_per_minute", "f64")
						.default_value(DefaultValue::Float(200.0)),
				)
				.returns("f64"),
		)
		.method(
			MethodSignature::new("publish", Receiver::Mut)
				.parameter(
					Parameter::named("at", "Option<String>").default_value(DefaultValue::Null),
				)
				.returns("bool"),
		)
		.method(
			MethodSignature::new("excerpt", Receiver::Ref)
				.parameter(
					Parameter::named("max_chars", "usize")
						.default_value(DefaultValue::Expr("crate::models::EXCERPT_LENGTH".to_string())),
				)
				.returns("String"),
		)
		.method(MethodSignature::new("sleep", Receiver::Ref).returns("Vec<String>"))
}

/// `Doc\Base`: a mapping base, never proxied
pub fn base() -> ClassDescriptor {
	ClassDescriptor::new("Doc\\Base", "crate::models::Base")
		.field("created_at")
		.mapped_superclass()
}

pub fn all() -> Vec<ClassDescriptor> {
	vec![user(), article(), base()]
}
