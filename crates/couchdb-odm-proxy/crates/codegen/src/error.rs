//! Error types for proxy source generation.

/// Result type for code generation
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors raised while rendering a proxy from a [`ClassDescriptor`](crate::ClassDescriptor)
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
	#[error("`{name}` is not a valid identifier in {context}")]
	InvalidIdentifier { name: String, context: String },

	#[error("cannot parse type `{ty}` of {context}: {reason}")]
	InvalidType {
		ty: String,
		context: String,
		reason: String,
	},

	#[error("cannot parse default value `{expr}` of {context}: {reason}")]
	InvalidDefault {
		expr: String,
		context: String,
		reason: String,
	},

	#[error("by-reference parameter `{parameter}` of `{method}` cannot declare a default value")]
	ReferenceWithDefault { method: String, parameter: String },

	#[error("`{0}` is a mapped superclass and is never proxied")]
	MappedSuperclass(String),

	/// Two types of one generation batch would share a wrapper identifier or file
	#[error("`{first}` and `{second}` both generate proxy `{struct_name}`")]
	DuplicateProxyName {
		struct_name: String,
		first: String,
		second: String,
	},

	#[error("generated source for `{type_name}` does not parse: {reason}")]
	Render { type_name: String, reason: String },
}
