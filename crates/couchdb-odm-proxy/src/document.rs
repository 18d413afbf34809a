//! Mapped document types and the manager that hydrates them

use crate::error::Result;
use couchdb_odm_codegen::ClassDescriptor;
use serde_json::Value;
use std::sync::Arc;

/// A mapped document type
///
/// Field access goes through JSON values so that a manager can populate any mapped type
/// without knowing it statically.
///
/// # Examples
///
/// ```
/// use couchdb_odm_proxy::{Document, ProxyError, Result, Value};
///
/// #[derive(Default)]
/// struct User {
///     name: String,
/// }
///
/// impl Document for User {
///     const TYPE_NAME: &'static str = "Doc\\User";
///     const FIELDS: &'static [&'static str] = &["name"];
///
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(Value::from(self.name.clone())),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
///         match name {
///             "name" => self.name = serde_json::from_value(value)?,
///             _ => return Err(ProxyError::unknown_field(Self::TYPE_NAME, name)),
///         }
///         Ok(())
///     }
/// }
///
/// let mut user = User::default();
/// user.set_field("name", Value::from("Ada")).unwrap();
/// assert_eq!(user.field("name"), Some(Value::from("Ada")));
/// ```
pub trait Document: Default + Send + Sync + 'static {
	/// Mapped type name, e.g. `Doc\User`
	const TYPE_NAME: &'static str;

	/// Persisted field names, in mapping order
	const FIELDS: &'static [&'static str];

	/// Current value of a persisted field
	fn field(&self, name: &str) -> Option<Value>;

	/// Overwrite a persisted field
	fn set_field(&mut self, name: &str, value: Value) -> Result<()>;

	/// Serialization hook
	///
	/// Returns the field names to keep when the document is serialized, or `None` when the
	/// type does not restrict them.
	fn sleep(&self) -> Option<Vec<String>> {
		None
	}
}

/// Object-safe view of an instance a manager can populate
pub trait Hydratable {
	/// Document key
	fn identifier(&self) -> &str;

	/// Mapped type name of the underlying document
	fn type_name(&self) -> &str;

	fn is_initialized(&self) -> bool;

	fn field(&self, name: &str) -> Option<Value>;

	fn set_field(&mut self, name: &str, value: Value) -> Result<()>;

	fn field_names(&self) -> &'static [&'static str];

	/// Trigger hydration
	///
	/// A no-op once the instance is initialized, including while the manager is still
	/// populating it.
	fn load(&mut self) -> Result<()>;
}

/// The persistence collaborator that proxies hydrate through
pub trait DocumentManager: Send + Sync {
	/// Populate an instance from the current storage state of its identifier
	///
	/// Must accept instances whose fields are still at their defaults.
	fn refresh(&self, document: &mut dyn Hydratable) -> Result<()>;

	/// Descriptor of a mapped type
	fn class_descriptor(&self, type_name: &str) -> Result<Arc<ClassDescriptor>>;
}
