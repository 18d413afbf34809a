//! Class descriptors
//!
//! A [`ClassDescriptor`] is the metadata of a mapped document type: the methods a proxy
//! has to forward and the persisted fields a proxy has to keep across a serialization cycle.
//! Descriptors are plain data so they can be built in `build.rs`, loaded from JSON files by
//! deployment tooling, or handed out by a document manager at runtime.

use serde::{Deserialize, Serialize};

/// Name of the serialization hook method
///
/// A type declaring a method with this name controls which fields survive serialization.
/// The hook is never forwarded like an ordinary method.
pub const SLEEP_HOOK: &str = "sleep";

/// Metadata describing a mapped document type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
	/// Mapped type name, e.g. `Doc\User`
	pub name: String,
	/// Rust path of the real type the generated proxy forwards to, e.g. `crate::models::User`
	pub rust_path: String,
	/// Declared methods, in declaration order
	#[serde(default)]
	pub methods: Vec<MethodSignature>,
	/// Persisted field names, in mapping order
	#[serde(default)]
	pub fields: Vec<String>,
	/// Mapping-only base type, never instantiated and never proxied
	#[serde(default)]
	pub is_mapped_superclass: bool,
}

impl ClassDescriptor {
	/// Create a descriptor with no methods and no fields
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_codegen::ClassDescriptor;
	///
	/// let class = ClassDescriptor::new("Doc\\User", "crate::models::User")
	///     .field("name")
	///     .field("email");
	///
	/// assert_eq!(class.fields, vec!["name", "email"]);
	/// assert!(!class.is_mapped_superclass);
	/// ```
	pub fn new(name: impl Into<String>, rust_path: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			rust_path: rust_path.into(),
			methods: Vec::new(),
			fields: Vec::new(),
			is_mapped_superclass: false,
		}
	}

	/// Add a persisted field
	pub fn field(mut self, name: impl Into<String>) -> Self {
		self.fields.push(name.into());
		self
	}

	/// Add a method
	pub fn method(mut self, method: MethodSignature) -> Self {
		self.methods.push(method);
		self
	}

	/// Mark the type as a mapped superclass
	pub fn mapped_superclass(mut self) -> Self {
		self.is_mapped_superclass = true;
		self
	}

	/// Whether the type declares its own serialization hook
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_codegen::{ClassDescriptor, MethodSignature, Receiver};
	///
	/// let plain = ClassDescriptor::new("Doc\\Tag", "crate::Tag");
	/// assert!(!plain.has_sleep_hook());
	///
	/// let hooked = plain.method(MethodSignature::new("sleep", Receiver::Ref));
	/// assert!(hooked.has_sleep_hook());
	/// ```
	pub fn has_sleep_hook(&self) -> bool {
		self.methods.iter().any(|m| m.name == SLEEP_HOOK)
	}

	/// Methods a proxy forwards, in declaration order
	///
	/// Public, non-final, non-static methods other than constructors and the
	/// serialization hook.
	pub fn forwardable_methods(&self) -> impl Iterator<Item = &MethodSignature> {
		self.methods.iter().filter(|m| m.is_forwardable())
	}
}

/// Method visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
	#[default]
	Public,
	Private,
}

/// How a method receives its instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
	/// `&self`
	Ref,
	/// `&mut self`
	Mut,
	/// No receiver (associated function)
	Static,
}

/// Signature of a method on a mapped type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSignature {
	pub name: String,
	#[serde(default)]
	pub visibility: Visibility,
	pub receiver: Receiver,
	#[serde(default)]
	pub is_final: bool,
	#[serde(default)]
	pub is_constructor: bool,
	#[serde(default)]
	pub parameters: Vec<Parameter>,
	/// Rust return type; `None` for `()`
	#[serde(default)]
	pub return_type: Option<String>,
	/// The method returns a borrow of `return_type` rather than a value
	#[serde(default)]
	pub returns_reference: bool,
}

impl MethodSignature {
	/// Create a public, overridable method with no parameters returning `()`
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_codegen::{MethodSignature, Parameter, Receiver};
	///
	/// let method = MethodSignature::new("rename", Receiver::Mut)
	///     .parameter(Parameter::named("name", "String"))
	///     .returns("bool");
	///
	/// assert_eq!(method.parameters.len(), 1);
	/// assert_eq!(method.return_type.as_deref(), Some("bool"));
	/// assert!(method.is_forwardable());
	/// ```
	pub fn new(name: impl Into<String>, receiver: Receiver) -> Self {
		Self {
			name: name.into(),
			visibility: Visibility::Public,
			receiver,
			is_final: false,
			is_constructor: false,
			parameters: Vec::new(),
			return_type: None,
			returns_reference: false,
		}
	}

	/// Add a parameter
	pub fn parameter(mut self, parameter: Parameter) -> Self {
		self.parameters.push(parameter);
		self
	}

	/// Set the return type
	pub fn returns(mut self, ty: impl Into<String>) -> Self {
		self.return_type = Some(ty.into());
		self
	}

	/// Set the return type, returned by reference
	pub fn returns_ref(mut self, ty: impl Into<String>) -> Self {
		self.return_type = Some(ty.into());
		self.returns_reference = true;
		self
	}

	pub fn private(mut self) -> Self {
		self.visibility = Visibility::Private;
		self
	}

	pub fn final_(mut self) -> Self {
		self.is_final = true;
		self
	}

	pub fn constructor(mut self) -> Self {
		self.is_constructor = true;
		self
	}

	/// Whether a proxy forwards this method
	pub fn is_forwardable(&self) -> bool {
		self.visibility == Visibility::Public
			&& !self.is_final
			&& self.receiver != Receiver::Static
			&& !self.is_constructor
			&& self.name != SLEEP_HOOK
	}
}

/// Declared type constraint of a parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeConstraint {
	/// No constraint; the argument is any document value
	Untyped,
	/// A list of document values
	Array,
	/// A Rust type, e.g. `String` or `Vec<u32>`
	Named(String),
}

/// Literal default value of a parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
	/// The type's `Default` value
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
	/// An empty list
	EmptyArray,
	/// Arbitrary Rust expression
	Expr(String),
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
	pub name: String,
	pub constraint: TypeConstraint,
	#[serde(default)]
	pub by_reference: bool,
	#[serde(default)]
	pub default: Option<DefaultValue>,
}

impl Parameter {
	/// Parameter with a named type constraint
	pub fn named(name: impl Into<String>, ty: impl Into<String>) -> Self {
		Self::new(name, TypeConstraint::Named(ty.into()))
	}

	/// Parameter taking a list of document values
	pub fn array(name: impl Into<String>) -> Self {
		Self::new(name, TypeConstraint::Array)
	}

	/// Parameter taking any document value
	pub fn untyped(name: impl Into<String>) -> Self {
		Self::new(name, TypeConstraint::Untyped)
	}

	pub fn new(name: impl Into<String>, constraint: TypeConstraint) -> Self {
		Self {
			name: name.into(),
			constraint,
			by_reference: false,
			default: None,
		}
	}

	/// Pass the argument by mutable reference
	pub fn by_reference(mut self) -> Self {
		self.by_reference = true;
		self
	}

	/// Declare a default value
	pub fn default_value(mut self, value: DefaultValue) -> Self {
		self.default = Some(value);
		self
	}
}
