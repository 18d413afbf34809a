//! Proxy source generation
//!
//! Renders one Rust source file per [`ClassDescriptor`]. The generated file declares a
//! wrapper struct around the runtime lazy handle and reproduces every forwardable method of
//! the real type: each forwarding method hydrates the document first, then calls the real
//! method with the same arguments.
//!
//! Generated files carry no inner attributes so they can be pulled in with `include!`.

use crate::descriptor::{
	ClassDescriptor, DefaultValue, MethodSignature, Parameter, Receiver, TypeConstraint,
};
use crate::error::{GenerateError, Result};
use crate::naming;
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Default path of the runtime crate referenced by generated code
pub const DEFAULT_RUNTIME_PATH: &str = "::couchdb_odm_proxy";

/// Name under which the initialization flag is listed by the serialization hook
pub const INITIALIZED_FIELD: &str = "__isInitialized__";

const GENERATED_BANNER: &str = "// @generated by couchdb-odm-codegen. Do not edit.";
const PROXY_TYPE_HEADER: &str = "// proxy-type: ";
const FINGERPRINT_HEADER: &str = "// fingerprint: ";

/// Metadata stored in the header comment of a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
	pub proxy_type_name: String,
	pub fingerprint: String,
}

impl ArtifactHeader {
	/// Read the header of a generated file
	///
	/// Returns `None` when the source does not start with a generated header.
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_codegen::{ArtifactHeader, ClassDescriptor, ProxyGenerator};
	///
	/// let class = ClassDescriptor::new("Doc\\User", "crate::User");
	/// let source = ProxyGenerator::new("ProxyNS").generate(&class).unwrap();
	///
	/// let header = ArtifactHeader::parse(&source).unwrap();
	/// assert_eq!(header.proxy_type_name, "ProxyNS\\__CG__\\Doc\\User");
	///
	/// assert!(ArtifactHeader::parse("pub struct Handwritten;").is_none());
	/// ```
	pub fn parse(source: &str) -> Option<Self> {
		let mut lines = source.lines();
		if lines.next()? != GENERATED_BANNER {
			return None;
		}
		let proxy_type_name = lines.next()?.strip_prefix(PROXY_TYPE_HEADER)?.to_string();
		let fingerprint = lines.next()?.strip_prefix(FINGERPRINT_HEADER)?.to_string();
		Some(Self {
			proxy_type_name,
			fingerprint,
		})
	}
}

/// Renders proxy source files from class descriptors
#[derive(Debug, Clone)]
pub struct ProxyGenerator {
	namespace: String,
	runtime_path: String,
}

impl ProxyGenerator {
	/// Create a generator for the given proxy namespace
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_codegen::ProxyGenerator;
	///
	/// let generator = ProxyGenerator::new("ProxyNS").runtime_path("::couchdb_odm::proxy");
	/// assert_eq!(generator.namespace(), "ProxyNS");
	/// ```
	pub fn new(namespace: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
		}
	}

	/// Set the path generated code uses to reach the runtime crate
	pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
		self.runtime_path = path.into();
		self
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// Fingerprint of everything that influences the generated source
	///
	/// Two artifacts with equal fingerprints are interchangeable.
	pub fn fingerprint(&self, class: &ClassDescriptor) -> String {
		let mut hasher = Sha256::new();
		hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
		hasher.update([0u8]);
		hasher.update(self.namespace.as_bytes());
		hasher.update([0u8]);
		hasher.update(self.runtime_path.as_bytes());
		hasher.update([0u8]);
		hasher.update(serde_json::to_vec(class).unwrap_or_default());
		format!("{:x}", hasher.finalize())
	}

	/// Check that the proxied types of one batch get distinct wrapper identifiers
	///
	/// Types sharing a wrapper also share an artifact file or collide once included
	/// together. Mapped superclasses are ignored since they are never generated.
	pub fn check_unique_names<'a, I>(&self, classes: I) -> Result<()>
	where
		I: IntoIterator<Item = &'a ClassDescriptor>,
	{
		let mut seen: HashMap<String, &str> = HashMap::new();
		for class in classes.into_iter().filter(|class| !class.is_mapped_superclass) {
			let struct_name = naming::proxy_struct_name(&class.name);
			if let Some(first) = seen.insert(struct_name.clone(), &class.name) {
				return Err(GenerateError::DuplicateProxyName {
					struct_name,
					first: first.to_string(),
					second: class.name.clone(),
				});
			}
		}
		Ok(())
	}

	/// Generate the complete source file for a class
	pub fn generate(&self, class: &ClassDescriptor) -> Result<String> {
		let tokens = self.generate_tokens(class)?;
		let file: syn::File = syn::parse2(tokens).map_err(|e| GenerateError::Render {
			type_name: class.name.clone(),
			reason: e.to_string(),
		})?;

		let mut content = String::new();
		content.push_str(GENERATED_BANNER);
		content.push('\n');
		content.push_str(PROXY_TYPE_HEADER);
		content.push_str(&naming::proxy_type_name(&class.name, &self.namespace));
		content.push('\n');
		content.push_str(FINGERPRINT_HEADER);
		content.push_str(&self.fingerprint(class));
		content.push_str("\n\n");
		content.push_str(&prettyplease::unparse(&file));

		Ok(content)
	}

	/// Generate the token stream of the proxy items for a class
	pub fn generate_tokens(&self, class: &ClassDescriptor) -> Result<TokenStream> {
		if class.is_mapped_superclass {
			return Err(GenerateError::MappedSuperclass(class.name.clone()));
		}

		let runtime = self.runtime()?;
		let real = parse_path(&class.rust_path, &format!("`{}`", class.name))?;
		let struct_name = parse_ident(
			&naming::proxy_struct_name(&class.name),
			&format!("proxy of `{}`", class.name),
		)?;
		let proxy_type_name = naming::proxy_type_name(&class.name, &self.namespace);
		let doc = format!(" Lazy-loading proxy for `{}`.", class.name);

		let methods = class
			.forwardable_methods()
			.map(|method| self.generate_method(class, method, &runtime))
			.collect::<Result<Vec<_>>>()?;
		let sleep = self.generate_sleep(class);

		Ok(quote! {
			#[doc = #doc]
			pub struct #struct_name {
				inner: #runtime::Proxy<#real>,
			}

			impl #runtime::ProxyClass for #struct_name {
				type Document = #real;

				const PROXY_TYPE_NAME: &'static str = #proxy_type_name;

				fn from_proxy(inner: #runtime::Proxy<#real>) -> Self {
					Self { inner }
				}

				fn proxy(&self) -> &#runtime::Proxy<#real> {
					&self.inner
				}

				fn proxy_mut(&mut self) -> &mut #runtime::Proxy<#real> {
					&mut self.inner
				}

				fn into_proxy(self) -> #runtime::Proxy<#real> {
					self.inner
				}

				fn sleep(&self) -> ::std::vec::Vec<::std::string::String> {
					#sleep
				}
			}

			impl #struct_name {
				#(#methods)*
			}
		})
	}

	fn runtime(&self) -> Result<syn::Path> {
		syn::parse_str(&self.runtime_path).map_err(|e| GenerateError::InvalidType {
			ty: self.runtime_path.clone(),
			context: "runtime path".to_string(),
			reason: e.to_string(),
		})
	}

	/// Generate one forwarding method
	fn generate_method(
		&self,
		class: &ClassDescriptor,
		method: &MethodSignature,
		runtime: &syn::Path,
	) -> Result<TokenStream> {
		let context = format!("`{}::{}`", class.name, method.name);
		let name = parse_ident(&method.name, &context)?;

		let mut params = Vec::with_capacity(method.parameters.len());
		let mut args = Vec::with_capacity(method.parameters.len());
		for parameter in &method.parameters {
			let param_context = format!("parameter `{}` of {}", parameter.name, context);
			let param_name = parse_ident(&parameter.name, &param_context)?;
			let ty = parameter_type(parameter, runtime, &param_context)?;

			match &parameter.default {
				Some(_) if parameter.by_reference => {
					return Err(GenerateError::ReferenceWithDefault {
						method: method.name.clone(),
						parameter: parameter.name.clone(),
					});
				}
				Some(default) => {
					params.push(quote!(#param_name: ::std::option::Option<#ty>));
					args.push(default_argument(&param_name, default, &param_context)?);
				}
				None => {
					params.push(quote!(#param_name: #ty));
					args.push(quote!(#param_name));
				}
			}
		}

		let returned = match &method.return_type {
			Some(ty) => {
				let ty = parse_type(ty, &format!("return type of {}", context))?;
				quote!(#ty)
			}
			None => quote!(()),
		};
		let returned = match (method.returns_reference, method.receiver) {
			(true, Receiver::Mut) => quote!(&mut #returned),
			(true, _) => quote!(&#returned),
			(false, _) => returned,
		};
		let target = match method.receiver {
			Receiver::Mut => quote!(self.inner.document_mut()),
			_ => quote!(self.inner.document()),
		};
		let doc = format!(
			" Forwards to `{}::{}` once the document is hydrated.",
			class.name, method.name
		);

		Ok(quote! {
			#[doc = #doc]
			pub fn #name(&mut self, #(#params),*) -> #runtime::Result<#returned> {
				self.inner.load()?;
				::std::result::Result::Ok(#target.#name(#(#args),*))
			}
		})
	}

	/// Generate the body of the serialization hook
	///
	/// With a declared hook the names are resolved at runtime by the lazy handle, which
	/// falls back to every persisted field when the hook returns nothing.
	fn generate_sleep(&self, class: &ClassDescriptor) -> TokenStream {
		if class.has_sleep_hook() {
			quote! {
				self.inner.sleep_names()
			}
		} else {
			let names = std::iter::once(INITIALIZED_FIELD).chain(class.fields.iter().map(String::as_str));
			quote! {
				[#(#names),*]
					.iter()
					.map(|name| ::std::string::String::from(*name))
					.collect()
			}
		}
	}
}

/// Type of a parameter as seen by the caller, before defaults are applied
fn parameter_type(
	parameter: &Parameter,
	runtime: &syn::Path,
	context: &str,
) -> Result<TokenStream> {
	let base = match &parameter.constraint {
		TypeConstraint::Untyped => quote!(#runtime::Value),
		TypeConstraint::Array => quote!(::std::vec::Vec<#runtime::Value>),
		TypeConstraint::Named(ty) => {
			let ty = parse_type(ty, context)?;
			quote!(#ty)
		}
	};
	Ok(if parameter.by_reference {
		quote!(&mut #base)
	} else {
		base
	})
}

/// Argument expression substituting the declared default for `None`
fn default_argument(
	name: &syn::Ident,
	default: &DefaultValue,
	context: &str,
) -> Result<TokenStream> {
	Ok(match default {
		DefaultValue::Null | DefaultValue::EmptyArray => quote!(#name.unwrap_or_default()),
		DefaultValue::Bool(value) => quote!(#name.unwrap_or(#value)),
		DefaultValue::Int(value) => {
			let literal = Literal::u64_unsuffixed(value.unsigned_abs());
			if *value < 0 {
				quote!(#name.unwrap_or(-#literal))
			} else {
				quote!(#name.unwrap_or(#literal))
			}
		}
		DefaultValue::Float(value) => {
			if !value.is_finite() {
				return Err(GenerateError::InvalidDefault {
					expr: value.to_string(),
					context: context.to_string(),
					reason: "not a finite number".to_string(),
				});
			}
			let literal = Literal::f64_unsuffixed(value.abs());
			if value.is_sign_negative() {
				quote!(#name.unwrap_or(-#literal))
			} else {
				quote!(#name.unwrap_or(#literal))
			}
		}
		DefaultValue::Str(value) => {
			quote!(#name.unwrap_or_else(|| ::std::convert::Into::into(#value)))
		}
		DefaultValue::Expr(expr) => {
			let parsed: syn::Expr =
				syn::parse_str(expr).map_err(|e| GenerateError::InvalidDefault {
					expr: expr.clone(),
					context: context.to_string(),
					reason: e.to_string(),
				})?;
			quote!(#name.unwrap_or_else(|| #parsed))
		}
	})
}

fn parse_ident(name: &str, context: &str) -> Result<syn::Ident> {
	syn::parse_str(name).map_err(|_| GenerateError::InvalidIdentifier {
		name: name.to_string(),
		context: context.to_string(),
	})
}

fn parse_type(ty: &str, context: &str) -> Result<syn::Type> {
	syn::parse_str(ty).map_err(|e| GenerateError::InvalidType {
		ty: ty.to_string(),
		context: context.to_string(),
		reason: e.to_string(),
	})
}

fn parse_path(path: &str, context: &str) -> Result<syn::Path> {
	syn::parse_str(path).map_err(|e| GenerateError::InvalidType {
		ty: path.to_string(),
		context: context.to_string(),
		reason: e.to_string(),
	})
}
