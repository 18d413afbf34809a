//! The lazy document handle
//!
//! [`Proxy`] stands in for a document that has not been read from storage yet. It starts
//! uninitialized and holds the manager it will hydrate through; the first hydration request
//! consumes that manager, so hydration happens at most once per instance.

use crate::document::{Document, DocumentManager, Hydratable};
use crate::error::{ProxyError, Result};
use couchdb_odm_codegen::{INITIALIZED_FIELD, naming};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Serialized form of a proxy
///
/// The identifier and the initialization flag are always present. Field values are only
/// captured once the document has been hydrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepState {
	pub identifier: String,
	pub proxy_type_name: String,
	#[serde(rename = "__isInitialized__")]
	pub initialized: bool,
	#[serde(default, skip_serializing_if = "IndexMap::is_empty")]
	pub fields: IndexMap<String, Value>,
}

/// Lazy handle for a document of type `T`
pub struct Proxy<T: Document> {
	identifier: String,
	proxy_type_name: String,
	initialized: bool,
	hydrator: Option<Arc<dyn DocumentManager>>,
	document: T,
}

impl<T: Document> Proxy<T> {
	/// Create an uninitialized handle bound to a manager
	pub fn new(
		identifier: impl Into<String>,
		proxy_type_name: impl Into<String>,
		manager: Arc<dyn DocumentManager>,
	) -> Self {
		Self {
			identifier: identifier.into(),
			proxy_type_name: proxy_type_name.into(),
			initialized: false,
			hydrator: Some(manager),
			document: T::default(),
		}
	}

	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	pub fn proxy_type_name(&self) -> &str {
		&self.proxy_type_name
	}

	pub fn is_initialized(&self) -> bool {
		self.initialized
	}

	/// Whether a manager is still bound for hydration
	pub fn has_manager(&self) -> bool {
		self.hydrator.is_some()
	}

	/// Hydrate the document if this has not happened yet
	///
	/// The instance is marked initialized before the manager runs, so hydration requests
	/// issued while the manager populates it are no-ops. A failed refresh is returned as is
	/// and is not retried by later calls. Without a bound manager nothing happens and the
	/// instance stays uninitialized.
	pub fn load(&mut self) -> Result<()> {
		if self.initialized {
			return Ok(());
		}

		let Some(manager) = self.hydrator.take() else {
			tracing::debug!(
				identifier = %self.identifier,
				proxy_type = %self.proxy_type_name,
				"No document manager bound, skipping hydration"
			);
			return Ok(());
		};

		self.initialized = true;
		manager.refresh(self)
	}

	/// Hydrate, then borrow the document
	pub fn get(&mut self) -> Result<&T> {
		self.load()?;
		Ok(&self.document)
	}

	/// Hydrate, then borrow the document mutably
	pub fn get_mut(&mut self) -> Result<&mut T> {
		self.load()?;
		Ok(&mut self.document)
	}

	/// Borrow the document as it currently is, without hydrating
	pub fn document(&self) -> &T {
		&self.document
	}

	/// Borrow the document mutably as it currently is, without hydrating
	pub fn document_mut(&mut self) -> &mut T {
		&mut self.document
	}

	/// Hydrate, then take the document out of the handle
	pub fn into_document(mut self) -> Result<T> {
		self.load()?;
		Ok(self.document)
	}

	/// Attach a manager to a handle restored from its serialized form
	///
	/// Initialized handles never hydrate again, so the manager is ignored for them.
	pub fn bind_manager(&mut self, manager: Arc<dyn DocumentManager>) {
		if self.initialized {
			tracing::debug!(
				identifier = %self.identifier,
				"Handle already initialized, not binding a manager"
			);
			return;
		}
		self.hydrator = Some(manager);
	}

	/// Field names kept by [`Serialize`]: the document's serialization hook, else every
	/// persisted field
	pub fn sleep_names(&self) -> Vec<String> {
		let mut names = vec![INITIALIZED_FIELD.to_string()];
		match self.document.sleep() {
			Some(hooked) => names.extend(hooked),
			None => names.extend(T::FIELDS.iter().map(|name| name.to_string())),
		}
		names
	}

	/// Capture the serialized form, keeping the given field names
	pub fn sleep_state(&self, names: &[String]) -> SleepState {
		let fields = if self.initialized {
			names
				.iter()
				.filter(|name| name.as_str() != INITIALIZED_FIELD)
				.filter_map(|name| {
					self.document
						.field(name)
						.map(|value| (name.clone(), value))
				})
				.collect()
		} else {
			IndexMap::new()
		};

		SleepState {
			identifier: self.identifier.clone(),
			proxy_type_name: self.proxy_type_name.clone(),
			initialized: self.initialized,
			fields,
		}
	}

	/// Restore a handle from its serialized form
	///
	/// The restored handle has no manager; see [`Proxy::bind_manager`]. A state captured
	/// from another document type is rejected.
	pub fn wakeup(state: SleepState) -> Result<Self> {
		let expected = naming::canonical_type_name(T::TYPE_NAME);
		if naming::proxied_type_name(&state.proxy_type_name) != Some(expected.as_str()) {
			return Err(ProxyError::ProxyTypeMismatch {
				expected,
				found: state.proxy_type_name,
			});
		}

		let mut document = T::default();
		for (name, value) in state.fields {
			document.set_field(&name, value)?;
		}

		Ok(Self {
			identifier: state.identifier,
			proxy_type_name: state.proxy_type_name,
			initialized: state.initialized,
			hydrator: None,
			document,
		})
	}
}

impl<T: Document> Hydratable for Proxy<T> {
	fn identifier(&self) -> &str {
		&self.identifier
	}

	fn type_name(&self) -> &str {
		T::TYPE_NAME
	}

	fn is_initialized(&self) -> bool {
		self.initialized
	}

	fn field(&self, name: &str) -> Option<Value> {
		self.document.field(name)
	}

	fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
		self.document.set_field(name, value)
	}

	fn field_names(&self) -> &'static [&'static str] {
		T::FIELDS
	}

	fn load(&mut self) -> Result<()> {
		Proxy::load(self)
	}
}

impl<T: Document + fmt::Debug> fmt::Debug for Proxy<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Proxy")
			.field("identifier", &self.identifier)
			.field("proxy_type_name", &self.proxy_type_name)
			.field("initialized", &self.initialized)
			.field("has_manager", &self.hydrator.is_some())
			.field("document", &self.document)
			.finish()
	}
}

impl<T: Document> Serialize for Proxy<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		self.sleep_state(&self.sleep_names()).serialize(serializer)
	}
}

impl<'de, T: Document> Deserialize<'de> for Proxy<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		let state = SleepState::deserialize(deserializer)?;
		Proxy::wakeup(state).map_err(serde::de::Error::custom)
	}
}

/// Implemented by generated proxy wrappers
///
/// A wrapper owns a [`Proxy`] of its real type and exposes the real type's methods, each
/// hydrating first.
pub trait ProxyClass: Sized {
	type Document: Document;

	/// Proxy type name the wrapper was generated for
	const PROXY_TYPE_NAME: &'static str;

	fn from_proxy(inner: Proxy<Self::Document>) -> Self;

	fn proxy(&self) -> &Proxy<Self::Document>;

	fn proxy_mut(&mut self) -> &mut Proxy<Self::Document>;

	fn into_proxy(self) -> Proxy<Self::Document>;

	/// Serialization hook: names kept when the wrapper is serialized, initialization flag first
	fn sleep(&self) -> Vec<String>;

	fn identifier(&self) -> &str {
		self.proxy().identifier()
	}

	fn is_initialized(&self) -> bool {
		self.proxy().is_initialized()
	}

	fn load(&mut self) -> Result<()> {
		self.proxy_mut().load()
	}

	fn sleep_state(&self) -> SleepState {
		self.proxy().sleep_state(&self.sleep())
	}

	fn wakeup(state: SleepState) -> Result<Self> {
		Proxy::wakeup(state).map(Self::from_proxy)
	}
}
