//! Registry of activated proxy types
//!
//! The registry is an ordinary value shared through `Arc`, so every factory (and every test)
//! can work against its own set of activated types.

use crate::error::Result;
use couchdb_odm_codegen::ClassDescriptor;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// An activated proxy type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTypeHandle {
	/// Mapped type name
	pub type_name: String,
	pub proxy_type_name: String,
	/// Generated file the type was activated from
	pub artifact: PathBuf,
	pub fingerprint: String,
}

/// Activated proxy types and the descriptors registered for them
#[derive(Debug, Default)]
pub struct ProxyRegistry {
	types: RwLock<HashMap<String, Arc<ProxyTypeHandle>>>,
	descriptors: RwLock<HashMap<String, Arc<ClassDescriptor>>>,
	synthesis_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ProxyRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Handle of an activated proxy type
	pub fn handle(&self, proxy_type_name: &str) -> Option<Arc<ProxyTypeHandle>> {
		self.types.read().get(proxy_type_name).cloned()
	}

	pub fn is_active(&self, proxy_type_name: &str) -> bool {
		self.types.read().contains_key(proxy_type_name)
	}

	/// Activate a proxy type
	///
	/// Activation happens once per type. When the type is already active the existing
	/// handle is kept and returned.
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_proxy::{ProxyRegistry, ProxyTypeHandle};
	///
	/// let registry = ProxyRegistry::new();
	/// let handle = |fingerprint: &str| ProxyTypeHandle {
	///     type_name: "Doc\\User".into(),
	///     proxy_type_name: "ProxyNS\\__CG__\\Doc\\User".into(),
	///     artifact: "/tmp/__CG__Doc.User.rs".into(),
	///     fingerprint: fingerprint.into(),
	/// };
	///
	/// registry.activate(handle("first"));
	/// let active = registry.activate(handle("second"));
	/// assert_eq!(active.fingerprint, "first");
	/// ```
	pub fn activate(&self, handle: ProxyTypeHandle) -> Arc<ProxyTypeHandle> {
		let mut types = self.types.write();
		if let Some(existing) = types.get(&handle.proxy_type_name) {
			tracing::debug!(
				proxy_type = %handle.proxy_type_name,
				"Proxy type already active"
			);
			return Arc::clone(existing);
		}

		let handle = Arc::new(handle);
		types.insert(handle.proxy_type_name.clone(), Arc::clone(&handle));
		handle
	}

	/// Names of all activated proxy types
	pub fn active_types(&self) -> Vec<String> {
		let mut names: Vec<_> = self.types.read().keys().cloned().collect();
		names.sort();
		names
	}

	/// Descriptor registered for a proxy type
	pub fn descriptor(&self, proxy_type_name: &str) -> Option<Arc<ClassDescriptor>> {
		self.descriptors.read().get(proxy_type_name).cloned()
	}

	/// Register a descriptor for a proxy type
	///
	/// Returns `false` when one was already registered, which is then kept.
	pub fn register_descriptor(
		&self,
		proxy_type_name: impl Into<String>,
		descriptor: Arc<ClassDescriptor>,
	) -> bool {
		let mut descriptors = self.descriptors.write();
		let proxy_type_name = proxy_type_name.into();
		if descriptors.contains_key(&proxy_type_name) {
			return false;
		}
		descriptors.insert(proxy_type_name, descriptor);
		true
	}

	/// Descriptor of a proxy type, registering the one produced by `fallback` when absent
	pub fn descriptor_or_register<F>(
		&self,
		proxy_type_name: &str,
		fallback: F,
	) -> Result<Arc<ClassDescriptor>>
	where
		F: FnOnce() -> Result<Arc<ClassDescriptor>>,
	{
		if let Some(descriptor) = self.descriptor(proxy_type_name) {
			return Ok(descriptor);
		}

		let descriptor = fallback()?;
		Ok(Arc::clone(
			self.descriptors
				.write()
				.entry(proxy_type_name.to_string())
				.or_insert(descriptor),
		))
	}

	/// Lock serializing synthesis and activation of one proxy type
	pub fn synthesis_lock(&self, proxy_type_name: &str) -> Arc<Mutex<()>> {
		Arc::clone(
			self.synthesis_locks
				.lock()
				.entry(proxy_type_name.to_string())
				.or_default(),
		)
	}
}
