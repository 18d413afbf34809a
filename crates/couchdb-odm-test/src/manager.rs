//! In-memory document manager with call recording

use couchdb_odm_proxy::{ClassDescriptor, DocumentManager, Hydratable, ProxyError, Result, Value};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Observer invoked at the start of every refresh, with the instance being hydrated
pub type RefreshProbe = Arc<dyn Fn(&mut dyn Hydratable) -> Result<()> + Send + Sync>;

/// One recorded refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRecord {
	pub identifier: String,
	pub type_name: String,
	/// Initialization flag of the instance when the refresh started
	pub initialized: bool,
}

/// Document manager backed by an in-memory store
///
/// Documents are stored as field maps keyed by identifier. Refreshing an instance copies the
/// stored values of the fields its type declares; other stored keys are ignored.
#[derive(Default)]
pub struct InMemoryDocumentManager {
	documents: RwLock<HashMap<String, IndexMap<String, Value>>>,
	descriptors: RwLock<HashMap<String, Arc<ClassDescriptor>>>,
	refreshes: Mutex<Vec<RefreshRecord>>,
	descriptor_lookups: Mutex<Vec<String>>,
	probe: RwLock<Option<RefreshProbe>>,
	failure: RwLock<Option<String>>,
}

impl InMemoryDocumentManager {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a class descriptor, keyed by its type name
	pub fn with_descriptor(self, descriptor: ClassDescriptor) -> Self {
		self.register_descriptor(descriptor);
		self
	}

	pub fn register_descriptor(&self, descriptor: ClassDescriptor) {
		self.descriptors
			.write()
			.insert(descriptor.name.clone(), Arc::new(descriptor));
	}

	/// Store a document
	pub fn with_document(self, identifier: impl Into<String>, document: Value) -> Self {
		self.insert(identifier, document);
		self
	}

	/// Store a document, replacing any previous one
	///
	/// `document` is expected to be a JSON object; any other value stores an empty document.
	pub fn insert(&self, identifier: impl Into<String>, document: Value) {
		let fields = match document {
			Value::Object(map) => map.into_iter().collect(),
			_ => IndexMap::new(),
		};
		self.documents.write().insert(identifier.into(), fields);
	}

	/// Run `probe` at the start of every refresh
	pub fn on_refresh<F>(&self, probe: F)
	where
		F: Fn(&mut dyn Hydratable) -> Result<()> + Send + Sync + 'static,
	{
		*self.probe.write() = Some(Arc::new(probe));
	}

	/// Make every following refresh fail with a manager error
	pub fn fail_refresh(&self, message: impl Into<String>) {
		*self.failure.write() = Some(message.into());
	}

	pub fn refresh_count(&self) -> usize {
		self.refreshes.lock().len()
	}

	pub fn refresh_count_for(&self, identifier: &str) -> usize {
		self.refreshes
			.lock()
			.iter()
			.filter(|record| record.identifier == identifier)
			.count()
	}

	pub fn refreshes(&self) -> Vec<RefreshRecord> {
		self.refreshes.lock().clone()
	}

	/// Type names passed to `class_descriptor`, in call order
	pub fn descriptor_lookups(&self) -> Vec<String> {
		self.descriptor_lookups.lock().clone()
	}
}

impl DocumentManager for InMemoryDocumentManager {
	fn refresh(&self, document: &mut dyn Hydratable) -> Result<()> {
		self.refreshes.lock().push(RefreshRecord {
			identifier: document.identifier().to_string(),
			type_name: document.type_name().to_string(),
			initialized: document.is_initialized(),
		});

		let probe = self.probe.read().clone();
		if let Some(probe) = probe {
			probe(document)?;
		}

		if let Some(message) = self.failure.read().clone() {
			return Err(ProxyError::Manager(message));
		}

		let stored = self
			.documents
			.read()
			.get(document.identifier())
			.cloned()
			.ok_or_else(|| ProxyError::DocumentNotFound(document.identifier().to_string()))?;

		for name in document.field_names() {
			if let Some(value) = stored.get(*name) {
				document.set_field(name, value.clone())?;
			}
		}
		Ok(())
	}

	fn class_descriptor(&self, type_name: &str) -> Result<Arc<ClassDescriptor>> {
		self.descriptor_lookups.lock().push(type_name.to_string());
		self.descriptors
			.read()
			.get(type_name)
			.cloned()
			.ok_or_else(|| {
				ProxyError::Manager(format!("no class descriptor registered for `{}`", type_name))
			})
	}
}
