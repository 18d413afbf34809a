//! Creation of lazy document proxies

use crate::artifact::ArtifactStore;
use crate::document::{Document, DocumentManager};
use crate::error::{ProxyError, Result};
use crate::lazy::{Proxy, ProxyClass};
use crate::registry::{ProxyRegistry, ProxyTypeHandle};
use couchdb_odm_codegen::{ClassDescriptor, ProxyGenerator, naming};
use couchdb_odm_conf::Configuration;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Creates lazy proxies for mapped documents
///
/// The first proxy requested for a type activates that type: its generated file is located
/// (or written, when auto-generation is enabled), validated and registered. Later requests
/// only construct the handle. Creating a proxy never reads the document itself.
pub struct ProxyFactory {
	manager: Arc<dyn DocumentManager>,
	registry: Arc<ProxyRegistry>,
	store: ArtifactStore,
	generator: ProxyGenerator,
	auto_generate: bool,
}

impl ProxyFactory {
	/// Create a factory
	///
	/// Both the proxy directory and the namespace are required.
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_proxy::{ClassDescriptor, DocumentManager, Hydratable, ProxyError};
	/// use couchdb_odm_proxy::{ProxyFactory, ProxyRegistry, Result};
	/// use std::sync::Arc;
	///
	/// struct NoStorage;
	///
	/// impl DocumentManager for NoStorage {
	///     fn refresh(&self, document: &mut dyn Hydratable) -> Result<()> {
	///         Err(ProxyError::DocumentNotFound(document.identifier().to_string()))
	///     }
	///
	///     fn class_descriptor(&self, type_name: &str) -> Result<Arc<ClassDescriptor>> {
	///         Err(ProxyError::Manager(format!("unmapped type {}", type_name)))
	///     }
	/// }
	///
	/// let registry = Arc::new(ProxyRegistry::new());
	/// let result = ProxyFactory::new(Arc::new(NoStorage), registry, "/tmp/proxies", "", false);
	/// assert!(matches!(result, Err(ProxyError::Configuration(_))));
	/// ```
	pub fn new(
		manager: Arc<dyn DocumentManager>,
		registry: Arc<ProxyRegistry>,
		proxy_dir: impl AsRef<Path>,
		proxy_namespace: &str,
		auto_generate: bool,
	) -> Result<Self> {
		let proxy_dir = proxy_dir.as_ref();
		if proxy_dir.as_os_str().is_empty() {
			return Err(ProxyError::Configuration(
				"proxy directory is required".to_string(),
			));
		}
		let namespace = proxy_namespace.trim_matches('\\');
		if namespace.trim().is_empty() {
			return Err(ProxyError::Configuration(
				"proxy namespace is required".to_string(),
			));
		}

		Ok(Self {
			manager,
			registry,
			store: ArtifactStore::new(proxy_dir),
			generator: ProxyGenerator::new(namespace),
			auto_generate,
		})
	}

	/// Create a factory from the mapper configuration
	pub fn from_configuration(
		manager: Arc<dyn DocumentManager>,
		registry: Arc<ProxyRegistry>,
		config: &Configuration,
	) -> Result<Self> {
		Ok(Self::new(
			manager,
			registry,
			config.proxy_dir(),
			config.proxy_namespace(),
			config.auto_generate_proxy_classes(),
		)?
		.with_runtime_path(config.proxy_runtime_path()))
	}

	/// Set the path generated proxies use to reach this crate
	pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
		self.generator = self.generator.runtime_path(path);
		self
	}

	pub fn registry(&self) -> &Arc<ProxyRegistry> {
		&self.registry
	}

	pub fn proxy_dir(&self) -> &Path {
		self.store.dir()
	}

	pub fn auto_generate(&self) -> bool {
		self.auto_generate
	}

	/// Proxy type name of a mapped type under this factory's namespace
	pub fn proxy_type_name(&self, type_name: &str) -> String {
		naming::proxy_type_name(type_name, self.generator.namespace())
	}

	/// File name of the generated proxy for a mapped type
	pub fn proxy_file_name(&self, type_name: &str) -> String {
		naming::proxy_file_name(type_name)
	}

	/// Lazy proxy for the document of type `T` stored under `identifier`
	pub fn get_proxy<T: Document>(&self, identifier: impl Into<String>) -> Result<Proxy<T>> {
		let proxy_type_name = self.proxy_type_name(T::TYPE_NAME);

		if self.registry.is_active(&proxy_type_name) {
			tracing::debug!(proxy_type = %proxy_type_name, "Proxy type already active");
		} else {
			self.activate(T::TYPE_NAME, &proxy_type_name)?;
		}

		self.registry
			.descriptor_or_register(&proxy_type_name, || {
				self.manager.class_descriptor(T::TYPE_NAME)
			})?;

		Ok(Proxy::new(
			identifier,
			proxy_type_name,
			Arc::clone(&self.manager),
		))
	}

	/// Lazy proxy wrapped in its generated type
	pub fn get_proxy_class<P: ProxyClass>(&self, identifier: impl Into<String>) -> Result<P> {
		let proxy = self.get_proxy::<P::Document>(identifier)?;
		if proxy.proxy_type_name() != P::PROXY_TYPE_NAME {
			return Err(ProxyError::Configuration(format!(
				"generated proxy `{}` does not match the configured proxy type `{}`",
				P::PROXY_TYPE_NAME,
				proxy.proxy_type_name()
			)));
		}
		Ok(P::from_proxy(proxy))
	}

	/// Write the generated proxies of several mapped types
	///
	/// Files go to `to_dir`, or to the factory's proxy directory. Mapped superclasses are
	/// skipped.
	pub fn generate_proxy_classes<'a, I>(
		&self,
		descriptors: I,
		to_dir: Option<&Path>,
	) -> Result<Vec<PathBuf>>
	where
		I: IntoIterator<Item = &'a ClassDescriptor>,
	{
		match to_dir {
			Some(dir) => ArtifactStore::new(dir).generate_all(&self.generator, descriptors),
			None => self.store.generate_all(&self.generator, descriptors),
		}
	}

	/// Locate or write the generated file of a type, then activate it
	fn activate(&self, type_name: &str, proxy_type_name: &str) -> Result<Arc<ProxyTypeHandle>> {
		let lock = self.registry.synthesis_lock(proxy_type_name);
		let _guard = lock.lock();

		// Another thread may have finished while we waited.
		if let Some(handle) = self.registry.handle(proxy_type_name) {
			return Ok(handle);
		}

		let descriptor = self.manager.class_descriptor(type_name)?;
		if descriptor.is_mapped_superclass {
			return Err(ProxyError::UnsupportedMapping(type_name.to_string()));
		}

		let expected = self.generator.fingerprint(&descriptor);
		let path = self.store.path_for(type_name);

		if self.auto_generate {
			let current = if path.is_file() {
				self.store.inspect(&path).ok()
			} else {
				None
			};
			if current.is_none_or(|header| header.fingerprint != expected) {
				self.store
					.write(type_name, &self.generator.generate(&descriptor)?)?;
			}
		} else if !path.is_file() {
			return Err(ProxyError::MissingArtifact {
				type_name: type_name.to_string(),
				path,
			});
		}

		let header = self.store.inspect(&path)?;
		if header.proxy_type_name != proxy_type_name {
			return Err(ProxyError::InvalidArtifact {
				path,
				reason: format!(
					"declares proxy type `{}`, expected `{}`",
					header.proxy_type_name, proxy_type_name
				),
			});
		}
		if header.fingerprint != expected {
			tracing::warn!(
				type_name = %type_name,
				path = %path.display(),
				"Proxy artifact is stale; regenerate proxies or enable auto-generation"
			);
		}

		self.registry
			.register_descriptor(proxy_type_name, Arc::clone(&descriptor));

		Ok(self.registry.activate(ProxyTypeHandle {
			type_name: type_name.to_string(),
			proxy_type_name: proxy_type_name.to_string(),
			artifact: path,
			fingerprint: header.fingerprint,
		}))
	}
}
