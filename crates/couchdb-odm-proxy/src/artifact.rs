//! Storage of generated proxy files

use crate::error::{ProxyError, Result};
use couchdb_odm_codegen::{ArtifactHeader, ClassDescriptor, ProxyGenerator, naming};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Directory of generated proxy files, one per mapped type
#[derive(Debug, Clone)]
pub struct ArtifactStore {
	dir: PathBuf,
}

impl ArtifactStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Path of the generated file for a mapped type
	///
	/// # Examples
	///
	/// ```
	/// use couchdb_odm_proxy::ArtifactStore;
	/// use std::path::Path;
	///
	/// let store = ArtifactStore::new("/var/cache/proxies");
	/// assert_eq!(
	///     store.path_for("Doc\\User"),
	///     Path::new("/var/cache/proxies/__CG__Doc.User.rs")
	/// );
	/// ```
	pub fn path_for(&self, type_name: &str) -> PathBuf {
		self.dir.join(naming::proxy_file_name(type_name))
	}

	pub fn exists(&self, type_name: &str) -> bool {
		self.path_for(type_name).is_file()
	}

	/// Write the generated file of a mapped type
	///
	/// The content goes to a temporary file in the same directory which is then renamed over
	/// the target, so readers never observe a partial file.
	pub fn write(&self, type_name: &str, source: &str) -> Result<PathBuf> {
		fs::create_dir_all(&self.dir)?;
		let path = self.path_for(type_name);

		let mut file = NamedTempFile::new_in(&self.dir)?;
		file.write_all(source.as_bytes())?;
		file.as_file().sync_all()?;
		file.persist(&path).map_err(|e| ProxyError::Io(e.error))?;

		tracing::info!(
			type_name = %type_name,
			path = %path.display(),
			"Wrote proxy artifact"
		);
		Ok(path)
	}

	/// Read and validate a generated file
	///
	/// The file must start with a generated header and parse as Rust source.
	pub fn inspect(&self, path: &Path) -> Result<ArtifactHeader> {
		let source = fs::read_to_string(path)?;

		let header = ArtifactHeader::parse(&source).ok_or_else(|| ProxyError::InvalidArtifact {
			path: path.to_path_buf(),
			reason: "missing generated header".to_string(),
		})?;
		syn::parse_file(&source).map_err(|e| ProxyError::InvalidArtifact {
			path: path.to_path_buf(),
			reason: e.to_string(),
		})?;

		Ok(header)
	}

	/// Generate and write one file per descriptor
	///
	/// Mapped superclasses are never proxied and are skipped. Nothing is written when two
	/// descriptors would generate the same wrapper.
	pub fn generate_all<'a, I>(&self, generator: &ProxyGenerator, descriptors: I) -> Result<Vec<PathBuf>>
	where
		I: IntoIterator<Item = &'a ClassDescriptor>,
	{
		let descriptors: Vec<&ClassDescriptor> = descriptors.into_iter().collect();
		generator.check_unique_names(descriptors.iter().copied())?;

		let mut written = Vec::new();
		for descriptor in descriptors {
			if descriptor.is_mapped_superclass {
				tracing::debug!(
					type_name = %descriptor.name,
					"Skipping mapped superclass"
				);
				continue;
			}
			let source = generator.generate(descriptor)?;
			written.push(self.write(&descriptor.name, &source)?);
		}
		Ok(written)
	}
}
