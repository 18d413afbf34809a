//! # couchdb-odm codegen
//!
//! Class descriptors and ahead-of-time generation of lazy-loading document proxies.
//!
//! A proxy is a typed wrapper around the runtime lazy handle of `couchdb-odm-proxy`. It exposes
//! the same public methods as the mapped document type; every call hydrates the document on
//! first use and then forwards to the real method.
//!
//! This crate has no dependency on the runtime so it can be used from `build.rs`:
//!
//! ```rust,no_run
//! use couchdb_odm_codegen::{ClassDescriptor, MethodSignature, ProxyGenerator, Receiver};
//! use std::path::Path;
//!
//! let user = ClassDescriptor::new("Doc\\User", "crate::models::User")
//!     .field("name")
//!     .method(MethodSignature::new("name", Receiver::Ref).returns("String"));
//!
//! let generator = ProxyGenerator::new("ProxyNS");
//! let out_dir = std::env::var("OUT_DIR").unwrap();
//! let path = Path::new(&out_dir).join(couchdb_odm_codegen::naming::proxy_file_name(&user.name));
//! std::fs::write(path, generator.generate(&user).unwrap()).unwrap();
//! ```

pub mod descriptor;
pub mod error;
pub mod generator;
pub mod naming;

pub use descriptor::{
	ClassDescriptor, DefaultValue, MethodSignature, Parameter, Receiver, SLEEP_HOOK,
	TypeConstraint, Visibility,
};
pub use error::{GenerateError, Result};
pub use generator::{ArtifactHeader, DEFAULT_RUNTIME_PATH, INITIALIZED_FIELD, ProxyGenerator};
pub use naming::{
	PROXY_MARKER, canonical_type_name, proxied_type_name, proxy_file_name, proxy_struct_name,
	proxy_type_name,
};
