//! generate-proxies CLI command
//!
//! Writes proxy source files for mapped types ahead of time, so deployments can run with
//! auto-generation disabled.

use clap::Parser;
use console::style;
use couchdb_odm_conf::{Configuration, ConfigurationBuilder};
use couchdb_odm_proxy::{ArtifactStore, ClassDescriptor, ProxyGenerator};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "generate-proxies")]
#[command(about = "Generates lazy-loading proxy sources for mapped documents", long_about = None)]
struct Args {
	/// Class descriptor JSON files (a descriptor or an array of descriptors each)
	#[arg(value_name = "DESCRIPTOR", required = true)]
	descriptors: Vec<PathBuf>,

	/// TOML configuration file, layered under COUCHDB_ODM_* environment variables
	#[arg(long)]
	config: Option<PathBuf>,

	/// Output directory (default: configured proxy directory)
	#[arg(long)]
	out: Option<PathBuf>,

	/// Proxy namespace (default: configured proxy namespace)
	#[arg(long)]
	namespace: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();

	let config = match &args.config {
		Some(path) => ConfigurationBuilder::from_file_and_env(path).build()?,
		None => Configuration::default(),
	};
	let namespace = args
		.namespace
		.as_deref()
		.unwrap_or(config.proxy_namespace());
	let out = args.out.clone().unwrap_or_else(|| config.proxy_dir());

	let mut descriptors = Vec::new();
	for path in &args.descriptors {
		descriptors.extend(read_descriptors(path)?);
	}

	println!(
		"{}",
		style(format!("Generating proxies into {}...", out.display()))
			.cyan()
			.bold()
	);

	let generator = ProxyGenerator::new(namespace).runtime_path(config.proxy_runtime_path());
	let written = ArtifactStore::new(&out).generate_all(&generator, &descriptors)?;

	let skipped = descriptors.len() - written.len();
	if written.is_empty() {
		println!("{}", style("No proxies generated").yellow());
	} else {
		println!(
			"\n{}",
			style(format!("Generated {} proxy file(s)", written.len()))
				.green()
				.bold()
		);
		for file in &written {
			println!("  {}", style(file.display()).dim());
		}
	}
	if skipped > 0 {
		println!(
			"{}",
			style(format!("Skipped {} mapped superclass(es)", skipped)).dim()
		);
	}

	Ok(())
}

/// Read a descriptor file holding one descriptor or an array of them
fn read_descriptors(path: &Path) -> Result<Vec<ClassDescriptor>, Box<dyn std::error::Error>> {
	let content = fs::read_to_string(path)
		.map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
	let value: serde_json::Value = serde_json::from_str(&content)?;

	Ok(if value.is_array() {
		serde_json::from_value(value)?
	} else {
		vec![serde_json::from_value(value)?]
	})
}
