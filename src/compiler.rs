//! # Wrapper Compiler
//!
//! Main entry points for turning a DAE dump into signal metadata and a
//! Modelica wrapper model.

use crate::codegen::{CodegenOptions, WrapperCodeGenerator};
use crate::error::Result;
use crate::metadata::{extract_signal_metadata, Instances, SignalMetadata};
use crate::tree::Document;
use std::path::Path;

/// Parse DAE XML text and extract its signal exchange metadata
///
/// # Arguments
///
/// * `xml` - Contents of a DAE dump (as produced by `dumpXMLDAE`)
///
/// # Returns
///
/// * `Ok(SignalMetadata)` - Overwrite/Read instance maps and KPI signal groups
/// * `Err(WrapperError)` - The first structural or attribute error encountered
pub fn parse_dae_xml(xml: &str) -> Result<SignalMetadata> {
    tracing::info!("[SIGWRAP] Phase 1: Loading DAE tree...");
    let doc = Document::parse(xml)?;
    extract_from_document(&doc)
}

/// Read the DAE dump at `path` and extract its signal exchange metadata
pub fn parse_dae_file(path: impl AsRef<Path>) -> Result<SignalMetadata> {
    let path = path.as_ref();
    tracing::info!("[SIGWRAP] Phase 1: Loading DAE tree from {}...", path.display());
    let doc = Document::open(path)?;
    extract_from_document(&doc)
}

fn extract_from_document(doc: &Document) -> Result<SignalMetadata> {
    tracing::info!("[SIGWRAP] Loaded {} elements", doc.len());
    tracing::info!("[SIGWRAP] Phase 2: Classifying variables...");
    extract_signal_metadata(doc)
}

/// Generate the wrapper model for `model_id` with default options
///
/// # Arguments
///
/// * `model_id` - Modelica path of the original model, e.g. `"Package.SubPackage.Model"`
/// * `instances` - Overwrite and Read blocks to expose
///
/// # Returns
///
/// * `Some(String)` - The wrapper model source
/// * `None` - No signal exchange blocks; the original model should be used as is
///
/// # Examples
///
/// ```rust
/// use sigwrap::{compile_wrapper, Instances};
///
/// assert!(compile_wrapper("Plant", &Instances::default()).is_none());
/// ```
pub fn compile_wrapper(model_id: &str, instances: &Instances) -> Option<String> {
    compile_wrapper_with_options(model_id, instances, &CodegenOptions::default())
}

/// Generate the wrapper model for `model_id`
pub fn compile_wrapper_with_options(
    model_id: &str,
    instances: &Instances,
    options: &CodegenOptions,
) -> Option<String> {
    tracing::info!("[SIGWRAP] Phase 3: Generating wrapper for {}...", model_id);
    tracing::info!(
        "[SIGWRAP] {} overwrite blocks, {} read blocks",
        instances.overwrite.len(),
        instances.read.len()
    );

    let code = WrapperCodeGenerator::new(model_id, instances, options).generate_model();
    match &code {
        Some(code) => tracing::info!("[SIGWRAP] Wrapper generation complete ({} bytes)", code.len()),
        None => tracing::warn!("[SIGWRAP] No signal exchange block instances found in model. Exporting model as is."),
    }

    code
}
