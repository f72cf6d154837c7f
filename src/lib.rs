//! # Signal Exchange Wrapper Generator (sigwrap)
//!
//! Turns the XML DAE dump of a Modelica model into:
//!
//! - a classification of its signal exchange blocks: **Overwrite** (externally
//!   overridable), **Read** (externally observable) and **KPI** signals
//! - a Modelica wrapper model exposing every Overwrite/Read block as a
//!   boundary input/output around the unmodified original model
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sigwrap::{compile_wrapper, parse_dae_file};
//!
//! let metadata = parse_dae_file("dae.xml")?;
//! match compile_wrapper("Buildings.Examples.Plant", &metadata.instances) {
//!     Some(code) => std::fs::write("wrapped.mo", code)?,
//!     None => eprintln!("No signal exchange blocks, using the original model"),
//! }
//! println!("{}", serde_json::to_string(&metadata.signals)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! 1. **Tree Loading** - Parse the DAE dump into an element tree
//! 2. **Classification** - Tag variables by the `boptestRead`,
//!    `boptestOverwrite` and `KPIs` naming markers
//! 3. **Metadata Extraction** - Units, descriptions, bounds and KPI zones
//! 4. **Code Generation** - Emit the wrapper model in a fixed order

pub mod codegen;
pub mod compiler;
pub mod error;
pub mod metadata;
pub mod tree;

// Re-export the main API
pub use compiler::{
    compile_wrapper,
    compile_wrapper_with_options,
    parse_dae_file,
    parse_dae_xml,
};

pub use codegen::{mangle, CodegenOptions, NameStyle, WrapperCodeGenerator};
pub use error::{Result, WrapperError};
pub use metadata::{
    extract_signal_metadata,
    ExchangeKind, InstanceMap, InstanceRecord, Instances,
    SignalGroups, SignalMetadata, SignalRole,
};
pub use tree::{Document, Node};
