//! # Errors
//!
//! Failure modes of extraction and wrapper synthesis. Everything is fail-fast:
//! the first error aborts the pipeline and no partial wrapper text is produced.

use thiserror::Error;

/// Errors raised while loading a DAE dump, extracting signal metadata or
/// generating the wrapper model.
#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No element carries the requested `name` attribute.
    #[error("Node not found: {0}")]
    MissingNode(String),

    /// The node exists but lacks a required structural child.
    #[error("Node '{node}' has no <{child}> child")]
    MissingChild { node: String, child: String },

    #[error("Malformed attribute '{attribute}' on '{node}': {reason}")]
    MalformedAttribute {
        node: String,
        attribute: String,
        reason: String,
    },

    #[error("Unknown name style: {0}")]
    InvalidRole(String),

    #[error("Cyclic alias chain: {}", chain.join(" -> "))]
    CyclicAlias { chain: Vec<String> },
}

pub type Result<T> = std::result::Result<T, WrapperError>;

impl WrapperError {
    pub(crate) fn malformed(node: &str, attribute: &str, reason: impl Into<String>) -> Self {
        WrapperError::MalformedAttribute {
            node: node.to_string(),
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }
}
