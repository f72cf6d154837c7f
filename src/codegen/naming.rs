//! # Generated Identifiers
//!
//! Derives wrapper-model identifiers from dotted instance paths.

use crate::error::WrapperError;
use std::fmt;
use std::str::FromStr;

/// Kind of identifier generated for an instance path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameStyle {
    /// External value of an overwrite block (`<name>_u`)
    InputSignal,
    /// Activation flag of an overwrite block (`<name>_activate`)
    InputActivate,
    /// Boundary output (`<name>_y`)
    Output,
}

impl NameStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            NameStyle::InputSignal => "input_signal",
            NameStyle::InputActivate => "input_activate",
            NameStyle::Output => "output",
        }
    }
}

impl fmt::Display for NameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameStyle {
    type Err = WrapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input_signal" => Ok(NameStyle::InputSignal),
            "input_activate" => Ok(NameStyle::InputActivate),
            "output" => Ok(NameStyle::Output),
            other => Err(WrapperError::InvalidRole(other.to_string())),
        }
    }
}

/// Build the identifier for `path` in the given style.
///
/// Dots become underscores and the style suffix is appended, followed by
/// `attribute` (a modifier clause such as `(unit="K")`) and, when non-empty,
/// ` "description"`. Activation flags never carry the attribute clause.
pub fn mangle(path: &str, style: NameStyle, description: &str, attribute: &str) -> String {
    let name = path.replace('.', "_");
    let description = if description.is_empty() {
        String::new()
    } else {
        format!(" \"{}\"", description)
    };

    match style {
        NameStyle::InputSignal => format!("{}_u{}{}", name, attribute, description),
        NameStyle::InputActivate => format!("{}_activate{}", name, description),
        NameStyle::Output => format!("{}_y{}{}", name, attribute, description),
    }
}
