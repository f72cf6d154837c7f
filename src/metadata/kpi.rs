//! KPI signal grouping and zone alias resolution.

use super::{basename, first_quoted};
use crate::codegen::naming::{mangle, NameStyle};
use crate::error::{Result, WrapperError};
use crate::tree::{Document, Node};
use std::collections::HashSet;

/// KPI categories that are tracked per zone
pub const ZONE_SCOPED_CATEGORIES: [&str; 5] = [
    "AirZoneTemperature",
    "RadiativeZoneTemperature",
    "OperativeZoneTemperature",
    "RelativeHumidity",
    "CO2Concentration",
];

/// Group key and output identifier for the KPI variable `var` named `name`.
///
/// The category is the last segment of the variable's binding. Zone-scoped
/// categories become `Category[Zone]`, the zone being resolved from
/// `<basename>.zone`.
pub fn extract_kpi(doc: &Document, var: Node<'_>, name: &str) -> Result<(String, String)> {
    let binding = var.require_string(&["bindExpression"])?;
    let category = binding.rsplit('.').next().unwrap_or(binding);
    let base = basename(name);

    let key = if ZONE_SCOPED_CATEGORIES.contains(&category) {
        let zone = resolve_zone(doc, &format!("{}.zone", base))?;
        format!("{}[{}]", category, zone)
    } else {
        category.to_string()
    };

    Ok((key, mangle(base, NameStyle::Output, "", "")))
}

/// Follow a chain of aliases starting at node `start` until a binding holds a
/// quoted literal, and return that literal.
///
/// A binding without a `"` names the next node of the chain. Revisiting a node
/// fails with [`WrapperError::CyclicAlias`].
pub fn resolve_zone(doc: &Document, start: &str) -> Result<String> {
    let mut chain: Vec<String> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut current = start.to_string();

    loop {
        if !visited.insert(current.clone()) {
            chain.push(current);
            return Err(WrapperError::CyclicAlias { chain });
        }
        chain.push(current.clone());

        let node = doc
            .find_by_name(&current)
            .ok_or_else(|| WrapperError::MissingNode(current.clone()))?;
        let binding = node.require_string(&["bindExpression"])?;

        if let Some(literal) = first_quoted(binding) {
            return Ok(literal.to_string());
        }

        tracing::debug!("[METADATA] Alias {} -> {}", current, binding);
        current = binding.to_string();
    }
}
