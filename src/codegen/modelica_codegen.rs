//! # Modelica Wrapper Generator
//!
//! Generates a Modelica model that instantiates the original model as `mod`
//! and exposes its signal exchange blocks as boundary inputs and outputs.

use super::naming::{mangle, NameStyle};
use crate::metadata::{InstanceRecord, Instances};

/// Options for wrapper generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Name of the generated model
    pub model_name: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            model_name: "wrapped".to_string(),
        }
    }
}

/// Wrapper model generator
pub struct WrapperCodeGenerator<'a> {
    model_id: &'a str,
    instances: &'a Instances,
    options: &'a CodegenOptions,
}

impl<'a> WrapperCodeGenerator<'a> {
    pub fn new(model_id: &'a str, instances: &'a Instances, options: &'a CodegenOptions) -> Self {
        Self {
            model_id,
            instances,
            options,
        }
    }

    /// Generate the wrapper model source.
    ///
    /// Returns `None` when there is neither a read nor an overwrite block.
    pub fn generate_model(&self) -> Option<String> {
        if self.instances.is_empty() {
            return None;
        }

        let mut code: Vec<String> = Vec::new();
        code.push(format!(
            "model {} \"Wrapped model of {}\"\n\t// Input overwrite\n",
            self.options.model_name, self.model_id
        ));
        self.push_inputs(&mut code);

        code.push("\t// Out read\n".to_string());
        self.push_outputs(&mut code);

        code.push("\t// Original model\n".to_string());
        self.push_instantiation(&mut code);

        code.push(format!("end {};\n", self.options.model_name));

        tracing::debug!("[CODEGEN] Emitted {} fragments", code.len());
        Some(code.concat())
    }

    /// One value input and one activation input per overwrite block
    fn push_inputs(&self, code: &mut Vec<String>) {
        for (block, record) in &self.instances.overwrite {
            let signal = mangle(block, NameStyle::InputSignal, &record.description, &input_attribute(record));
            let activate = mangle(
                block,
                NameStyle::InputActivate,
                &format!("Activation for {}", record.description),
                "",
            );
            code.push(format!("\tModelica.Blocks.Interfaces.RealInput {};\n", signal));
            code.push(format!("\tModelica.Blocks.Interfaces.BooleanInput {};\n", activate));
        }
    }

    /// One output per read block, then one per overwrite block
    fn push_outputs(&self, code: &mut Vec<String>) {
        let blocks = self.instances.read.iter().chain(self.instances.overwrite.iter());
        for (block, record) in blocks {
            let output = mangle(block, NameStyle::Output, "", &format!("(unit=\"{}\")", record.unit));
            code.push(format!(
                "\tModelica.Blocks.Interfaces.RealOutput {} = mod.{}.y \"{}\";\n",
                output, block, record.description
            ));
        }
    }

    fn push_instantiation(&self, code: &mut Vec<String>) {
        code.push(format!("\t{} mod(\n", self.model_id));

        if self.instances.overwrite.is_empty() {
            code.push(") \"Original model without overwrites\";\n".to_string());
            return;
        }

        let bindings: Vec<String> = self
            .instances
            .overwrite
            .keys()
            .map(|block| {
                format!(
                    "\t\t{}(uExt(y={}),activate(y={}))",
                    block,
                    mangle(block, NameStyle::InputSignal, "", ""),
                    mangle(block, NameStyle::InputActivate, "", "")
                )
            })
            .collect();
        code.push(bindings.join(",\n"));
        code.push(") \"Original model with overwrites\";\n".to_string());
    }
}

/// `(unit="K", min=280.0, max=320.0)`; absent bounds are left out
fn input_attribute(record: &InstanceRecord) -> String {
    let mut parts = vec![format!("unit=\"{}\"", record.unit)];
    if let Some(min) = record.minimum {
        parts.push(format!("min={}", modelica_real(min)));
    }
    if let Some(max) = record.maximum {
        parts.push(format!("max={}", modelica_real(max)));
    }
    format!("({})", parts.join(", "))
}

/// Shortest round-trip literal for `value`, always with a fractional part or
/// an exponent (`280.0`, `1e+16`, `2.5e-05`).
pub fn modelica_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
