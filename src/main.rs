use anyhow::Context;
use clap::Parser;
use sigwrap::{compile_wrapper_with_options, parse_dae_file, CodegenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Parse an XML DAE description file and create a wrapper Modelica model
#[derive(Parser, Debug)]
#[command(name = "sigwrap", version)]
struct Cli {
    /// Path to the XML DAE description file (obtained with the omc command 'dumpXMLDAE')
    #[arg(value_name = "FILE")]
    inputfile: PathBuf,

    /// Path to write the wrapped model to. Writes to stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Modelica path of the original model, e.g. "Package.SubPackage.Model"
    #[arg(short, long)]
    model: String,

    /// Path to write the KPI signal groups (kpis.json) to. Not generated if omitted
    #[arg(short, long)]
    json: Option<PathBuf>,

    /// Name of the generated wrapper model
    #[arg(long, default_value = "wrapped")]
    wrapper_name: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let metadata = parse_dae_file(&cli.inputfile)
        .with_context(|| format!("failed to extract signals from {}", cli.inputfile.display()))?;

    let options = CodegenOptions {
        model_name: cli.wrapper_name,
    };
    if let Some(code) = compile_wrapper_with_options(&cli.model, &metadata.instances, &options) {
        match &cli.output {
            Some(path) => std::fs::write(path, &code)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => std::io::stdout()
                .write_all(code.as_bytes())
                .context("failed to write wrapper to stdout")?,
        }
    }

    if let Some(path) = &cli.json {
        let json = serde_json::to_string(&metadata.signals)?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}
