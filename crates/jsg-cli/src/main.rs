use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use jsg_core::config::{self, CONFIG_FILE_NAME, GenerateConfig};
use jsg_core::{Renderer, build_type_model};
use jsg_go::GoRenderer;

/// Generate Go type declarations from JSON Schema files.
#[derive(Parser)]
#[command(name = "jsg", about = "JSON Schema to Go type generator", version)]
struct Cli {
    /// Input JSON Schema files
    paths: Vec<String>,

    /// A single input file (kept for backwards compatibility)
    #[arg(short, long)]
    input: Option<String>,

    /// Output file for the generated code; stdout when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Package to place the generated declarations in
    #[arg(short, long)]
    package: Option<String>,

    /// Generate bson tags and a reserved ObjectId field on root types
    #[arg(long)]
    bson: bool,

    /// Suppress omitempty tags on non-required fields
    #[arg(long)]
    omitempty: bool,

    /// Root path prefix for /-rooted $ref resolution
    #[arg(short, long)]
    root_path: Option<String>,

    /// Accept input files without a $schema key
    #[arg(long)]
    schema_key_optional: bool,

    /// Write a default jsg.yaml to the current directory and exit
    #[arg(long)]
    init: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init {
        return cmd_init();
    }
    cmd_generate(cli)
}

fn cmd_init() -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("{CONFIG_FILE_NAME} already exists");
    }
    fs::write(&path, config::default_config_content())
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("wrote {CONFIG_FILE_NAME}");
    Ok(())
}

fn cmd_generate(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    if config.inputs.is_empty() {
        bail!("no input JSON Schema files");
    }

    let model = build_type_model(&config)?;
    let files = GoRenderer.render(&model, &config)?;

    match &config.output {
        Some(output) => {
            for file in &files {
                fs::write(output, &file.content)
                    .with_context(|| format!("failed to write {output}"))?;
                log::info!("wrote {output}");
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            for file in &files {
                stdout
                    .write_all(file.content.as_bytes())
                    .context("failed to write to stdout")?;
            }
        }
    }
    Ok(())
}

/// Merge the project config file (when present) with the command line.
/// Command-line values win.
fn resolve_config(cli: &Cli) -> Result<GenerateConfig> {
    let mut config = config::load_config(&PathBuf::from(CONFIG_FILE_NAME))
        .map_err(|e| anyhow::anyhow!(e))?
        .unwrap_or_default();

    let mut inputs = cli.paths.clone();
    if let Some(input) = &cli.input {
        inputs.push(input.clone());
    }
    if !inputs.is_empty() {
        config.inputs = inputs;
    }
    if let Some(output) = &cli.output {
        config.output = Some(output.clone());
    }
    if let Some(package) = &cli.package {
        config.package = package.clone();
    }
    if let Some(root_path) = &cli.root_path {
        config.root_path = root_path.clone();
    }
    config.object_id |= cli.bson;
    config.omitempty |= cli.omitempty;
    config.schema_key_optional |= cli.schema_key_optional;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_and_single_input_combine() {
        let cli = Cli::parse_from(["jsg", "a.json", "b.json", "-i", "c.json"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.inputs, vec!["a.json", "b.json", "c.json"]);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "jsg",
            "schema.json",
            "-o",
            "types.go",
            "-p",
            "models",
            "--bson",
            "-r",
            "/repo",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.output.as_deref(), Some("types.go"));
        assert_eq!(config.package, "models");
        assert!(config.object_id);
        assert_eq!(config.root_path, "/repo");
    }

    #[test]
    fn test_package_defaults_to_main() {
        let cli = Cli::parse_from(["jsg", "schema.json"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.package, "main");
        assert!(config.output.is_none());
    }
}
