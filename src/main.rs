//! Slipway CLI - compile a workload configuration into Kubernetes manifests

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use slipway::compiler::ChartCompiler;
use slipway::config::WorkloadConfig;
use slipway::env::OsEnv;
use slipway::render::{self, OutputFormat};

/// Slipway - compiles a workload configuration into deployable Kubernetes manifests
#[derive(Parser, Debug)]
#[command(name = "slipway", version, about, long_about = None)]
struct Cli {
    /// Path to the workload configuration YAML file
    #[arg(
        short = 'f',
        long = "config",
        env = "SLIPWAY_CONFIG",
        default_value = "config.yml"
    )]
    config_file: PathBuf,

    /// Directory to write per-resource manifest files into
    ///
    /// When omitted, the rendered manifests are printed to standard output
    /// as a single stream.
    #[arg(short = 'o', long = "output", env = "SLIPWAY_OUTPUT")]
    output_dir: Option<PathBuf>,

    /// Output format for rendered manifests
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let raw = tokio::fs::read_to_string(&cli.config_file)
        .await
        .with_context(|| format!("failed to read config file {:?}", cli.config_file))?;
    let config = WorkloadConfig::from_yaml(&raw)?;

    info!(
        service = %config.service,
        kind = %config.workload_type,
        hpa = config.hpa,
        "compiling chart"
    );

    // The process environment is the build environment for import resolution
    let env = OsEnv;
    let chart = ChartCompiler::new(&env).compile(&config);

    match &cli.output_dir {
        Some(dir) => {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("failed to create output directory {:?}", dir))?;
            for (name, contents) in render::manifest_files(&chart, cli.format)? {
                let path = dir.join(&name);
                tokio::fs::write(&path, contents)
                    .await
                    .with_context(|| format!("failed to write manifest {:?}", path))?;
                info!(path = %path.display(), "wrote manifest");
            }
        }
        None => {
            print!("{}", render::render(&chart, cli.format)?);
        }
    }

    Ok(())
}
