//! Manifest rendering
//!
//! The serialization collaborator: turns a [`CompiledChart`] into manifest
//! strings. Rendering is pure string production - writing the result to
//! storage or standard output is the CLI shell's job.

use serde::Serialize;

use crate::compiler::CompiledChart;
use crate::{Error, Result};

/// Target format for rendered manifests
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Multi-document YAML, documents separated by `---`
    #[default]
    Yaml,
    /// JSON array of resource documents
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Render a compiled chart to a single string in the given format
pub fn render(chart: &CompiledChart, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => to_yaml(chart),
        OutputFormat::Json => to_json(chart),
    }
}

/// Render a compiled chart to multi-document YAML
pub fn to_yaml(chart: &CompiledChart) -> Result<String> {
    let mut docs = vec![yaml_doc(&chart.workload)?];
    if let Some(hpa) = &chart.hpa {
        docs.push(yaml_doc(hpa)?);
    }
    Ok(docs.join("---\n"))
}

/// Render a compiled chart to a JSON array of resource documents
pub fn to_json(chart: &CompiledChart) -> Result<String> {
    let mut docs = vec![json_doc(&chart.workload)?];
    if let Some(hpa) = &chart.hpa {
        docs.push(json_doc(hpa)?);
    }
    serde_json::to_string_pretty(&docs).map_err(|e| Error::serialization(e.to_string()))
}

/// Per-resource manifest files, named after each resource kind
///
/// Returns `(file name, contents)` pairs, e.g. `deployment.yaml` and
/// `hpa.yaml`, for the shell to write into an output directory.
pub fn manifest_files(
    chart: &CompiledChart,
    format: OutputFormat,
) -> Result<Vec<(String, String)>> {
    let extension = match format {
        OutputFormat::Yaml => "yaml",
        OutputFormat::Json => "json",
    };
    let mut files = vec![(
        format!("{}.{}", chart.workload.kind().to_lowercase(), extension),
        single_doc(&chart.workload, format)?,
    )];
    if let Some(hpa) = &chart.hpa {
        files.push((format!("hpa.{}", extension), single_doc(hpa, format)?));
    }
    Ok(files)
}

fn single_doc<T: Serialize>(resource: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => yaml_doc(resource),
        OutputFormat::Json => json_doc(resource)
            .and_then(|v| serde_json::to_string_pretty(&v).map_err(|e| Error::serialization(e.to_string()))),
    }
}

fn yaml_doc<T: Serialize>(resource: &T) -> Result<String> {
    serde_yaml::to_string(resource).map_err(|e| Error::serialization(e.to_string()))
}

fn json_doc<T: Serialize>(resource: &T) -> Result<serde_json::Value> {
    serde_json::to_value(resource).map_err(|e| Error::serialization(e.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
