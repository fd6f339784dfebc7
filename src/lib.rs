//! Slipway - compiles a workload configuration into deployable Kubernetes manifests
//!
//! Slipway reads a single YAML workload configuration (service identity, image,
//! replicas, ports, environment imports, config mounts, resource limits, scaling
//! policy) and compiles it into cluster resource definitions: a primary workload
//! resource (Deployment or StatefulSet) and, when autoscaling is requested, a
//! HorizontalPodAutoscaler bound to it.
//!
//! # Architecture
//!
//! The compilation core is a pure transformation over an immutable configuration
//! snapshot. Everything around it - CLI invocation, config-file parsing, manifest
//! rendering and writing - is a thin shell that never participates in the
//! compilation rules.
//!
//! # Modules
//!
//! - [`config`] - Workload configuration snapshot types and YAML loading
//! - [`env`] - Injected environment resolver for import-variable lookups
//! - [`labels`] - Chart label set shared by metadata, selector, and pod template
//! - [`workload`] - Workload resource types (Deployment, StatefulSet) and compiler
//! - [`autoscaler`] - HorizontalPodAutoscaler types and compiler
//! - [`compiler`] - Unified chart compiler (workload + optional autoscaler)
//! - [`render`] - Manifest rendering to YAML or JSON
//! - [`error`] - Error types for the compiler shell

#![deny(missing_docs)]

pub mod autoscaler;
pub mod compiler;
pub mod config;
pub mod env;
pub mod error;
pub mod labels;
pub mod render;
pub mod workload;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Default Configuration Constants
// =============================================================================
// These constants define fixed names injected into every compiled workload.
// Centralizing them here keeps the compiler rules and test fixtures consistent.

/// Name of the implicit env var carrying the pod's own name
///
/// Always appended to the container environment after user-specified imports,
/// sourced from the `metadata.name` field reference at runtime.
pub const ENV_NODE_NAME: &str = "NODE_NAME";

/// Name of the implicit env var carrying the pod's namespace
///
/// Always appended after [`ENV_NODE_NAME`], sourced from the
/// `metadata.namespace` field reference at runtime.
pub const ENV_STAGE: &str = "STAGE";

/// Annotation key that opts the pod into metrics scraping
pub const ANNOTATION_SCRAPE: &str = "prometheus.io/scrape";

/// Annotation key carrying the metrics port
pub const ANNOTATION_PORT: &str = "prometheus.io/port";

/// Annotation key carrying the metrics path
pub const ANNOTATION_PATH: &str = "prometheus.io/path";
