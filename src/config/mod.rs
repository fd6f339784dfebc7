//! Workload configuration snapshot
//!
//! The [`WorkloadConfig`] is the single input of a chart build: an immutable,
//! read-only snapshot loaded from a YAML file before compilation starts. The
//! compilers borrow it and never mutate it; building twice from the same
//! snapshot yields identical resources.
//!
//! Unknown-value handling for the workload kind lives here, in one place:
//! an unrecognized `workloadType` falls back to [`WorkloadKind::Deployment`]
//! with a warning, so the compilers only ever see a closed enum.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

mod image;

pub use image::ImageRef;

/// Kind of the primary workload resource to compile
///
/// Deserialized from the raw `workloadType` string; anything other than
/// `statefulset` (including unset) resolves to the stateless kind.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum WorkloadKind {
    /// Stateless replicated workload (Deployment)
    #[default]
    Deployment,
    /// Stateful ordered workload (StatefulSet)
    StatefulSet,
}

impl From<String> for WorkloadKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "statefulset" => Self::StatefulSet,
            "deployment" | "" => Self::Deployment,
            other => {
                warn!(
                    workload_type = other,
                    "unrecognized workload type, defaulting to deployment"
                );
                Self::Deployment
            }
        }
    }
}

impl WorkloadKind {
    /// Canonical Kubernetes resource kind, as used in `kind:` fields and
    /// HPA scale-target references
    pub fn resource_kind(&self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::StatefulSet => "StatefulSet",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deployment => write!(f, "deployment"),
            Self::StatefulSet => write!(f, "statefulset"),
        }
    }
}

/// One container port exposed by the workload
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortSpec {
    /// Port number
    pub port: u16,

    /// Optional port name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional protocol (TCP when unset, per platform default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// One named configuration volume and its mount path
///
/// Each entry produces a ConfigMap-backed volume and a read-only mount of
/// the same name, in configuration order.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMount {
    /// ConfigMap name, reused as the volume name
    pub name: String,
    /// Mount path inside the container
    pub path: String,
}

/// CPU/memory quantity pair for one resource policy
///
/// Quantity strings are carried verbatim; an unparsable quantity is
/// rejected by the platform consuming the manifest, not here.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuantitySpec {
    /// CPU quantity, e.g. "500m"
    pub cpu: String,
    /// Memory quantity, e.g. "256Mi"
    pub memory: String,
}

/// Metrics scrape configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSpec {
    /// When true, scrape annotations are attached to the pod template
    #[serde(default)]
    pub scrape: bool,

    /// Port the metrics endpoint listens on
    #[serde(default)]
    pub port: u16,

    /// HTTP path of the metrics endpoint
    #[serde(default)]
    pub path: String,
}

/// Immutable workload configuration for one chart build
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadConfig {
    /// Service name; names the workload resource and its single container
    pub service: String,

    /// Application the service belongs to
    pub app: String,

    /// Kind of the primary workload resource
    #[serde(default)]
    pub workload_type: WorkloadKind,

    /// Fixed replica count; ignored when `hpa` is true
    #[serde(default)]
    pub replicas: u32,

    /// Upper replica bound for the autoscaling policy
    #[serde(default)]
    pub max_replicas: u32,

    /// When true, the replica count is left to the autoscaling policy and
    /// an HPA resource is compiled alongside the workload
    #[serde(default)]
    pub hpa: bool,

    /// Container ports, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortSpec>,

    /// Environment variable names resolved from the build environment and
    /// re-injected as literal values; empty entries are skipped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub import_env_names: Vec<String>,

    /// Configuration volumes to mount read-only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<ConfigMount>,

    /// When true, the pod runs under the derived account `{app}-{service}`
    #[serde(default)]
    pub service_account: bool,

    /// Explicit service-account name; overrides the derived name when set
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_account_name: String,

    /// Container entrypoint; omitted from the manifest when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,

    /// Container arguments; omitted from the manifest when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Resource policy key (`limits`/`requests`) to quantity pair;
    /// unrecognized keys are ignored
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, QuantitySpec>,

    /// Metrics scrape configuration
    #[serde(default)]
    pub metrics: MetricsSpec,

    /// Container image reference
    pub image: ImageRef,
}

impl WorkloadConfig {
    /// Parse a workload configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::config(e.to_string()))
    }

    /// Resolve the effective service-account name
    ///
    /// None by default; `{app}-{service}` when the `serviceAccount` flag is
    /// set; an explicit `serviceAccountName` overrides the derived value
    /// unconditionally (last-applies-wins, not merged).
    pub fn effective_service_account(&self) -> Option<String> {
        let mut name = None;
        if self.service_account {
            name = Some(format!("{}-{}", self.app, self.service));
        }
        if !self.service_account_name.is_empty() {
            name = Some(self.service_account_name.clone());
        }
        name
    }
}
