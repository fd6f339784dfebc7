//! Autoscaling policy types and compiler
//!
//! Defines the HorizontalPodAutoscaler resource and the [`HpaCompiler`]
//! that binds one to the chart's primary workload resource. The policy is
//! fixed: two resource-utilization metrics (memory, then cpu), both
//! targeting 80% average utilization. Whether the policy is compiled at all
//! is the orchestration's decision, driven by the `hpa` config flag.

use serde::{Deserialize, Serialize};

use crate::config::WorkloadConfig;
use crate::labels::Labels;
use crate::workload::ObjectMeta;

/// Average utilization percentage targeted by both fixed metrics
pub const TARGET_UTILIZATION: u32 = 80;

// =============================================================================
// HorizontalPodAutoscaler Types
// =============================================================================

/// Kubernetes HorizontalPodAutoscaler (autoscaling/v2)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPodAutoscaler {
    /// API version
    pub api_version: String,
    /// Kind
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: HpaSpec,
}

/// HPA spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HpaSpec {
    /// Scale target reference
    pub scale_target_ref: ScaleTargetRef,
    /// Lower replica bound
    pub min_replicas: u32,
    /// Upper replica bound
    pub max_replicas: u32,
    /// Utilization metrics
    pub metrics: Vec<MetricSpec>,
}

/// Reference to the workload resource this policy scales
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScaleTargetRef {
    /// API version of the target resource
    pub api_version: String,
    /// Kind of the target resource
    pub kind: String,
    /// Name of the target resource
    pub name: String,
}

/// Metric specification
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricSpec {
    /// Metric type
    #[serde(rename = "type")]
    pub type_: String,
    /// Resource metric
    pub resource: ResourceMetricSource,
}

/// Metric target
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricTarget {
    /// Target type
    #[serde(rename = "type")]
    pub type_: String,
    /// Average utilization percentage
    pub average_utilization: u32,
}

/// Resource metric source
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetricSource {
    /// Resource name (memory, cpu)
    pub name: String,
    /// Target
    pub target: MetricTarget,
}

// =============================================================================
// HPA Compiler
// =============================================================================

/// Compiler for the autoscaling policy resource
///
/// Pure function over the configuration snapshot and label set. Always emits
/// the same fixed metric pair; only the bounds and the scale target vary
/// with configuration.
pub struct HpaCompiler;

impl HpaCompiler {
    /// Compile the autoscaling policy bound to the chart's workload resource
    pub fn compile(config: &WorkloadConfig, labels: &Labels) -> HorizontalPodAutoscaler {
        HorizontalPodAutoscaler {
            api_version: "autoscaling/v2".to_string(),
            kind: "HorizontalPodAutoscaler".to_string(),
            metadata: ObjectMeta {
                name: config.service.clone(),
                labels: labels.clone(),
            },
            spec: HpaSpec {
                scale_target_ref: ScaleTargetRef {
                    api_version: "apps/v1".to_string(),
                    kind: config.workload_type.resource_kind().to_string(),
                    name: config.service.clone(),
                },
                min_replicas: config.replicas,
                max_replicas: config.max_replicas,
                metrics: vec![
                    Self::utilization_metric("memory"),
                    Self::utilization_metric("cpu"),
                ],
            },
        }
    }

    fn utilization_metric(resource: &str) -> MetricSpec {
        MetricSpec {
            type_: "Resource".to_string(),
            resource: ResourceMetricSource {
                name: resource.to_string(),
                target: MetricTarget {
                    type_: "Utilization".to_string(),
                    average_utilization: TARGET_UTILIZATION,
                },
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
