//! Workload resource types and compiler
//!
//! This module defines the Kubernetes workload resource types emitted by the
//! chart compiler and the [`WorkloadCompiler`] that assembles them:
//! - Deployment: stateless replicated workload
//! - StatefulSet: stateful ordered workload
//!
//! For the full chart (workload + optional autoscaler), use
//! [`crate::compiler::ChartCompiler`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{WorkloadConfig, WorkloadKind};
use crate::env::EnvResolver;
use crate::labels::Labels;

// =============================================================================
// Kubernetes Resource Types
// =============================================================================

/// Standard Kubernetes ObjectMeta
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name
    pub name: String,
    /// Labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Kubernetes Deployment
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// API version
    pub api_version: String,
    /// Kind
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: DeploymentSpec,
}

/// Deployment spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    /// Number of replicas; absent when an autoscaling policy controls it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    /// Label selector
    pub selector: LabelSelector,
    /// Pod template
    pub template: PodTemplateSpec,
}

/// Kubernetes StatefulSet
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatefulSet {
    /// API version
    pub api_version: String,
    /// Kind
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: StatefulSetSpec,
}

/// StatefulSet spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatefulSetSpec {
    /// Governing service name binding for stable pod identity
    pub service_name: String,
    /// Number of replicas; absent when an autoscaling policy controls it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    /// Label selector
    pub selector: LabelSelector,
    /// Pod template
    pub template: PodTemplateSpec,
}

/// Label selector
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Match labels
    pub match_labels: BTreeMap<String, String>,
}

/// Pod template spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateSpec {
    /// Pod metadata
    pub metadata: PodMeta,
    /// Pod spec
    pub spec: PodSpec,
}

/// Pod metadata (subset of ObjectMeta)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodMeta {
    /// Labels; must match the owning resource's selector
    pub labels: BTreeMap<String, String>,
    /// Annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Pod spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// Service account name; absent when the pod runs under the default account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
    /// Containers
    pub containers: Vec<Container>,
    /// Volumes
    pub volumes: Vec<Volume>,
}

/// Container spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container name
    pub name: String,
    /// Image in canonical string form
    pub image: String,
    /// Ports; present even when empty
    pub ports: Vec<ContainerPort>,
    /// Environment variables
    pub env: Vec<EnvVar>,
    /// Volume mounts
    pub volume_mounts: Vec<VolumeMount>,
    /// Entrypoint; absent means "run the image default", distinct from empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Arguments; absent means "run the image default", distinct from empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    /// Resource requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

/// Container port
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    /// Port number
    pub container_port: u16,
    /// Port name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Protocol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Environment variable, either a literal value or a field reference
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    /// Variable name
    pub name: String,
    /// Literal value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Value sourced from the pod's own fields at runtime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<EnvVarSource>,
}

impl EnvVar {
    /// Literal name/value entry
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            value_from: None,
        }
    }

    /// Entry resolved from a pod field reference at runtime
    pub fn field_ref(name: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_from: Some(EnvVarSource {
                field_ref: ObjectFieldSelector {
                    field_path: field_path.into(),
                },
            }),
        }
    }
}

/// Source for an environment variable's value
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    /// Pod field reference
    pub field_ref: ObjectFieldSelector,
}

/// Selector of a pod field
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFieldSelector {
    /// Path of the field, e.g. "metadata.name"
    pub field_path: String,
}

/// Resource requirements
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    /// Limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceQuantity>,
    /// Requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<ResourceQuantity>,
}

/// CPU/memory quantity pair
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuantity {
    /// CPU quantity string
    pub cpu: String,
    /// Memory quantity string
    pub memory: String,
}

/// Volume backed by a named ConfigMap
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Volume name
    pub name: String,
    /// ConfigMap source
    pub config_map: ConfigMapVolumeSource,
}

/// ConfigMap volume source
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapVolumeSource {
    /// ConfigMap name
    pub name: String,
}

/// Volume mount
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    /// Volume name
    pub name: String,
    /// Mount path
    pub mount_path: String,
    /// Read only
    pub read_only: bool,
}

// =============================================================================
// Workload Resource
// =============================================================================

/// The primary workload resource of a compiled chart
///
/// A closed two-variant dispatch: the compiler never emits any other kind.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum WorkloadResource {
    /// Stateless replicated workload
    Deployment(Deployment),
    /// Stateful ordered workload
    StatefulSet(StatefulSet),
}

impl WorkloadResource {
    /// Resource kind string
    pub fn kind(&self) -> &str {
        match self {
            Self::Deployment(d) => &d.kind,
            Self::StatefulSet(s) => &s.kind,
        }
    }

    /// Resource name
    pub fn name(&self) -> &str {
        match self {
            Self::Deployment(d) => &d.metadata.name,
            Self::StatefulSet(s) => &s.metadata.name,
        }
    }

    /// Replica count, when fixed (absent under autoscaling)
    pub fn replicas(&self) -> Option<u32> {
        match self {
            Self::Deployment(d) => d.spec.replicas,
            Self::StatefulSet(s) => s.spec.replicas,
        }
    }

    /// Selector match labels
    pub fn selector(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Deployment(d) => &d.spec.selector.match_labels,
            Self::StatefulSet(s) => &s.spec.selector.match_labels,
        }
    }

    /// Pod template
    pub fn template(&self) -> &PodTemplateSpec {
        match self {
            Self::Deployment(d) => &d.spec.template,
            Self::StatefulSet(s) => &s.spec.template,
        }
    }
}

// =============================================================================
// Workload Compiler
// =============================================================================

/// Compiler for the primary workload resource
///
/// A pure function over the configuration snapshot and label set; the only
/// outside reads go through the injected [`EnvResolver`] and are treated as
/// a point-in-time snapshot. Exactly one container is defined per pod
/// template, named and imaged from the service identity.
pub struct WorkloadCompiler;

impl WorkloadCompiler {
    /// Compile the workload resource for a configuration snapshot
    ///
    /// Dispatches on the configured [`WorkloadKind`]: the stateful kind adds
    /// a governing `serviceName` binding equal to the service; everything
    /// else about the pod template is shared between the two kinds.
    pub fn compile(
        config: &WorkloadConfig,
        labels: &Labels,
        env: &dyn EnvResolver,
    ) -> WorkloadResource {
        // Replica count is the autoscaler's job when hpa is on
        let replicas = (!config.hpa).then_some(config.replicas);

        let metadata = ObjectMeta {
            name: config.service.clone(),
            labels: labels.clone(),
        };
        let selector = LabelSelector {
            match_labels: labels.clone(),
        };
        let template = Self::compile_template(config, labels, env);

        match config.workload_type {
            WorkloadKind::StatefulSet => WorkloadResource::StatefulSet(StatefulSet {
                api_version: "apps/v1".to_string(),
                kind: "StatefulSet".to_string(),
                metadata,
                spec: StatefulSetSpec {
                    service_name: config.service.clone(),
                    replicas,
                    selector,
                    template,
                },
            }),
            WorkloadKind::Deployment => WorkloadResource::Deployment(Deployment {
                api_version: "apps/v1".to_string(),
                kind: "Deployment".to_string(),
                metadata,
                spec: DeploymentSpec {
                    replicas,
                    selector,
                    template,
                },
            }),
        }
    }

    /// Assemble the pod template shared by both workload kinds
    fn compile_template(
        config: &WorkloadConfig,
        labels: &Labels,
        env: &dyn EnvResolver,
    ) -> PodTemplateSpec {
        let (volumes, volume_mounts) = Self::compile_volumes(config);

        let container = Container {
            name: config.service.clone(),
            image: config.image.to_string(),
            ports: Self::compile_ports(config),
            env: Self::compile_env(config, env),
            volume_mounts,
            command: Self::optional_sequence(&config.command),
            args: Self::optional_sequence(&config.args),
            resources: Self::compile_resources(config),
        };

        PodTemplateSpec {
            metadata: PodMeta {
                labels: labels.clone(),
                annotations: Self::compile_annotations(config),
            },
            spec: PodSpec {
                service_account_name: config.effective_service_account(),
                containers: vec![container],
                volumes,
            },
        }
    }

    /// One container port per configured port, in order
    fn compile_ports(config: &WorkloadConfig) -> Vec<ContainerPort> {
        config
            .ports
            .iter()
            .map(|p| ContainerPort {
                container_port: p.port,
                name: p.name.clone(),
                protocol: p.protocol.clone(),
            })
            .collect()
    }

    /// Environment list: resolved imports first, then the two fixed
    /// field-reference entries
    ///
    /// Empty import names are skipped; a missing value resolves to an empty
    /// string. NODE_NAME and STAGE are appended unconditionally, in that
    /// order, as field references rather than literals.
    fn compile_env(config: &WorkloadConfig, env: &dyn EnvResolver) -> Vec<EnvVar> {
        let mut vars = Vec::with_capacity(config.import_env_names.len() + 2);
        for name in &config.import_env_names {
            if name.is_empty() {
                continue;
            }
            let value = env.resolve(name).unwrap_or_default();
            vars.push(EnvVar::literal(name.as_str(), value));
        }
        vars.push(EnvVar::field_ref(crate::ENV_NODE_NAME, "metadata.name"));
        vars.push(EnvVar::field_ref(crate::ENV_STAGE, "metadata.namespace"));
        vars
    }

    /// One ConfigMap volume and one read-only mount per config entry
    fn compile_volumes(config: &WorkloadConfig) -> (Vec<Volume>, Vec<VolumeMount>) {
        let mut volumes = Vec::with_capacity(config.config.len());
        let mut mounts = Vec::with_capacity(config.config.len());
        for entry in &config.config {
            volumes.push(Volume {
                name: entry.name.clone(),
                config_map: ConfigMapVolumeSource {
                    name: entry.name.clone(),
                },
            });
            mounts.push(VolumeMount {
                name: entry.name.clone(),
                mount_path: entry.path.clone(),
                read_only: true,
            });
        }
        (volumes, mounts)
    }

    /// Resource requirements from the recognized policy keys
    ///
    /// Unrecognized keys are ignored silently; None when neither `limits`
    /// nor `requests` is configured.
    fn compile_resources(config: &WorkloadConfig) -> Option<ResourceRequirements> {
        let mut requirements = ResourceRequirements::default();
        for (key, quantities) in &config.resources {
            let pair = ResourceQuantity {
                cpu: quantities.cpu.clone(),
                memory: quantities.memory.clone(),
            };
            match key.as_str() {
                "limits" => requirements.limits = Some(pair),
                "requests" => requirements.requests = Some(pair),
                _ => {}
            }
        }
        (requirements.limits.is_some() || requirements.requests.is_some()).then_some(requirements)
    }

    /// Scrape annotations when metrics scraping is enabled, empty otherwise
    fn compile_annotations(config: &WorkloadConfig) -> BTreeMap<String, String> {
        let mut annotations = BTreeMap::new();
        if config.metrics.scrape {
            annotations.insert(crate::ANNOTATION_SCRAPE.to_string(), "true".to_string());
            annotations.insert(
                crate::ANNOTATION_PORT.to_string(),
                config.metrics.port.to_string(),
            );
            annotations.insert(crate::ANNOTATION_PATH.to_string(), config.metrics.path.clone());
        }
        annotations
    }

    /// Some only for non-empty sequences - downstream platforms distinguish
    /// "run image default" from "run with zero arguments"
    fn optional_sequence(seq: &[String]) -> Option<Vec<String>> {
        (!seq.is_empty()).then(|| seq.to_vec())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigMount, PortSpec, QuantitySpec};
    use crate::labels::chart_labels;

    /// Map-backed resolver fixture; deterministic, no process state
    struct FixtureEnv(BTreeMap<String, String>);

    impl FixtureEnv {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl EnvResolver for FixtureEnv {
        fn resolve(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned()
        }
    }

    fn make_config() -> WorkloadConfig {
        WorkloadConfig::from_yaml(
            "service: billing\napp: acme\nreplicas: 2\nimage:\n  repository: acme/billing\n  tag: v3\n",
        )
        .unwrap()
    }

    fn compile(config: &WorkloadConfig) -> WorkloadResource {
        let labels = chart_labels(config);
        WorkloadCompiler::compile(config, &labels, &FixtureEnv::new(&[]))
    }

    // =========================================================================
    // Story: Replica Field Follows the Scaling Mode
    // =========================================================================

    #[test]
    fn story_replicas_fixed_when_hpa_disabled() {
        let config = make_config();
        let workload = compile(&config);
        assert_eq!(workload.replicas(), Some(2));
    }

    #[test]
    fn story_replicas_absent_when_hpa_enabled() {
        let mut config = make_config();
        config.hpa = true;
        let workload = compile(&config);
        assert_eq!(workload.replicas(), None);
    }

    // =========================================================================
    // Story: Environment Always Ends with NODE_NAME and STAGE
    // =========================================================================

    #[test]
    fn story_implicit_env_appended_without_imports() {
        let config = make_config();
        let workload = compile(&config);
        let env = &workload.template().spec.containers[0].env;

        assert_eq!(env.len(), 2);
        assert_eq!(env[0].name, "NODE_NAME");
        assert_eq!(
            env[0].value_from.as_ref().unwrap().field_ref.field_path,
            "metadata.name"
        );
        assert_eq!(env[1].name, "STAGE");
        assert_eq!(
            env[1].value_from.as_ref().unwrap().field_ref.field_path,
            "metadata.namespace"
        );
    }

    #[test]
    fn story_imports_precede_implicit_env() {
        let mut config = make_config();
        config.import_env_names = vec!["GIT_SHA".to_string(), "BUILD_ID".to_string()];
        let labels = chart_labels(&config);
        let resolver = FixtureEnv::new(&[("GIT_SHA", "abc123"), ("BUILD_ID", "42")]);
        let workload = WorkloadCompiler::compile(&config, &labels, &resolver);
        let env = &workload.template().spec.containers[0].env;

        assert_eq!(env.len(), 4);
        assert_eq!(env[0].name, "GIT_SHA");
        assert_eq!(env[0].value.as_deref(), Some("abc123"));
        assert!(env[0].value_from.is_none());
        assert_eq!(env[1].name, "BUILD_ID");
        // The last two entries are always NODE_NAME then STAGE
        assert_eq!(env[env.len() - 2].name, "NODE_NAME");
        assert_eq!(env[env.len() - 1].name, "STAGE");
    }

    #[test]
    fn story_empty_import_names_are_skipped() {
        let mut config = make_config();
        config.import_env_names = vec![String::new(), "GIT_SHA".to_string(), String::new()];
        let labels = chart_labels(&config);
        let resolver = FixtureEnv::new(&[("GIT_SHA", "abc123")]);
        let workload = WorkloadCompiler::compile(&config, &labels, &resolver);
        let env = &workload.template().spec.containers[0].env;

        assert_eq!(env.len(), 3);
        assert_eq!(env[0].name, "GIT_SHA");
    }

    #[test]
    fn story_missing_import_resolves_to_empty_string() {
        let mut config = make_config();
        config.import_env_names = vec!["UNSET_IN_BUILD_ENV".to_string()];
        let workload = compile(&config);
        let env = &workload.template().spec.containers[0].env;

        assert_eq!(env[0].name, "UNSET_IN_BUILD_ENV");
        assert_eq!(env[0].value.as_deref(), Some(""));
    }

    // =========================================================================
    // Story: Config Mounts Pair Volumes with Read-Only Mounts
    // =========================================================================

    #[test]
    fn story_config_entries_become_volume_mount_pairs() {
        let mut config = make_config();
        config.config = vec![
            ConfigMount {
                name: "billing-config".to_string(),
                path: "/etc/billing".to_string(),
            },
            ConfigMount {
                name: "shared-certs".to_string(),
                path: "/etc/certs".to_string(),
            },
        ];
        let workload = compile(&config);
        let template = workload.template();
        let mounts = &template.spec.containers[0].volume_mounts;
        let volumes = &template.spec.volumes;

        assert_eq!(volumes.len(), 2);
        assert_eq!(mounts.len(), 2);
        assert_eq!(volumes[0].name, "billing-config");
        assert_eq!(volumes[0].config_map.name, "billing-config");
        assert_eq!(mounts[0].name, "billing-config");
        assert_eq!(mounts[0].mount_path, "/etc/billing");
        assert!(mounts.iter().all(|m| m.read_only));
        // Configuration order is preserved
        assert_eq!(volumes[1].name, "shared-certs");
    }

    #[test]
    fn story_no_config_means_empty_volume_lists() {
        let config = make_config();
        let workload = compile(&config);
        assert!(workload.template().spec.volumes.is_empty());
        assert!(workload.template().spec.containers[0].volume_mounts.is_empty());
    }

    // =========================================================================
    // Story: Service Account Resolution
    // =========================================================================

    #[test]
    fn story_explicit_account_name_overrides_derived() {
        let mut config = make_config();
        config.service_account = true;
        config.service_account_name = "x".to_string();
        let workload = compile(&config);
        assert_eq!(
            workload.template().spec.service_account_name.as_deref(),
            Some("x")
        );
    }

    #[test]
    fn story_derived_account_name_from_app_and_service() {
        let mut config = make_config();
        config.service_account = true;
        let workload = compile(&config);
        assert_eq!(
            workload.template().spec.service_account_name.as_deref(),
            Some("acme-billing")
        );
    }

    #[test]
    fn story_no_account_by_default() {
        let workload = compile(&make_config());
        assert_eq!(workload.template().spec.service_account_name, None);
    }

    // =========================================================================
    // Story: Kind Dispatch
    // =========================================================================

    #[test]
    fn story_default_kind_is_deployment() {
        let workload = compile(&make_config());
        match &workload {
            WorkloadResource::Deployment(d) => {
                assert_eq!(d.api_version, "apps/v1");
                assert_eq!(d.kind, "Deployment");
                assert_eq!(d.metadata.name, "billing");
            }
            WorkloadResource::StatefulSet(_) => panic!("Expected Deployment"),
        }
    }

    #[test]
    fn story_statefulset_carries_service_name_binding() {
        let mut config = make_config();
        config.workload_type = WorkloadKind::StatefulSet;
        let workload = compile(&config);
        match &workload {
            WorkloadResource::StatefulSet(s) => {
                assert_eq!(s.kind, "StatefulSet");
                assert_eq!(s.spec.service_name, "billing");
            }
            WorkloadResource::Deployment(_) => panic!("Expected StatefulSet"),
        }
    }

    // =========================================================================
    // Story: Selector and Template Labels Stay Identical
    // =========================================================================

    #[test]
    fn story_selector_matches_template_labels() {
        let config = make_config();
        let workload = compile(&config);
        assert_eq!(workload.selector(), &workload.template().metadata.labels);
        assert_eq!(workload.selector(), &chart_labels(&config));
    }

    // =========================================================================
    // Story: Scrape Annotations
    // =========================================================================

    #[test]
    fn story_scrape_annotations_attached_when_enabled() {
        let mut config = make_config();
        config.metrics.scrape = true;
        config.metrics.port = 9090;
        config.metrics.path = "/metrics".to_string();
        let workload = compile(&config);
        let annotations = &workload.template().metadata.annotations;

        assert_eq!(annotations.len(), 3);
        assert_eq!(
            annotations.get("prometheus.io/scrape"),
            Some(&"true".to_string())
        );
        assert_eq!(
            annotations.get("prometheus.io/port"),
            Some(&"9090".to_string())
        );
        assert_eq!(
            annotations.get("prometheus.io/path"),
            Some(&"/metrics".to_string())
        );
    }

    #[test]
    fn story_no_annotations_without_scrape() {
        let workload = compile(&make_config());
        assert!(workload.template().metadata.annotations.is_empty());
    }

    // =========================================================================
    // Story: Container Shape
    // =========================================================================

    #[test]
    fn story_single_container_named_and_imaged_from_service() {
        let workload = compile(&make_config());
        let containers = &workload.template().spec.containers;
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "billing");
        assert_eq!(containers[0].image, "acme/billing:v3");
    }

    #[test]
    fn story_ports_present_even_when_empty() {
        let workload = compile(&make_config());
        assert!(workload.template().spec.containers[0].ports.is_empty());

        let mut config = make_config();
        config.ports = vec![
            PortSpec {
                port: 8080,
                name: Some("http".to_string()),
                protocol: None,
            },
            PortSpec {
                port: 9090,
                name: None,
                protocol: None,
            },
        ];
        let workload = compile(&config);
        let ports = &workload.template().spec.containers[0].ports;
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].container_port, 8080);
        assert_eq!(ports[0].name.as_deref(), Some("http"));
        assert_eq!(ports[1].container_port, 9090);
    }

    #[test]
    fn story_command_and_args_absent_when_empty() {
        let workload = compile(&make_config());
        let container = &workload.template().spec.containers[0];
        assert_eq!(container.command, None);
        assert_eq!(container.args, None);
    }

    #[test]
    fn story_command_and_args_present_when_configured() {
        let mut config = make_config();
        config.command = vec!["/bin/billing".to_string()];
        config.args = vec!["--verbose".to_string()];
        let workload = compile(&config);
        let container = &workload.template().spec.containers[0];
        assert_eq!(container.command.as_deref(), Some(&["/bin/billing".to_string()][..]));
        assert_eq!(container.args.as_deref(), Some(&["--verbose".to_string()][..]));
    }

    // =========================================================================
    // Story: Resource Requirements
    // =========================================================================

    #[test]
    fn story_recognized_resource_keys_populate_requirements() {
        let mut config = make_config();
        config.resources.insert(
            "limits".to_string(),
            QuantitySpec {
                cpu: "1".to_string(),
                memory: "512Mi".to_string(),
            },
        );
        config.resources.insert(
            "requests".to_string(),
            QuantitySpec {
                cpu: "250m".to_string(),
                memory: "128Mi".to_string(),
            },
        );
        let workload = compile(&config);
        let resources = workload.template().spec.containers[0]
            .resources
            .as_ref()
            .unwrap();
        assert_eq!(resources.limits.as_ref().unwrap().cpu, "1");
        assert_eq!(resources.limits.as_ref().unwrap().memory, "512Mi");
        assert_eq!(resources.requests.as_ref().unwrap().cpu, "250m");
    }

    #[test]
    fn story_unrecognized_resource_keys_are_ignored() {
        let mut config = make_config();
        config.resources.insert(
            "burst".to_string(),
            QuantitySpec {
                cpu: "4".to_string(),
                memory: "2Gi".to_string(),
            },
        );
        let workload = compile(&config);
        assert_eq!(workload.template().spec.containers[0].resources, None);
    }

    // =========================================================================
    // Story: Determinism
    // =========================================================================

    #[test]
    fn story_identical_snapshots_compile_identically() {
        let mut config = make_config();
        config.import_env_names = vec!["GIT_SHA".to_string()];
        let labels = chart_labels(&config);
        let resolver = FixtureEnv::new(&[("GIT_SHA", "abc123")]);

        let first = WorkloadCompiler::compile(&config, &labels, &resolver);
        let second = WorkloadCompiler::compile(&config, &labels, &resolver);
        assert_eq!(first, second);
    }
}
