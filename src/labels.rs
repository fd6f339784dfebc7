//! Chart label set
//!
//! Derives the label mapping applied identically to a resource's own
//! metadata, its selector, and its pod template metadata. Selector and
//! template labels must stay identical for the workload resource to manage
//! its own pods; compilers clone this one map into all three places.

use std::collections::BTreeMap;

use crate::config::WorkloadConfig;

/// Label mapping shared by resource metadata, selector, and pod template
pub type Labels = BTreeMap<String, String>;

/// Build the standard chart labels for a workload configuration
pub fn chart_labels(config: &WorkloadConfig) -> Labels {
    let mut labels = BTreeMap::new();
    labels.insert(
        "app.kubernetes.io/name".to_string(),
        config.service.clone(),
    );
    labels.insert("app.kubernetes.io/part-of".to_string(), config.app.clone());
    labels.insert(
        "app.kubernetes.io/managed-by".to_string(),
        "slipway".to_string(),
    );
    labels
}
