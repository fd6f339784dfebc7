//! Structured container image reference

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag applied when the configuration names neither a tag nor a digest
pub const DEFAULT_TAG: &str = "latest";

/// Structured reference to a container image
///
/// Rendered to its canonical string form when the workload container is
/// compiled. The parts are carried verbatim - a malformed reference is
/// surfaced by the platform consuming the manifest, not here.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// Registry host, e.g. "ghcr.io" (omitted for Docker Hub images)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,

    /// Repository path, e.g. "acme/billing"
    pub repository: String,

    /// Image tag; defaults to "latest" when neither tag nor digest is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Content digest, e.g. "sha256:abc..."; takes precedence over the tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(registry) = &self.registry {
            write!(f, "{}/", registry)?;
        }
        write!(f, "{}", self.repository)?;
        match &self.digest {
            Some(digest) => write!(f, "@{}", digest),
            None => write!(f, ":{}", self.tag.as_deref().unwrap_or(DEFAULT_TAG)),
        }
    }
}
