//! Chart Compiler
//!
//! This module provides the unified API for compiling a workload
//! configuration snapshot into cluster resources. It delegates to the
//! specialized compilers:
//! - [`WorkloadCompiler`](crate::workload::WorkloadCompiler): the primary
//!   workload resource (Deployment or StatefulSet)
//! - [`HpaCompiler`](crate::autoscaler::HpaCompiler): the autoscaling policy,
//!   compiled only when the configuration requests autoscaling
//!
//! # Usage
//!
//! ```text
//! let compiler = ChartCompiler::new(&OsEnv);
//! let chart = compiler.compile(&config);
//! // chart.workload, chart.hpa
//! ```
//!
//! Labels are derived once from the configuration identity and applied
//! identically to every resource's metadata, selector, and pod template.

use crate::autoscaler::{HorizontalPodAutoscaler, HpaCompiler};
use crate::config::WorkloadConfig;
use crate::env::EnvResolver;
use crate::labels;
use crate::workload::{WorkloadCompiler, WorkloadResource};

// Re-export types for convenience
pub use crate::autoscaler::HpaSpec;
pub use crate::workload::{Deployment, StatefulSet};

/// Combined output of compiling one workload configuration
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledChart {
    /// The primary workload resource
    pub workload: WorkloadResource,
    /// The autoscaling policy, present iff autoscaling is requested
    pub hpa: Option<HorizontalPodAutoscaler>,
}

impl CompiledChart {
    /// Total count of compiled resources
    pub fn resource_count(&self) -> usize {
        1 + usize::from(self.hpa.is_some())
    }
}

/// Unified chart compiler
///
/// Borrows the injected environment resolver for the duration of the build;
/// each compile call is an independent, side-effect-free transformation over
/// the configuration snapshot it is given.
pub struct ChartCompiler<'a> {
    env: &'a dyn EnvResolver,
}

impl<'a> ChartCompiler<'a> {
    /// Create a new chart compiler with the given environment resolver
    pub fn new(env: &'a dyn EnvResolver) -> Self {
        Self { env }
    }

    /// Compile a workload configuration into its chart resources
    ///
    /// Always produces the workload resource; produces the autoscaling
    /// policy only when the configuration enables it - in which case the
    /// workload's replica field is left to the policy.
    pub fn compile(&self, config: &WorkloadConfig) -> CompiledChart {
        let labels = labels::chart_labels(config);

        let workload = WorkloadCompiler::compile(config, &labels, self.env);
        let hpa = config
            .hpa
            .then(|| HpaCompiler::compile(config, &labels));

        CompiledChart { workload, hpa }
    }
}

// =============================================================================
// Tests
// =============================================================================
