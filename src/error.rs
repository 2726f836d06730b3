// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::graph::ResourceId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Resource declared twice: {0}")]
    DuplicateNode(ResourceId),

    #[error("Resource {node} depends on undeclared resource {missing}")]
    DanglingDependency { node: ResourceId, missing: ResourceId },

    #[error("Dependency cycle between resources: {}", format_ids(.0))]
    DependencyCycle(Vec<ResourceId>),

    #[error("Failed to serialize resource: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to apply {id}: {source}")]
    ApplyFailed {
        id: ResourceId,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to delete {id}: {source}")]
    DeleteFailed {
        id: ResourceId,
        #[source]
        source: kube::Error,
    },

    #[error("Failed waiting for {id}: {source}")]
    WaitFailed {
        id: ResourceId,
        #[source]
        source: kube::runtime::wait::Error,
    },

    #[error("Timed out waiting for {id} to become ready")]
    Timeout { id: ResourceId },

    #[error("Required CRD not served by the cluster: {0}")]
    CrdUnavailable(String),
}

fn format_ids(ids: &[ResourceId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
