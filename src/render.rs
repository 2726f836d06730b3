// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Multi-document YAML output of a declared graph

use crate::error::Result;
use crate::graph::ResourceGraph;
use crate::types::Resource;

/// Render every submittable node, dependencies first, as one YAML stream
pub fn render_manifests(graph: &ResourceGraph<Resource>) -> Result<String> {
    let mut documents = Vec::new();
    for node in graph
        .topological_order()?
        .into_iter()
        .filter(|node| node.spec.is_submitted())
    {
        if let Some(value) = node.spec.to_value()? {
            documents.push(serde_yaml::to_string(&value)?);
        }
    }
    Ok(documents.join("---\n"))
}
