// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Submission of a declared graph: server-side apply in dependency order,
//! teardown in reverse order

use crate::constants::{defaults, FIELD_MANAGER};
use crate::error::{DirectoryError, Result};
use crate::graph::{ResourceGraph, ResourceId, ResourceNode};
use crate::kubernetes::readiness::{has_readiness_rule, wait_until_ready};
use crate::types::Resource;
use kube::{
    api::{DeleteParams, DynamicObject, Patch, PatchParams},
    Api, Client,
};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Clone, Debug, PartialEq)]
pub struct ApplyOptions {
    /// Wait for each dependency to become ready before submitting its dependents
    pub wait: bool,
    pub timeout: Duration,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            wait: true,
            timeout: Duration::from_secs(300),
        }
    }
}

fn namespace_of(node: &ResourceNode<Resource>) -> String {
    node.spec
        .metadata()
        .and_then(|m| m.namespace.clone())
        .unwrap_or_else(|| defaults::NAMESPACE.to_string())
}

fn dynamic_api(client: &Client, node: &ResourceNode<Resource>) -> Option<Api<DynamicObject>> {
    let ar = node.spec.api_resource()?;
    Some(Api::namespaced_with(client.clone(), &namespace_of(node), &ar))
}

/// Apply every node, dependencies first. The first failure aborts the run.
/// Returns the ids of the objects submitted to the cluster.
#[instrument(skip(client, graph, options), fields(owner = %graph.owner()))]
pub async fn apply_graph(
    client: &Client,
    graph: &ResourceGraph<Resource>,
    options: &ApplyOptions,
) -> Result<Vec<ResourceId>> {
    let pp = PatchParams::apply(FIELD_MANAGER).force();
    let mut applied = Vec::new();

    for node in graph.topological_order()? {
        if !node.spec.is_submitted() {
            debug!(id = %node.id, "held by the engine, nothing to submit");
            continue;
        }
        let (Some(api), Some(object)) = (dynamic_api(client, node), node.spec.to_dynamic()?) else {
            continue;
        };

        api.patch(node.id.name(), &pp, &Patch::Apply(&object))
            .await
            .map_err(|source| DirectoryError::ApplyFailed {
                id: node.id.clone(),
                source,
            })?;
        info!(id = %node.id, "applied");
        applied.push(node.id.clone());

        if options.wait && has_readiness_rule(&node.spec) && graph.has_dependents(&node.id) {
            wait_until_ready(client, &node.spec, &namespace_of(node), &node.id, options.timeout)
                .await?;
        }
    }

    Ok(applied)
}

/// Delete every unprotected node, dependents first. Objects that are
/// already gone are skipped. Returns the ids actually deleted.
#[instrument(skip(client, graph), fields(owner = %graph.owner()))]
pub async fn destroy_graph(
    client: &Client,
    graph: &ResourceGraph<Resource>,
) -> Result<Vec<ResourceId>> {
    let mut order = graph.topological_order()?;
    order.reverse();
    let mut deleted = Vec::new();

    for node in order {
        if !node.spec.is_submitted() {
            continue;
        }
        if node.protect {
            warn!(id = %node.id, "resource is protected, not deleting");
            continue;
        }
        let Some(api) = dynamic_api(client, node) else {
            continue;
        };

        match api.delete(node.id.name(), &DeleteParams::default()).await {
            Ok(_) => {
                info!(id = %node.id, "deleted");
                deleted.push(node.id.clone());
            }
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!(id = %node.id, "already deleted");
            }
            Err(source) => {
                return Err(DirectoryError::DeleteFailed {
                    id: node.id.clone(),
                    source,
                })
            }
        }
    }

    Ok(deleted)
}
