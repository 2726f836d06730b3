// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Readiness rules used before dependents are submitted

use crate::error::{DirectoryError, Result};
use crate::graph::ResourceId;
use crate::types::{Certificate, Issuer, Resource};
use k8s_openapi::api::apps::v1::StatefulSet;
use kube::runtime::wait::{await_condition, Condition};
use kube::{Api, Client};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, info};

/// Whether the kind has a readiness rule at all
pub fn has_readiness_rule(resource: &Resource) -> bool {
    matches!(
        resource,
        Resource::Certificate(_) | Resource::Issuer(_) | Resource::StatefulSet(_)
    )
}

/// The controller has seen the latest generation and every desired replica
/// runs the current revision and reports ready
pub fn is_stateful_set_ready(sts: &StatefulSet) -> bool {
    let Some(status) = sts.status.as_ref() else {
        return false;
    };
    let desired = sts.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1);
    let generation = sts.metadata.generation.unwrap_or(0);

    status.observed_generation.unwrap_or(0) >= generation
        && status.updated_replicas.unwrap_or(0) >= desired
        && status.ready_replicas.unwrap_or(0) >= desired
}

async fn wait_for<K>(
    api: Api<K>,
    id: &ResourceId,
    timeout: Duration,
    condition: impl Condition<K>,
) -> Result<()>
where
    K: kube::Resource + Clone + Debug + DeserializeOwned + Send + 'static,
{
    match tokio::time::timeout(timeout, await_condition(api, id.name(), condition)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(source)) => Err(DirectoryError::WaitFailed {
            id: id.clone(),
            source,
        }),
        Err(_) => Err(DirectoryError::Timeout { id: id.clone() }),
    }
}

/// Block until the submitted object satisfies its readiness rule.
/// Kinds without a rule return immediately.
pub async fn wait_until_ready(
    client: &Client,
    resource: &Resource,
    namespace: &str,
    id: &ResourceId,
    timeout: Duration,
) -> Result<()> {
    if !has_readiness_rule(resource) {
        debug!(%id, "no readiness rule");
        return Ok(());
    }

    info!(%id, timeout_secs = timeout.as_secs(), "waiting for resource to become ready");
    match resource {
        Resource::Certificate(_) => {
            let api: Api<Certificate> = Api::namespaced(client.clone(), namespace);
            wait_for(api, id, timeout, |c: Option<&Certificate>| {
                c.is_some_and(Certificate::is_ready)
            })
            .await
        }
        Resource::Issuer(_) => {
            let api: Api<Issuer> = Api::namespaced(client.clone(), namespace);
            wait_for(api, id, timeout, |i: Option<&Issuer>| {
                i.is_some_and(Issuer::is_ready)
            })
            .await
        }
        Resource::StatefulSet(_) => {
            let api: Api<StatefulSet> = Api::namespaced(client.clone(), namespace);
            wait_for(api, id, timeout, |s: Option<&StatefulSet>| {
                s.is_some_and(is_stateful_set_ready)
            })
            .await
        }
        _ => Ok(()),
    }?;
    info!(%id, "resource is ready");
    Ok(())
}
