// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! cert-manager CRD availability checking

use crate::constants::crd::{POLL_ATTEMPTS, POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::{DirectoryError, Result};
use kube::{discovery::Discovery, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

const CERT_MANAGER_GROUP: &str = "cert-manager.io";
const REQUIRED_KINDS: [&str; 2] = ["Certificate", "Issuer"];

/// Polling schedule for CRD discovery
#[derive(Clone, Debug, PartialEq)]
pub struct Backoff {
    pub attempts: u32,
    pub interval: Duration,
    pub max_interval: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            attempts: POLL_ATTEMPTS,
            interval: Duration::from_secs(POLL_INTERVAL_SECS),
            max_interval: Duration::from_secs(POLL_MAX_INTERVAL_SECS),
        }
    }
}

/// Wait until cert-manager serves every kind the certificate chain needs.
/// Uses exponential backoff and gives up after `POLL_ATTEMPTS` tries.
pub async fn wait_for_cert_manager_crds(client: &Client) -> Result<()> {
    wait_for_cert_manager_crds_with(client, &Backoff::default()).await
}

pub async fn wait_for_cert_manager_crds_with(client: &Client, backoff: &Backoff) -> Result<()> {
    let mut interval = backoff.interval;
    let mut missing: Vec<&'static str> = REQUIRED_KINDS.to_vec();

    for attempt in 1..=backoff.attempts {
        match served_kinds(client).await {
            Ok(served) => {
                missing = missing_kinds(&served);
                if missing.is_empty() {
                    info!("cert-manager CRDs ({}/v1) are available", CERT_MANAGER_GROUP);
                    return Ok(());
                }
                info!(
                    "cert-manager CRDs missing {:?} (attempt {}/{}), waiting {:?}...",
                    missing, attempt, backoff.attempts, interval
                );
            }
            Err(e) => {
                warn!(
                    "Error discovering cert-manager CRDs: {}, retrying in {:?}...",
                    e, interval
                );
            }
        }

        if attempt < backoff.attempts {
            sleep(interval).await;
            interval = (interval * 2).min(backoff.max_interval);
        }
    }

    Err(DirectoryError::CrdUnavailable(format!(
        "{}/v1 {}",
        CERT_MANAGER_GROUP,
        missing.join(", ")
    )))
}

/// v1 kinds served by the cert-manager API group
async fn served_kinds(client: &Client) -> Result<Vec<String>> {
    let discovery = Discovery::new(client.clone())
        .filter(&[CERT_MANAGER_GROUP])
        .run()
        .await?;

    let mut kinds = Vec::new();
    for group in discovery.groups() {
        if group.name() == CERT_MANAGER_GROUP {
            for (ar, _) in group.recommended_resources() {
                if ar.version == "v1" {
                    kinds.push(ar.kind);
                }
            }
        }
    }
    Ok(kinds)
}

fn missing_kinds(served: &[String]) -> Vec<&'static str> {
    REQUIRED_KINDS
        .iter()
        .copied()
        .filter(|kind| !served.iter().any(|s| s.as_str() == *kind))
        .collect()
}
