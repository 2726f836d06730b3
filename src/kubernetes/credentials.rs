// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Keeps the generated password stable across runs

use crate::constants::image::ENV_ADMIN_PASSWORD;
use crate::credentials::Credential;
use crate::error::Result;
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use tracing::{info, instrument};

/// Password stored in a previously applied credentials secret, if any
#[instrument(skip(client))]
pub async fn existing_credential(
    client: &Client,
    namespace: &str,
    name: &str,
) -> Result<Option<Credential>> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);
    let Some(secret) = secrets.get_opt(name).await? else {
        return Ok(None);
    };

    Ok(secret
        .data
        .as_ref()
        .and_then(|data| data.get(ENV_ADMIN_PASSWORD))
        .and_then(|value| String::from_utf8(value.0.clone()).ok())
        .filter(|value| !value.is_empty())
        .map(Credential::from_existing))
}

/// Reuse the stored password, or generate one when none exists yet
pub async fn resolve_credential(client: &Client, namespace: &str, name: &str) -> Result<Credential> {
    match existing_credential(client, namespace, name).await? {
        Some(credential) => {
            info!("Found existing credentials secret {}/{}, reusing", namespace, name);
            Ok(credential)
        }
        None => {
            info!("No credentials secret {}/{}, generating", namespace, name);
            Ok(Credential::generate())
        }
    }
}
