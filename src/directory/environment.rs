// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Container environment: plain settings in a config map, passwords in a secret

use super::{object_meta, ObjectNames};
use crate::constants::image;
use crate::credentials::Credential;
use crate::params::Parameters;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use std::collections::BTreeMap;

pub fn core_config_map(names: &ObjectNames, params: &Parameters) -> ConfigMap {
    ConfigMap {
        metadata: object_meta(names.base(), &params.namespace),
        data: Some(BTreeMap::from([
            (
                image::ENV_ORGANISATION.to_string(),
                params.organization_name.clone(),
            ),
            (image::ENV_DOMAIN.to_string(), params.base_domain.clone()),
            (image::ENV_LOG_LEVEL.to_string(), image::LOG_LEVEL.to_string()),
        ])),
        ..Default::default()
    }
}

/// The same password backs both the admin bind and the config backend
pub fn credentials_secret(names: &ObjectNames, params: &Parameters, credential: &Credential) -> Secret {
    Secret {
        metadata: object_meta(names.base(), &params.namespace),
        string_data: Some(BTreeMap::from([
            (
                image::ENV_ADMIN_PASSWORD.to_string(),
                credential.expose().to_string(),
            ),
            (
                image::ENV_CONFIG_PASSWORD.to_string(),
                credential.expose().to_string(),
            ),
        ])),
        ..Default::default()
    }
}
