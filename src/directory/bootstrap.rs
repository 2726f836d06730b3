// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! LDIF bootstrap documents and the startup script copying mounted assets
//! into the image's expected locations

use super::{object_meta, ObjectNames};
use crate::constants::image;
use crate::params::Parameters;
use k8s_openapi::api::core::v1::ConfigMap;
use std::collections::BTreeMap;

pub const USERS_LDIF: &str = "50-ou-users.ldif";
pub const APPLICATIONS_LDIF: &str = "50-ou-applications.ldif";
pub const STARTUP_SCRIPT: &str = "startup.sh";

/// LDIF entry creating one organizational unit
pub fn organizational_unit_ldif(dn: &str, unit: &str) -> String {
    format!(
        "dn: {dn}\nobjectClass: organizationalunit\nou: {unit}\ndescription: {unit}\n"
    )
}

pub fn startup_script() -> String {
    format!(
        "#!/bin/bash -ex\ncp -Lv \"{certs_mount}\"/* \"{certs_path}/\"\ncp -Lv \"{files_mount}\"/*.ldif \"{bootstrap_path}/\"\n",
        certs_mount = image::CERTS_MOUNT,
        certs_path = image::CERTS_PATH,
        files_mount = image::FILES_MOUNT,
        bootstrap_path = image::CUSTOM_BOOTSTRAP_PATH,
    )
}

pub fn files_config_map(names: &ObjectNames, params: &Parameters) -> ConfigMap {
    ConfigMap {
        metadata: object_meta(names.files(), &params.namespace),
        data: Some(BTreeMap::from([
            (
                USERS_LDIF.to_string(),
                organizational_unit_ldif(&params.users_dn(), &params.users_organization_unit),
            ),
            (
                APPLICATIONS_LDIF.to_string(),
                organizational_unit_ldif(
                    &params.applications_dn(),
                    &params.applications_organization_unit,
                ),
            ),
        ])),
        ..Default::default()
    }
}

pub fn scripts_config_map(names: &ObjectNames, params: &Parameters) -> ConfigMap {
    ConfigMap {
        metadata: object_meta(names.scripts(), &params.namespace),
        data: Some(BTreeMap::from([(
            STARTUP_SCRIPT.to_string(),
            startup_script(),
        )])),
        ..Default::default()
    }
}
