// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use crate::params::InputParameters;
use std::env;

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Name of the component instance, used as the base name of every object
    pub component_name: String,
    /// Deployment stack name, shown in the CA common name
    pub stack_name: String,
    /// Marks every declared resource as protected from deletion
    pub protect: bool,
    pub inputs: InputParameters,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    /// Values are trimmed and empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let protect: bool = get("PROTECT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Config {
            component_name: get("COMPONENT_NAME")
                .unwrap_or_else(|| defaults::COMPONENT_NAME.to_string()),
            stack_name: get("STACK_NAME").unwrap_or_else(|| defaults::STACK_NAME.to_string()),
            protect,
            inputs: InputParameters {
                namespace_name: get("NAMESPACE_NAME"),
                base_domain: get("BASE_DOMAIN"),
                organization_name: get("ORGANIZATION_NAME"),
                ldap_ip: get("LDAP_IP"),
                users_organization_unit: get("USERS_ORGANIZATION_UNIT"),
                applications_organization_unit: get("APPLICATIONS_ORGANIZATION_UNIT"),
            },
        }
    }
}
