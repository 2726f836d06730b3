// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Parameter resolution and the values derived from it

use crate::constants::defaults;
use crate::error::{DirectoryError, Result};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Raw inputs as supplied by the caller, before defaults are applied
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldap_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_organization_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applications_organization_unit: Option<String>,
}

/// Fully resolved parameters. Every field is populated.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameters {
    pub namespace: String,
    pub base_domain: String,
    pub organization_name: String,
    pub ldap_ip: String,
    pub users_organization_unit: String,
    pub applications_organization_unit: String,
}

impl InputParameters {
    /// Apply defaults and check the required keys.
    pub fn resolve(self) -> Result<Parameters> {
        let base_domain = present(self.base_domain)
            .ok_or(DirectoryError::MissingParameter("baseDomain"))?;
        let ldap_ip = present(self.ldap_ip).ok_or(DirectoryError::MissingParameter("ldapIp"))?;

        if let Some(label) = base_domain.split('.').find(|l| !is_dns_label(l)) {
            return Err(DirectoryError::InvalidParameter {
                name: "baseDomain",
                reason: format!("'{}' has an invalid DNS label '{}'", base_domain, label),
            });
        }
        if let Err(e) = ldap_ip.parse::<IpAddr>() {
            return Err(DirectoryError::InvalidParameter {
                name: "ldapIp",
                reason: format!("'{}': {}", ldap_ip, e),
            });
        }

        Ok(Parameters {
            namespace: present(self.namespace_name)
                .unwrap_or_else(|| defaults::NAMESPACE.to_string()),
            base_domain,
            organization_name: present(self.organization_name)
                .unwrap_or_else(|| defaults::ORGANIZATION_NAME.to_string()),
            ldap_ip,
            users_organization_unit: present(self.users_organization_unit)
                .unwrap_or_else(|| defaults::USERS_ORGANIZATION_UNIT.to_string()),
            applications_organization_unit: present(self.applications_organization_unit)
                .unwrap_or_else(|| defaults::APPLICATIONS_ORGANIZATION_UNIT.to_string()),
        })
    }
}

/// Trimmed value, or `None` when absent or blank
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// RFC 1123 label: lowercase alphanumerics and `-`, alphanumeric at both ends
fn is_dns_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let edge = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();

    !bytes.is_empty()
        && bytes.len() <= 63
        && bytes.first().is_some_and(edge)
        && bytes.last().is_some_and(edge)
        && bytes.iter().all(|b| edge(b) || *b == b'-')
}

impl Parameters {
    /// `ldap.<baseDomain>`
    pub fn hostname(&self) -> String {
        format!("ldap.{}", self.base_domain)
    }

    /// Base domain labels as `dc=` components, e.g. `dc=example,dc=com`
    pub fn base_dn(&self) -> String {
        self.base_domain
            .split('.')
            .map(|dc| format!("dc={}", dc))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn admin_dn(&self) -> String {
        format!("cn=admin,{}", self.base_dn())
    }

    pub fn unit_dn(&self, unit: &str) -> String {
        format!("ou={},{}", unit, self.base_dn())
    }

    pub fn users_dn(&self) -> String {
        self.unit_dn(&self.users_organization_unit)
    }

    pub fn applications_dn(&self) -> String {
        self.unit_dn(&self.applications_organization_unit)
    }
}
