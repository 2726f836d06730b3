// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Field manager used for server-side apply
pub const FIELD_MANAGER: &str = "openldap-stack";

/// Parameter defaults applied during resolution
pub mod defaults {
    pub const COMPONENT_NAME: &str = "openldap";
    pub const NAMESPACE: &str = "default";
    pub const ORGANIZATION_NAME: &str = "OpenLDAP Test Stack";
    pub const USERS_ORGANIZATION_UNIT: &str = "Users";
    pub const APPLICATIONS_ORGANIZATION_UNIT: &str = "Applications";
    pub const STACK_NAME: &str = "dev";
}

/// Labels and annotations stamped onto declared objects
pub mod labels {
    /// Owner tag carrying the component instance name
    pub const INSTANCE: &str = "app.kubernetes.io/instance";
    pub const MANAGED_BY: &str = "app.kubernetes.io/managed-by";
    /// Pod selector label
    pub const APP: &str = "app";
    /// Lets the load-balancer controller share one IP between services
    pub const ALLOW_SHARED_IP: &str = "metallb.universe.tf/allow-shared-ip";
}

/// Certificate chain policy
pub mod pki {
    pub const KEY_ALGORITHM: &str = "ECDSA";
    pub const KEY_SIZE: u32 = 384;
    /// Cluster-wide issuer that signs the self-signed CA
    pub const BOOTSTRAP_ISSUER_KIND: &str = "ClusterIssuer";
    pub const BOOTSTRAP_ISSUER_NAME: &str = "selfsigned";
}

/// Contract of the osixia/openldap container image
pub mod image {
    pub const IMAGE: &str = "osixia/openldap:latest";
    pub const LOG_LEVEL: &str = "32768";

    pub const ENV_ORGANISATION: &str = "LDAP_ORGANISATION";
    pub const ENV_DOMAIN: &str = "LDAP_DOMAIN";
    pub const ENV_LOG_LEVEL: &str = "LDAP_LOG_LEVEL";
    pub const ENV_ADMIN_PASSWORD: &str = "LDAP_ADMIN_PASSWORD";
    pub const ENV_CONFIG_PASSWORD: &str = "LDAP_CONFIG_PASSWORD";

    pub const DATA_PATH: &str = "/var/lib/ldap";
    pub const SCHEMA_PATH: &str = "/etc/ldap/slapd.d";
    pub const CERTS_PATH: &str = "/container/service/slapd/assets/certs";
    pub const CUSTOM_BOOTSTRAP_PATH: &str =
        "/container/service/slapd/assets/config/bootstrap/ldif/custom";
    /// Lifecycle hook directory picked up by the image's startup sequence
    pub const STARTUP_PATH: &str = "/container/service/:copy-certs";

    pub const CERTS_MOUNT: &str = "/certs";
    pub const FILES_MOUNT: &str = "/files";
}

/// Network ports exposed by the directory
pub mod ports {
    pub const LDAP: i32 = 389;
    pub const LDAPS: i32 = 636;
}

/// Storage requested for the data volume claim
pub const STORAGE_REQUEST: &str = "1G";

/// Length of the generated admin/config password
pub const PASSWORD_LENGTH: usize = 32;

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRDs
    pub const POLL_INTERVAL_SECS: u64 = 2;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 30;
    /// Number of discovery attempts before giving up
    pub const POLL_ATTEMPTS: u32 = 6;
}
