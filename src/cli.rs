// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command line for declaring, applying and tearing down a directory.
//!
//! Directory parameters come from the environment (see [`crate::config`]):
//!
//! ```bash
//! BASE_DOMAIN=corp.test LDAP_IP=10.0.0.5 openldap-stack render
//! BASE_DOMAIN=corp.test LDAP_IP=10.0.0.5 openldap-stack apply --timeout 600
//! BASE_DOMAIN=corp.test LDAP_IP=10.0.0.5 openldap-stack destroy
//! ```

use crate::directory::Outputs;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "openldap-stack")]
#[command(about = "Provision an OpenLDAP directory on Kubernetes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print the generated password instead of masking it
    #[arg(long, global = true)]
    pub show_secrets: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Print the manifests as a YAML stream, dependencies first
    Render,
    /// Server-side apply every resource to the current cluster
    Apply {
        /// Do not wait for dependencies to become ready
        #[arg(long)]
        no_wait: bool,

        /// Seconds to wait for each dependency to become ready
        #[arg(long, default_value_t = 300)]
        timeout: u64,
    },
    /// Delete every unprotected resource, dependents first
    Destroy,
}

/// Human-readable outputs block
pub fn format_outputs(outputs: &Outputs, show_secrets: bool) -> String {
    let password = if show_secrets {
        outputs.password.expose()
    } else {
        "[secret]"
    };
    format!(
        "Outputs:\n    hostname: {}\n    password: {}\n",
        outputs.hostname, password
    )
}
