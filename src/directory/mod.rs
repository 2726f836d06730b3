// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The OpenLDAP directory component.
//!
//! [`DirectoryService::declare`] expands resolved parameters into a validated
//! resource graph:
//!
//! ```text
//! Certificate/<name>-ca -> Issuer/<name>-ca -> Certificate/<name> --+
//! ConfigMap/<name>, ConfigMap/<name>-files, ConfigMap/<name>-scripts -+-> StatefulSet/<name> -> Service/<name>
//! RandomString/<name> -> Secret/<name> ------------------------------+
//! ```
//!
//! Nothing here talks to a cluster. Submission is left to
//! [`crate::kubernetes`] or to whatever consumes the rendered manifests.

pub mod bootstrap;
pub mod certificates;
pub mod environment;
pub mod network;
pub mod workload;

use crate::config::Config;
use crate::credentials::Credential;
use crate::error::{DirectoryError, Result};
use crate::graph::{ResourceGraph, ResourceId, ResourceNode};
use crate::params::Parameters;
use crate::types::{GeneratedToken, Resource};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::{debug, info, instrument};
use workload::WorkloadInputs;

/// Object names derived from the component name
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectNames {
    base: String,
}

impl ObjectNames {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> String {
        self.base.clone()
    }

    pub fn ca(&self) -> String {
        format!("{}-ca", self.base)
    }

    pub fn issuer(&self) -> String {
        format!("{}-ca", self.base)
    }

    pub fn certificate(&self) -> String {
        self.base()
    }

    pub fn ca_secret(&self) -> String {
        format!("{}-ca-tls", self.base)
    }

    pub fn tls_secret(&self) -> String {
        format!("{}-tls", self.base)
    }

    pub fn files(&self) -> String {
        format!("{}-files", self.base)
    }

    pub fn scripts(&self) -> String {
        format!("{}-scripts", self.base)
    }
}

pub(crate) fn object_meta(name: String, namespace: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    }
}

/// Settings that shape the declaration but are not directory parameters
#[derive(Clone, Debug, PartialEq)]
pub struct DeclareOptions {
    pub stack_name: String,
    pub protect: bool,
}

impl From<&Config> for DeclareOptions {
    fn from(config: &Config) -> Self {
        Self {
            stack_name: config.stack_name.clone(),
            protect: config.protect,
        }
    }
}

/// Values exposed to the caller once the graph is declared
#[derive(Clone, Debug)]
pub struct Outputs {
    pub password: Credential,
    pub hostname: String,
}

#[derive(Debug)]
pub struct DirectoryService {
    names: ObjectNames,
    params: Parameters,
    graph: ResourceGraph<Resource>,
    token: ResourceId,
}

fn declare_node(
    graph: &mut ResourceGraph<Resource>,
    name: String,
    resource: Resource,
    depends_on: &[&ResourceId],
    protect: bool,
) -> Result<ResourceId> {
    let id = ResourceId::new(resource.kind(), name);
    let node = depends_on
        .iter()
        .fold(ResourceNode::new(id, resource), |node, dep| {
            node.depends_on((*dep).clone())
        })
        .protected(protect);
    debug!(id = %node.id, depends_on = node.depends_on.len(), "declared resource");
    graph.add(node)
}

/// The password held by the token node, the only source of the credential
fn token_credential(graph: &ResourceGraph<Resource>, token: &ResourceId) -> Result<Credential> {
    match graph.get(token).map(|node| &node.spec) {
        Some(Resource::RandomString(t)) => Ok(t.credential.clone()),
        _ => Err(DirectoryError::DanglingDependency {
            node: ResourceId::new("Secret", token.name()),
            missing: token.clone(),
        }),
    }
}

impl DirectoryService {
    /// Declare every resource of one directory instance.
    #[instrument(skip(params, options, credential), fields(namespace = %params.namespace))]
    pub fn declare(
        name: &str,
        params: Parameters,
        options: &DeclareOptions,
        credential: Credential,
    ) -> Result<Self> {
        let names = ObjectNames::new(name);
        let protect = options.protect;
        let mut graph = ResourceGraph::new(name);

        let ca = certificates::ca_certificate(&names, &params, &options.stack_name);
        let issuer = certificates::issuer(&names, &params, &ca);
        let certificate = certificates::service_certificate(&names, &params, &issuer);
        let tls_secret = certificate.spec.secret_name.clone();

        let ca_id = declare_node(&mut graph, names.ca(), Resource::Certificate(ca), &[], protect)?;
        let issuer_id = declare_node(
            &mut graph,
            names.issuer(),
            Resource::Issuer(issuer),
            &[&ca_id],
            protect,
        )?;
        let certificate_id = declare_node(
            &mut graph,
            names.certificate(),
            Resource::Certificate(certificate),
            &[&issuer_id],
            protect,
        )?;

        let config_map_id = declare_node(
            &mut graph,
            names.base(),
            Resource::ConfigMap(environment::core_config_map(&names, &params)),
            &[],
            protect,
        )?;
        let files_id = declare_node(
            &mut graph,
            names.files(),
            Resource::ConfigMap(bootstrap::files_config_map(&names, &params)),
            &[],
            protect,
        )?;
        let scripts_id = declare_node(
            &mut graph,
            names.scripts(),
            Resource::ConfigMap(bootstrap::scripts_config_map(&names, &params)),
            &[],
            protect,
        )?;

        let token_id = declare_node(
            &mut graph,
            names.base(),
            Resource::RandomString(GeneratedToken::new(credential)),
            &[],
            protect,
        )?;
        let password = token_credential(&graph, &token_id)?;
        let secret_id = declare_node(
            &mut graph,
            names.base(),
            Resource::Secret(environment::credentials_secret(&names, &params, &password)),
            &[&token_id],
            protect,
        )?;

        let config_map = names.base();
        let secret = names.base();
        let files = names.files();
        let scripts = names.scripts();
        let stateful_set = workload::stateful_set(
            &names,
            &params,
            &WorkloadInputs {
                config_map: &config_map,
                secret: &secret,
                files: &files,
                scripts: &scripts,
                tls_secret: &tls_secret,
            },
        );
        let stateful_set_id = declare_node(
            &mut graph,
            names.base(),
            Resource::StatefulSet(stateful_set),
            &[&certificate_id, &config_map_id, &secret_id, &files_id, &scripts_id],
            protect,
        )?;

        declare_node(
            &mut graph,
            names.base(),
            Resource::Service(network::load_balancer(&names, &params)),
            &[&stateful_set_id],
            protect,
        )?;

        graph.validate()?;
        info!(
            resources = graph.len(),
            hostname = %params.hostname(),
            "declared directory service"
        );

        Ok(Self {
            names,
            params,
            graph,
            token: token_id,
        })
    }

    pub fn names(&self) -> &ObjectNames {
        &self.names
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn graph(&self) -> &ResourceGraph<Resource> {
        &self.graph
    }

    /// Nodes in the order they must be submitted
    pub fn submission_order(&self) -> Result<Vec<&ResourceNode<Resource>>> {
        self.graph.topological_order()
    }

    pub fn outputs(&self) -> Result<Outputs> {
        Ok(Outputs {
            password: token_credential(&self.graph, &self.token)?,
            hostname: self.params.hostname(),
        })
    }
}
