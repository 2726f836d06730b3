// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use kube::Client;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use openldap_stack::cli::{format_outputs, Cli, Commands};
use openldap_stack::config::Config;
use openldap_stack::credentials::Credential;
use openldap_stack::directory::{DeclareOptions, DirectoryService};
use openldap_stack::kubernetes::{
    apply_graph, destroy_graph, ensure_namespace_exists, resolve_credential,
    wait_for_cert_manager_crds, ApplyOptions,
};
use openldap_stack::render::render_manifests;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so rendered manifests on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration and resolve parameters before anything is declared
    let config = Config::from_env();
    let params = config
        .inputs
        .clone()
        .resolve()
        .context("Invalid directory configuration")?;
    let options = DeclareOptions::from(&config);
    info!(
        "Configuration loaded: component={} namespace={} stack={}",
        config.component_name, params.namespace, config.stack_name
    );

    match cli.command {
        Commands::Render => {
            let service = DirectoryService::declare(
                &config.component_name,
                params,
                &options,
                Credential::generate(),
            )?;
            print!("{}", render_manifests(service.graph())?);
            eprint!("{}", format_outputs(&service.outputs()?, cli.show_secrets));
        }
        Commands::Apply { no_wait, timeout } => {
            let client = Client::try_default().await?;
            info!("Connected to Kubernetes cluster");

            ensure_namespace_exists(&client, &params.namespace).await?;
            wait_for_cert_manager_crds(&client).await?;

            let credential =
                resolve_credential(&client, &params.namespace, &config.component_name).await?;
            let service =
                DirectoryService::declare(&config.component_name, params, &options, credential)?;

            let apply_options = ApplyOptions {
                wait: !no_wait,
                timeout: Duration::from_secs(timeout),
            };
            let applied = apply_graph(&client, service.graph(), &apply_options)
                .await
                .context("Apply failed")?;
            info!("Applied {} resources", applied.len());
            print!("{}", format_outputs(&service.outputs()?, cli.show_secrets));
        }
        Commands::Destroy => {
            let client = Client::try_default().await?;
            info!("Connected to Kubernetes cluster");

            // The password plays no part in teardown
            let service = DirectoryService::declare(
                &config.component_name,
                params,
                &options,
                Credential::generate(),
            )?;
            let deleted = destroy_graph(&client, service.graph())
                .await
                .context("Destroy failed")?;
            info!("Deleted {} resources", deleted.len());
        }
    }

    Ok(())
}
