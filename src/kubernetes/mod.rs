// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for submitting a declared graph: namespace bootstrap,
//! CRD discovery, apply/destroy and credential lookup.

pub mod apply;
pub mod credentials;
pub mod crd;
pub mod namespaces;
pub mod readiness;

pub use apply::{apply_graph, destroy_graph, ApplyOptions};
pub use credentials::{existing_credential, resolve_credential};
pub use crd::{wait_for_cert_manager_crds, wait_for_cert_manager_crds_with, Backoff};
pub use namespaces::ensure_namespace_exists;
