// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The payload carried by every node of the directory's resource graph

use crate::constants::{labels, FIELD_MANAGER};
use crate::credentials::Credential;
use crate::error::Result;
use crate::graph::Owned;
use crate::types::cert_manager::{Certificate, Issuer};
use k8s_openapi::api::apps::v1::StatefulSet;
use k8s_openapi::api::core::v1::{ConfigMap, Secret, Service};
use kube::api::{ApiResource, DynamicObject, ObjectMeta};
use serde::Serialize;

/// Random value held by the engine rather than submitted to the cluster
#[derive(Clone, Debug)]
pub struct GeneratedToken {
    pub credential: Credential,
    pub owner: Option<String>,
}

impl GeneratedToken {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            owner: None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Resource {
    Certificate(Certificate),
    Issuer(Issuer),
    ConfigMap(ConfigMap),
    Secret(Secret),
    StatefulSet(StatefulSet),
    Service(Service),
    RandomString(GeneratedToken),
}

impl Resource {
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Certificate(_) => "Certificate",
            Resource::Issuer(_) => "Issuer",
            Resource::ConfigMap(_) => "ConfigMap",
            Resource::Secret(_) => "Secret",
            Resource::StatefulSet(_) => "StatefulSet",
            Resource::Service(_) => "Service",
            Resource::RandomString(_) => "RandomString",
        }
    }

    pub fn metadata(&self) -> Option<&ObjectMeta> {
        match self {
            Resource::Certificate(r) => Some(&r.metadata),
            Resource::Issuer(r) => Some(&r.metadata),
            Resource::ConfigMap(r) => Some(&r.metadata),
            Resource::Secret(r) => Some(&r.metadata),
            Resource::StatefulSet(r) => Some(&r.metadata),
            Resource::Service(r) => Some(&r.metadata),
            Resource::RandomString(_) => None,
        }
    }

    fn metadata_mut(&mut self) -> Option<&mut ObjectMeta> {
        match self {
            Resource::Certificate(r) => Some(&mut r.metadata),
            Resource::Issuer(r) => Some(&mut r.metadata),
            Resource::ConfigMap(r) => Some(&mut r.metadata),
            Resource::Secret(r) => Some(&mut r.metadata),
            Resource::StatefulSet(r) => Some(&mut r.metadata),
            Resource::Service(r) => Some(&mut r.metadata),
            Resource::RandomString(_) => None,
        }
    }

    /// Whether this node becomes an object in the cluster
    pub fn is_submitted(&self) -> bool {
        !matches!(self, Resource::RandomString(_))
    }

    pub fn api_resource(&self) -> Option<ApiResource> {
        Some(match self {
            Resource::Certificate(_) => ApiResource::erase::<Certificate>(&()),
            Resource::Issuer(_) => ApiResource::erase::<Issuer>(&()),
            Resource::ConfigMap(_) => ApiResource::erase::<ConfigMap>(&()),
            Resource::Secret(_) => ApiResource::erase::<Secret>(&()),
            Resource::StatefulSet(_) => ApiResource::erase::<StatefulSet>(&()),
            Resource::Service(_) => ApiResource::erase::<Service>(&()),
            Resource::RandomString(_) => return None,
        })
    }

    /// Manifest as JSON, including `apiVersion` and `kind`
    pub fn to_value(&self) -> Result<Option<serde_json::Value>> {
        fn value<K: Serialize>(k: &K) -> Result<Option<serde_json::Value>> {
            Ok(Some(serde_json::to_value(k)?))
        }

        match self {
            Resource::Certificate(r) => value(r),
            Resource::Issuer(r) => value(r),
            Resource::ConfigMap(r) => value(r),
            Resource::Secret(r) => value(r),
            Resource::StatefulSet(r) => value(r),
            Resource::Service(r) => value(r),
            Resource::RandomString(_) => Ok(None),
        }
    }

    /// Untyped object suitable for server-side apply
    pub fn to_dynamic(&self) -> Result<Option<DynamicObject>> {
        match self.to_value()? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}

impl Owned for Resource {
    fn tag_owner(&mut self, owner: &str) {
        if let Resource::RandomString(token) = self {
            token.owner = Some(owner.to_string());
            return;
        }
        if let Some(metadata) = self.metadata_mut() {
            let tags = metadata.labels.get_or_insert_with(Default::default);
            tags.insert(labels::INSTANCE.to_string(), owner.to_string());
            tags.insert(labels::MANAGED_BY.to_string(), FIELD_MANAGER.to_string());
        }
    }
}
