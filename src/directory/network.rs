// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::{object_meta, ObjectNames};
use crate::constants::{labels, ports};
use crate::params::Parameters;
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use std::collections::BTreeMap;

fn service_port(name: &str, port: i32) -> ServicePort {
    ServicePort {
        name: Some(name.to_string()),
        port,
        ..Default::default()
    }
}

/// Load balancer on the caller's static IP, shareable with other services
pub fn load_balancer(names: &ObjectNames, params: &Parameters) -> Service {
    let mut metadata = object_meta(names.base(), &params.namespace);
    metadata.annotations = Some(BTreeMap::from([(
        labels::ALLOW_SHARED_IP.to_string(),
        params.ldap_ip.clone(),
    )]));

    Service {
        metadata,
        spec: Some(ServiceSpec {
            type_: Some("LoadBalancer".to_string()),
            selector: Some(BTreeMap::from([(labels::APP.to_string(), names.base())])),
            load_balancer_ip: Some(params.ldap_ip.clone()),
            ports: Some(vec![
                service_port("ldap", ports::LDAP),
                service_port("ldaps", ports::LDAPS),
            ]),
            ..Default::default()
        }),
        ..Default::default()
    }
}
