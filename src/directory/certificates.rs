// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Self-signed CA, the issuer backed by it and the service certificate

use super::{object_meta, ObjectNames};
use crate::constants::pki;
use crate::params::Parameters;
use crate::types::cert_manager::{
    CaIssuer, Certificate, CertificatePrivateKey, CertificateSpec, IssuerRef, IssuerSpec,
};
use crate::types::Issuer;

fn private_key() -> Option<CertificatePrivateKey> {
    Some(CertificatePrivateKey {
        algorithm: pki::KEY_ALGORITHM.to_string(),
        size: pki::KEY_SIZE,
    })
}

/// CA certificate signed by the cluster-wide self-signed issuer
pub fn ca_certificate(names: &ObjectNames, params: &Parameters, stack_name: &str) -> Certificate {
    Certificate {
        metadata: object_meta(names.ca(), &params.namespace),
        spec: CertificateSpec {
            is_ca: Some(true),
            common_name: Some(format!(
                "{} Self-signed CA - {}",
                params.organization_name, stack_name
            )),
            dns_names: vec![],
            secret_name: names.ca_secret(),
            private_key: private_key(),
            issuer_ref: IssuerRef {
                name: pki::BOOTSTRAP_ISSUER_NAME.to_string(),
                kind: Some(pki::BOOTSTRAP_ISSUER_KIND.to_string()),
            },
        },
        status: None,
    }
}

/// Namespaced issuer signing with the CA's key material
pub fn issuer(names: &ObjectNames, params: &Parameters, ca: &Certificate) -> Issuer {
    Issuer {
        metadata: object_meta(names.issuer(), &params.namespace),
        spec: IssuerSpec {
            ca: Some(CaIssuer {
                secret_name: ca.spec.secret_name.clone(),
            }),
        },
        status: None,
    }
}

/// Leaf certificate for the directory hostname
pub fn service_certificate(names: &ObjectNames, params: &Parameters, issuer: &Issuer) -> Certificate {
    let hostname = params.hostname();
    Certificate {
        metadata: object_meta(names.certificate(), &params.namespace),
        spec: CertificateSpec {
            is_ca: None,
            common_name: Some(hostname.clone()),
            dns_names: vec![hostname],
            secret_name: names.tls_secret(),
            private_key: private_key(),
            issuer_ref: IssuerRef {
                name: issuer.metadata.name.clone().unwrap_or_default(),
                kind: None,
            },
        },
        status: None,
    }
}
