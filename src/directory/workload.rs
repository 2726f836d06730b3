// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Single-replica stateful workload running the directory image

use super::{object_meta, ObjectNames};
use crate::constants::{image, labels, ports, STORAGE_REQUEST};
use crate::params::Parameters;
use k8s_openapi::api::apps::v1::{StatefulSet, StatefulSetSpec};
use k8s_openapi::api::core::v1::{
    ConfigMapEnvSource, ConfigMapVolumeSource, Container, ContainerPort, EnvFromSource,
    ExecAction, KeyToPath, PersistentVolumeClaim, PersistentVolumeClaimSpec, PodSpec,
    PodTemplateSpec, Probe, SecretEnvSource, SecretVolumeSource, Volume, VolumeMount,
    VolumeResourceRequirements,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use std::collections::BTreeMap;

const CERTS_VOLUME: &str = "certs";
const FILES_VOLUME: &str = "files";
const SCRIPTS_VOLUME: &str = "scripts";
const SCRIPT_MODE: i32 = 0o755;

/// References to the objects the pod consumes
pub struct WorkloadInputs<'a> {
    pub config_map: &'a str,
    pub secret: &'a str,
    pub files: &'a str,
    pub scripts: &'a str,
    pub tls_secret: &'a str,
}

/// Succeeds only when an authenticated bind as the admin DN works
pub fn bind_check_command(admin_dn: &str) -> Vec<String> {
    vec![
        "bash".to_string(),
        "-c".to_string(),
        format!(
            "[ \"$(ldapwhoami -D'{admin_dn}' -w\"${env}\" 2>&1)\" = 'dn:{admin_dn}' ]",
            env = image::ENV_ADMIN_PASSWORD,
        ),
    ]
}

fn bind_probe(admin_dn: &str) -> Probe {
    Probe {
        exec: Some(ExecAction {
            command: Some(bind_check_command(admin_dn)),
        }),
        ..Default::default()
    }
}

fn app_labels(names: &ObjectNames) -> BTreeMap<String, String> {
    BTreeMap::from([(labels::APP.to_string(), names.base())])
}

/// Data, schema and certificate asset directories, all on the one claim
fn storage_mounts(claim: &str) -> Vec<VolumeMount> {
    [image::DATA_PATH, image::SCHEMA_PATH, image::CERTS_PATH]
        .iter()
        .map(|path| VolumeMount {
            name: claim.to_string(),
            mount_path: path.to_string(),
            sub_path: Some(path.trim_start_matches('/').to_string()),
            ..Default::default()
        })
        .collect()
}

fn read_only_mount(volume: &str, path: &str) -> VolumeMount {
    VolumeMount {
        name: volume.to_string(),
        mount_path: path.to_string(),
        read_only: Some(true),
        ..Default::default()
    }
}

fn key_to_path(key: &str, path: &str) -> KeyToPath {
    KeyToPath {
        key: key.to_string(),
        path: path.to_string(),
        ..Default::default()
    }
}

fn volumes(inputs: &WorkloadInputs<'_>) -> Vec<Volume> {
    vec![
        Volume {
            name: CERTS_VOLUME.to_string(),
            secret: Some(SecretVolumeSource {
                secret_name: Some(inputs.tls_secret.to_string()),
                items: Some(vec![
                    key_to_path("tls.crt", "ldap.crt"),
                    key_to_path("tls.key", "ldap.key"),
                    key_to_path("ca.crt", "ca.crt"),
                ]),
                ..Default::default()
            }),
            ..Default::default()
        },
        Volume {
            name: FILES_VOLUME.to_string(),
            config_map: Some(ConfigMapVolumeSource {
                name: inputs.files.to_string().into(),
                ..Default::default()
            }),
            ..Default::default()
        },
        Volume {
            name: SCRIPTS_VOLUME.to_string(),
            config_map: Some(ConfigMapVolumeSource {
                name: inputs.scripts.to_string().into(),
                default_mode: Some(SCRIPT_MODE),
                ..Default::default()
            }),
            ..Default::default()
        },
    ]
}

fn container(names: &ObjectNames, params: &Parameters, inputs: &WorkloadInputs<'_>) -> Container {
    let probe = bind_probe(&params.admin_dn());

    let mut volume_mounts = storage_mounts(&names.base());
    volume_mounts.push(read_only_mount(CERTS_VOLUME, image::CERTS_MOUNT));
    volume_mounts.push(read_only_mount(FILES_VOLUME, image::FILES_MOUNT));
    volume_mounts.push(read_only_mount(SCRIPTS_VOLUME, image::STARTUP_PATH));

    Container {
        name: names.base(),
        image: Some(image::IMAGE.to_string()),
        ports: Some(vec![
            ContainerPort {
                name: Some("ldap".to_string()),
                container_port: ports::LDAP,
                ..Default::default()
            },
            ContainerPort {
                name: Some("ldaps".to_string()),
                container_port: ports::LDAPS,
                ..Default::default()
            },
        ]),
        volume_mounts: Some(volume_mounts),
        env_from: Some(vec![
            EnvFromSource {
                config_map_ref: Some(ConfigMapEnvSource {
                    name: inputs.config_map.to_string().into(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            EnvFromSource {
                secret_ref: Some(SecretEnvSource {
                    name: inputs.secret.to_string().into(),
                    ..Default::default()
                }),
                ..Default::default()
            },
        ]),
        startup_probe: Some(probe.clone()),
        readiness_probe: Some(probe.clone()),
        liveness_probe: Some(probe),
        ..Default::default()
    }
}

/// Short pod hostname: the first label of the service hostname
fn pod_hostname(params: &Parameters) -> String {
    params
        .hostname()
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}

pub fn stateful_set(names: &ObjectNames, params: &Parameters, inputs: &WorkloadInputs<'_>) -> StatefulSet {
    let claim = PersistentVolumeClaim {
        metadata: ObjectMeta {
            name: Some(names.base()),
            ..Default::default()
        },
        spec: Some(PersistentVolumeClaimSpec {
            access_modes: Some(vec!["ReadWriteOnce".to_string()]),
            resources: Some(VolumeResourceRequirements {
                requests: Some(BTreeMap::from([(
                    "storage".to_string(),
                    Quantity(STORAGE_REQUEST.to_string()),
                )])),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    };

    StatefulSet {
        metadata: object_meta(names.base(), &params.namespace),
        spec: Some(StatefulSetSpec {
            replicas: Some(1),
            pod_management_policy: Some("Parallel".to_string()),
            service_name: names.base().into(),
            selector: LabelSelector {
                match_labels: Some(app_labels(names)),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(app_labels(names)),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![container(names, params, inputs)],
                    volumes: Some(volumes(inputs)),
                    hostname: Some(pod_hostname(params)),
                    enable_service_links: Some(false),
                    ..Default::default()
                }),
            },
            volume_claim_templates: Some(vec![claim]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::InputParameters;

    fn params() -> Parameters {
        InputParameters {
            base_domain: Some("corp.test".to_string()),
            ldap_ip: Some("10.0.0.5".to_string()),
            ..Default::default()
        }
        .resolve()
        .unwrap()
    }

    fn inputs() -> WorkloadInputs<'static> {
        WorkloadInputs {
            config_map: "openldap",
            secret: "openldap",
            files: "openldap-files",
            scripts: "openldap-scripts",
            tls_secret: "openldap-tls",
        }
    }

    fn build() -> StatefulSet {
        stateful_set(&ObjectNames::new("openldap"), &params(), &inputs())
    }

    fn pod_spec(sts: &StatefulSet) -> &PodSpec {
        sts.spec.as_ref().unwrap().template.spec.as_ref().unwrap()
    }

    #[test]
    fn test_single_replica_parallel() {
        let sts = build();
        let spec = sts.spec.as_ref().unwrap();

        assert_eq!(spec.replicas, Some(1));
        assert_eq!(spec.pod_management_policy.as_deref(), Some("Parallel"));
        assert_eq!(
            spec.selector.match_labels.as_ref().unwrap()["app"],
            "openldap"
        );
        assert_eq!(
            spec.template.metadata.as_ref().unwrap().labels.as_ref().unwrap()["app"],
            "openldap"
        );
        assert_eq!(pod_spec(&sts).containers.len(), 1);
    }

    #[test]
    fn test_storage_subpath_mounts() {
        let sts = build();
        let mounts = pod_spec(&sts).containers[0].volume_mounts.as_ref().unwrap();
        let storage: Vec<(&str, Option<&str>)> = mounts
            .iter()
            .filter(|m| m.name == "openldap")
            .map(|m| (m.mount_path.as_str(), m.sub_path.as_deref()))
            .collect();

        assert_eq!(
            storage,
            vec![
                ("/var/lib/ldap", Some("var/lib/ldap")),
                ("/etc/ldap/slapd.d", Some("etc/ldap/slapd.d")),
                (
                    "/container/service/slapd/assets/certs",
                    Some("container/service/slapd/assets/certs")
                ),
            ]
        );

        let claims = sts.spec.as_ref().unwrap().volume_claim_templates.as_ref().unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].metadata.name.as_deref(), Some("openldap"));
    }

    #[test]
    fn test_read_only_mounts() {
        let sts = build();
        let mounts = pod_spec(&sts).containers[0].volume_mounts.as_ref().unwrap();
        let read_only: Vec<(&str, &str)> = mounts
            .iter()
            .filter(|m| m.read_only == Some(true))
            .map(|m| (m.name.as_str(), m.mount_path.as_str()))
            .collect();

        assert_eq!(
            read_only,
            vec![
                ("certs", "/certs"),
                ("files", "/files"),
                ("scripts", "/container/service/:copy-certs"),
            ]
        );
    }

    #[test]
    fn test_volumes() {
        let sts = build();
        let volumes = pod_spec(&sts).volumes.as_ref().unwrap();

        let certs = volumes[0].secret.as_ref().unwrap();
        assert_eq!(certs.secret_name.as_deref(), Some("openldap-tls"));
        let items: Vec<(&str, &str)> = certs
            .items
            .as_ref()
            .unwrap()
            .iter()
            .map(|i| (i.key.as_str(), i.path.as_str()))
            .collect();
        assert_eq!(
            items,
            vec![("tls.crt", "ldap.crt"), ("tls.key", "ldap.key"), ("ca.crt", "ca.crt")]
        );

        let scripts = volumes[2].config_map.as_ref().unwrap();
        assert_eq!(scripts.default_mode, Some(0o755));
        assert!(volumes[1].config_map.as_ref().unwrap().default_mode.is_none());
    }

    #[test]
    fn test_environment_only_from_sources() {
        let sts = build();
        let container = &pod_spec(&sts).containers[0];

        assert!(container.env.is_none());
        let env_from = container.env_from.as_ref().unwrap();
        assert_eq!(env_from.len(), 2);
        assert!(env_from[0].config_map_ref.is_some());
        assert!(env_from[1].secret_ref.is_some());
    }

    #[test]
    fn test_all_probes_run_bind_check() {
        let sts = build();
        let container = &pod_spec(&sts).containers[0];
        let expected = bind_check_command("cn=admin,dc=corp,dc=test");

        for probe in [
            &container.startup_probe,
            &container.readiness_probe,
            &container.liveness_probe,
        ] {
            let command = probe.as_ref().unwrap().exec.as_ref().unwrap().command.as_ref().unwrap();
            assert_eq!(command, &expected);
        }
    }

    #[test]
    fn test_bind_check_command() {
        let command = bind_check_command("cn=admin,dc=corp,dc=test");

        assert_eq!(command[0], "bash");
        assert_eq!(command[1], "-c");
        assert_eq!(
            command[2],
            "[ \"$(ldapwhoami -D'cn=admin,dc=corp,dc=test' -w\"$LDAP_ADMIN_PASSWORD\" 2>&1)\" = 'dn:cn=admin,dc=corp,dc=test' ]"
        );
    }

    #[test]
    fn test_pod_settings() {
        let sts = build();
        let pod = pod_spec(&sts);

        assert_eq!(pod.hostname.as_deref(), Some("ldap"));
        assert_eq!(pod.enable_service_links, Some(false));

        let ports: Vec<i32> = pod.containers[0]
            .ports
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.container_port)
            .collect();
        assert_eq!(ports, vec![389, 636]);
        assert_eq!(pod.containers[0].image.as_deref(), Some("osixia/openldap:latest"));
    }
}
