// SPDX-License-Identifier: Apache-2.0
//! Keeps the served route table and the published endpoint contract in
//! lockstep; editing one without the other fails here.

use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EndpointsContract {
    endpoints: Vec<EndpointEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EndpointEntry {
    method: String,
    path: String,
    auth: String,
}

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn load_contract() -> EndpointsContract {
    let raw = fs::read_to_string(workspace_root().join("docs/contracts/ENDPOINTS.json"))
        .expect("read endpoints contract");
    serde_json::from_str(&raw).expect("parse endpoints contract")
}

fn routed_paths() -> BTreeSet<String> {
    let source = fs::read_to_string(workspace_root().join("crates/baret-server/src/lib.rs"))
        .expect("read router source");
    let route_re = Regex::new(r#"\.route\(\s*"([^"]+)""#).expect("route regex");
    route_re
        .captures_iter(&source)
        .map(|cap| cap[1].to_string())
        .collect()
}

#[test]
fn published_contract_matches_the_router() {
    let contract = load_contract();

    let mut contract_paths = BTreeSet::new();
    for entry in &contract.endpoints {
        assert_eq!(entry.method, "GET", "unexpected method for {}", entry.path);
        assert!(
            matches!(entry.auth.as_str(), "none" | "bearer" | "bearer+role"),
            "unknown auth class for {}: {}",
            entry.path,
            entry.auth
        );
        assert!(
            contract_paths.insert(entry.path.clone()),
            "duplicate contract entry: {}",
            entry.path
        );
    }

    let routed = routed_paths();
    assert!(!routed.is_empty(), "no routes parsed from the router source");
    let missing: Vec<_> = routed.difference(&contract_paths).collect();
    let stale: Vec<_> = contract_paths.difference(&routed).collect();
    assert!(
        missing.is_empty(),
        "routes missing from contract: {missing:?}"
    );
    assert!(stale.is_empty(), "contract entries with no route: {stale:?}");
}

#[test]
fn auth_classes_follow_the_path_layout() {
    let contract = load_contract();
    for entry in &contract.endpoints {
        let expected = if entry.path.starts_with("/v1/export/") {
            "bearer+role"
        } else if entry.path.starts_with("/v1/") && entry.path != "/v1/version" {
            "bearer"
        } else {
            "none"
        };
        assert_eq!(entry.auth, expected, "auth class for {}", entry.path);
    }
}
