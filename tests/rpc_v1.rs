//! Integration tests for the v1 wire adaptation layer: JSON in, JSON out,
//! field-mask defaulting and enum coercion applied at the boundary.

use std::sync::Arc;

use aur_index::prelude::*;
use aur_index::rpc::v1::{LookupRequest, RequestOptions, ResolveRequest, SearchRequest};

fn engine() -> QueryEngine {
    let storage = InMemoryStorage::new();
    let record = PackageRecord {
        name: "pacman-git".into(),
        pkgver: "6.0.0".into(),
        description: "package manager".into(),
        provides: vec!["pacman=6.0.0".into()],
        ..Default::default()
    };
    storage.put("pacman-git", serde_json::to_vec(&record).unwrap());
    QueryEngine::new(Arc::new(storage))
}

#[test]
fn lookup_request_round_trips_through_json() {
    let engine = engine();
    let json = r#"{"lookup_by":"NAME","names":["pacman-git"],"options":{"package_field_mask":["name","pkgver"]}}"#;
    let request: LookupRequest = serde_json::from_str(json).unwrap();
    let response = request.handle(&engine).unwrap();

    let wire = serde_json::to_string(&response).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&wire).unwrap();
    assert_eq!(parsed["packages"][0]["name"], "pacman-git");
    assert_eq!(parsed["packages"][0]["pkgver"], "6.0.0");
    assert!(parsed["not_found_names"].as_array().unwrap().is_empty());
}

#[test]
fn search_request_defaults_mask_to_name_only() {
    let engine = engine();
    let request = SearchRequest {
        search_by: "NAME_DESC".into(),
        search_logic: "DISJUNCTIVE".into(),
        terms: vec!["*manager*".into()],
        options: None,
    };
    let response = request.handle(&engine).unwrap();
    assert_eq!(response.packages.len(), 1);
    assert_eq!(response.packages[0].name, "pacman-git");
    assert!(response.packages[0].description.is_empty());
}

#[test]
fn resolve_request_defaults_mask_to_all_fields() {
    let engine = engine();
    let request = ResolveRequest {
        depstrings: vec!["pacman=6.0.0".into()],
        options: None,
    };
    let response = request.handle(&engine);
    assert_eq!(response.resolved_packages.len(), 1);
    let provider = &response.resolved_packages[0].providers[0];
    assert_eq!(provider.name, "pacman-git");
    assert_eq!(provider.pkgver, "6.0.0");
}

#[test]
fn unrecognized_wire_enum_fails_unimplemented_end_to_end() {
    let engine = engine();
    let request = LookupRequest {
        lookup_by: "NOT_A_REAL_KIND".into(),
        names: vec!["pacman-git".into()],
        options: Some(RequestOptions {
            package_field_mask: Some(vec!["name".into()]),
        }),
    };
    let err = request.handle(&engine).unwrap_err();
    assert!(err.to_string().contains("NOT_A_REAL_KIND"));
}
