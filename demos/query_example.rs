//! Lookup, search, and resolve over a small in-memory corpus.
//!
//! Run with:
//!   `cargo run --example query_example`

use std::sync::Arc;

use aur_index::prelude::*;

fn put(storage: &InMemoryStorage, name: &str, pkgver: &str, description: &str, provides: &[&str]) {
    let record = PackageRecord {
        name: name.to_string(),
        pkgver: pkgver.to_string(),
        description: description.to_string(),
        provides: provides.iter().map(|s| (*s).to_string()).collect(),
        ..Default::default()
    };
    storage.put(name.to_string(), serde_json::to_vec(&record).unwrap());
}

fn main() {
    println!("╔═══════════════════════════════════════════════════════╗");
    println!("║       aur-index: Lookup / Search / Resolve Example     ║");
    println!("╚═══════════════════════════════════════════════════════╝\n");

    let storage = InMemoryStorage::new();
    put(&storage, "expac-git", "10.1", "pacman database extraction utility", &["expac=10"]);
    put(&storage, "auracle-git", "0", "AUR RPC client", &[]);
    put(&storage, "pacman-git", "6.0.0", "package manager", &["pacman=6.0.0"]);
    let engine = QueryEngine::new(Arc::new(storage));

    println!("┌─ Lookup by name ───────────────────────────────────────┐");
    let result = engine
        .lookup(
            &LookupBy::Name,
            &["expac-git".to_string(), "missing-pkg".to_string()],
            &FieldMask::single("pkgver"),
        )
        .unwrap();
    for pkg in &result.packages {
        println!("  found: {} (version field: {})", pkg.name, pkg.pkgver);
    }
    println!("  not found: {:?}", result.not_found_names);

    println!("\n┌─ Search name+description ──────────────────────────────┐");
    let packages = engine
        .search(
            &SearchBy::NameDesc,
            &SearchLogic::Disjunctive,
            &["*pacman*".to_string()],
            &FieldMask::single("name"),
        )
        .unwrap();
    for pkg in &packages {
        println!("  match: {}", pkg.name);
    }

    println!("\n┌─ Resolve a depstring ──────────────────────────────────┐");
    let resolved = engine.resolve(&["pacman>=6.0.0".to_string()], &FieldMask::single("name"));
    for entry in &resolved {
        let providers: Vec<_> = entry.providers.iter().map(|p| p.name.as_str()).collect();
        println!("  {} satisfied by {:?}", entry.depstring, providers);
    }

    println!("\nEngine health: {:?}", engine.health());
}
