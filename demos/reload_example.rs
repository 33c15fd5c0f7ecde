//! Hot reload against a filesystem-backed corpus: queries issued before a
//! reload keep seeing the old snapshot; new queries see the new one.
//!
//! Run with:
//!   `cargo run --example reload_example`

use std::sync::Arc;

use aur_index::prelude::*;

#[tokio::main]
async fn main() {
    println!("╔═══════════════════════════════════════════════════════╗");
    println!("║            aur-index: Hot Reload Example               ║");
    println!("╚═══════════════════════════════════════════════════════╝\n");

    let db_dir = std::env::temp_dir().join("aur-index-reload-demo");
    std::fs::create_dir_all(&db_dir).unwrap();
    std::fs::write(
        db_dir.join("expac-git"),
        serde_json::to_vec(&PackageRecord {
            name: "expac-git".into(),
            pkgver: "10.1".into(),
            ..Default::default()
        })
        .unwrap(),
    )
    .unwrap();

    let storage = Arc::new(FilesystemStorage::new(&db_dir));
    let engine = QueryEngine::new(storage);
    println!("loaded {} package(s)", engine.health().package_count);

    std::fs::write(
        db_dir.join("auracle-git"),
        serde_json::to_vec(&PackageRecord {
            name: "auracle-git".into(),
            pkgver: "0".into(),
            ..Default::default()
        })
        .unwrap(),
    )
    .unwrap();

    println!("wrote a new blob, but the published snapshot is unchanged:");
    println!("  package_count = {}", engine.health().package_count);

    engine.reload().await;
    println!("after reload():");
    println!("  package_count = {}", engine.health().package_count);

    std::fs::remove_dir_all(&db_dir).ok();
}
