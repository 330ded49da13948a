//! Places the workspace `config.toml` next to the backend binary,
//! where `shared::config::load_config` looks for it.

use std::path::{Path, PathBuf};

fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").ok()?);
    let profile = std::env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    println!("cargo:rerun-if-changed={}", source.display());

    if !source.exists() {
        return;
    }

    let Some(target) = profile_dir() else {
        println!("cargo:warning=Could not locate target profile directory, config.toml not copied");
        return;
    };

    if let Err(e) = std::fs::copy(&source, target.join("config.toml")) {
        println!("cargo:warning=Failed to copy config.toml: {}", e);
    }
}
