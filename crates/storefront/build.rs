//! Build script for the storefront crate.
//!
//! Fingerprints static assets so templates can reference immutable,
//! content-addressed copies (`main.<hash>.css`, `login.<hash>.js`).

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Assets to fingerprint: (path under `static/`, file stem, extension, env var).
const ASSETS: &[(&str, &str, &str, &str)] = &[
    ("css/main.css", "main", "css", "CSS_HASH"),
    ("js/login.js", "login", "js", "LOGIN_JS_HASH"),
];

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static");

    for (relative, stem, extension, env_var) in ASSETS {
        fingerprint(&static_dir, relative, stem, extension, env_var);
    }
}

/// Hash one asset and copy it to `<dir>/derived/<stem>.<hash>.<ext>`.
///
/// Sets `env_var` to the first 8 hex chars of the SHA-256 for use with
/// `env!`. A missing asset yields an empty hash and a warning.
fn fingerprint(static_dir: &Path, relative: &str, stem: &str, extension: &str, env_var: &str) {
    let source = static_dir.join(relative);
    println!("cargo:rerun-if-changed={}", source.display());

    let content = match fs::read(&source) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {relative}: {e}");
            println!("cargo:rustc-env={env_var}=");
            return;
        }
    };

    let hash = format!("{:x}", Sha256::digest(&content));
    let short_hash = &hash[..8];
    println!("cargo:rustc-env={env_var}={short_hash}");

    let derived_dir = source
        .parent()
        .expect("asset path has a parent directory")
        .join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived asset directory");

    let derived_path = derived_dir.join(format!("{stem}.{short_hash}.{extension}"));
    fs::copy(&source, &derived_path).expect("Failed to copy asset to derived directory");
}
