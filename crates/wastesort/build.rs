//! Build script for the wastesort binary crate.
//!
//! ## Backend URL
//!
//! The classifier backend is fixed at build time.  `BACKEND_URL` is read
//! from the build environment (falling back to the local development
//! server) and re-exported as `WASTESORT_BACKEND_URL` so `main.rs` can
//! read it with `env!`.  The value is validated at startup, not here, so
//! a bad URL shows up as an error panel instead of a failed build.

use std::env;

/// Used when `BACKEND_URL` is unset or empty.
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

fn main() {
    println!("cargo:rerun-if-env-changed=BACKEND_URL");

    let backend_url = env::var("BACKEND_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned());

    println!("cargo:rustc-env=WASTESORT_BACKEND_URL={backend_url}");
}
