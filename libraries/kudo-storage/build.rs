//! Build script for kudo-storage.
//!
//! Rebuild when database migrations change.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
