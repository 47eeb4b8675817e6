//! The firmware binary needs the cortex-m-rt and defmt linker scripts. Host builds of the
//! library and its tests must not get them, so they are only added with a board feature.

use std::env;

fn main() {
    if env::var_os("CARGO_FEATURE_SPEEDYBEE").is_some() {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
