use std::env;
use std::fs;
use std::path::PathBuf;

#[allow(dead_code)]
#[path = "src/config/file.rs"]
mod file;

#[allow(dead_code)]
#[path = "src/config/template.rs"]
mod template;

use file::{FixtureFile, CONFIG_ENV, WRITE_POLICY_ENV};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/config/file.rs");
    println!("cargo:rerun-if-changed=src/config/template.rs");
    println!("cargo:rerun-if-env-changed={}", CONFIG_ENV);
    println!("cargo:rerun-if-env-changed={}", WRITE_POLICY_ENV);

    let path = env::var_os(CONFIG_ENV).map(PathBuf::from);
    if let Some(path) = &path {
        println!("cargo:rerun-if-changed={}", path.display());
    }
    let fixture = FixtureFile::load(path.as_ref())
        .unwrap_or_else(|e| panic!("{}: {}", CONFIG_ENV, e));

    let resolved = file::resolve(fixture, |name| {
        println!("cargo:rerun-if-env-changed={}", name);
        file::lookup_var(name, env::var(name))
    })
    .unwrap_or_else(|e| panic!("cannot resolve greeting: {}", e));

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out_dir.join("message.txt"), &resolved.message).expect("write message.txt");
    println!(
        "cargo:rustc-env=PAUSE_GREETER_WRITE_POLICY_RESOLVED={}",
        resolved.write_policy
    );
}
