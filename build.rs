use std::{env, error::Error, fs, path::Path};

#[allow(dead_code)]
#[path = "src/template.rs"]
mod template;

#[allow(dead_code)]
#[path = "build/provision.rs"]
mod provision;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-env-changed={}", provision::CFG_ENV);
    let cfg_path = provision::config_path(env::var(provision::CFG_ENV).ok());

    // Tell Cargo to rerun if toml changes
    println!("cargo:rerun-if-changed={}", cfg_path);
    println!("cargo:rerun-if-changed=build/provision.rs");

    // Read and parse
    let toml_str = fs::read_to_string(&cfg_path)
        .map_err(|e| format!("cannot read {}: {}", cfg_path, e))?;
    let raw = provision::parse(&toml_str)?;

    let provisioned = provision::provision(&raw, provision::env_lookup);

    for name in provisioned.env_names() {
        println!("cargo:rerun-if-env-changed={}", name);
    }
    for warning in provisioned.warnings() {
        println!("cargo:warning={}", warning);
    }

    if env::var_os("CARGO_FEATURE_STRICT").is_some() {
        provisioned
            .strict_check()
            .map_err(|e| format!("{} in {}", e, cfg_path))?;
    }

    // Generate Rust code
    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");
    fs::write(dest_path, provisioned.to_rust())?;
    Ok(())
}
