use std::env;
use std::fs;
use std::path::Path;

/// Keys forwarded from `.env` into `option_env!` at compile time.
const FORWARDED_KEYS: &[&str] = &["BASE_URL", "API_BASE_URL", "API_TIMEOUT_MS", "LOG_LEVEL"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    for key in FORWARDED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    if !env_file.exists() {
        return;
    }

    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=.env exists but could not be read, using defaults");
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        // The real environment wins over the file.
        if FORWARDED_KEYS.contains(&key) && env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
