use std::env;
use std::fs;
use std::path::Path;

// Compile-time defaults for the client. Values injected at page load through
// `window.__ENV__` take precedence over these at runtime.
const FORWARDED_KEYS: &[&str] = &["API_BASE_URL", "UPDATE_CHECK_INTERVAL_MS"];

fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
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

                if !FORWARDED_KEYS.contains(&key) {
                    continue;
                }

                // The process environment wins over the file
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found, the client falls back to http://localhost:3000 unless window.__ENV__ provides API_BASE_URL.");
    }

    for key in FORWARDED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
