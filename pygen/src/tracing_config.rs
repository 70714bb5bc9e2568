//! Log output for the command-line front end.
//!
//! The subscriber is only installed when `PYGEN_LOG` (or `RUST_LOG`) is set:
//!
//! ```bash
//! PYGEN_LOG=debug pygen render module.toml
//! PYGEN_LOG="pygen_codegen=trace" pygen demo --dry-run
//! ```

use tracing_subscriber::EnvFilter;

/// Build an `EnvFilter` from `PYGEN_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> Option<EnvFilter> {
    if let Ok(val) = std::env::var("PYGEN_LOG") {
        return Some(EnvFilter::builder().parse_lossy(val));
    }
    std::env::var("RUST_LOG")
        .is_ok()
        .then(EnvFilter::from_default_env)
}

/// Initialise the global tracing subscriber, writing to stderr so generated
/// code printed on stdout stays clean.
pub fn init_tracing() {
    let Some(filter) = build_filter() else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
