//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `todotasks_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // The UI surface of this system lives elsewhere; this probe only checks
    // that the core crate wires up.
    println!("todotasks_core ping={}", todotasks_core::ping());
    println!("todotasks_core version={}", todotasks_core::core_version());
}
