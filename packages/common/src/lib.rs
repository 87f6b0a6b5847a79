//! Common infrastructure shared by the safevision crates
//!
//! This crate provides:
//! - `env_logger` initialisation driven by `RUST_LOG`
//! - Structured log helpers for key generation events
//! - Fingerprinting of sensitive byte strings so they never reach a log verbatim

#![forbid(unsafe_code)]

pub mod logging;

pub use logging::{fingerprint, LoggingTransformer};
