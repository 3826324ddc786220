//! # bpc-tests
//!
//! Test harness for oxbpc.
//!
//! This crate provides:
//! - Synthetic profiles with scripted darkest-colorant and round-trip responses
//! - A transform engine that counts every profile and transform it hands out,
//!   records each chain it links, and can be told to fail
//! - Round-trip L* response curves (straight, toe, jagged, flat)
//! - lcms2 reference helpers for parity checks
//!
//! The scenarios run entirely on the synthetic engine, so the estimators'
//! branches can be driven one by one without real ICC data.

pub mod curves;
pub mod engine;
pub mod reference;
pub mod synthetic;

pub use engine::{ChainRecord, Counters, SyntheticEngine};
pub use synthetic::{ProfileRole, SyntheticProfile};

use std::sync::Once;

static LOGGING: Once = Once::new();

/// Route `tracing` output to the test writer, filtered by `RUST_LOG`
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
