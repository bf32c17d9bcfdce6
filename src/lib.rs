#![doc(test(attr(deny(warnings))))]

//! Finanzplaner projects how much money is left until the end of the month from
//! liquid funds and recurring monthly income and expense items.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup log.
pub fn init() {
    init_with_filter(utils::DEFAULT_LOG_FILTER);
}

/// Initializes global tracing with a custom default directive, e.g. from the config file.
pub fn init_with_filter(filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::debug!("Finanzplaner tracing initialized.");
    });
}
