//! coldwatch firmware library.
//!
//! Exposes the accounting engine, lanes and adapters for integration
//! testing. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod accounting;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lanes;
pub mod pins;
pub mod worker;

pub mod adapters;
pub mod drivers;
pub mod sensors;
