//! Core domain + application logic for the INN lookup bot.
//!
//! This crate is intentionally framework-agnostic. Telegram / DaData live
//! behind ports (traits) implemented in adapter crates.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod lookup;
pub mod ports;
pub mod session;

pub use errors::{Error, Result};
