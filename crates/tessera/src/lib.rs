//! Tessera library: application logic for the exact-arithmetic calculator.

pub mod app;
pub mod config;
pub mod errors;
pub mod expr;
pub mod version;
