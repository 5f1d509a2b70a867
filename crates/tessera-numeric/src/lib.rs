//! # tessera-numeric
//!
//! Exact arithmetic for the Tessera workspace: an arbitrary-precision signed
//! integer stored as base-10^9 groups with digit-search long division, and a
//! rational type kept in lowest terms by GCD reduction.
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod error;
pub mod integer;
pub mod rational;

// Re-exports
pub use error::{ParseBigIntegerError, ParseRationalError, RationalError};
pub use integer::BigInteger;
pub use rational::{gcd, Rational};
