//! tickerlens — comparative equity risk metrics and technical indicators.
//!
//! Hexagonal architecture: analytics in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The domain is pure and
//! stateless; every computation is a deterministic function of its inputs.

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
