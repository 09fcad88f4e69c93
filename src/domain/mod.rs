//! Core domain types and analytics.

pub mod analysis;
pub mod error;
pub mod indicator;
pub mod indicator_engine;
pub mod performance;
pub mod price;
pub mod returns;
pub mod risk;
pub mod window;
