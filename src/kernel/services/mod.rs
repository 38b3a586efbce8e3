//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the app (kernel-facing).
//! - `adapters`: filesystem and in-memory implementations of those ports.

pub mod adapters;
pub mod ports;
