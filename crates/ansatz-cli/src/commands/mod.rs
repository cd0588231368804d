//! CLI command implementations.

pub mod common;
pub mod cr;
pub mod heisenberg;
pub mod hva;
pub mod rvb;
pub mod version;
