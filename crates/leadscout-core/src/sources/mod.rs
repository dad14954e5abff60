//! Platform-specific search clients and normalizers.

pub mod reddit;
pub mod twitter;
