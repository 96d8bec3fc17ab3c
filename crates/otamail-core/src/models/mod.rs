//! Data models.

pub mod config;
pub mod reservation;
