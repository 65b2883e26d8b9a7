//! Shared helpers

pub mod pdf;
