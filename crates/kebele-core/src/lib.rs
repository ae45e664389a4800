//! Core types and pure logic for the kebele resident registry client.
//!
//! This crate is deliberately free of HTTP, terminal and PDF dependencies.
//! All other crates depend on it; it carries nothing heavier than serde,
//! chrono and uuid.

pub mod certificate;
pub mod error;
pub mod reference;
pub mod registration;
pub mod resident;
pub mod roster;

pub use error::{Error, Result};
