//! Workspace placeholder crate.
//!
//! This crate exists so host applications can depend on a single entry
//! point (`rmapi-workspace`) with the `service` feature enabled, instead of
//! wiring each workspace crate individually. The composition root lives in
//! `core-service`.

#[cfg(feature = "service")]
pub use core_service;
