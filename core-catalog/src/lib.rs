//! # Catalog Module
//!
//! The repository layer merging the remote source with the local store into
//! domain models.
//!
//! ## Overview
//!
//! This module provides:
//! - Domain models independent of wire and storage formats
//! - Translation between wire, storage and domain representations
//! - `CharacterRepository` and `EpisodeRepository` implementing the two
//!   remote-first, cache-backed query shapes:
//!   - `get_all`: best-effort background refresh plus a live stream of
//!     cached snapshots (list views never block on the network)
//!   - `get_one`: remote point lookup with local fallback, failing with
//!     `NotFound` only when both sources come up empty

pub mod character;
pub mod episode;
pub mod error;
pub mod models;
pub mod translate;

pub use character::CharacterRepository;
pub use episode::EpisodeRepository;
pub use error::{CatalogError, Result};
pub use models::{Character, CharacterGender, CharacterStatus, Episode};
