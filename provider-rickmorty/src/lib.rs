//! # Rick and Morty Provider
//!
//! Remote data source for the public Rick and Morty REST API.
//!
//! ## Overview
//!
//! This module provides:
//! - Wire-format records for characters and episodes
//! - The paginated envelope shared by every collection endpoint
//! - A reqwest-based client implementing the `CharacterSource` and
//!   `EpisodeSource` contracts
//! - A transport error taxonomy that keeps "absent resource" distinct from
//!   "failed request"
//!
//! Every operation is a single attempt; retry policy belongs to callers.

pub mod client;
pub mod error;
pub mod types;

pub use client::{CharacterSource, EpisodeSource, RickMortyClient, DEFAULT_BASE_URL};
pub use error::{RemoteError, Result};
pub use types::{
    parse_reference_id, CharacterRecord, EpisodeRecord, LocationRef, PageInfo, Paginated,
};
