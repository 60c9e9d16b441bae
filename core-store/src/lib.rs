//! # Local Store Module
//!
//! Owns the embedded catalog database and provides key-indexed persistent
//! collections for characters and episodes.
//!
//! ## Overview
//!
//! This module manages:
//! - SQLite connection pooling, schema migration and health checks
//! - Stored entity types for both collections
//! - Upsert-by-id stores with live full-snapshot observation

pub mod db;
pub mod entities;
pub mod error;
pub mod stores;

pub use db::{create_pool, create_test_pool, DatabaseConfig};
pub use entities::{CharacterEntity, EpisodeEntity};
pub use error::{Result, StoreError};
pub use stores::{CharacterStore, EpisodeStore, SqliteCharacterStore, SqliteEpisodeStore};
