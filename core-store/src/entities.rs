//! Stored entity types for the catalog database.

use sqlx::FromRow;

/// Character row as persisted in the `characters` table.
///
/// `episodes` holds the episode reference URLs the character appears in; it
/// is persisted as a JSON text column and decoded on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterEntity {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub kind: String,
    pub gender: String,
    pub origin_name: String,
    pub origin_url: String,
    pub location_name: String,
    pub location_url: String,
    pub image: String,
    pub episodes: Vec<String>,
    pub url: String,
    pub created: String,
}

/// Episode row as persisted in the `episodes` table.
///
/// Carries no character references: an episode rehydrated from this table
/// cannot resolve its character list.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EpisodeEntity {
    pub id: i64,
    pub name: String,
    pub air_date: String,
    pub episode: String,
    pub url: String,
    pub created: String,
}
