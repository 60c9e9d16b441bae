//! Rick and Morty API response types
//!
//! Data structures for deserializing wire-format responses.
//!
//! See: https://rickandmortyapi.com/documentation/#rest

use serde::{Deserialize, Serialize};

/// Pagination metadata attached to every list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of records across all pages
    pub count: i64,

    /// Total number of pages
    pub pages: i64,

    /// URL of the next page, absent on the last page
    pub next: Option<String>,

    /// URL of the previous page, absent on the first page
    pub prev: Option<String>,
}

/// List envelope: `{ "info": {...}, "results": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

/// Name/URL pair referencing a location resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    pub url: String,
}

/// Character resource as served by the `character/` endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Server-assigned unique id
    pub id: i64,

    pub name: String,

    /// Life status display string ("Alive", "Dead" or "unknown")
    pub status: String,

    pub species: String,

    /// Subspecies or variant; frequently empty
    #[serde(rename = "type")]
    pub kind: String,

    pub gender: String,

    /// Origin location of the character
    pub origin: LocationRef,

    /// Last known location of the character
    pub location: LocationRef,

    /// Avatar image URL
    pub image: String,

    /// Episode reference URLs this character appears in
    #[serde(default)]
    pub episode: Vec<String>,

    /// Self-reference URL
    pub url: String,

    /// Creation timestamp as reported by the server
    pub created: String,
}

/// Episode resource as served by the `episode/` endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Server-assigned unique id
    pub id: i64,

    pub name: String,

    pub air_date: String,

    /// Episode code, e.g. "S01E01"
    pub episode: String,

    /// Character reference URLs appearing in this episode
    #[serde(default)]
    pub characters: Vec<String>,

    /// Self-reference URL
    pub url: String,

    /// Creation timestamp as reported by the server
    pub created: String,
}

/// Parse the trailing integer id out of a resource reference URL
/// (`.../character/38` → `38`).
///
/// Returns `None` for references that do not end in an integer segment.
pub fn parse_reference_id(reference: &str) -> Option<i64> {
    reference
        .trim_end_matches('/')
        .rsplit('/')
        .next()?
        .parse()
        .ok()
}
