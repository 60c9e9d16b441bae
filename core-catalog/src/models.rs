//! Domain models for the catalog
//!
//! Plain immutable values handed to UI layers, independent of wire and
//! storage concerns.

use serde::{Deserialize, Serialize};

/// Life status of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterStatus {
    Alive,
    Dead,
    Unknown,
}

impl CharacterStatus {
    /// Lenient parse of the server's display string.
    ///
    /// The API documents "Alive", "Dead" and "unknown"; anything else maps
    /// to `Unknown` rather than failing a whole snapshot over one field.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("alive") {
            Self::Alive
        } else if value.eq_ignore_ascii_case("dead") {
            Self::Dead
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alive => "Alive",
            Self::Dead => "Dead",
            Self::Unknown => "unknown",
        }
    }
}

/// Gender of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterGender {
    Female,
    Male,
    Genderless,
    Unknown,
}

impl CharacterGender {
    /// Lenient parse of the server's display string; unrecognized values
    /// map to `Unknown`.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("female") {
            Self::Female
        } else if value.eq_ignore_ascii_case("male") {
            Self::Male
        } else if value.eq_ignore_ascii_case("genderless") {
            Self::Genderless
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
            Self::Genderless => "Genderless",
            Self::Unknown => "unknown",
        }
    }
}

/// A character as presented to the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub status: CharacterStatus,
    pub species: String,
    /// Subspecies or variant; frequently empty
    pub kind: String,
    pub gender: CharacterGender,
    pub origin_name: String,
    pub origin_url: String,
    pub location_name: String,
    pub location_url: String,
    /// Avatar image URL
    pub image: String,
    /// Episode reference URLs this character appears in
    pub episodes: Vec<String>,
    pub url: String,
    pub created: String,
}

/// An episode as presented to the UI layer
///
/// `characters` holds resolved character models. It is only populated when
/// the episode was hydrated directly from a fresh remote fetch; an episode
/// reconstructed from the local store always carries an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub name: String,
    pub air_date: String,
    /// Episode code, e.g. "S01E01"
    pub episode: String,
    pub characters: Vec<Character>,
    pub url: String,
    pub created: String,
}
