//! Model translation between wire, storage and domain representations.
//!
//! The repository layer owns every conversion so the provider and the store
//! never learn about each other's types.

use core_store::{CharacterEntity, EpisodeEntity};
use provider_rickmorty::{CharacterRecord, EpisodeRecord};

use crate::models::{Character, CharacterGender, CharacterStatus, Episode};

/// Wire → storage for characters. Every field is carried.
pub fn character_record_to_entity(record: &CharacterRecord) -> CharacterEntity {
    CharacterEntity {
        id: record.id,
        name: record.name.clone(),
        status: record.status.clone(),
        species: record.species.clone(),
        kind: record.kind.clone(),
        gender: record.gender.clone(),
        origin_name: record.origin.name.clone(),
        origin_url: record.origin.url.clone(),
        location_name: record.location.name.clone(),
        location_url: record.location.url.clone(),
        image: record.image.clone(),
        episodes: record.episode.clone(),
        url: record.url.clone(),
        created: record.created.clone(),
    }
}

/// Wire → storage for episodes.
///
/// The character reference list is dropped here: the stored projection of
/// an episode has no characters column, so the list cannot survive a trip
/// through storage (see [`episode_entity_to_domain`]).
pub fn episode_record_to_entity(record: &EpisodeRecord) -> EpisodeEntity {
    EpisodeEntity {
        id: record.id,
        name: record.name.clone(),
        air_date: record.air_date.clone(),
        episode: record.episode.clone(),
        url: record.url.clone(),
        created: record.created.clone(),
    }
}

/// Storage → domain for characters.
pub fn character_entity_to_domain(entity: &CharacterEntity) -> Character {
    Character {
        id: entity.id,
        name: entity.name.clone(),
        status: CharacterStatus::parse(&entity.status),
        species: entity.species.clone(),
        kind: entity.kind.clone(),
        gender: CharacterGender::parse(&entity.gender),
        origin_name: entity.origin_name.clone(),
        origin_url: entity.origin_url.clone(),
        location_name: entity.location_name.clone(),
        location_url: entity.location_url.clone(),
        image: entity.image.clone(),
        episodes: entity.episodes.clone(),
        url: entity.url.clone(),
        created: entity.created.clone(),
    }
}

/// Storage → domain for episodes.
///
/// `characters` is always empty on this path: stored episodes cannot
/// resolve the relationship. Only the remote path of a point lookup can
/// populate it.
pub fn episode_entity_to_domain(entity: &EpisodeEntity) -> Episode {
    Episode {
        id: entity.id,
        name: entity.name.clone(),
        air_date: entity.air_date.clone(),
        episode: entity.episode.clone(),
        characters: Vec::new(),
        url: entity.url.clone(),
        created: entity.created.clone(),
    }
}

/// Wire → domain for characters.
pub fn character_record_to_domain(record: &CharacterRecord) -> Character {
    Character {
        id: record.id,
        name: record.name.clone(),
        status: CharacterStatus::parse(&record.status),
        species: record.species.clone(),
        kind: record.kind.clone(),
        gender: CharacterGender::parse(&record.gender),
        origin_name: record.origin.name.clone(),
        origin_url: record.origin.url.clone(),
        location_name: record.location.name.clone(),
        location_url: record.location.url.clone(),
        image: record.image.clone(),
        episodes: record.episode.clone(),
        url: record.url.clone(),
        created: record.created.clone(),
    }
}

/// Wire → domain for episodes, with the separately resolved character list.
pub fn episode_record_to_domain(record: &EpisodeRecord, characters: Vec<Character>) -> Episode {
    Episode {
        id: record.id,
        name: record.name.clone(),
        air_date: record.air_date.clone(),
        episode: record.episode.clone(),
        characters,
        url: record.url.clone(),
        created: record.created.clone(),
    }
}
