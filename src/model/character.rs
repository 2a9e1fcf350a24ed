//! Character entities and listing pages
//!
//! Mirrors the JSON schema served by `GET /character` and `GET /character/{id}`.
//! Decoding is strict: an unknown status or gender value is a decode failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Life status of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Alive,
    Dead,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Status {
    /// All statuses, in catalog order
    pub const ALL: [Status; 3] = [Status::Alive, Status::Dead, Status::Unknown];

    /// Value as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown status '{s}' (expected alive, dead or unknown)"))
    }
}

/// Gender of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Genderless,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Gender {
    /// All genders, in catalog order
    pub const ALL: [Gender; 4] = [
        Gender::Female,
        Gender::Male,
        Gender::Genderless,
        Gender::Unknown,
    ];

    /// Value as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown gender '{s}' (expected female, male, genderless or unknown)")
            })
    }
}

/// Named reference to a location (origin or last known location)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationRef {
    /// Display name
    pub name: String,
    /// Location URL, empty when the catalog does not know it
    #[serde(default)]
    pub url: String,
}

/// A character from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Catalog-assigned identifier
    pub id: u32,
    /// Display name
    pub name: String,
    /// Life status
    pub status: Status,
    /// Species (free text)
    pub species: String,
    /// Subspecies or type (free text, often empty)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Gender
    pub gender: Gender,
    /// Origin location
    pub origin: LocationRef,
    /// Last known location
    pub location: LocationRef,
    /// Avatar image URL
    pub image: String,
    /// Episode URLs, in the order the catalog lists them
    pub episode: Vec<String>,
    /// Self URL
    #[serde(default)]
    pub url: String,
    /// Creation timestamp in the catalog
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Character {
    /// Number of episodes this character appears in
    pub fn episode_count(&self) -> usize {
        self.episode.len()
    }
}

/// Listing metadata returned alongside each character page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total matching characters across all pages
    pub count: u32,
    /// Total number of pages
    pub pages: u32,
    /// Continuation URL for the next page
    pub next: Option<String>,
    /// Continuation URL for the previous page
    pub prev: Option<String>,
}

impl PageInfo {
    /// The zeroed info used by the failure sentinel
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a further page exists
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// One page of characters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharacterPage {
    /// Pagination metadata
    pub info: PageInfo,
    /// Characters on this page, in server order
    pub results: Vec<Character>,
}

impl CharacterPage {
    /// The sentinel returned when a listing fetch fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// True for the sentinel value (also what a genuinely empty result looks like)
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.info == PageInfo::empty()
    }
}
