//! Episode entities

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static EPISODE_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[Ss](\d{1,3})[Ee](\d{1,3})$").expect("Invalid episode code regex")
});

/// An episode from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Catalog-assigned identifier
    pub id: u32,
    /// Episode title
    pub name: String,
    /// Air date as the catalog prints it (e.g. "December 2, 2013")
    pub air_date: String,
    /// Season/episode code (e.g. "S01E01")
    #[serde(rename = "episode")]
    pub code: String,
    /// Character URLs appearing in this episode
    #[serde(default)]
    pub characters: Vec<String>,
    /// Self URL
    #[serde(default)]
    pub url: String,
    /// Creation timestamp in the catalog
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Episode {
    /// Parsed season/episode code, if the code is well formed
    pub fn parsed_code(&self) -> Option<EpisodeCode> {
        EpisodeCode::parse(&self.code)
    }
}

/// Season and episode number parsed from a code such as `S02E07`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpisodeCode {
    pub season: u16,
    pub number: u16,
}

impl EpisodeCode {
    /// Parse a code; anything not shaped like `S<n>E<n>` yields `None`
    pub fn parse(code: &str) -> Option<Self> {
        let caps = EPISODE_CODE_REGEX.captures(code.trim())?;
        Some(Self {
            season: caps[1].parse().ok()?,
            number: caps[2].parse().ok()?,
        })
    }
}

impl fmt::Display for EpisodeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.number)
    }
}
