//! Character filter criteria and continuation references

use crate::error::{Error, Result};
use crate::model::{Gender, Status};
use crate::types::{OptionStringExt, QueryParams};
use serde::{Deserialize, Serialize};
use url::Url;

/// Filter criteria for the character listing
///
/// Empty strings are "unset" and never reach the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharacterFilter {
    /// Name substring
    #[serde(default)]
    pub name: Option<String>,
    /// Life status
    #[serde(default)]
    pub status: Option<Status>,
    /// Gender
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Species (free text)
    #[serde(default)]
    pub species: Option<String>,
    /// Type (free text)
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl CharacterFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name substring
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the status
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the gender
    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Set the species
    #[must_use]
    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    /// Set the type
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// True when no field constrains the listing
    pub fn is_empty(&self) -> bool {
        self.query_params().is_empty()
    }

    /// Query parameters for the set fields only
    pub fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        let text_fields = [
            ("name", &self.name),
            ("species", &self.species),
            ("type", &self.kind),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value.clone().none_if_empty() {
                params.insert(key.to_string(), value);
            }
        }
        if let Some(status) = self.status {
            params.insert("status".to_string(), status.as_str().to_string());
        }
        if let Some(gender) = self.gender {
            params.insert("gender".to_string(), gender.as_str().to_string());
        }
        params
    }
}

/// Parsed `next`/`prev` reference from a [`PageInfo`](crate::model::PageInfo)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    reference: String,
    params: QueryParams,
}

impl Continuation {
    /// Parse a continuation URL, keeping its non-empty query parameters
    pub fn parse(reference: &str) -> Result<Self> {
        let url = Url::parse(reference)
            .map_err(|e| Error::continuation(reference, e.to_string()))?;
        let params = url
            .query_pairs()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Ok(Self {
            reference: reference.to_string(),
            params,
        })
    }

    /// The raw reference
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Query parameters carried by the reference
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Page number the reference points at
    pub fn page(&self) -> Result<u32> {
        let page = self
            .params
            .get("page")
            .ok_or_else(|| Error::continuation(&self.reference, "missing page parameter"))?;
        match page.parse::<u32>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(Error::continuation(
                &self.reference,
                format!("invalid page '{page}'"),
            )),
        }
    }

    /// Request parameters for following this reference under `filter`
    ///
    /// The reference's own parameters win; any parameter it omits falls back
    /// to the active filter.
    pub fn merge_with(&self, filter: &CharacterFilter) -> Result<QueryParams> {
        let page = self.page()?;
        let mut merged = filter.query_params();
        merged.extend(self.params.clone());
        merged.insert("page".to_string(), page.to_string());
        Ok(merged)
    }
}
