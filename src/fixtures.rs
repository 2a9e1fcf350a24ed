//! Test fixtures: JSON bodies shaped like real catalog responses and an
//! in-memory catalog that counts the requests it serves

use crate::catalog::CatalogApi;
use crate::error::{Error, Result};
use crate::model::{Character, CharacterPage, Episode, PageInfo};
use crate::types::QueryParams;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const CATALOG_BASE: &str = "https://rickandmortyapi.com/api";

/// Episode reference URLs `base/episode/{id}` for each id
pub fn episode_refs(base: &str, ids: impl IntoIterator<Item = u32>) -> Vec<String> {
    ids.into_iter()
        .map(|id| format!("{base}/episode/{id}"))
        .collect()
}

/// A character body with the given episode references
pub fn character_json(id: u32, name: &str, episodes: &[String]) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
        "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
        "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        "episode": episodes,
        "url": format!("https://rickandmortyapi.com/api/character/{id}"),
        "created": "2017-11-04T18:48:46.250Z"
    })
}

/// A decoded character
pub fn character(id: u32, name: &str, episodes: &[String]) -> Character {
    serde_json::from_value(character_json(id, name, episodes)).expect("fixture character")
}

/// An episode body
pub fn episode_json(id: u32) -> Value {
    json!({
        "id": id,
        "name": format!("Episode {id}"),
        "air_date": "December 2, 2013",
        "episode": format!("S01E{id:02}"),
        "characters": ["https://rickandmortyapi.com/api/character/1"],
        "url": format!("https://rickandmortyapi.com/api/episode/{id}"),
        "created": "2017-11-10T12:56:33.798Z"
    })
}

/// A listing page body
pub fn page_json(
    ids: impl IntoIterator<Item = u32>,
    count: u32,
    pages: u32,
    next: Option<&str>,
) -> Value {
    let results: Vec<Value> = ids
        .into_iter()
        .map(|id| character_json(id, &format!("Character {id}"), &[]))
        .collect();
    json!({
        "info": {"count": count, "pages": pages, "next": next, "prev": null},
        "results": results
    })
}

/// In-memory catalog
///
/// Listing filters by case-insensitive name substring, status and gender,
/// pages in `page_size` chunks and, like the live service, answers 404 when
/// nothing matches. `next` URLs carry only the `page` parameter so callers
/// must re-apply their active filter.
pub struct FakeCatalog {
    characters: Vec<Character>,
    page_size: usize,
    delay: Duration,
    fail_listing: AtomicBool,
    failing_refs: Mutex<HashSet<String>>,
    listing_calls: AtomicUsize,
    episode_calls: AtomicUsize,
    queries: Mutex<Vec<QueryParams>>,
}

impl FakeCatalog {
    pub fn new(characters: Vec<Character>, page_size: usize) -> Self {
        Self {
            characters,
            page_size,
            delay: Duration::ZERO,
            fail_listing: AtomicBool::new(false),
            failing_refs: Mutex::new(HashSet::new()),
            listing_calls: AtomicUsize::new(0),
            episode_calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// `count` characters named "Character {id}" with ids 1..=count
    pub fn with_count(count: u32, page_size: usize) -> Self {
        let characters = (1..=count)
            .map(|id| character(id, &format!("Character {id}"), &[]))
            .collect();
        Self::new(characters, page_size)
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_listing_failure(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reference(&self, reference: &str) {
        self.failing_refs
            .lock()
            .unwrap()
            .insert(reference.to_string());
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn episode_calls(&self) -> usize {
        self.episode_calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<QueryParams> {
        self.queries.lock().unwrap().clone()
    }

    fn matches(character: &Character, query: &QueryParams) -> bool {
        let name_ok = query.get("name").map_or(true, |name| {
            character
                .name
                .to_lowercase()
                .contains(&name.to_lowercase())
        });
        let status_ok = query
            .get("status")
            .map_or(true, |s| character.status.as_str().eq_ignore_ascii_case(s));
        let gender_ok = query
            .get("gender")
            .map_or(true, |g| character.gender.as_str().eq_ignore_ascii_case(g));
        name_ok && status_ok && gender_ok
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_characters(&self, query: &QueryParams) -> Result<CharacterPage> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(Error::http_status(500, "upstream unavailable"));
        }

        let matching: Vec<&Character> = self
            .characters
            .iter()
            .filter(|c| Self::matches(c, query))
            .collect();
        let page: usize = query
            .get("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(1);
        let pages = matching.len().div_ceil(self.page_size);
        if matching.is_empty() || page == 0 || page > pages {
            return Err(Error::http_status(404, r#"{"error":"There is nothing here"}"#));
        }

        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(matching.len());
        let next = (page < pages).then(|| format!("{CATALOG_BASE}/character?page={}", page + 1));
        let prev = (page > 1).then(|| format!("{CATALOG_BASE}/character?page={}", page - 1));

        Ok(CharacterPage {
            info: PageInfo {
                count: matching.len() as u32,
                pages: pages as u32,
                next,
                prev,
            },
            results: matching[start..end].iter().map(|c| (*c).clone()).collect(),
        })
    }

    async fn character(&self, id: u32) -> Result<Character> {
        self.characters
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Error::http_status(404, r#"{"error":"Character not found"}"#))
    }

    async fn episode(&self, reference: &str) -> Result<Episode> {
        self.episode_calls.fetch_add(1, Ordering::SeqCst);
        let id: u32 = reference
            .rsplit('/')
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::http_status(404, "Episode not found"))?;
        // Delay varies by id so completion order differs from request order
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay / (id % 7 + 1)).await;
        }
        if self.failing_refs.lock().unwrap().contains(reference) {
            return Err(Error::http_status(500, "episode lookup failed"));
        }
        serde_json::from_value(episode_json(id)).map_err(|e| Error::decode(e.to_string()))
    }
}
