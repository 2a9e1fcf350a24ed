//! Presentation state container for the character listing

use crate::model::{Character, PageInfo};
use crate::pagination::CharacterFilter;

/// Current listing as the presentation layer sees it
///
/// Only [`ListingView`](super::ListingView) writes to a shared store; it does
/// so after each fetch completes.
#[derive(Debug, Clone, Default)]
pub struct CharacterStore {
    characters: Vec<Character>,
    info: PageInfo,
    filter: CharacterFilter,
}

impl CharacterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing
    pub fn set_characters(&mut self, characters: Vec<Character>) {
        self.characters = characters;
    }

    /// Append a page to the listing
    pub fn append_characters(&mut self, characters: Vec<Character>) {
        self.characters.extend(characters);
    }

    /// Replace the page info
    pub fn set_page_info(&mut self, info: PageInfo) {
        self.info = info;
    }

    /// Replace the active filter
    pub fn set_filter(&mut self, filter: CharacterFilter) {
        self.filter = filter;
    }

    /// Current listing
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Current page info
    pub fn page_info(&self) -> &PageInfo {
        &self.info
    }

    /// Active filter
    pub fn filter(&self) -> &CharacterFilter {
        &self.filter
    }

    /// Clear listing, page info and filter
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
