use serde::{Deserialize, Serialize};

use super::types::FavoriteMatch;
use crate::lexicon::normalize_for_key;

/// Looks up a registered place from a normalized place phrase.
pub trait FavoriteResolver: Send + Sync {
    fn resolve(&self, normalized: &str) -> Option<FavoriteMatch>;
}

/// Resolver with no registered places.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFavorites;

impl FavoriteResolver for NoFavorites {
    fn resolve(&self, _normalized: &str) -> Option<FavoriteMatch> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub favorite: FavoriteMatch,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// In-memory favorites matched on key, display name or any alias.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteCatalog {
    entries: Vec<FavoriteEntry>,
}

impl FavoriteCatalog {
    pub fn new(entries: Vec<FavoriteEntry>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, entry: FavoriteEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn names(entry: &FavoriteEntry) -> impl Iterator<Item = String> + '_ {
        std::iter::once(entry.favorite.key.as_str())
            .chain(std::iter::once(entry.display_name.as_str()))
            .chain(entry.aliases.iter().map(String::as_str))
            .map(normalize_for_key)
            .filter(|n| !n.is_empty())
    }
}

impl FavoriteResolver for FavoriteCatalog {
    fn resolve(&self, normalized: &str) -> Option<FavoriteMatch> {
        let wanted = normalize_for_key(normalized);
        if wanted.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| Self::names(e).any(|n| n == wanted))
            .map(|e| e.favorite.clone())
    }
}
