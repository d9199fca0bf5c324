pub mod classifier;
pub mod combinator;
pub mod favorites;
pub mod label;
pub mod place;
pub mod time;
pub mod types;

pub use classifier::{ReminderClassification, ReminderClassifier};
pub use combinator::ReminderIntentParser;
pub use favorites::{FavoriteCatalog, FavoriteEntry, FavoriteResolver, NoFavorites};
pub use place::PlaceParser;
pub use time::TimeParser;
pub use types::*;
