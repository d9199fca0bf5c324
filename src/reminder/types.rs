use serde::{Deserialize, Serialize};

pub const DEFAULT_RADIUS_METERS: u32 = 100;
pub const DEFAULT_COOLDOWN_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transition {
    Enter,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlaceQuery {
    CurrentLocation,
    FreeText {
        text: String,
    },
    Favorite {
        id: i64,
        lat: f64,
        lon: f64,
        spoken_form: String,
    },
}

/// A registered place as returned by a [`FavoriteResolver`](super::favorites::FavoriteResolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMatch {
    pub id: i64,
    pub key: String,
    pub lat: f64,
    pub lon: f64,
    pub default_radius_meters: u32,
    pub default_cooldown_minutes: u32,
    pub default_every_time: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeReminder {
    pub trigger_at_epoch_millis: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceReminder {
    pub transition: Transition,
    pub query: PlaceQuery,
    pub radius_meters: u32,
    pub cooldown_minutes: u32,
    pub every_time: bool,
    pub label: String,
}

/// Fully resolved reminder. `label` is never blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ReminderIntent {
    Time(TimeReminder),
    Place(PlaceReminder),
}

impl ReminderIntent {
    pub fn label(&self) -> &str {
        match self {
            Self::Time(t) => &t.label,
            Self::Place(p) => &p.label,
        }
    }
}
