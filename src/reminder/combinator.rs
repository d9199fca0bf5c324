use std::sync::Arc;

use tracing::debug;

use super::favorites::FavoriteResolver;
use super::place::PlaceParser;
use super::time::TimeParser;
use super::types::ReminderIntent;

/// Time first, then place. An utterance carrying both is a time reminder.
#[derive(Clone, Default)]
pub struct ReminderIntentParser {
    time: TimeParser,
    place: PlaceParser,
}

impl ReminderIntentParser {
    pub fn new(time: TimeParser, place: PlaceParser) -> Self {
        Self { time, place }
    }

    pub fn with_favorites(resolver: Arc<dyn FavoriteResolver>) -> Self {
        Self::new(TimeParser::default(), PlaceParser::new(resolver))
    }

    pub fn time_parser(&self) -> &TimeParser {
        &self.time
    }

    pub fn place_parser(&self) -> &PlaceParser {
        &self.place
    }

    pub fn parse(&self, text: &str, now_millis: i64) -> Option<ReminderIntent> {
        if let Some(time) = self.time.parse(text, now_millis) {
            debug!("reminder resolved as time");
            return Some(ReminderIntent::Time(time));
        }
        let place = self.place.parse(text)?;
        debug!("reminder resolved as place");
        Some(ReminderIntent::Place(place))
    }
}
