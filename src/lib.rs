pub mod error;
pub mod lexicon;
pub mod list;
pub mod reminder;
pub mod routing;
pub mod telemetry;

pub use error::{ConfigError, StoreError};
pub use routing::{AdaptiveRouter, HintDetector, VoiceCommandRouter};
