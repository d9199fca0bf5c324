pub mod adaptive;
pub mod config;
pub mod hint;
pub mod router;
pub mod types;

pub use adaptive::{forced_mode, AdaptiveRouter};
pub use config::{RouterConfig, VoiceHeuristicsConfig};
pub use hint::HintDetector;
pub use router::VoiceCommandRouter;
pub use types::*;
