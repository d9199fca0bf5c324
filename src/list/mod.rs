pub mod command;
pub mod executor;
pub mod splitter;
pub mod store;
pub mod types;

pub use command::ListCommandParser;
pub use executor::{ExecutionResult, ListExecutor, NoteRepository};
pub use splitter::ListSplitter;
pub use store::InMemoryNoteStore;
pub use types::*;
