use serde::{Deserialize, Serialize};

pub type NoteId = i64;
pub type ItemId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListAction {
    Add,
    Remove,
    Toggle,
    Untick,
    ConvertToList,
    ConvertToText,
}

impl ListAction {
    /// Item-carrying actions. Their commands never have an empty item list.
    pub fn requires_items(self) -> bool {
        matches!(self, Self::Add | Self::Remove | Self::Toggle | Self::Untick)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Remove => "REMOVE",
            Self::Toggle => "TOGGLE",
            Self::Untick => "UNTICK",
            Self::ConvertToList => "CONVERT_TO_LIST",
            Self::ConvertToText => "CONVERT_TO_TEXT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCommand {
    pub action: ListAction,
    pub items: Vec<String>,
}

/// Outcome of the list command grammar once a verb was recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ListParse {
    Command(ListCommand),
    /// A mutation verb with nothing left to add, remove or tick.
    Incomplete(ListAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteKind {
    Plain,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSnapshot {
    pub id: NoteId,
    pub kind: NoteKind,
    pub body: String,
}

/// Checklist entry owned by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: ItemId,
    pub text: String,
    pub done: bool,
    pub order: i32,
    pub provisional: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListConversion {
    Converted(usize),
    AlreadyList,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainConversion {
    pub item_count: usize,
    pub body: String,
}
