use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::executor::NoteRepository;
use super::types::{ItemId, ListConversion, ListItem, NoteId, NoteKind, NoteSnapshot, PlainConversion};
use crate::error::StoreError;

#[derive(Debug, Clone)]
struct StoredNote {
    kind: NoteKind,
    body: String,
    items: Vec<ListItem>,
}

#[derive(Debug, Default)]
struct Inner {
    notes: HashMap<NoteId, StoredNote>,
    next_note_id: NoteId,
    next_item_id: ItemId,
}

impl Inner {
    fn note_mut(&mut self, note_id: NoteId) -> Result<&mut StoredNote, StoreError> {
        self.notes.get_mut(&note_id).ok_or(StoreError::NotFound(note_id))
    }

    fn push_item(&mut self, note_id: NoteId, text: &str, provisional: bool) -> Result<ItemId, StoreError> {
        self.next_item_id += 1;
        let id = self.next_item_id;
        let note = self.note_mut(note_id)?;
        let order = note.items.len() as i32;
        note.items.push(ListItem {
            id,
            text: text.to_string(),
            done: false,
            order,
            provisional,
        });
        Ok(id)
    }

    fn find_item_mut(&mut self, item_id: ItemId) -> Result<&mut ListItem, StoreError> {
        self.notes
            .values_mut()
            .flat_map(|n| n.items.iter_mut())
            .find(|i| i.id == item_id)
            .ok_or(StoreError::ItemNotFound(item_id))
    }
}

/// Process-local note store. Converting to a list splits the body into one
/// item per non-empty line; converting back joins the items.
#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    inner: Mutex<Inner>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a placeholder item that command matching must skip.
    pub async fn add_provisional_item(&self, note_id: NoteId, text: &str) -> Result<ItemId, StoreError> {
        self.inner.lock().await.push_item(note_id, text, true)
    }

    pub async fn note_count(&self) -> usize {
        self.inner.lock().await.notes.len()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteStore {
    async fn create_text_note(&self, body: &str) -> Result<NoteId, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.next_note_id += 1;
        let id = inner.next_note_id;
        inner.notes.insert(
            id,
            StoredNote {
                kind: NoteKind::Plain,
                body: body.to_string(),
                items: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn convert_note_to_list(&self, note_id: NoteId) -> Result<ListConversion, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(note) = inner.notes.get(&note_id) else {
            return Ok(ListConversion::NotFound);
        };
        if note.kind == NoteKind::List {
            return Ok(ListConversion::AlreadyList);
        }
        let lines: Vec<String> = note
            .body
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        for line in &lines {
            inner.push_item(note_id, line, false)?;
        }
        let note = inner.note_mut(note_id)?;
        note.kind = NoteKind::List;
        note.body.clear();
        Ok(ListConversion::Converted(lines.len()))
    }

    async fn convert_note_to_plain(&self, note_id: NoteId) -> Result<PlainConversion, StoreError> {
        let mut inner = self.inner.lock().await;
        let note = inner.note_mut(note_id)?;
        if note.kind == NoteKind::Plain {
            return Ok(PlainConversion {
                item_count: 0,
                body: note.body.clone(),
            });
        }
        let body = note
            .items
            .iter()
            .map(|i| i.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let item_count = note.items.len();
        note.items.clear();
        note.kind = NoteKind::Plain;
        note.body = body.clone();
        Ok(PlainConversion { item_count, body })
    }

    async fn finalize_all_provisional(&self, note_id: NoteId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let note = inner.note_mut(note_id)?;
        note.items.retain(|i| !(i.provisional && i.text.trim().is_empty()));
        for item in note.items.iter_mut() {
            item.provisional = false;
        }
        Ok(())
    }

    async fn note_once(&self, note_id: NoteId) -> Result<Option<NoteSnapshot>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.notes.get(&note_id).map(|n| NoteSnapshot {
            id: note_id,
            kind: n.kind,
            body: n.body.clone(),
        }))
    }

    async fn list_items_once(&self, note_id: NoteId) -> Result<Vec<ListItem>, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .notes
            .get(&note_id)
            .map(|n| n.items.clone())
            .ok_or(StoreError::NotFound(note_id))
    }

    async fn add_item(&self, note_id: NoteId, text: &str) -> Result<ItemId, StoreError> {
        self.inner.lock().await.push_item(note_id, text, false)
    }

    async fn remove_item(&self, item_id: ItemId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for note in inner.notes.values_mut() {
            if let Some(pos) = note.items.iter().position(|i| i.id == item_id) {
                note.items.remove(pos);
                return Ok(());
            }
        }
        Err(StoreError::ItemNotFound(item_id))
    }

    async fn toggle_item(&self, item_id: ItemId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let item = inner.find_item_mut(item_id)?;
        item.done = !item.done;
        Ok(())
    }
}
