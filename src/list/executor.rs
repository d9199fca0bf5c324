use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::types::{
    ItemId, ListAction, ListCommand, ListConversion, ListItem, NoteId, NoteKind, NoteSnapshot,
    PlainConversion,
};
use crate::error::StoreError;
use crate::lexicon::{fold_diacritics, normalize_for_key};
use crate::telemetry::{ExecutionOutcome, NoopObserver, TelemetryEvent, TelemetryObserver};

const TRIM_CHARS: &[char] = &[' ', ',', ';', '.', '\'', '"'];

/// Storage boundary consumed by the executor.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create_text_note(&self, body: &str) -> Result<NoteId, StoreError>;
    async fn convert_note_to_list(&self, note_id: NoteId) -> Result<ListConversion, StoreError>;
    async fn convert_note_to_plain(&self, note_id: NoteId) -> Result<PlainConversion, StoreError>;
    async fn finalize_all_provisional(&self, note_id: NoteId) -> Result<(), StoreError>;
    async fn note_once(&self, note_id: NoteId) -> Result<Option<NoteSnapshot>, StoreError>;
    async fn list_items_once(&self, note_id: NoteId) -> Result<Vec<ListItem>, StoreError>;
    async fn add_item(&self, note_id: NoteId, text: &str) -> Result<ItemId, StoreError>;
    async fn remove_item(&self, item_id: ItemId) -> Result<(), StoreError>;
    async fn toggle_item(&self, item_id: ItemId) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExecutionResult {
    Success {
        note_id: NoteId,
        action: ListAction,
        requested_items: Vec<String>,
        matched_count: usize,
        total_count: usize,
        created_note: bool,
    },
    Incomplete {
        note_id: Option<NoteId>,
        reason: String,
    },
    Failure {
        note_id: Option<NoteId>,
        #[serde(serialize_with = "error_to_string")]
        error: StoreError,
    },
}

fn error_to_string<S: serde::Serializer>(error: &StoreError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&error.to_string())
}

impl ExecutionResult {
    pub fn note_id(&self) -> Option<NoteId> {
        match self {
            Self::Success { note_id, .. } => Some(*note_id),
            Self::Incomplete { note_id, .. } | Self::Failure { note_id, .. } => *note_id,
        }
    }

    fn outcome(&self) -> ExecutionOutcome {
        match self {
            Self::Success { .. } => ExecutionOutcome::Success,
            Self::Incomplete { .. } => ExecutionOutcome::Incomplete,
            Self::Failure { .. } => ExecutionOutcome::Failure,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct EnsuredNote {
    note_id: NoteId,
    created: bool,
}

/// Applies list commands to a checklist note through a [`NoteRepository`].
///
/// Items are processed one by one; a failing item is logged and skipped.
/// Side effects already issued are never rolled back.
pub struct ListExecutor {
    repo: Arc<dyn NoteRepository>,
    observer: Arc<dyn TelemetryObserver>,
}

impl ListExecutor {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self {
            repo,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn TelemetryObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub async fn execute(&self, note_id: Option<NoteId>, command: &ListCommand) -> ExecutionResult {
        debug!(action = command.action.as_str(), items = ?command.items, ?note_id, "list exec");
        let result = match command.action {
            ListAction::ConvertToList => self.convert_to_list(note_id).await,
            ListAction::ConvertToText => self.convert_to_plain(note_id).await,
            action => match self.ensure(note_id).await {
                Ok(ensured) => self.mutate(ensured, action, &command.items).await,
                Err(e) => {
                    error!(?note_id, error = %e, "list exec: ensure list note failed");
                    ExecutionResult::Failure { note_id, error: e }
                }
            },
        };

        let (matched, total) = match &result {
            ExecutionResult::Success {
                matched_count,
                total_count,
                ..
            } => (*matched_count, *total_count),
            _ => (0, 0),
        };
        self.observer.on_event(TelemetryEvent::ListExecution {
            action: command.action,
            outcome: result.outcome(),
            matched,
            total,
        });
        result
    }

    /// Creates a list note when `note_id` is absent or unknown, converts a
    /// plain note in place otherwise.
    pub async fn ensure_list_note(&self, note_id: Option<NoteId>) -> Result<(NoteId, bool), StoreError> {
        let ensured = self.ensure(note_id).await?;
        Ok((ensured.note_id, ensured.created))
    }

    async fn ensure(&self, note_id: Option<NoteId>) -> Result<EnsuredNote, StoreError> {
        let existing = match note_id {
            Some(id) => self.repo.note_once(id).await?,
            None => None,
        };
        match existing {
            Some(note) if note.kind == NoteKind::List => Ok(EnsuredNote {
                note_id: note.id,
                created: false,
            }),
            Some(note) => {
                self.repo.convert_note_to_list(note.id).await?;
                Ok(EnsuredNote {
                    note_id: note.id,
                    created: false,
                })
            }
            None => {
                let id = self.repo.create_text_note("").await?;
                self.repo.convert_note_to_list(id).await?;
                Ok(EnsuredNote {
                    note_id: id,
                    created: true,
                })
            }
        }
    }

    async fn mutate(&self, ensured: EnsuredNote, action: ListAction, raw_items: &[String]) -> ExecutionResult {
        let items = sanitize_items(raw_items);
        if items.is_empty() {
            return ExecutionResult::Incomplete {
                note_id: Some(ensured.note_id),
                reason: "empty_items".to_string(),
            };
        }

        let mut toggled = None;
        let matched_count = match action {
            ListAction::Add => self.add_items(ensured.note_id, &items).await,
            ListAction::Remove | ListAction::Toggle | ListAction::Untick => {
                let matches = match self.match_items(ensured.note_id, &items).await {
                    Ok(m) => m,
                    Err(e) => {
                        error!(note_id = ensured.note_id, error = %e, "list exec: reading items failed");
                        return ExecutionResult::Failure {
                            note_id: Some(ensured.note_id),
                            error: e,
                        };
                    }
                };
                match action {
                    ListAction::Remove => self.remove_items(ensured.note_id, &matches).await,
                    _ => {
                        let count = self
                            .toggle_items(ensured.note_id, &matches, action == ListAction::Untick)
                            .await;
                        toggled = Some(count);
                        matches.len()
                    }
                }
            }
            ListAction::ConvertToList | ListAction::ConvertToText => 0,
        };

        info!(
            action = action.as_str(),
            note_id = ensured.note_id,
            matched = matched_count,
            toggled = ?toggled,
            total = items.len(),
            "list exec done"
        );
        ExecutionResult::Success {
            note_id: ensured.note_id,
            action,
            total_count: items.len(),
            requested_items: items,
            matched_count,
            created_note: ensured.created,
        }
    }

    async fn add_items(&self, note_id: NoteId, items: &[String]) -> usize {
        let mut added = 0;
        for item in items {
            match self.repo.add_item(note_id, item).await {
                Ok(_) => added += 1,
                Err(e) => warn!(note_id, item = %item, error = %e, "failed to add list item"),
            }
        }
        added
    }

    async fn remove_items(&self, note_id: NoteId, matches: &[ListItem]) -> usize {
        let mut removed = 0;
        for item in matches {
            match self.repo.remove_item(item.id).await {
                Ok(()) => removed += 1,
                Err(e) => warn!(note_id, item_id = item.id, error = %e, "failed to remove list item"),
            }
        }
        removed
    }

    /// Untick only acts on done items and never ticks anything.
    async fn toggle_items(&self, note_id: NoteId, matches: &[ListItem], untick_only: bool) -> usize {
        let mut toggled = 0;
        for item in matches {
            if untick_only && !item.done {
                continue;
            }
            debug!(item_id = item.id, done = item.done, "toggling list item");
            match self.repo.toggle_item(item.id).await {
                Ok(()) => toggled += 1,
                Err(e) => warn!(note_id, item_id = item.id, error = %e, "failed to toggle list item"),
            }
        }
        toggled
    }

    /// Exact match on normalized text; each existing item satisfies at most
    /// one request. Provisional items are never matched.
    async fn match_items(&self, note_id: NoteId, requested: &[String]) -> Result<Vec<ListItem>, StoreError> {
        let mut available: Vec<ListItem> = self
            .repo
            .list_items_once(note_id)
            .await?
            .into_iter()
            .filter(|i| !i.provisional)
            .collect();

        let mut matches = Vec::new();
        for candidate in requested {
            let key = normalize_for_key(candidate);
            if let Some(pos) = available.iter().position(|i| normalize_for_key(&i.text) == key) {
                matches.push(available.remove(pos));
            }
        }
        Ok(matches)
    }

    async fn convert_to_list(&self, note_id: Option<NoteId>) -> ExecutionResult {
        let (target, created) = match self.target_note(note_id).await {
            Ok(t) => t,
            Err(e) => return ExecutionResult::Failure { note_id, error: e },
        };
        let converted = match self.repo.convert_note_to_list(target).await {
            Ok(ListConversion::Converted(n)) => n,
            Ok(ListConversion::AlreadyList) => 0,
            Ok(ListConversion::NotFound) => {
                error!(note_id = target, "convert to list: note not found");
                return ExecutionResult::Failure {
                    note_id: Some(target),
                    error: StoreError::NotFound(target),
                };
            }
            Err(e) => {
                error!(note_id = target, error = %e, "convert to list failed");
                return ExecutionResult::Failure {
                    note_id: Some(target),
                    error: e,
                };
            }
        };
        info!(note_id = target, converted, "list exec: CONVERT_TO_LIST");
        ExecutionResult::Success {
            note_id: target,
            action: ListAction::ConvertToList,
            requested_items: Vec::new(),
            matched_count: converted,
            total_count: converted,
            created_note: created,
        }
    }

    async fn convert_to_plain(&self, note_id: Option<NoteId>) -> ExecutionResult {
        let (target, created) = match self.target_note(note_id).await {
            Ok(t) => t,
            Err(e) => return ExecutionResult::Failure { note_id, error: e },
        };
        let conversion = async {
            self.repo.finalize_all_provisional(target).await?;
            self.repo.convert_note_to_plain(target).await
        };
        let converted = match conversion.await {
            Ok(c) => c.item_count,
            Err(e) => {
                error!(note_id = target, error = %e, "convert to text failed");
                return ExecutionResult::Failure {
                    note_id: Some(target),
                    error: e,
                };
            }
        };
        info!(note_id = target, converted, "list exec: CONVERT_TO_TEXT");
        ExecutionResult::Success {
            note_id: target,
            action: ListAction::ConvertToText,
            requested_items: Vec::new(),
            matched_count: converted,
            total_count: converted,
            created_note: created,
        }
    }

    async fn target_note(&self, note_id: Option<NoteId>) -> Result<(NoteId, bool), StoreError> {
        match note_id {
            Some(id) => Ok((id, false)),
            None => Ok((self.repo.create_text_note("").await?, true)),
        }
    }
}

fn sanitize_items(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|i| {
            let folded = fold_diacritics(&i.to_lowercase());
            folded
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .trim_matches(TRIM_CHARS)
                .to_string()
        })
        .filter(|i| !i.is_empty())
        .collect()
}
