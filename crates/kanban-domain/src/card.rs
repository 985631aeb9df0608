use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::column::ColumnId;

pub type CardId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardMode {
    View,
    Editing,
}

/// What the owning column must do after an edit ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// New text stored, card back in view mode.
    Saved,
    /// Edit abandoned, previous text kept.
    Reverted,
    /// Card has no text to show and must be removed.
    Delete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub column_id: ColumnId,
    pub text: String,
    pub mode: CardMode,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// View-mode card. Callers guarantee `text` is already trimmed and non-empty.
    pub fn new(column_id: ColumnId, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            column_id,
            text,
            mode: CardMode::View,
            created_at: Utc::now(),
        }
    }

    /// Fresh card with no text yet, open for editing.
    pub fn blank(column_id: ColumnId) -> Self {
        Self {
            mode: CardMode::Editing,
            ..Self::new(column_id, String::new())
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode == CardMode::Editing
    }

    /// Pointer input is only meaningful for cards in view mode; the edit
    /// field owns the pointer while editing.
    pub fn accepts_pointer(&self) -> bool {
        self.mode == CardMode::View
    }

    /// Opens the inline editor. The host seeds its edit field with
    /// `initial_text`; the stored text only changes on commit.
    pub fn begin_edit(&mut self, initial_text: &str) {
        tracing::debug!(card = %self.id, initial_len = initial_text.len(), "begin edit");
        self.mode = CardMode::Editing;
    }

    pub fn commit_edit(&mut self, candidate: &str) -> EditOutcome {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return EditOutcome::Delete;
        }
        self.text = trimmed.to_string();
        self.mode = CardMode::View;
        EditOutcome::Saved
    }

    pub fn cancel_edit(&mut self) -> EditOutcome {
        if self.text.is_empty() {
            return EditOutcome::Delete;
        }
        self.mode = CardMode::View;
        EditOutcome::Reverted
    }
}
