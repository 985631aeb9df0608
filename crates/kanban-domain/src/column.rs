use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::{Card, CardId};

pub type ColumnId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Todo,
    InProgress,
    Done,
}

impl ColumnKind {
    pub const ALL: [ColumnKind; 3] = [ColumnKind::Todo, ColumnKind::InProgress, ColumnKind::Done];

    pub fn title(self) -> &'static str {
        match self {
            ColumnKind::Todo => "To Do",
            ColumnKind::InProgress => "In Progress",
            ColumnKind::Done => "Done",
        }
    }
}

/// Ordered list of cards. Index in `cards` is the display row, top first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub kind: ColumnKind,
    pub title: String,
    pub accepts_drop: bool,
    cards: Vec<Card>,
}

impl Column {
    pub fn new(kind: ColumnKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: kind.title().to_string(),
            accepts_drop: true,
            cards: Vec::new(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.card(card_id).is_some()
    }

    /// Display row of a card.
    pub fn position_of(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == card_id)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.text.as_str()).collect()
    }

    /// Appends an empty card in edit mode.
    pub fn add_inline(&mut self) -> CardId {
        let card = Card::blank(self.id);
        let id = card.id;
        self.cards.push(card);
        id
    }

    pub fn add_by_text(&mut self, text: &str) -> Option<CardId> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let card = Card::new(self.id, trimmed.to_string());
        let id = card.id;
        self.cards.push(card);
        Some(id)
    }

    /// Materializes a card dragged in from another column.
    pub fn accept_drop(&mut self, text: &str) -> Option<CardId> {
        self.add_by_text(text)
    }

    /// Removes a card; rows below it move up by one. Unknown ids are ignored.
    pub fn remove_card(&mut self, card_id: CardId) -> Option<Card> {
        let index = self.position_of(card_id)?;
        Some(self.cards.remove(index))
    }

    /// Whether the stacked card rows are taller than the visible area.
    pub fn content_overflows<F>(&self, viewport_rows: u16, card_rows: F) -> bool
    where
        F: Fn(&Card) -> u16,
    {
        let content: u32 = self.cards.iter().map(|c| card_rows(c) as u32).sum();
        content > viewport_rows as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_with(texts: &[&str]) -> Column {
        let mut column = Column::new(ColumnKind::Todo);
        for text in texts {
            column.add_by_text(text);
        }
        column
    }

    #[test]
    fn test_titles_are_fixed() {
        let titles: Vec<_> = ColumnKind::ALL.iter().map(|k| k.title()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        assert!(Column::new(ColumnKind::Done).accepts_drop);
    }

    #[test]
    fn test_add_by_text_skips_blank_input() {
        let mut column = column_with(&["A"]);
        assert_eq!(column.add_by_text(""), None);
        assert_eq!(column.add_by_text("   "), None);
        assert_eq!(column.len(), 1);
    }

    #[test]
    fn test_add_by_text_appends_trimmed_view_card() {
        let mut column = Column::new(ColumnKind::Todo);
        let id = column.add_by_text("  Ship it ").unwrap();
        let card = column.card(id).unwrap();
        assert_eq!(card.text, "Ship it");
        assert_eq!(card.column_id, column.id);
        assert!(!card.is_editing());
    }

    #[test]
    fn test_add_inline_appends_editing_card() {
        let mut column = column_with(&["A"]);
        let id = column.add_inline();
        assert_eq!(column.position_of(id), Some(1));
        assert!(column.card(id).unwrap().is_editing());
    }

    #[test]
    fn test_remove_compacts_rows() {
        let mut column = column_with(&["A", "B", "C", "D"]);
        let b = column.cards()[1].id;
        let d = column.cards()[3].id;

        column.remove_card(b);
        column.remove_card(d);

        assert_eq!(column.texts(), vec!["A", "C"]);
        for (row, card) in column.cards().iter().enumerate() {
            assert_eq!(column.position_of(card.id), Some(row));
            assert_eq!(card.column_id, column.id);
        }
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut column = column_with(&["A", "B"]);
        let a = column.cards()[0].id;
        assert!(column.remove_card(a).is_some());
        assert!(column.remove_card(a).is_none());
        assert_eq!(column.texts(), vec!["B"]);
    }

    #[test]
    fn test_content_overflows() {
        let column = column_with(&["A", "B", "C"]);
        assert!(!column.content_overflows(6, |_| 2));
        assert!(column.content_overflows(5, |_| 2));
        assert!(!Column::new(ColumnKind::Done).content_overflows(0, |_| 2));
    }
}
