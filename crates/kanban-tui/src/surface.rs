use std::collections::HashMap;

use kanban_core::EditBuffer;
use kanban_domain::{BoardView, Card, CardId, CardMode, Column, ColumnId};

use crate::wrap::wrap_text;

/// Rows drawn under every card.
pub const SEPARATOR_ROWS: u16 = 1;
/// Cells reserved at the right of a card for its delete button.
pub const DELETE_BUTTON_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnViewport {
    /// Width available to a card, scrollbar excluded.
    pub width: u16,
    pub rows: u16,
    pub scroll_offset: u16,
    pub content_rows: u16,
    pub scrollbar_visible: bool,
}

impl ColumnViewport {
    pub fn max_scroll(&self) -> u16 {
        self.content_rows.saturating_sub(self.rows)
    }

    /// Scrolls the minimum amount that brings rows `top..top + height` into view.
    pub fn reveal(&mut self, top: u16, height: u16) {
        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if top + height > self.scroll_offset + self.rows {
            self.scroll_offset = (top + height).saturating_sub(self.rows);
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }
}

#[derive(Debug, Clone)]
pub struct ActiveEditor {
    pub card_id: CardId,
    pub buffer: EditBuffer,
}

/// A card's vertical slot in its column's scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    pub card_id: CardId,
    pub top: u16,
    pub rows: u16,
}

/// Terminal-side state the board renders into: per-column scroll geometry
/// and the single focused inline editor.
#[derive(Debug, Default)]
pub struct BoardSurface {
    viewports: HashMap<ColumnId, ColumnViewport>,
    editor: Option<ActiveEditor>,
    geometry_changed: bool,
}

impl BoardSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self, column_id: ColumnId) -> ColumnViewport {
        self.viewports.get(&column_id).copied().unwrap_or_default()
    }

    fn viewport_mut(&mut self, column_id: ColumnId) -> &mut ColumnViewport {
        self.viewports.entry(column_id).or_default()
    }

    /// Records the size a column was last drawn at.
    pub fn set_geometry(&mut self, column_id: ColumnId, width: u16, rows: u16) {
        let viewport = self.viewport_mut(column_id);
        if viewport.width != width || viewport.rows != rows {
            viewport.width = width;
            viewport.rows = rows;
            self.geometry_changed = true;
        }
    }

    pub fn take_geometry_changed(&mut self) -> bool {
        std::mem::take(&mut self.geometry_changed)
    }

    pub fn scroll_by(&mut self, column_id: ColumnId, delta: i32) {
        let viewport = self.viewport_mut(column_id);
        let target = (viewport.scroll_offset as i32 + delta).clamp(0, viewport.max_scroll() as i32);
        viewport.scroll_offset = target as u16;
    }

    pub fn reveal(&mut self, column_id: ColumnId, slot: CardSlot) {
        self.viewport_mut(column_id).reveal(slot.top, slot.rows);
    }

    pub fn text_width(&self, column_id: ColumnId) -> u16 {
        self.viewport(column_id)
            .width
            .saturating_sub(DELETE_BUTTON_WIDTH)
    }

    pub fn editor(&self) -> Option<&ActiveEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut ActiveEditor> {
        self.editor.as_mut()
    }

    pub fn take_editor(&mut self) -> Option<ActiveEditor> {
        self.editor.take()
    }

    pub fn is_editing(&self, card_id: CardId) -> bool {
        self.editor.as_ref().is_some_and(|e| e.card_id == card_id)
    }

    /// Wrapped text lines of a view-mode card at its column's width.
    pub fn card_lines(&self, card: &Card) -> Vec<String> {
        wrap_text(&card.text, self.text_width(card.column_id) as usize)
    }

    /// Stacks the column's cards top to bottom in list order.
    pub fn slots(&self, column: &Column) -> Vec<CardSlot> {
        let mut top = 0u16;
        column
            .cards()
            .iter()
            .map(|card| {
                let rows = self.card_rows(card);
                let slot = CardSlot {
                    card_id: card.id,
                    top,
                    rows,
                };
                top = top.saturating_add(rows);
                slot
            })
            .collect()
    }
}

impl BoardView for BoardSurface {
    fn render_card_list(&mut self, column: &Column) {
        let content_rows = self
            .slots(column)
            .last()
            .map_or(0, |slot| slot.top.saturating_add(slot.rows));
        let viewport = self.viewport_mut(column.id);
        viewport.content_rows = content_rows;
        viewport.scroll_offset = viewport.scroll_offset.min(viewport.max_scroll());
    }

    fn focus_card_editor(&mut self, card_id: CardId, initial_text: &str) {
        self.editor = Some(ActiveEditor {
            card_id,
            buffer: EditBuffer::with_text(initial_text),
        });
    }

    fn set_scroll_affordance_visible(&mut self, column_id: ColumnId, visible: bool) {
        self.viewport_mut(column_id).scrollbar_visible = visible;
    }

    fn viewport_rows(&self, column_id: ColumnId) -> u16 {
        self.viewport(column_id).rows
    }

    fn card_rows(&self, card: &Card) -> u16 {
        let body = match card.mode {
            CardMode::Editing => 1,
            CardMode::View => self.card_lines(card).len() as u16,
        };
        body + SEPARATOR_ROWS
    }
}
