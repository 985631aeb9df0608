//! Capabilities the board needs from whatever draws it.
//!
//! The model never touches widgets. After each structural change it hands
//! the affected column to a [`BoardView`]; while a card is dragged the
//! [`DragController`](crate::drag::DragController) drives a [`DragPreview`].

use kanban_core::Point;

use crate::card::{Card, CardId};
use crate::column::{Column, ColumnId};

#[cfg_attr(test, mockall::automock)]
pub trait BoardView {
    /// Lay out a column's cards top to bottom in list order.
    fn render_card_list(&mut self, column: &Column);

    /// Give keyboard focus to a card's edit field, seeded with `initial_text`.
    fn focus_card_editor(&mut self, card_id: CardId, initial_text: &str);

    fn set_scroll_affordance_visible(&mut self, column_id: ColumnId, visible: bool);

    /// Rows available to a column's card list.
    fn viewport_rows(&self, column_id: ColumnId) -> u16;

    /// Rows a card occupies when rendered in its current mode.
    fn card_rows(&self, card: &Card) -> u16;
}

#[cfg_attr(test, mockall::automock)]
pub trait DragPreview {
    fn show_floating_preview(&mut self, text: &str, at: Point);
    fn move_floating_preview(&mut self, at: Point);
    fn destroy_floating_preview(&mut self);
}
