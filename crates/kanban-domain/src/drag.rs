//! Pointer drag-and-drop of cards between columns.
//!
//! A drag is well formed when it is exactly one pointer-down on a view-mode
//! card, zero or more moves, then one pointer-up. The controller holds at
//! most one [`DragSession`]; a pointer-down while one is active is ignored.
//! The floating preview shown at drag start is destroyed on every path out of
//! the dragging state, before the drop target is resolved.

use kanban_core::{Offset, Point};

use crate::board::Board;
use crate::card::CardId;
use crate::column::ColumnId;
use crate::locate::HitTest;
use crate::view::{BoardView, DragPreview};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub card_id: CardId,
    pub source_column_id: ColumnId,
    /// Grab point relative to the card's top-left corner.
    pub pointer_offset: Offset,
    pub current_pointer: Point,
}

impl DragSession {
    /// Where the preview's top-left corner goes so the grab point stays under
    /// the pointer.
    pub fn preview_origin(&self) -> Point {
        self.current_pointer - self.pointer_offset
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Pointer released without an active drag.
    NotDragging,
    /// Nothing under the pointer accepts cards, or the card vanished mid-drag.
    Abandoned,
    /// Released over the column the card came from.
    SameColumn,
    Moved {
        from: ColumnId,
        to: ColumnId,
        new_card_id: CardId,
    },
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    /// Starts a drag of `card_id`, grabbed at `pos`, whose rendered top-left
    /// corner is `card_origin`. Returns whether a drag started.
    pub fn on_pointer_down<P: DragPreview + ?Sized>(
        &mut self,
        board: &Board,
        card_id: CardId,
        card_origin: Point,
        pos: Point,
        preview: &mut P,
    ) -> bool {
        if let Some(active) = self.session() {
            tracing::debug!(active = %active.card_id, "pointer down ignored, drag in progress");
            return false;
        }
        let Some(card) = board.card(card_id) else {
            return false;
        };
        if !card.accepts_pointer() {
            return false;
        }

        let session = DragSession {
            card_id,
            source_column_id: card.column_id,
            pointer_offset: pos - card_origin,
            current_pointer: pos,
        };
        preview.show_floating_preview(&card.text, session.preview_origin());
        tracing::debug!(card = %card_id, x = pos.x, y = pos.y, "drag started");
        self.state = DragState::Dragging(session);
        true
    }

    pub fn on_pointer_move<P: DragPreview + ?Sized>(&mut self, pos: Point, preview: &mut P) {
        if let DragState::Dragging(session) = &mut self.state {
            session.current_pointer = pos;
            preview.move_floating_preview(session.preview_origin());
        }
    }

    /// Ends the drag at `pos` and applies the drop.
    pub fn on_pointer_up<H, V, P>(
        &mut self,
        pos: Point,
        board: &mut Board,
        hits: &H,
        view: &mut V,
        preview: &mut P,
    ) -> DropOutcome
    where
        H: HitTest + ?Sized,
        V: BoardView + ?Sized,
        P: DragPreview + ?Sized,
    {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return DropOutcome::NotDragging;
        };
        preview.destroy_floating_preview();

        let Some(target) = board.locate_column_at_screen_point(pos, hits) else {
            tracing::debug!(card = %session.card_id, "drop abandoned, no column under pointer");
            return DropOutcome::Abandoned;
        };
        if target == session.source_column_id {
            tracing::debug!(card = %session.card_id, "dropped on source column");
            return DropOutcome::SameColumn;
        }
        match board.move_card(session.card_id, target, view) {
            Some(new_card_id) => DropOutcome::Moved {
                from: session.source_column_id,
                to: target,
                new_card_id,
            },
            None => {
                tracing::debug!(card = %session.card_id, "drop abandoned, card no longer on board");
                DropOutcome::Abandoned
            }
        }
    }
}
