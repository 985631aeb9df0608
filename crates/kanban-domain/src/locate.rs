use kanban_core::Point;

use crate::card::CardId;
use crate::column::ColumnId;

/// Handle to an element in the host's rendered tree.
pub type ElementId = usize;

/// What a rendered element knows about the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Located {
    Column(ColumnId),
    Card(CardId),
    Other,
}

pub trait ColumnLocatable {
    fn locate(&self) -> Located;
}

/// Read access to the host's rendered element tree.
pub trait HitTest {
    /// Topmost element under `point`.
    fn hit_test(&self, point: Point) -> Option<ElementId>;

    /// Ancestors of `element`, nearest first, ending at the root.
    fn containment_ancestry(&self, element: ElementId) -> Vec<ElementId>;

    fn locatable(&self, element: ElementId) -> Option<&dyn ColumnLocatable>;
}
