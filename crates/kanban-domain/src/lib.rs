pub mod board;
pub mod card;
pub mod column;
pub mod drag;
pub mod locate;
pub mod view;

pub use board::Board;
pub use card::{Card, CardId, CardMode, EditOutcome};
pub use column::{Column, ColumnId, ColumnKind};
pub use drag::{DragController, DragSession, DragState, DropOutcome};
pub use locate::{ColumnLocatable, ElementId, HitTest, Located};
pub use view::{BoardView, DragPreview};
