use kanban_core::{LogEntry, Loggable, Point};

use crate::card::{Card, CardId, EditOutcome};
use crate::column::{Column, ColumnId, ColumnKind};
use crate::locate::{HitTest, Located};
use crate::view::BoardView;

/// The three fixed columns and every card on them.
///
/// Mutations go through the board so that the owning column is re-rendered
/// and its scroll affordance recomputed after every structural change.
#[derive(Debug, Clone)]
pub struct Board {
    columns: Vec<Column>,
    logs: Vec<LogEntry>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            columns: ColumnKind::ALL.into_iter().map(Column::new).collect(),
            logs: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    fn column_mut(&mut self, column_id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    pub fn column_by_kind(&self, kind: ColumnKind) -> &Column {
        // Board::new builds one column per kind, in ColumnKind::ALL order.
        let index = ColumnKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        &self.columns[index]
    }

    pub fn column_of_card(&self, card_id: CardId) -> Option<ColumnId> {
        self.columns
            .iter()
            .find(|c| c.contains(card_id))
            .map(|c| c.id)
    }

    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.columns.iter().find_map(|c| c.card(card_id))
    }

    fn card_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        self.columns.iter_mut().find_map(|c| c.card_mut(card_id))
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Re-renders one column and pushes its derived overflow state.
    pub fn refresh_column<V: BoardView + ?Sized>(&self, column_id: ColumnId, view: &mut V) {
        let Some(column) = self.column(column_id) else {
            return;
        };
        view.render_card_list(column);
        let overflows = column.content_overflows(view.viewport_rows(column.id), |card| {
            view.card_rows(card)
        });
        view.set_scroll_affordance_visible(column.id, overflows);
    }

    /// Used after the host's geometry changes, e.g. on resize.
    pub fn refresh_all<V: BoardView + ?Sized>(&self, view: &mut V) {
        for column in &self.columns {
            self.refresh_column(column.id, view);
        }
    }

    pub fn add_inline<V: BoardView + ?Sized>(
        &mut self,
        column_id: ColumnId,
        view: &mut V,
    ) -> Option<CardId> {
        let card_id = self.column_mut(column_id)?.add_inline();
        self.refresh_column(column_id, view);
        view.focus_card_editor(card_id, "");
        Some(card_id)
    }

    pub fn add_by_text<V: BoardView + ?Sized>(
        &mut self,
        column_id: ColumnId,
        text: &str,
        view: &mut V,
    ) -> Option<CardId> {
        let column = self.column_mut(column_id)?;
        let card_id = column.add_by_text(text)?;
        let message = format!("Added \"{}\" to {}", text.trim(), column.title);
        tracing::info!(card = %card_id, "{}", message);
        self.add_log(message);
        self.refresh_column(column_id, view);
        Some(card_id)
    }

    /// Re-opens a view-mode card for editing. Returns false for unknown cards
    /// or cards already being edited.
    pub fn begin_edit<V: BoardView + ?Sized>(&mut self, card_id: CardId, view: &mut V) -> bool {
        let Some(card) = self.card_mut(card_id) else {
            return false;
        };
        if card.is_editing() {
            return false;
        }
        let text = card.text.clone();
        card.begin_edit(&text);
        let column_id = card.column_id;
        self.refresh_column(column_id, view);
        view.focus_card_editor(card_id, &text);
        true
    }

    pub fn commit_edit<V: BoardView + ?Sized>(
        &mut self,
        card_id: CardId,
        candidate: &str,
        view: &mut V,
    ) -> Option<EditOutcome> {
        let card = self.card_mut(card_id)?;
        let outcome = card.commit_edit(candidate);
        let column_id = card.column_id;
        match outcome {
            EditOutcome::Saved => {
                let message = format!("Saved \"{}\"", card.text);
                tracing::info!(card = %card_id, "{}", message);
                self.add_log(message);
                self.refresh_column(column_id, view);
            }
            EditOutcome::Delete => {
                self.request_delete(card_id, view);
            }
            EditOutcome::Reverted => {
                self.refresh_column(column_id, view);
            }
        }
        Some(outcome)
    }

    pub fn cancel_edit<V: BoardView + ?Sized>(
        &mut self,
        card_id: CardId,
        view: &mut V,
    ) -> Option<EditOutcome> {
        let card = self.card_mut(card_id)?;
        let outcome = card.cancel_edit();
        let column_id = card.column_id;
        if outcome == EditOutcome::Delete {
            self.request_delete(card_id, view);
        } else {
            self.refresh_column(column_id, view);
        }
        Some(outcome)
    }

    /// Removes a card from whichever column holds it. Returns false when the
    /// card is already gone.
    pub fn request_delete<V: BoardView + ?Sized>(&mut self, card_id: CardId, view: &mut V) -> bool {
        let Some(column_id) = self.column_of_card(card_id) else {
            tracing::debug!(card = %card_id, "delete ignored, card already removed");
            return false;
        };
        let Some(card) = self
            .column_mut(column_id)
            .and_then(|column| column.remove_card(card_id))
        else {
            return false;
        };
        if !card.text.is_empty() {
            let message = format!("Deleted \"{}\"", card.text);
            tracing::info!(card = %card_id, "{}", message);
            self.add_log(message);
        }
        self.refresh_column(column_id, view);
        true
    }

    /// Moves a card by deleting it from its column and recreating it from its
    /// text at the bottom of `target`. The recreated card has a new id.
    pub fn move_card<V: BoardView + ?Sized>(
        &mut self,
        card_id: CardId,
        target: ColumnId,
        view: &mut V,
    ) -> Option<CardId> {
        let source = self.column_of_card(card_id)?;
        if source == target || self.column(target).map_or(true, |c| !c.accepts_drop) {
            return None;
        }
        let card = self.column_mut(source)?.remove_card(card_id)?;
        let new_id = self.column_mut(target)?.accept_drop(&card.text);
        let from = self.column(source).map(|c| c.title.clone()).unwrap_or_default();
        let to = self.column(target).map(|c| c.title.clone()).unwrap_or_default();
        let message = format!("Moved \"{}\" from {} to {}", card.text, from, to);
        tracing::info!(card = %card_id, new_card = ?new_id, "{}", message);
        self.add_log(message);
        self.refresh_column(source, view);
        self.refresh_column(target, view);
        new_id
    }

    /// Resolves the column under a screen point by walking from the topmost
    /// element up its containment ancestry until something names a column,
    /// directly or through one of its cards.
    pub fn locate_column_at_screen_point<H: HitTest + ?Sized>(
        &self,
        point: Point,
        hits: &H,
    ) -> Option<ColumnId> {
        let top = hits.hit_test(point)?;
        std::iter::once(top)
            .chain(hits.containment_ancestry(top))
            .find_map(|element| match hits.locatable(element)?.locate() {
                Located::Column(id) => self
                    .column(id)
                    .filter(|column| column.accepts_drop)
                    .map(|column| column.id),
                Located::Card(id) => self.column_of_card(id),
                Located::Other => None,
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Loggable for Board {
    fn add_log(&mut self, message: String) {
        self.logs.push(LogEntry::new(message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.logs
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::locate::{ColumnLocatable, ElementId};
    use crate::view::MockBoardView;
    use kanban_core::Rect;
    use mockall::predicate::eq;
    use std::sync::{Arc, Mutex};

    /// View double that accepts any call and reports fixed geometry.
    pub(crate) fn permissive_view() -> MockBoardView {
        let mut view = MockBoardView::new();
        view.expect_render_card_list().returning(|_| ());
        view.expect_focus_card_editor().returning(|_, _| ());
        view.expect_set_scroll_affordance_visible()
            .returning(|_, _| ());
        view.expect_viewport_rows().return_const(10u16);
        view.expect_card_rows().return_const(2u16);
        view
    }

    pub(crate) struct Node {
        pub rect: Rect,
        pub parent: Option<ElementId>,
        pub located: Located,
    }

    impl ColumnLocatable for Node {
        fn locate(&self) -> Located {
            self.located
        }
    }

    /// Element tree where later nodes paint over earlier ones.
    #[derive(Default)]
    pub(crate) struct FakeTree {
        pub nodes: Vec<Node>,
    }

    impl FakeTree {
        pub fn push(&mut self, rect: Rect, parent: Option<ElementId>, located: Located) -> ElementId {
            self.nodes.push(Node {
                rect,
                parent,
                located,
            });
            self.nodes.len() - 1
        }

        /// Root plus one full-height column element per board column, 10 wide.
        pub fn for_board(board: &Board) -> (Self, Vec<ElementId>) {
            let mut tree = FakeTree::default();
            let root = tree.push(Rect::new(0, 0, 40, 20), None, Located::Other);
            let columns = board
                .columns()
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    tree.push(
                        Rect::new(i as u16 * 10, 2, 10, 18),
                        Some(root),
                        Located::Column(c.id),
                    )
                })
                .collect();
            (tree, columns)
        }
    }

    impl HitTest for FakeTree {
        fn hit_test(&self, point: Point) -> Option<ElementId> {
            self.nodes.iter().rposition(|n| n.rect.contains(point))
        }

        fn containment_ancestry(&self, element: ElementId) -> Vec<ElementId> {
            let mut chain = Vec::new();
            let mut current = self.nodes.get(element).and_then(|n| n.parent);
            while let Some(id) = current {
                chain.push(id);
                current = self.nodes[id].parent;
            }
            chain
        }

        fn locatable(&self, element: ElementId) -> Option<&dyn ColumnLocatable> {
            self.nodes.get(element).map(|n| n as &dyn ColumnLocatable)
        }
    }

    fn ids(board: &Board) -> (ColumnId, ColumnId, ColumnId) {
        let c = board.columns();
        (c[0].id, c[1].id, c[2].id)
    }

    #[test]
    fn test_board_has_three_fixed_columns() {
        let board = Board::new();
        let titles: Vec<_> = board.columns().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        assert_eq!(board.column_by_kind(ColumnKind::Done).kind, ColumnKind::Done);
    }

    #[test]
    fn test_add_inline_then_commit_empty_removes_card() {
        let mut board = Board::new();
        let mut view = permissive_view();
        let (todo, _, _) = ids(&board);

        let card_id = board.add_inline(todo, &mut view).unwrap();
        assert_eq!(board.column(todo).unwrap().len(), 1);

        let outcome = board.commit_edit(card_id, "", &mut view);
        assert_eq!(outcome, Some(EditOutcome::Delete));
        assert_eq!(board.column(todo).unwrap().len(), 0);
        assert!(board.get_logs().is_empty());
    }

    #[test]
    fn test_add_inline_then_commit_text() {
        let mut board = Board::new();
        let mut view = permissive_view();
        let (todo, _, _) = ids(&board);

        let card_id = board.add_inline(todo, &mut view).unwrap();
        board.commit_edit(card_id, "Buy milk", &mut view);

        let column = board.column(todo).unwrap();
        assert_eq!(column.texts(), vec!["Buy milk"]);
        assert!(!column.cards()[0].is_editing());
        assert_eq!(board.latest_log().unwrap().message, "Saved \"Buy milk\"");
    }

    #[test]
    fn test_add_inline_focuses_empty_editor() {
        let mut board = Board::new();
        let (todo, _, _) = ids(&board);
        let mut view = MockBoardView::new();
        view.expect_render_card_list().times(1).returning(|_| ());
        view.expect_viewport_rows().return_const(10u16);
        view.expect_card_rows().return_const(2u16);
        view.expect_set_scroll_affordance_visible()
            .with(eq(todo), eq(false))
            .times(1)
            .returning(|_, _| ());
        view.expect_focus_card_editor()
            .withf(|_, text| text.is_empty())
            .times(1)
            .returning(|_, _| ());

        board.add_inline(todo, &mut view);
    }

    #[test]
    fn test_cancel_edit_of_saved_card_keeps_text() {
        let mut board = Board::new();
        let mut view = permissive_view();
        let (todo, _, _) = ids(&board);
        let card_id = board.add_by_text(todo, "Report", &mut view).unwrap();

        assert!(board.begin_edit(card_id, &mut view));
        assert!(!board.begin_edit(card_id, &mut view));
        assert_eq!(
            board.cancel_edit(card_id, &mut view),
            Some(EditOutcome::Reverted)
        );
        assert_eq!(board.card(card_id).unwrap().text, "Report");
    }

    #[test]
    fn test_cancel_edit_of_new_card_deletes_it() {
        let mut board = Board::new();
        let mut view = permissive_view();
        let (_, doing, _) = ids(&board);
        let card_id = board.add_inline(doing, &mut view).unwrap();

        assert_eq!(board.cancel_edit(card_id, &mut view), Some(EditOutcome::Delete));
        assert!(board.column(doing).unwrap().is_empty());
    }

    #[test]
    fn test_request_delete_is_idempotent() {
        let mut board = Board::new();
        let mut view = permissive_view();
        let (todo, _, _) = ids(&board);
        let card_id = board.add_by_text(todo, "Drop me", &mut view).unwrap();

        assert!(board.request_delete(card_id, &mut view));
        assert!(!board.request_delete(card_id, &mut view));
        assert_eq!(board.card_count(), 0);
    }

    #[test]
    fn test_scroll_affordance_follows_content() {
        let mut board = Board::new();
        let (todo, _, _) = ids(&board);
        let signals = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&signals);
        let mut view = MockBoardView::new();
        view.expect_render_card_list().returning(|_| ());
        view.expect_viewport_rows().return_const(4u16);
        view.expect_card_rows().return_const(2u16);
        view.expect_set_scroll_affordance_visible()
            .with(eq(todo), mockall::predicate::always())
            .returning(move |_, visible| recorded.lock().unwrap().push(visible));

        board.add_by_text(todo, "A", &mut view);
        board.add_by_text(todo, "B", &mut view);
        let c = board.add_by_text(todo, "C", &mut view).unwrap();
        board.request_delete(c, &mut view);

        assert_eq!(*signals.lock().unwrap(), vec![false, false, true, false]);
    }

    #[test]
    fn test_move_card_recreates_in_target() {
        let mut board = Board::new();
        let mut view = permissive_view();
        let (todo, doing, _) = ids(&board);
        let x = board.add_by_text(todo, "X", &mut view).unwrap();
        board.add_by_text(todo, "Y", &mut view);
        board.add_by_text(doing, "Z", &mut view);

        let new_id = board.move_card(x, doing, &mut view).unwrap();

        assert_ne!(new_id, x);
        assert_eq!(board.column(todo).unwrap().texts(), vec!["Y"]);
        assert_eq!(board.column(doing).unwrap().texts(), vec!["Z", "X"]);
        assert_eq!(board.card(new_id).unwrap().column_id, doing);
        assert!(board.card(x).is_none());
    }

    #[test]
    fn test_move_card_to_same_column_is_noop() {
        let mut board = Board::new();
        let mut view = permissive_view();
        let (todo, _, _) = ids(&board);
        let x = board.add_by_text(todo, "X", &mut view).unwrap();

        assert_eq!(board.move_card(x, todo, &mut view), None);
        assert_eq!(board.column(todo).unwrap().cards()[0].id, x);
    }

    #[test]
    fn test_locate_column_directly() {
        let board = Board::new();
        let (tree, _) = FakeTree::for_board(&board);
        let (todo, doing, done) = ids(&board);

        assert_eq!(board.locate_column_at_screen_point(Point::new(3, 5), &tree), Some(todo));
        assert_eq!(board.locate_column_at_screen_point(Point::new(15, 5), &tree), Some(doing));
        assert_eq!(board.locate_column_at_screen_point(Point::new(29, 19), &tree), Some(done));
    }

    #[test]
    fn test_locate_outside_columns() {
        let board = Board::new();
        let (tree, _) = FakeTree::for_board(&board);

        assert_eq!(board.locate_column_at_screen_point(Point::new(35, 5), &tree), None);
        assert_eq!(board.locate_column_at_screen_point(Point::new(3, 0), &tree), None);
        assert_eq!(board.locate_column_at_screen_point(Point::new(-1, 5), &tree), None);
    }

    #[test]
    fn test_locate_through_card_and_its_children() {
        let mut board = Board::new();
        let mut view = permissive_view();
        let (_, doing, _) = ids(&board);
        let card_id = board.add_by_text(doing, "Nested", &mut view).unwrap();

        let (mut tree, _) = FakeTree::for_board(&board);
        // Card parented to the root rather than its column: the card's own
        // identity has to be what resolves the column.
        let card = tree.push(Rect::new(11, 4, 8, 2), Some(0), Located::Card(card_id));
        tree.push(Rect::new(11, 4, 6, 1), Some(card), Located::Other);

        assert_eq!(board.locate_column_at_screen_point(Point::new(12, 4), &tree), Some(doing));
    }

    #[test]
    fn test_locate_skips_stale_card_identity() {
        let board = Board::new();
        let (mut tree, columns) = FakeTree::for_board(&board);
        let (todo, _, _) = ids(&board);
        tree.push(
            Rect::new(1, 4, 8, 2),
            Some(columns[0]),
            Located::Card(uuid::Uuid::new_v4()),
        );

        assert_eq!(board.locate_column_at_screen_point(Point::new(2, 4), &tree), Some(todo));
    }
}
