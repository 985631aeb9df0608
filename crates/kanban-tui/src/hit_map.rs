use kanban_core::{Point, Rect};
use kanban_domain::{CardId, ColumnId, ColumnLocatable, ElementId, HitTest, Located};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Root,
    TopBar,
    ThemeButton,
    Column(ColumnId),
    AddButton(ColumnId),
    CardList(ColumnId),
    Scrollbar(ColumnId),
    Card(CardId),
    CardLabel(CardId),
    DeleteButton(CardId),
    EditField(CardId),
    Footer,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    /// On-screen area, clipped to the enclosing viewport.
    pub rect: Rect,
    /// Top-left corner before clipping; above the viewport for a card that
    /// is partly scrolled out.
    pub origin: Point,
    pub parent: Option<ElementId>,
}

impl ColumnLocatable for Element {
    fn locate(&self) -> Located {
        match self.kind {
            ElementKind::Column(id) => Located::Column(id),
            ElementKind::Card(id) => Located::Card(id),
            _ => Located::Other,
        }
    }
}

/// Element tree recorded while drawing a frame, in paint order.
#[derive(Debug, Default)]
pub struct HitMap {
    elements: Vec<Element>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn push(&mut self, kind: ElementKind, rect: Rect, parent: Option<ElementId>) -> ElementId {
        self.push_with_origin(kind, rect, rect.origin(), parent)
    }

    pub fn push_with_origin(
        &mut self,
        kind: ElementKind,
        rect: Rect,
        origin: Point,
        parent: Option<ElementId>,
    ) -> ElementId {
        self.elements.push(Element {
            kind,
            rect,
            origin,
            parent,
        });
        self.elements.len() - 1
    }

    pub fn get(&self, element: ElementId) -> Option<&Element> {
        self.elements.get(element)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn find(&self, kind: ElementKind) -> Option<&Element> {
        self.elements.iter().find(|e| e.kind == kind)
    }

    /// First element, starting at `element` and walking up, that matches.
    pub fn enclosing<F>(&self, element: ElementId, matches: F) -> Option<&Element>
    where
        F: Fn(&ElementKind) -> bool,
    {
        std::iter::once(element)
            .chain(self.containment_ancestry(element))
            .filter_map(|id| self.get(id))
            .find(|e| matches(&e.kind))
    }
}

impl HitTest for HitMap {
    fn hit_test(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rposition(|e| !e.rect.is_empty() && e.rect.contains(point))
    }

    fn containment_ancestry(&self, element: ElementId) -> Vec<ElementId> {
        let mut chain = Vec::new();
        let mut current = self.get(element).and_then(|e| e.parent);
        while let Some(id) = current {
            chain.push(id);
            current = self.get(id).and_then(|e| e.parent);
        }
        chain
    }

    fn locatable(&self, element: ElementId) -> Option<&dyn ColumnLocatable> {
        self.get(element).map(|e| e as &dyn ColumnLocatable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_topmost_element_wins() {
        let mut map = HitMap::new();
        let root = map.push(ElementKind::Root, Rect::new(0, 0, 20, 10), None);
        let column = map.push(ElementKind::Column(Uuid::new_v4()), Rect::new(0, 0, 10, 10), Some(root));
        let button = map.push(ElementKind::Footer, Rect::new(2, 2, 3, 1), Some(column));

        assert_eq!(map.hit_test(Point::new(3, 2)), Some(button));
        assert_eq!(map.hit_test(Point::new(3, 5)), Some(column));
        assert_eq!(map.hit_test(Point::new(15, 5)), Some(root));
        assert_eq!(map.hit_test(Point::new(25, 5)), None);
        assert_eq!(map.containment_ancestry(button), vec![column, root]);
    }

    #[test]
    fn test_enclosing_card() {
        let card_id = Uuid::new_v4();
        let mut map = HitMap::new();
        let card = map.push_with_origin(
            ElementKind::Card(card_id),
            Rect::new(1, 3, 8, 1),
            Point::new(1, 1),
            None,
        );
        let label = map.push(ElementKind::CardLabel(card_id), Rect::new(1, 3, 6, 1), Some(card));

        let found = map
            .enclosing(label, |k| matches!(k, ElementKind::Card(_)))
            .unwrap();
        assert_eq!(found.origin, Point::new(1, 1));
        assert_eq!(map.get(label).unwrap().locate(), Located::Other);
        assert_eq!(found.locate(), Located::Card(card_id));
    }

    #[test]
    fn test_empty_rects_are_not_hit() {
        let mut map = HitMap::new();
        map.push(ElementKind::Root, Rect::new(0, 0, 10, 10), None);
        map.push(ElementKind::Footer, Rect::new(2, 2, 0, 1), Some(0));
        assert_eq!(map.hit_test(Point::new(2, 2)), Some(0));
    }
}
