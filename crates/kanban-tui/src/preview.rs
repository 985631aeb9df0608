use kanban_core::Point;
use kanban_domain::DragPreview;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    pub text: String,
    pub origin: Point,
}

/// Ghost card that follows the pointer while a drag is in progress. It is
/// painted last and never enters the hit map.
#[derive(Debug, Default)]
pub struct FloatingPreview {
    state: Option<PreviewState>,
}

impl FloatingPreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&PreviewState> {
        self.state.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_some()
    }
}

impl DragPreview for FloatingPreview {
    fn show_floating_preview(&mut self, text: &str, at: Point) {
        self.state = Some(PreviewState {
            text: text.to_string(),
            origin: at,
        });
    }

    fn move_floating_preview(&mut self, at: Point) {
        if let Some(state) = self.state.as_mut() {
            state.origin = at;
        }
    }

    fn destroy_floating_preview(&mut self) {
        self.state = None;
    }
}
